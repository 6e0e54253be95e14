//! Merkle tree over ordered, offset-tagged chunks.
//!
//! Every leaf commits to a chunk hash and the offset at which that chunk
//! ends. Branches commit to both children and to the largest offset of their
//! left subtree, which lets a verifier holding only the root check that a
//! chunk occupies a given offset interval of the committed data.

mod config;
mod error;
mod hash;
mod logging;
mod msg;
mod node;
mod proof;
mod tree;

pub use self::config::{Config, DEFAULT_MAX_PATH_DEPTH};
pub use self::error::{ProofError, TreeError};
pub use self::hash::{encode_boundary, Hash, HASH_SIZE, ZERO_HASH};
pub use self::msg::RangeProof;
pub use self::node::{Branch, Element, Node};
pub use self::proof::{validate_path, validate_path_with_config, ProvenChunk};
pub use self::tree::{build, generate_path, MerkleTree, NodeSet};

pub use cosmwasm_std::Uint256;

pub type Result<T> = std::result::Result<T, ProofError>;
