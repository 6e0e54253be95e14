use cosmwasm_std::Uint256;
use sha2::{Digest, Sha256};

/// Size of a digest and of every proof segment.
pub const HASH_SIZE: usize = 32;

/// A SHA-256 digest: node identifiers and chunk hashes.
pub type Hash = [u8; HASH_SIZE];

/// Identifier of an empty tree.
pub const ZERO_HASH: Hash = [0; HASH_SIZE];

pub(crate) fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Boundaries travel as 32-byte big-endian integers, left-padded with zeros.
pub fn encode_boundary(boundary: &Uint256) -> [u8; HASH_SIZE] {
    boundary.to_be_bytes()
}

/// Inverse of [`encode_boundary`]. The caller guarantees a 32-byte segment.
pub(crate) fn decode_boundary(segment: &[u8; HASH_SIZE]) -> Uint256 {
    Uint256::from_be_bytes(*segment)
}

/// sha256(sha256(chunk_hash) || sha256(boundary))
pub(crate) fn leaf_hash(chunk_hash: &[u8], boundary: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(sha256(chunk_hash));
    hasher.update(sha256(boundary));
    hasher.finalize().into()
}

/// sha256(sha256(left) || sha256(right) || sha256(note))
///
/// Only the left child's max is committed; it is the split point a verifier
/// routes on.
pub(crate) fn branch_hash(left: &[u8], right: &[u8], note: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(sha256(left));
    hasher.update(sha256(right));
    hasher.update(sha256(note));
    hasher.finalize().into()
}
