use thiserror::Error;

/// Reasons a proof is rejected by the validator.
///
/// A rejected proof is an expected outcome (stale commitment, adversarial
/// prover) and every variant is recoverable at the call site.
#[derive(Error, Debug, PartialEq)]
pub enum ProofError {
    #[error("Malformed proof: length {len} is not a multiple of {segment} bytes")]
    MalformedProof { len: usize, segment: usize },
    #[error("Insufficient proof: expected at least 2 segments, got {remaining}")]
    InsufficientProof { remaining: usize },
    #[error("Hash mismatch at depth {depth}: wanted {expected}, got {actual}")]
    HashMismatch {
        depth: usize,
        expected: String,
        actual: String,
    },
    #[error("Right bound must be greater than 0")]
    InvalidRightBound {},
    #[error("Invalid path length {0}: expected 96 * depth + 64 bytes")]
    InvalidPathLength(usize),
    #[error("Invalid root hash: expected 32 bytes, got {0}")]
    InvalidRootLength(usize),
    #[error("Expected no more than {max} branch levels, got {got}")]
    PathTooDeep { max: u32, got: usize },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl ProofError {
    pub(crate) fn hash_mismatch(depth: usize, expected: &[u8], actual: &[u8]) -> Self {
        ProofError::HashMismatch {
            depth,
            expected: hex::encode(expected),
            actual: hex::encode(actual),
        }
    }

    /// Whether the proof bytes could not even be split into disclosures.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ProofError::MalformedProof { .. }
                | ProofError::InsufficientProof { .. }
                | ProofError::InvalidPathLength(_)
                | ProofError::PathTooDeep { .. }
        )
    }
}

/// Failures of the builder/generator pairing.
///
/// A tree produced by [`crate::MerkleTree::build`] never triggers
/// `NodeNotFound`; seeing it means the node set and root were not built
/// together.
#[derive(Error, Debug, PartialEq)]
pub enum TreeError {
    #[error("Node {0} not found in tree")]
    NodeNotFound(String),
    #[error("Cannot generate a path in an empty tree")]
    EmptyTree {},
    #[error("Boundary of element #{index} is not greater than the previous one")]
    UnorderedBoundaries { index: usize },
}
