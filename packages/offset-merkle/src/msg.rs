use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint256};

use crate::config::Config;
use crate::error::ProofError;
use crate::hash::{Hash, HASH_SIZE};
use crate::proof::{validate_path_with_config, ProvenChunk};

/// Size of one branch disclosure in a path.
const BRANCH_SIZE: usize = 3 * HASH_SIZE;
/// Size of the terminating leaf disclosure.
const LEAF_SIZE: usize = 2 * HASH_SIZE;

/// A self-contained range proof: everything a verifier needs besides trust
/// in `root`.
#[cw_serde]
pub struct RangeProof {
    /// Root commitment of the tree.
    pub root: Binary,
    /// Offset the proof was generated for.
    pub dest: Uint256,
    /// Total size the verifier asserts for the committed data.
    pub right_bound: Uint256,
    /// Concatenated disclosures, root to leaf.
    pub path: Binary,
}

impl RangeProof {
    pub fn root_hash(&self) -> Result<Hash, ProofError> {
        Hash::try_from(self.root.as_slice())
            .map_err(|_| ProofError::InvalidRootLength(self.root.len()))
    }

    /// Number of branch disclosures in the path.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(LEAF_SIZE) / BRANCH_SIZE
    }

    /// Performs basic validation with the default [`Config`].
    ///
    /// Checks the shape of the proof only; no hashing is done.
    pub fn validate_basic(&self) -> Result<(), ProofError> {
        self.validate_basic_with_config(&Config::default())
    }

    pub fn validate_basic_with_config(&self, config: &Config) -> Result<(), ProofError> {
        config.validate()?;
        self.root_hash()?;
        if self.right_bound.is_zero() {
            return Err(ProofError::InvalidRightBound {});
        }
        let len = self.path.len();
        if len < LEAF_SIZE || (len - LEAF_SIZE) % BRANCH_SIZE != 0 {
            return Err(ProofError::InvalidPathLength(len));
        }
        if self.depth() > config.max_path_depth as usize {
            return Err(ProofError::PathTooDeep {
                max: config.max_path_depth,
                got: self.depth(),
            });
        }
        Ok(())
    }

    /// Verifies the proof with the default [`Config`].
    pub fn verify(&self) -> Result<ProvenChunk, ProofError> {
        self.verify_with_config(&Config::default())
    }

    pub fn verify_with_config(&self, config: &Config) -> Result<ProvenChunk, ProofError> {
        self.validate_basic_with_config(config)?;
        validate_path_with_config(
            config,
            &self.root_hash()?,
            self.dest,
            self.right_bound,
            &self.path,
        )
    }
}
