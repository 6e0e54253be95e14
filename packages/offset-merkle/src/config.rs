use cosmwasm_schema::cw_serde;

use crate::error::ProofError;

/// A tree over at most 2^256 strictly increasing boundaries is never deeper
/// than this.
pub const DEFAULT_MAX_PATH_DEPTH: u32 = 256;

/// Validator limits.
#[cw_serde]
pub struct Config {
    /// Maximum number of branch disclosures accepted in a single proof.
    /// Longer proofs are rejected before any hashing.
    pub max_path_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_path_depth: DEFAULT_MAX_PATH_DEPTH,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ProofError> {
        if self.max_path_depth == 0 {
            return Err(ProofError::InvalidConfig(
                "max_path_depth must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
