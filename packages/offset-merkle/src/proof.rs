use cosmwasm_std::Uint256;

use crate::config::Config;
use crate::error::ProofError;
use crate::hash::{branch_hash, decode_boundary, leaf_hash, Hash, HASH_SIZE};
use crate::logging::{debug, trace};
use crate::Result;

/// Number of segments disclosing a branch: left id, right id, note.
const BRANCH_SEGMENTS: usize = 3;
/// Number of segments disclosing a leaf: chunk hash, boundary.
const LEAF_SEGMENTS: usize = 2;

/// A chunk proven to lie within `[left, right)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvenChunk {
    pub chunk_hash: Hash,
    pub left: Uint256,
    pub right: Uint256,
}

impl ProvenChunk {
    pub fn contains(&self, offset: Uint256) -> bool {
        self.left <= offset && offset < self.right
    }

    /// Width of the proven interval, always at least 1.
    pub fn width(&self) -> Uint256 {
        self.right - self.left
    }
}

/// Verifies `path` against `root` for the offset `dest`, using the default
/// [`Config`].
///
/// `dest` is clamped into `[0, right_bound)` first. On success the disclosed
/// chunk hash is returned with the interval it was proven to occupy.
pub fn validate_path(
    root: &Hash,
    dest: Uint256,
    right_bound: Uint256,
    path: &[u8],
) -> Result<ProvenChunk> {
    validate_path_with_config(&Config::default(), root, dest, right_bound, path)
}

pub fn validate_path_with_config(
    config: &Config,
    root: &Hash,
    dest: Uint256,
    right_bound: Uint256,
    path: &[u8],
) -> Result<ProvenChunk> {
    config.validate()?;
    if right_bound.is_zero() {
        return Err(ProofError::InvalidRightBound {});
    }
    let dest = if dest >= right_bound {
        right_bound - Uint256::one()
    } else {
        dest
    };

    let segments = split_segments(path)?;
    let max_segments = config.max_path_depth as usize * BRANCH_SEGMENTS + LEAF_SEGMENTS;
    if segments.len() > max_segments {
        return Err(ProofError::PathTooDeep {
            max: config.max_path_depth,
            got: (segments.len() - LEAF_SEGMENTS) / BRANCH_SEGMENTS,
        });
    }

    let mut expected = *root;
    let mut left = Uint256::zero();
    let mut right = right_bound;
    let mut depth = 0;
    let mut rest = segments.as_slice();

    loop {
        match rest {
            [chunk_hash, boundary] => {
                let id = leaf_hash(chunk_hash, boundary);
                if id != expected {
                    debug!("validate_path: leaf hash mismatch at depth {depth}");
                    return Err(ProofError::hash_mismatch(depth, &expected, &id));
                }
                // `left <= dest < right_bound`, so `left + 1` cannot overflow
                let right = right
                    .min(decode_boundary(boundary))
                    .max(left + Uint256::one());
                trace!("validate_path: proven interval [{left}, {right}) at depth {depth}");
                return Ok(ProvenChunk {
                    chunk_hash: *chunk_hash,
                    left,
                    right,
                });
            }
            [left_id, right_id, note, tail @ ..] => {
                let id = branch_hash(left_id, right_id, note);
                if id != expected {
                    debug!("validate_path: branch hash mismatch at depth {depth}");
                    return Err(ProofError::hash_mismatch(depth, &expected, &id));
                }
                let note = decode_boundary(note);
                if dest < note {
                    right = right.min(note);
                    expected = *left_id;
                } else {
                    left = left.max(note);
                    expected = *right_id;
                }
                trace!("validate_path: note {note}, dest {dest}, interval [{left}, {right})");
                rest = tail;
                depth += 1;
            }
            _ => {
                debug!("validate_path: proof ended after {depth} branches");
                return Err(ProofError::InsufficientProof {
                    remaining: rest.len(),
                });
            }
        }
    }
}

fn split_segments(path: &[u8]) -> Result<Vec<[u8; HASH_SIZE]>> {
    if path.len() % HASH_SIZE != 0 {
        return Err(ProofError::MalformedProof {
            len: path.len(),
            segment: HASH_SIZE,
        });
    }
    Ok(path
        .chunks_exact(HASH_SIZE)
        .map(|chunk| {
            let mut segment = [0u8; HASH_SIZE];
            segment.copy_from_slice(chunk);
            segment
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::encode_boundary;
    use crate::node::Element;
    use crate::tree::MerkleTree;
    use assert_matches::assert_matches;

    fn chunk(i: usize) -> Hash {
        let mut bs = [0u8; HASH_SIZE];
        bs[i] = i as u8;
        bs
    }

    fn elements(count: usize) -> Vec<Element> {
        (0..count)
            .map(|i| Element::new(chunk(i), (i + 1000) as u64))
            .collect()
    }

    fn check_all(count: usize) {
        let tree = MerkleTree::build(&elements(count));
        let right_bound = Uint256::from((count + 1000) as u64);
        for i in 0..count {
            let target = Uint256::from((i + 999) as u64);
            let path = tree.generate_path(target).unwrap();
            let proven = validate_path(tree.root(), target, right_bound, &path).unwrap();
            assert!(proven.contains(target), "target {target} not in {proven:?}");
            assert_eq!(proven.chunk_hash, chunk(i), "leaf incorrect");
        }
    }

    #[test]
    fn test_simple_1_item() {
        check_all(1);
    }

    #[test]
    fn test_simple_3_items() {
        check_all(3);
    }

    #[test]
    fn test_simple_up_to_17_items() {
        for count in 2..=17 {
            check_all(count);
        }
    }

    #[test]
    fn test_single_leaf_interval() {
        let es = elements(1);
        let tree = MerkleTree::build(&es);
        let path = tree.generate_path(Uint256::zero()).unwrap();
        assert_eq!(path.len(), 64);

        let proven = validate_path(
            tree.root(),
            Uint256::from(500u64),
            Uint256::from(2000u64),
            &path,
        )
        .unwrap();
        assert_eq!(
            proven,
            ProvenChunk {
                chunk_hash: es[0].chunk_hash,
                left: Uint256::zero(),
                right: Uint256::from(1000u64),
            }
        );
        assert_eq!(proven.width(), Uint256::from(1000u64));
    }

    #[test]
    fn test_intervals_are_tightened() {
        let tree = MerkleTree::build(&elements(4));
        let right_bound = Uint256::from(1004u64);
        // leaf 2 covers [1001, 1002)
        let dest = Uint256::from(1001u64);
        let path = tree.generate_path(dest).unwrap();
        let proven = validate_path(tree.root(), dest, right_bound, &path).unwrap();
        assert_eq!(proven.chunk_hash, chunk(2));
        assert_eq!(proven.left, Uint256::from(1001u64));
        assert_eq!(proven.right, Uint256::from(1002u64));
        assert_eq!(proven.width(), Uint256::one());
    }

    #[test]
    fn test_dest_is_clamped() {
        let tree = MerkleTree::build(&elements(3));
        let right_bound = Uint256::from(1003u64);

        // beyond the right bound proves the last leaf
        let path = tree.generate_path(Uint256::MAX).unwrap();
        let proven = validate_path(tree.root(), Uint256::MAX, right_bound, &path).unwrap();
        assert_eq!(proven.chunk_hash, chunk(2));
        assert_eq!(proven.left, Uint256::from(1001u64));
        assert_eq!(proven.right, Uint256::from(1002u64));

        // the same path validates for any dest at or past the bound
        let proven_at_bound =
            validate_path(tree.root(), right_bound, right_bound, &path).unwrap();
        assert_eq!(proven_at_bound, proven);
    }

    #[test]
    fn test_unclamped_generation_can_disagree() {
        // The generator routes on the raw dest while the validator clamps
        // it, so a dest past a tight right bound targets different leaves.
        let tree = MerkleTree::build(&elements(3));
        let path = tree.generate_path(Uint256::from(5000u64)).unwrap();
        let err = validate_path(
            tree.root(),
            Uint256::from(5000u64),
            Uint256::from(1001u64),
            &path,
        )
        .unwrap_err();
        assert_matches!(err, ProofError::HashMismatch { depth: 1, .. });
    }

    #[test]
    fn test_interval_never_empty() {
        // Unordered input: the right leaf's boundary lies below the split.
        let es = vec![Element::new([1; 32], 10u64), Element::new([2; 32], 5u64)];
        let tree = MerkleTree::build(&es);
        let dest = Uint256::from(12u64);
        let path = tree.generate_path(dest).unwrap();
        let proven = validate_path(tree.root(), dest, Uint256::from(20u64), &path).unwrap();
        assert_eq!(proven.chunk_hash, [2; 32]);
        assert_eq!(proven.left, Uint256::from(10u64));
        assert_eq!(proven.right, Uint256::from(11u64));
    }

    #[test]
    fn test_tampered_proof_rejected() {
        let tree = MerkleTree::build(&elements(5));
        let right_bound = Uint256::from(1005u64);
        let dest = Uint256::from(1002u64);
        let path = tree.generate_path(dest).unwrap();
        assert!(validate_path(tree.root(), dest, right_bound, &path).is_ok());

        for i in 0..path.len() {
            let mut tampered = path.clone();
            tampered[i] ^= 0x01;
            let err = validate_path(tree.root(), dest, right_bound, &tampered).unwrap_err();
            assert_matches!(err, ProofError::HashMismatch { depth, .. } => {
                assert_eq!(depth, i / 96, "byte {i}");
            });
        }
    }

    #[test]
    fn test_wrong_root_rejected() {
        let tree = MerkleTree::build(&elements(2));
        let path = tree.generate_path(Uint256::zero()).unwrap();
        let err = validate_path(&[9; 32], Uint256::zero(), Uint256::from(1002u64), &path)
            .unwrap_err();
        assert_eq!(
            err,
            ProofError::HashMismatch {
                depth: 0,
                expected: hex::encode([9; 32]),
                actual: hex::encode(tree.root()),
            }
        );
    }

    #[test]
    fn test_malformed_proof() {
        let err = validate_path(&[0; 32], Uint256::zero(), Uint256::one(), &[0; 65]).unwrap_err();
        assert_eq!(
            err,
            ProofError::MalformedProof {
                len: 65,
                segment: 32
            }
        );
        assert!(err.is_malformed());
        assert!(err
            .to_string()
            .starts_with("Malformed proof: length 65 is not a multiple of 32 bytes"));
    }

    #[test]
    fn test_insufficient_proof() {
        // empty and single-segment proofs
        for len in [0, 32] {
            let err = validate_path(&[0; 32], Uint256::zero(), Uint256::one(), &vec![0; len])
                .unwrap_err();
            assert_eq!(
                err,
                ProofError::InsufficientProof {
                    remaining: len / 32
                }
            );
        }

        // a valid branch disclosure followed by nothing
        let tree = MerkleTree::build(&elements(2));
        let path = tree.generate_path(Uint256::zero()).unwrap();
        let dest = Uint256::zero();
        let right_bound = Uint256::from(1002u64);
        let err = validate_path(tree.root(), dest, right_bound, &path[..96]).unwrap_err();
        assert_eq!(err, ProofError::InsufficientProof { remaining: 0 });

        // or by a single segment
        let err = validate_path(tree.root(), dest, right_bound, &path[..128]).unwrap_err();
        assert_eq!(err, ProofError::InsufficientProof { remaining: 1 });
    }

    #[test]
    fn test_zero_right_bound() {
        let tree = MerkleTree::build(&elements(1));
        let path = tree.generate_path(Uint256::zero()).unwrap();
        assert_eq!(
            validate_path(tree.root(), Uint256::zero(), Uint256::zero(), &path),
            Err(ProofError::InvalidRightBound {})
        );
    }

    #[test]
    fn test_path_too_deep() {
        let config = Config { max_path_depth: 1 };
        let tree = MerkleTree::build(&elements(4));
        let dest = Uint256::from(1000u64);
        let right_bound = Uint256::from(1004u64);
        let path = tree.generate_path(dest).unwrap();

        assert_eq!(
            validate_path_with_config(&config, tree.root(), dest, right_bound, &path),
            Err(ProofError::PathTooDeep { max: 1, got: 2 })
        );
        let config = Config { max_path_depth: 2 };
        assert!(validate_path_with_config(&config, tree.root(), dest, right_bound, &path).is_ok());
    }

    #[test]
    fn test_forged_leaf_boundary_rejected() {
        // claiming a wider range for the same chunk changes the leaf id
        let es = elements(1);
        let tree = MerkleTree::build(&es);
        let mut forged = es[0].chunk_hash.to_vec();
        forged.extend_from_slice(&encode_boundary(&Uint256::from(5000u64)));
        let err = validate_path(tree.root(), Uint256::zero(), Uint256::from(6000u64), &forged)
            .unwrap_err();
        assert_matches!(err, ProofError::HashMismatch { depth: 0, .. });
    }
}
