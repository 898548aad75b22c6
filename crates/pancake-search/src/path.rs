//! Path reconstruction from a meeting point, and path verification.

use thiserror::Error;

use crate::error::{PancakeError, Result};
use crate::grid::{Configuration, FlipModel};
use crate::index::{HashIndex, Origin, RecordId};

/// Walk predecessor links from `id` back to its distance-0 root.
///
/// The returned chain starts at `id`'s configuration and ends at the root.
pub fn chain_to_root(index: &HashIndex, id: RecordId) -> Result<Vec<Configuration>> {
    let mut chain = Vec::new();
    let mut cursor = Some(id);
    while let Some(id) = cursor {
        let record = index
            .get(id)
            .ok_or_else(|| PancakeError::missing_record(id))?;
        chain.push(record.config.clone());
        cursor = record.predecessor;
    }
    Ok(chain)
}

/// Assemble the full initial-to-goal path from two boundary records that
/// are one flip apart and were discovered from opposite origins.
pub fn reconstruct(
    index: &HashIndex,
    near: RecordId,
    far: RecordId,
) -> Result<Vec<Configuration>> {
    let origin_of = |id: RecordId| {
        index
            .get(id)
            .map(|r| r.origin)
            .ok_or_else(|| PancakeError::missing_record(id))
    };

    let (from_initial, from_goal) = match origin_of(near)? {
        Origin::FromInitial => (near, far),
        Origin::FromGoal => (far, near),
    };
    debug_assert_eq!(origin_of(from_goal)?, Origin::FromGoal);

    let mut path = chain_to_root(index, from_initial)?;
    path.reverse();
    path.extend(chain_to_root(index, from_goal)?);
    Ok(path)
}

/// Why a path failed verification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path has {edges} flips, more than the allowed {max_len}")]
    TooLong { edges: usize, max_len: usize },

    #[error("step {step} ({from} -> {to}) is not a single flip")]
    NotAFlip {
        step: usize,
        from: Configuration,
        to: Configuration,
    },
}

/// Check that `path` is non-empty, within `max_len` flips, and that every
/// consecutive pair differs by exactly one legal flip.
pub fn verify_path(
    model: &FlipModel,
    path: &[Configuration],
    max_len: usize,
) -> std::result::Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    let edges = path.len() - 1;
    if edges > max_len {
        return Err(PathError::TooLong { edges, max_len });
    }
    for (step, pair) in path.windows(2).enumerate() {
        if model.flip_between(&pair[0], &pair[1]).is_none() {
            return Err(PathError::NotAFlip {
                step,
                from: pair[0].clone(),
                to: pair[1].clone(),
            });
        }
    }
    Ok(())
}
