//! Validated search input.
//!
//! Everything the engine takes for granted about its input is checked here,
//! before any search work begins.

use crate::error::{Endpoint, PancakeError, Result};
use crate::grid::{Configuration, GridDims};

/// Smallest MAXLENGTH accepted from a user
pub const MIN_MAX_LEN: usize = 1;

/// A grid size plus two configurations that are known to be mutual
/// permutations of the right length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    dims: GridDims,
    initial: Configuration,
    goal: Configuration,
}

impl Problem {
    pub fn new(
        dims: GridDims,
        initial: impl Into<Configuration>,
        goal: impl Into<Configuration>,
    ) -> Result<Self> {
        if !dims.is_valid() {
            return Err(PancakeError::InvalidDimensions {
                height: dims.height,
                width: dims.width,
            });
        }

        let initial = initial.into();
        let goal = goal.into();
        let expected = dims.cell_count();
        for (which, config) in [(Endpoint::Initial, &initial), (Endpoint::Goal, &goal)] {
            if config.len() != expected {
                return Err(PancakeError::LengthMismatch {
                    which,
                    expected,
                    actual: config.len(),
                });
            }
        }

        if !goal.is_permutation_of(&initial) {
            return Err(PancakeError::NotPermutation);
        }

        Ok(Self { dims, initial, goal })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn initial(&self) -> &Configuration {
        &self.initial
    }

    pub fn goal(&self) -> &Configuration {
        &self.goal
    }
}

/// Reject a MAXLENGTH below [`MIN_MAX_LEN`].
pub fn check_max_len(max_len: usize) -> Result<usize> {
    if max_len < MIN_MAX_LEN {
        return Err(PancakeError::InvalidMaxLength(max_len));
    }
    Ok(max_len)
}
