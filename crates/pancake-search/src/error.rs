//! Error types for problem validation and the search engine.
//!
//! The first group of variants are precondition failures, reported before
//! any search work begins. `InternalIndexFault` means the engine broke its
//! own bookkeeping and is never a user error. Running out of flips without
//! connecting the two configurations is not an error at all: it is an `Ok`
//! outcome with an empty path.

use thiserror::Error;

use crate::grid::{MAX_SIDE, MIN_SIDE};
use crate::index::{InsertError, RecordId};
use crate::path::PathError;

/// Command line accepted by the `pancake` binary
pub const USAGE: &str = "pancake [HEIGHT WIDTH] MAXLENGTH INITIAL GOAL";

/// Which of the two input configurations a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Initial,
    Goal,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Initial => f.write_str("INITIAL"),
            Endpoint::Goal => f.write_str("GOAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PancakeError {
    #[error("usage: {}", USAGE)]
    Usage,

    #[error("invalid {name} {value:?}")]
    InvalidArgument { name: &'static str, value: String },

    #[error(
        "invalid dimensions {height}x{width}: each side must be in [{}, {}]",
        MIN_SIDE,
        MAX_SIDE
    )]
    InvalidDimensions { height: usize, width: usize },

    #[error("strlen({which}) = {actual} != HEIGHT*WIDTH = {expected}")]
    LengthMismatch {
        which: Endpoint,
        expected: usize,
        actual: usize,
    },

    #[error("GOAL is not a permutation of INITIAL")]
    NotPermutation,

    #[error("invalid MAXLENGTH {0}: must be at least 1")]
    InvalidMaxLength(usize),

    #[error("internal index fault: {config}")]
    InternalIndexFault { config: String },

    #[error("search produced an invalid path: {0}")]
    CorruptPath(#[from] PathError),
}

impl PancakeError {
    /// True for the variants a caller can fix by changing its input.
    pub fn is_precondition(&self) -> bool {
        !matches!(
            self,
            PancakeError::InternalIndexFault { .. } | PancakeError::CorruptPath(_)
        )
    }

    /// Fault for a record handle the index no longer resolves.
    pub fn missing_record(id: RecordId) -> Self {
        PancakeError::InternalIndexFault {
            config: format!("<record #{}>", id.index()),
        }
    }
}

impl From<InsertError> for PancakeError {
    fn from(err: InsertError) -> Self {
        PancakeError::InternalIndexFault {
            config: format!("{} ({})", err.record().config, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, PancakeError>;
