//! Bounded bidirectional search over two-dimensional pancake flips.
//!
//! Given a grid size, a flip budget and two configurations that are
//! permutations of each other, this crate finds a sequence of at most
//! `max_len` top-left-anchored flips turning one into the other, or reports
//! that none exists within the budget.

pub mod error;
pub mod frontier;
pub mod grid;
pub mod index;
pub mod path;
pub mod problem;
pub mod search;

// Re-export main types
pub use error::{Endpoint, PancakeError, Result, USAGE};
pub use frontier::FrontierQueue;
pub use grid::{Configuration, Flip, FlipModel, GridDims, Orientation, MAX_SIDE, MIN_SIDE};
pub use index::{HashIndex, InsertError, Origin, Record, RecordId, DEFAULT_BUCKETS};
pub use path::{reconstruct, verify_path, PathError};
pub use problem::{check_max_len, Problem, MIN_MAX_LEN};
pub use search::{bidirectional_search, find_path, Meeting, SearchConfig, SearchOutcome, SearchStats};
