//! Chained hash index from configuration to search record.
//!
//! The index is the sole owner of every discovered configuration. Records
//! live in an append-only arena and are addressed by [`RecordId`]; buckets
//! and the frontier only ever hold ids, so a configuration is stored exactly
//! once no matter how many places refer to it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::grid::Configuration;

/// Default number of chains, a prime near 100k
pub const DEFAULT_BUCKETS: usize = 100_003;

/// Large odd multiplier applied to the accumulated key bits
const HASH_MULTIPLIER: u64 = 3_141_592_653_589_793_239;

/// Which search origin discovered a configuration first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    FromInitial,
    FromGoal,
}

impl Origin {
    pub fn opposite(self) -> Origin {
        match self {
            Origin::FromInitial => Origin::FromGoal,
            Origin::FromGoal => Origin::FromInitial,
        }
    }
}

/// Stable handle to a record stored in a [`HashIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u32);

impl RecordId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Search metadata for one discovered configuration. Never mutated once
/// inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub config: Configuration,
    pub predecessor: Option<RecordId>,
    pub distance: usize,
    pub origin: Origin,
}

impl Record {
    /// A distance-0 record for one of the two search origins
    pub fn root(config: Configuration, origin: Origin) -> Self {
        Self {
            config,
            predecessor: None,
            distance: 0,
            origin,
        }
    }

    /// A record one step further from the origin than its parent, which
    /// sits at `parent_distance` on side `origin`
    pub fn successor(
        config: Configuration,
        parent_id: RecordId,
        parent_distance: usize,
        origin: Origin,
    ) -> Self {
        Self {
            config,
            predecessor: Some(parent_id),
            distance: parent_distance + 1,
            origin,
        }
    }
}

/// A record the index refused to store; the record is handed back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("configuration already recorded")]
    Duplicate(Record),

    #[error("record handles exhausted")]
    Exhausted(Record),
}

impl InsertError {
    pub fn record(&self) -> &Record {
        match self {
            InsertError::Duplicate(record) | InsertError::Exhausted(record) => record,
        }
    }

    pub fn into_record(self) -> Record {
        match self {
            InsertError::Duplicate(record) | InsertError::Exhausted(record) => record,
        }
    }
}

type Chain = SmallVec<[RecordId; 2]>;

/// Fixed-size chained hash map owning its records.
#[derive(Debug)]
pub struct HashIndex {
    buckets: Vec<Chain>,
    records: Vec<Option<Record>>,
    live: usize,
    record_limit: u32,
}

impl HashIndex {
    /// Preallocate `bucket_count` empty chains (at least one).
    pub fn with_buckets(bucket_count: usize) -> Self {
        Self {
            buckets: vec![Chain::new(); bucket_count.max(1)],
            records: Vec::new(),
            live: 0,
            record_limit: u32::MAX,
        }
    }

    /// Cap the number of records ever allocated (removed ones included).
    pub fn with_record_limit(mut self, limit: u32) -> Self {
        self.record_limit = limit;
        self
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of records currently stored
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Store `record` under its configuration.
    ///
    /// On a duplicate key, or once every handle is used, the index is left
    /// unchanged and the rejected record is handed back to the caller.
    pub fn try_insert(&mut self, record: Record) -> Result<RecordId, InsertError> {
        let bucket = self.bucket_of(record.config.cells());
        if self.find_in(bucket, record.config.cells()).is_some() {
            return Err(InsertError::Duplicate(record));
        }
        let id = match u32::try_from(self.records.len()) {
            Ok(next) if next < self.record_limit => RecordId(next),
            _ => return Err(InsertError::Exhausted(record)),
        };
        self.records.push(Some(record));
        self.buckets[bucket].push(id);
        self.live += 1;
        Ok(id)
    }

    /// Returns false, leaving the index untouched, if the key is already present.
    pub fn insert(&mut self, record: Record) -> bool {
        self.try_insert(record).is_ok()
    }

    pub fn find(&self, config: &Configuration) -> Option<RecordId> {
        let bucket = self.bucket_of(config.cells());
        self.find_in(bucket, config.cells())
    }

    pub fn lookup(&self, config: &Configuration) -> Option<&Record> {
        self.find(config).and_then(|id| self.get(id))
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id.index()).and_then(Option::as_ref)
    }

    /// Delete the entry for `config`; no-op when absent.
    pub fn remove(&mut self, config: &Configuration) -> Option<Record> {
        let bucket = self.bucket_of(config.cells());
        let pos = self.buckets[bucket]
            .iter()
            .position(|&id| self.key_matches(id, config.cells()))?;
        let id = self.buckets[bucket].remove(pos);
        self.live -= 1;
        self.records[id.index()].take()
    }

    /// Release every record and empty all chains, keeping the bucket array.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.records.clear();
        self.live = 0;
    }

    /// Length of the longest chain, for spread diagnostics
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(|chain| chain.len()).max().unwrap_or(0)
    }

    fn find_in(&self, bucket: usize, key: &[char]) -> Option<RecordId> {
        self.buckets[bucket]
            .iter()
            .copied()
            .find(|&id| self.key_matches(id, key))
    }

    fn key_matches(&self, id: RecordId, key: &[char]) -> bool {
        self.get(id).is_some_and(|r| r.config.cells() == key)
    }

    fn bucket_of(&self, key: &[char]) -> usize {
        (hash_key(key) % self.buckets.len() as u64) as usize
    }
}

impl Default for HashIndex {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }
}

/// XOR each character into an accumulator at a rotating shift, then spread
/// with a large odd multiplier.
fn hash_key(key: &[char]) -> u64 {
    let mut sum: u64 = 0;
    let mut shift = 0u32;
    for &c in key {
        sum ^= u64::from(c).wrapping_shl(shift);
        shift += 7;
        if shift >= 57 {
            shift -= 57;
        }
    }
    HASH_MULTIPLIER.wrapping_mul(sum)
}
