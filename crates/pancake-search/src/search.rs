//! Bidirectional breadth-first search over single flips.
//!
//! Both origins share one FIFO frontier, so the queue stays ordered by
//! distance across the two sides. A configuration belongs to whichever side
//! discovers it first. The search stops at the first edge joining the two
//! sides whose combined length fits in `max_len`, or when the frontier runs
//! dry.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, info_span, trace};

use crate::error::{PancakeError, Result};
use crate::frontier::FrontierQueue;
use crate::grid::{Configuration, FlipModel, GridDims};
use crate::index::{HashIndex, Origin, Record, RecordId, DEFAULT_BUCKETS};
use crate::path::reconstruct;
use crate::problem::Problem;

/// Configuration for the search
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of flips in a returned path
    pub max_len: usize,
    /// Number of chains in the hash index
    pub bucket_count: usize,
}

impl SearchConfig {
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len,
            ..Self::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_len: 16,
            bucket_count: DEFAULT_BUCKETS,
        }
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Configurations whose neighbours were generated
    pub expanded: usize,
    /// Neighbour configurations generated
    pub generated: usize,
    /// Configurations recorded, seeds included
    pub discovered: usize,
    /// Neighbours dropped because their side had already seen them
    pub duplicates: usize,
    /// Cross-side contacts rejected for exceeding the flip budget
    pub over_budget: usize,
    /// Dequeued configurations not expanded because they sit at `max_len`
    pub pruned: usize,
    pub peak_frontier: usize,
    pub time_elapsed_ms: u64,
}

/// Where the two sides met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub from_initial: usize,
    pub from_goal: usize,
}

impl Meeting {
    /// Flips in the path through this meeting
    pub fn flips(&self) -> usize {
        self.from_initial + self.from_goal + 1
    }
}

/// Result of a search. An empty path means no path within `max_len` exists.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub path: Vec<Configuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting: Option<Meeting>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of flips in the path, if one was found
    pub fn flips(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

/// Search a validated problem.
pub fn find_path(problem: &Problem, config: &SearchConfig) -> Result<SearchOutcome> {
    bidirectional_search(
        problem.dims(),
        problem.initial().clone(),
        problem.goal().clone(),
        config,
    )
}

/// Run the search on raw configurations.
///
/// The caller guarantees `initial` and `goal` both have `dims.cell_count()`
/// cells and are permutations of each other; [`Problem::new`] checks this.
pub fn bidirectional_search(
    dims: GridDims,
    initial: Configuration,
    goal: Configuration,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    let _span = info_span!(
        "bidirectional_search",
        height = dims.height,
        width = dims.width,
        max_len = config.max_len
    )
    .entered();
    let start_time = Instant::now();
    let mut stats = SearchStats::default();

    if initial == goal {
        debug!("initial equals goal");
        stats.discovered = 1;
        stats.time_elapsed_ms = start_time.elapsed().as_millis() as u64;
        return Ok(SearchOutcome {
            path: vec![initial],
            meeting: None,
            stats,
        });
    }

    let model = FlipModel::new(dims);
    let mut index = HashIndex::with_buckets(config.bucket_count);
    let mut frontier = FrontierQueue::new();

    for (seed, origin) in [(initial, Origin::FromInitial), (goal, Origin::FromGoal)] {
        let id = index.try_insert(Record::root(seed, origin))?;
        frontier.enqueue(id);
    }
    stats.discovered = index.len();
    debug!(neighbors_per_expansion = model.neighbor_count(), "seeded both origins");

    let mut meeting: Option<(RecordId, RecordId)> = None;
    let mut level = 0;

    'search: while let Some(id) = frontier.dequeue() {
        let (distance, origin) = index
            .get(id)
            .map(|r| (r.distance, r.origin))
            .ok_or_else(|| PancakeError::missing_record(id))?;

        if distance > level {
            level = distance;
            debug!(
                level,
                frontier = frontier.len() + 1,
                discovered = index.len(),
                "entering level"
            );
        }

        if distance >= config.max_len {
            stats.pruned += 1;
            continue;
        }
        stats.expanded += 1;

        // Neighbour generation reads this while the index is being extended.
        let current = match index.get(id) {
            Some(record) => record.config.clone(),
            None => return Err(PancakeError::missing_record(id)),
        };

        for neighbor in model.neighbors(&current) {
            stats.generated += 1;

            let Some(existing_id) = index.find(&neighbor) else {
                let new_id = index.try_insert(Record::successor(neighbor, id, distance, origin))?;
                frontier.enqueue(new_id);
                continue;
            };

            let existing = index
                .get(existing_id)
                .ok_or_else(|| PancakeError::missing_record(existing_id))?;
            if existing.origin == origin {
                // Already reached from this side no later than now.
                stats.duplicates += 1;
            } else if existing.distance + distance < config.max_len {
                trace!(near = %current, far = %existing.config, "sides met");
                meeting = Some((id, existing_id));
                break 'search;
            } else {
                stats.over_budget += 1;
            }
        }
    }

    stats.discovered = index.len();
    stats.peak_frontier = frontier.high_water();

    let Some((near, far)) = meeting else {
        stats.time_elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            expanded = stats.expanded,
            discovered = stats.discovered,
            "no path within {} flips",
            config.max_len
        );
        return Ok(SearchOutcome {
            path: Vec::new(),
            meeting: None,
            stats,
        });
    };

    let path = reconstruct(&index, near, far)?;
    let meeting = meeting_depths(&index, near, far)?;
    stats.time_elapsed_ms = start_time.elapsed().as_millis() as u64;
    info!(
        flips = meeting.flips(),
        expanded = stats.expanded,
        discovered = stats.discovered,
        "path found"
    );

    Ok(SearchOutcome {
        path,
        meeting: Some(meeting),
        stats,
    })
}

fn meeting_depths(index: &HashIndex, near: RecordId, far: RecordId) -> Result<Meeting> {
    let near = index
        .get(near)
        .ok_or_else(|| PancakeError::missing_record(near))?;
    let far = index
        .get(far)
        .ok_or_else(|| PancakeError::missing_record(far))?;
    let (from_initial, from_goal) = match near.origin {
        Origin::FromInitial => (near.distance, far.distance),
        Origin::FromGoal => (far.distance, near.distance),
    };
    Ok(Meeting {
        from_initial,
        from_goal,
    })
}
