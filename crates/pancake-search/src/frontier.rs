//! FIFO frontier shared by both search origins.
//!
//! The engine schedules [`RecordId`](crate::index::RecordId)s here, never
//! configurations, so the queue owns nothing beyond the handles themselves.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct FrontierQueue<T> {
    entries: VecDeque<T>,
    high_water: usize,
}

impl<T> FrontierQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            high_water: 0,
        }
    }

    pub fn enqueue(&mut self, value: T) {
        self.entries.push_back(value);
        self.high_water = self.high_water.max(self.entries.len());
    }

    /// Oldest pending value, or `None` when the queue is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        self.entries.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Largest length the queue has reached
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Drop every pending value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for FrontierQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
