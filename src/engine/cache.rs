//! Bounded decision cache
//!
//! Maps normalized permission strings to their implication decision. The
//! cache is deliberately not an LRU and has no TTL: once the bound is hit,
//! new entries are simply not stored, and the whole cache is dropped on any
//! grant or clear. Grant churn costs hit-rate, never staleness.

use std::collections::HashMap;

/// Maximum number of cached decisions per engine.
pub const CACHE_MAX_SIZE: usize = 10_000;

#[derive(Debug)]
pub(crate) struct DecisionCache {
    entries: HashMap<String, bool>,
    capacity: usize,
}

impl DecisionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
        }
    }

    pub fn get(&self, permission: &str) -> Option<bool> {
        self.entries.get(permission).copied()
    }

    /// Stores a decision unless the cache is full.
    pub fn insert(&mut self, permission: String, allowed: bool) {
        if self.entries.len() < self.capacity {
            self.entries.insert(permission, allowed);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for DecisionCache {
    fn default() -> Self {
        Self::new(CACHE_MAX_SIZE)
    }
}
