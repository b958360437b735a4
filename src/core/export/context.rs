//! Per-run export state
//!
//! Deduplication caches live in two places. Each mapper owns the cache of
//! keys it has emitted itself. Caches that one table fills and a later table
//! consults (existence filters) live in [`ExportContext`], which the
//! coordinator creates per run and passes to every mapper call.

use std::collections::HashSet;

/// Set of keys already seen in the current run
#[derive(Debug, Clone, Default)]
pub struct DedupCache {
    keys: HashSet<String>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key; returns `true` if it was not present yet
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Cross-table existence filters for one export run
#[derive(Debug, Default)]
pub struct ExportContext {
    /// Teacher ids referenced by an emitted student subject
    pub referenced_teachers: DedupCache,

    /// School class ids referenced by an emitted attendance
    pub referenced_school_classes: DedupCache,
}

impl ExportContext {
    pub fn new() -> Self {
        Self::default()
    }
}
