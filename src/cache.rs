//! Route and heuristic memoization, lock-protected so a `Pathfinder` can be
//! shared behind a plain reference across threads.

use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::path::{AlgorithmKind, Path};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Completed routes keyed by `(start, goal, algorithm)`. Only consulted for
/// unconstrained searches; cleared wholesale on every graph mutation.
#[derive(Default)]
pub struct PathCache {
    inner: RwLock<AHashMap<(String, String, AlgorithmKind), Path>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, start: &str, goal: &str, algorithm: AlgorithmKind) -> Option<Path> {
        let key = (start.to_string(), goal.to_string(), algorithm);
        if let Some(path) = self.inner.read().get(&key).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            Some(path)
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    pub fn insert(&self, path: &Path) {
        let key = (
            path.start().to_string(),
            path.goal().to_string(),
            path.algorithm,
        );
        self.inner.write().insert(key, path.clone());
    }

    pub fn clear(&self) {
        self.inner.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.inner.read().len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }
}

/// Memoized heuristic evaluations keyed by `(node, goal)`. Values are pure
/// functions of static node data, so entries stay valid until a node
/// mutation clears the cache.
#[derive(Default)]
pub struct HeuristicCache {
    inner: RwLock<AHashMap<(String, String), f64>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl HeuristicCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: &str, goal: &str) -> Option<f64> {
        let key = (node.to_string(), goal.to_string());
        if let Some(value) = self.inner.read().get(&key).copied() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            Some(value)
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    pub fn insert(&self, node: &str, goal: &str, value: f64) {
        self.inner
            .write()
            .insert((node.to_string(), goal.to_string()), value);
    }

    pub fn clear(&self) {
        self.inner.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.inner.read().len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }
}
