//! A process-wide fitness cache keyed by raw genome bytes (spec §3 Population, §5
//! "Fitness cache: reader-preferring shared guard"). Unlike the teacher's
//! `fitness/cache.rs` (an LRU bounded by `cache_size`), this cache is an unbounded
//! `HashMap` that callers explicitly trim to the surviving elites at the end of every
//! generation (spec §9: "bound it by evicting non-elite entries at the end of every
//! generation").
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
pub struct Cache {
    entries: Arc<RwLock<HashMap<Vec<u8>, f64>>>,
    hits: Arc<RwLock<(usize, usize)>>,
}

impl Cache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new((0, 0))),
        }
    }

    /// Reader-side lookup. Inserts from concurrent workers are idempotent (same
    /// genome bytes always produce the same fitness), so a race between two misses
    /// computing the same value is harmless (spec §5).
    pub fn get(&self, key: &[u8]) -> Option<f64> {
        let value = self.entries.read().unwrap().get(key).copied();
        let mut hits = self.hits.write().unwrap();
        if value.is_some() {
            hits.0 += 1;
        } else {
            hits.1 += 1;
        }
        value
    }

    pub fn insert(&self, key: Vec<u8>, value: f64) {
        self.entries.write().unwrap().insert(key, value);
    }

    pub fn hits_and_misses(&self) -> (usize, usize) {
        *self.hits.read().unwrap()
    }

    /// Drops every entry whose key is not in `keep`, called at the end of a
    /// generation with the elite genomes' byte sequences.
    pub fn retain_only(&self, keep: &[Vec<u8>]) {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|k, _| keep.iter().any(|e| e == k));
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_same_value_without_recomputation() {
        let cache = Cache::new();
        assert!(cache.get(&[1, 2, 3]).is_none());
        cache.insert(vec![1, 2, 3], 42.0);
        assert_eq!(cache.get(&[1, 2, 3]), Some(42.0));
        let (hits, misses) = cache.hits_and_misses();
        assert_eq!(hits, 1);
        assert_eq!(misses, 1);
    }

    #[test]
    fn retain_only_drops_non_elite_entries() {
        let cache = Cache::new();
        cache.insert(vec![1], 1.0);
        cache.insert(vec![2], 2.0);
        cache.retain_only(&[vec![1]]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&[2]), None);
    }
}
