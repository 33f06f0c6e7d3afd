//! In-memory cache of generated transaction logs
//!
//! Generated logs are immutable, so each is built once per distinct set of
//! generator inputs and shared afterwards. Entries only go away through an
//! explicit `invalidate` or `clear`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::generator::GeneratorParams;
use crate::model::TransactionLog;

/// Log cache keyed by generator inputs
#[derive(Default)]
pub struct LogCache {
    entries: HashMap<GeneratorParams, Arc<TransactionLog>>,
    hits: u64,
    misses: u64,
}

/// Cache statistics for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} logs cached ({} hits, {} misses)",
            self.entries, self.hits, self.misses
        )
    }
}

impl LogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached log for `params`, generating it on first use
    pub fn get_or_generate(&mut self, params: &GeneratorParams) -> Arc<TransactionLog> {
        if let Some(log) = self.entries.get(params) {
            self.hits += 1;
            debug!(seed = params.seed, "log cache hit");
            return Arc::clone(log);
        }

        self.misses += 1;
        debug!(seed = params.seed, "log cache miss, generating");
        let log = Arc::new(params.generate());
        self.entries.insert(params.clone(), Arc::clone(&log));
        log
    }

    /// Cached log without generating
    pub fn get(&self, params: &GeneratorParams) -> Option<Arc<TransactionLog>> {
        self.entries.get(params).cloned()
    }

    /// Drop one entry; returns true if it was cached
    pub fn invalidate(&mut self, params: &GeneratorParams) -> bool {
        self.entries.remove(params).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn params(seed: u64) -> GeneratorParams {
        GeneratorParams::new(
            seed,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
    }

    #[test]
    fn test_second_lookup_is_shared() {
        let mut cache = LogCache::new();
        let first = cache.get_or_generate(&params(42));
        let second = cache.get_or_generate(&params(42));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            cache.stats(),
            CacheStats {
                entries: 1,
                hits: 1,
                misses: 1
            }
        );
    }

    #[test]
    fn test_different_key_new_entry() {
        let mut cache = LogCache::new();
        let a = cache.get_or_generate(&params(1));
        let b = cache.get_or_generate(&params(2));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_invalidate_regenerates_identical_log() {
        let mut cache = LogCache::new();
        let before = cache.get_or_generate(&params(5));

        assert!(cache.invalidate(&params(5)));
        assert!(!cache.invalidate(&params(5)));
        assert!(cache.get(&params(5)).is_none());

        let after = cache.get_or_generate(&params(5));
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
    }

    #[test]
    fn test_clear() {
        let mut cache = LogCache::new();
        cache.get_or_generate(&params(1));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_stats_display() {
        let stats = CacheStats {
            entries: 2,
            hits: 3,
            misses: 2,
        };
        assert_eq!(stats.to_string(), "2 logs cached (3 hits, 2 misses)");
    }
}
