use std::sync::atomic::{AtomicU64, Ordering};

/// Hit and miss counters of the page cache
#[derive(Default)]
pub struct Diag {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl Diag {
    pub fn cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// (hits, misses)
    pub fn snapshot(&self) -> (u64, u64) {
        (
            self.cache_hits.load(Ordering::Relaxed),
            self.cache_misses.load(Ordering::Relaxed),
        )
    }

    /// share of lookups served from the cache, 0 when nothing was looked up yet
    pub fn efficiency(&self) -> f64 {
        let (hits, misses) = self.snapshot();
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}
