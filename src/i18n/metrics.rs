//! Resolution metrics and observability module.
//!
//! This module tracks how resolutions end: exact-locale hits, fallback hits,
//! misses, and cache failures.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one codec and its clones.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Resolutions served from the requested locale
    exact_hits: AtomicUsize,

    /// Resolutions served from the fallback locale
    fallback_hits: AtomicUsize,

    /// Resolutions that ended in `TranslationNotFound`
    misses: AtomicUsize,

    /// Resolutions that ended in `CacheUnavailable`
    cache_failures: AtomicUsize,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hit in the requested locale.
    pub fn record_exact_hit(&self) {
        self.exact_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a hit in the fallback locale.
    pub fn record_fallback_hit(&self) {
        self.fallback_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a miss in both the requested and fallback locale.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache failure.
    pub fn record_cache_failure(&self) {
        self.cache_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn exact_hits(&self) -> usize {
        self.exact_hits.load(Ordering::Relaxed)
    }

    pub fn fallback_hits(&self) -> usize {
        self.fallback_hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn cache_failures(&self) -> usize {
        self.cache_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let exact = self.exact_hits();
        let fallback = self.fallback_hits();
        let misses = self.misses();
        let failures = self.cache_failures();

        let total = exact + fallback + misses + failures;
        let hit_rate = if total > 0 {
            ((exact + fallback) as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            exact_hits: exact,
            fallback_hits: fallback,
            misses,
            cache_failures: failures,
            hit_rate,
        }
    }
}

/// Snapshot of resolution statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub exact_hits: usize,
    pub fallback_hits: usize,
    pub misses: usize,
    pub cache_failures: usize,

    /// Share of resolutions that produced text, as a percentage (0-100)
    pub hit_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_exact_hit() {
        let metrics = ResolutionMetrics::new();

        assert_eq!(metrics.exact_hits(), 0);
        metrics.record_exact_hit();
        assert_eq!(metrics.exact_hits(), 1);
        metrics.record_exact_hit();
        assert_eq!(metrics.exact_hits(), 2);
    }

    #[test]
    fn test_record_fallback_hit() {
        let metrics = ResolutionMetrics::new();
        metrics.record_fallback_hit();
        assert_eq!(metrics.fallback_hits(), 1);
        assert_eq!(metrics.exact_hits(), 0);
    }

    #[test]
    fn test_record_miss_and_failure() {
        let metrics = ResolutionMetrics::new();
        metrics.record_miss();
        metrics.record_cache_failure();
        metrics.record_cache_failure();
        assert_eq!(metrics.misses(), 1);
        assert_eq!(metrics.cache_failures(), 2);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = ResolutionMetrics::new().report();

        assert_eq!(report.exact_hits, 0);
        assert_eq!(report.fallback_hits, 0);
        assert_eq!(report.misses, 0);
        assert_eq!(report.cache_failures, 0);
        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    fn test_report_hit_rate() {
        let metrics = ResolutionMetrics::new();

        // 2 exact + 1 fallback out of 4 = 75%
        metrics.record_exact_hit();
        metrics.record_exact_hit();
        metrics.record_fallback_hit();
        metrics.record_miss();

        let report = metrics.report();
        assert_eq!(report.hit_rate, 75.0);
    }

    #[test]
    fn test_report_counts_failures_against_hit_rate() {
        let metrics = ResolutionMetrics::new();
        metrics.record_exact_hit();
        metrics.record_cache_failure();

        assert_eq!(metrics.report().hit_rate, 50.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = ResolutionMetrics::new();
        metrics.record_exact_hit();

        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["exact_hits"], 1);
        assert_eq!(json["hit_rate"], 100.0);
    }
}
