//! Report generation: chunking policy and memoization.
//!
//! Oversized tables are cut to an order-preserving prefix before profiling
//! (never sampled), and the computed report is cached by the content
//! identity of the exact table that was profiled. Re-running generation on
//! an unchanged table is a cache hit; the profiler is not invoked again.

use chrono::{DateTime, Utc};
use rl_common::Dataset;
use rl_profile::{Profiler, TableProfile};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Row cap applied before profiling.
pub const DEFAULT_ROW_THRESHOLD: usize = 5000;

/// The computed exploratory-analysis artifact plus its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The profile itself.
    pub profile: TableProfile,
    /// Content identity of the exact table profiled.
    pub fingerprint: String,
    /// Rows the profile covers.
    pub analyzed_rows: usize,
    /// When the profile was computed.
    pub generated_at: DateTime<Utc>,
}

/// Result of one generation request.
#[derive(Debug, Clone)]
pub struct Generation {
    pub report: Arc<Report>,
    /// Whether the dataset exceeded the row threshold.
    pub truncated: bool,
    /// Rows in the input dataset before chunking.
    pub total_rows: usize,
    /// Wall-clock time of this request.
    pub duration: Duration,
}

/// Session-scoped report generator.
///
/// The cache is memoization only: one entry per distinct input identity,
/// no eviction, no cross-session sharing.
pub struct ReportGenerator {
    threshold: usize,
    cache: HashMap<String, Arc<Report>>,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator {
    /// Create a generator with the default row threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_ROW_THRESHOLD)
    }

    /// Create a generator with a custom row threshold.
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            threshold,
            cache: HashMap::new(),
        }
    }

    /// The configured row threshold.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Number of distinct inputs profiled so far.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Generate (or reuse) the report for a dataset.
    ///
    /// Duration is measured strictly around the generation step; the I/O
    /// that loaded the dataset happened elsewhere and is not included.
    pub fn generate(&mut self, dataset: &Dataset, profiler: &dyn Profiler) -> Generation {
        let start = Instant::now();
        let total_rows = dataset.row_count();
        let truncated = total_rows > self.threshold;

        let prefix;
        let input: &Dataset = if truncated {
            prefix = dataset.head(self.threshold);
            &prefix
        } else {
            dataset
        };

        // Key on the exact table profiled plus the truncation outcome
        let fingerprint = input.fingerprint();
        let key = format!("{fingerprint}:{truncated}");

        let report = match self.cache.get(&key) {
            Some(cached) => {
                debug!(%fingerprint, "report cache hit");
                Arc::clone(cached)
            }
            None => {
                let profile = profiler.profile(input);
                let report = Arc::new(Report {
                    analyzed_rows: input.row_count(),
                    profile,
                    fingerprint,
                    generated_at: Utc::now(),
                });
                self.cache.insert(key, Arc::clone(&report));
                report
            }
        };

        let duration = start.elapsed();
        info!(
            total_rows,
            analyzed_rows = report.analyzed_rows,
            truncated,
            duration_ms = duration.as_millis() as u64,
            "report generated"
        );

        Generation {
            report,
            truncated,
            total_rows,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rl_profile::StatsProfiler;

    fn csv_with_rows(n: usize) -> Dataset {
        let mut csv = String::from("a,b\n");
        for i in 0..n {
            csv.push_str(&format!("{i},{}\n", i * 2));
        }
        Dataset::from_csv_bytes(csv.as_bytes()).expect("valid csv")
    }

    #[test]
    fn test_small_dataset_not_truncated() {
        let mut generator = ReportGenerator::with_threshold(10);
        let generation = generator.generate(&csv_with_rows(10), &StatsProfiler);
        assert!(!generation.truncated);
        assert_eq!(generation.report.analyzed_rows, 10);
        assert_eq!(generation.total_rows, 10);
        assert_eq!(generation.report.profile.row_count, 10);
    }

    #[test]
    fn test_oversized_dataset_truncated_to_prefix() {
        let mut generator = ReportGenerator::with_threshold(10);
        let generation = generator.generate(&csv_with_rows(11), &StatsProfiler);
        assert!(generation.truncated);
        assert_eq!(generation.report.analyzed_rows, 10);
        assert_eq!(generation.total_rows, 11);

        // The profile covers exactly the first 10 rows: max of column "a"
        // is 9, not 10.
        let col_a = &generation.report.profile.columns[0];
        let numeric = col_a.numeric.as_ref().expect("numeric");
        assert_eq!(numeric.max, 9.0);
    }

    #[test]
    fn test_cache_hit_on_unchanged_dataset() {
        let mut generator = ReportGenerator::with_threshold(10);
        let ds = csv_with_rows(5);
        let first = generator.generate(&ds, &StatsProfiler);
        let second = generator.generate(&ds, &StatsProfiler);
        assert!(Arc::ptr_eq(&first.report, &second.report));
        assert_eq!(generator.cache_len(), 1);
    }

    #[test]
    fn test_changed_dataset_misses_cache() {
        let mut generator = ReportGenerator::with_threshold(10);
        generator.generate(&csv_with_rows(5), &StatsProfiler);
        generator.generate(&csv_with_rows(6), &StatsProfiler);
        assert_eq!(generator.cache_len(), 2);
    }

    #[test]
    fn test_truncated_prefix_and_equal_table_share_content() {
        // An 11-row table truncated to 10 and a 10-row table with the same
        // content profile identically, but the truncation flags differ.
        let mut generator = ReportGenerator::with_threshold(10);
        let big = generator.generate(&csv_with_rows(11), &StatsProfiler);
        let exact = generator.generate(&csv_with_rows(10), &StatsProfiler);
        assert!(big.truncated);
        assert!(!exact.truncated);
        assert_eq!(big.report.fingerprint, exact.report.fingerprint);
    }
}
