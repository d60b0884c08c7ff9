//! Overview section data.

use serde::{Deserialize, Serialize};

/// Dataset summary shown at the top of every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewSection {
    /// Rows the profile was computed over.
    pub analyzed_rows: usize,
    /// Rows in the loaded dataset.
    pub total_rows: usize,
    /// Column count.
    pub column_count: usize,
    /// Missing cells across the analyzed rows.
    pub missing_cells: usize,
    /// Whether the dataset exceeded the chunking threshold.
    pub truncated: bool,
    /// Wall-clock generation time in milliseconds.
    pub duration_ms: u64,
}

impl OverviewSection {
    /// Get formatted duration.
    pub fn duration_formatted(&self) -> String {
        match self.duration_ms {
            ms if ms >= 60_000 => format!("{:.1} min", ms as f64 / 60_000.0),
            ms if ms >= 1_000 => format!("{:.1} s", ms as f64 / 1000.0),
            ms => format!("{ms} ms"),
        }
    }

    /// Missing cells as a percentage of analyzed cells.
    pub fn missing_pct(&self) -> f64 {
        let cells = self.analyzed_rows * self.column_count;
        if cells == 0 {
            0.0
        } else {
            100.0 * self.missing_cells as f64 / cells as f64
        }
    }

    /// Truncation notice for display, when applicable.
    pub fn truncation_notice(&self) -> Option<String> {
        self.truncated.then(|| {
            format!(
                "Profiled the first {} of {} rows",
                self.analyzed_rows, self.total_rows
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> OverviewSection {
        OverviewSection {
            analyzed_rows: 5000,
            total_rows: 12000,
            column_count: 4,
            missing_cells: 200,
            truncated: true,
            duration_ms: 1500,
        }
    }

    #[test]
    fn test_duration_formatted() {
        let mut s = section();
        assert_eq!(s.duration_formatted(), "1.5 s");
        s.duration_ms = 90_000;
        assert_eq!(s.duration_formatted(), "1.5 min");
        s.duration_ms = 42;
        assert_eq!(s.duration_formatted(), "42 ms");
    }

    #[test]
    fn test_missing_pct() {
        let s = section();
        assert!((s.missing_pct() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_truncation_notice() {
        let mut s = section();
        assert_eq!(
            s.truncation_notice().as_deref(),
            Some("Profiled the first 5000 of 12000 rows")
        );
        s.truncated = false;
        assert!(s.truncation_notice().is_none());
    }
}
