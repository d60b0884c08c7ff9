//! HTML report rendering and export for Rowlens.
//!
//! Turns a computed [`rl_profile::TableProfile`] plus generation metadata
//! into a standalone HTML document — inline CSS, no external assets — and
//! derives the `<name>_data_report.html` download file name.
//!
//! # Example
//!
//! ```
//! use rl_report::{ReportConfig, ReportData, ReportRenderer};
//! use rl_common::Dataset;
//!
//! let dataset = Dataset::from_csv_bytes(b"a,b\n1,2\n").unwrap();
//! let data = ReportData {
//!     report_name: Some("sample.csv".into()),
//!     generated_at: chrono::Utc::now(),
//!     generator_version: env!("CARGO_PKG_VERSION").into(),
//!     truncated: false,
//!     analyzed_rows: 1,
//!     total_rows: 1,
//!     duration_ms: 0,
//!     profile: rl_profile::profile(&dataset),
//! };
//! let html = ReportRenderer::new(ReportConfig::default()).render(&data);
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! ```

pub mod config;
pub mod generator;
pub mod sections;

pub use config::{ReportConfig, ReportSections, ReportTheme};
pub use generator::{export_file_name, ReportData, ReportRenderer, EXPORT_MIME};
pub use sections::OverviewSection;
