//! Rowlens session and report-generation engine.
//!
//! Ties the other crates together: a per-session [`Session`] context owns
//! the loaded dataset and generated report, and [`ReportGenerator`]
//! implements the two behaviors worth being careful about — the chunking
//! policy for oversized inputs and the memoized report cache that keeps
//! repeated UI re-renders cheap.
//!
//! # Example
//!
//! ```
//! use rl_core::Session;
//! use rl_profile::StatsProfiler;
//! use rl_report::ReportConfig;
//! use rl_source::{SourceSpec, UreqFetcher, S3Fetcher};
//!
//! let mut session = Session::new();
//! let spec = SourceSpec::Upload {
//!     bytes: b"a,b\n1,2\n".to_vec(),
//!     file_name: "sample.csv".into(),
//! };
//! session.load_source(&spec, &UreqFetcher, &S3Fetcher).unwrap();
//! session.generate_report(&StatsProfiler).unwrap();
//! let export = session.export(&ReportConfig::default()).unwrap();
//! assert_eq!(export.file_name, "sample_data_report.html");
//! ```

pub mod generator;
pub mod session;

pub use generator::{Generation, Report, ReportGenerator, DEFAULT_ROW_THRESHOLD};
pub use session::{Export, LoadOutcome, Preview, Session};
