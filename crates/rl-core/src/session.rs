//! Per-session state and orchestration.
//!
//! A [`Session`] is an explicit context object: one per connected user,
//! passed to every handler, owning its dataset, report, and flags
//! exclusively. Sessions share nothing, so no locking exists anywhere in
//! this crate. Each operation runs to completion before the next is
//! accepted — the hosting UI is expected to show a busy state for the
//! blocking ones.

use crate::generator::{Report, ReportGenerator, DEFAULT_ROW_THRESHOLD};
use rl_common::{Dataset, Error, Result};
use rl_profile::Profiler;
use rl_report::{export_file_name, ReportConfig, ReportData, ReportRenderer, EXPORT_MIME};
use rl_source::{HttpFetch, ObjectFetch, SourceSpec};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Outcome of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A dataset was loaded and replaced the previous one.
    Loaded,
    /// The source is not fully specified yet; nothing changed.
    NotReady,
}

/// Read-only view of the leading rows, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview<'a> {
    pub columns: &'a [String],
    pub rows: &'a [Vec<String>],
    pub total_rows: usize,
    pub column_count: usize,
}

/// An exported report: bytes plus download metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// One user session's state.
pub struct Session {
    dataset: Option<Arc<Dataset>>,
    report: Option<Arc<Report>>,
    report_name: Option<String>,
    truncated: bool,
    generation_duration: Option<Duration>,
    generator: ReportGenerator,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with the default row threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_ROW_THRESHOLD)
    }

    /// Create an empty session with a custom row threshold.
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            dataset: None,
            report: None,
            report_name: None,
            truncated: false,
            generation_duration: None,
            generator: ReportGenerator::with_threshold(threshold),
        }
    }

    /// Load a data source into the session.
    ///
    /// On success the dataset is replaced wholesale and any previously held
    /// report becomes stale and is cleared — a report is only ever derived
    /// from the table current at generation time. On `NotReady` or error,
    /// every slot keeps its previous value.
    pub fn load_source(
        &mut self,
        spec: &SourceSpec,
        http: &dyn HttpFetch,
        store: &dyn ObjectFetch,
    ) -> Result<LoadOutcome> {
        let Some(dataset) = spec.load(http, store)? else {
            return Ok(LoadOutcome::NotReady);
        };

        info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "session dataset replaced"
        );
        self.dataset = Some(Arc::new(dataset));
        self.report = None;
        self.truncated = false;
        self.generation_duration = None;
        self.report_name = spec
            .display_name()
            .map(|name| name.rsplit('/').next().unwrap_or(name).to_string());
        Ok(LoadOutcome::Loaded)
    }

    /// Generate (or reuse) the report for the current dataset.
    pub fn generate_report(&mut self, profiler: &dyn Profiler) -> Result<Arc<Report>> {
        let dataset = self.dataset.clone().ok_or(Error::NoDataset)?;
        let generation = self.generator.generate(&dataset, profiler);

        self.truncated = generation.truncated;
        self.generation_duration = Some(generation.duration);
        self.report = Some(Arc::clone(&generation.report));
        Ok(generation.report)
    }

    /// First `n` rows of the current dataset, if one is loaded.
    pub fn preview(&self, n: usize) -> Option<Preview<'_>> {
        let dataset = self.dataset.as_deref()?;
        let shown = n.min(dataset.row_count());
        Some(Preview {
            columns: dataset.column_names(),
            rows: &dataset.rows()[..shown],
            total_rows: dataset.row_count(),
            column_count: dataset.column_count(),
        })
    }

    /// Export the current report as a downloadable HTML document.
    ///
    /// Callable only once a report exists; fails with [`Error::NoReport`]
    /// otherwise.
    pub fn export(&self, config: &ReportConfig) -> Result<Export> {
        let report = self.report.as_ref().ok_or(Error::NoReport)?;
        let total_rows = self
            .dataset
            .as_ref()
            .map(|d| d.row_count())
            .unwrap_or(report.analyzed_rows);

        let data = ReportData {
            report_name: self.report_name.clone(),
            generated_at: report.generated_at,
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            truncated: self.truncated,
            analyzed_rows: report.analyzed_rows,
            total_rows,
            duration_ms: self
                .generation_duration
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
            profile: report.profile.clone(),
        };

        let bytes = ReportRenderer::new(config.clone()).export(&data);
        Ok(Export {
            file_name: export_file_name(self.report_name.as_deref()),
            mime: EXPORT_MIME,
            bytes,
        })
    }

    /// The currently loaded dataset.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_deref()
    }

    /// The current report, if generated for the current dataset.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_deref()
    }

    /// The user-facing report name.
    pub fn report_name(&self) -> Option<&str> {
        self.report_name.as_deref()
    }

    /// Override the report name with user-supplied free text.
    pub fn set_report_name(&mut self, name: impl Into<String>) {
        self.report_name = Some(name.into());
    }

    /// Whether the last generation truncated the dataset.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Wall-clock time of the last generation.
    pub fn generation_duration(&self) -> Option<Duration> {
        self.generation_duration
    }
}
