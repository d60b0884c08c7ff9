//! Report configuration types.

use serde::{Deserialize, Serialize};

/// Report color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTheme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
    /// Auto-detect from system preference.
    #[default]
    Auto,
}

impl ReportTheme {
    /// Get the CSS class for this theme.
    pub fn css_class(&self) -> &'static str {
        match self {
            ReportTheme::Light => "light",
            ReportTheme::Dark => "dark",
            ReportTheme::Auto => "",
        }
    }
}

/// Report section visibility configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSections {
    /// Overview section (dataset summary cards).
    #[serde(default = "default_true")]
    pub overview: bool,
    /// Per-column profiles table.
    #[serde(default = "default_true")]
    pub columns: bool,
    /// Missing-values summary.
    #[serde(default = "default_true")]
    pub missing: bool,
    /// Correlation panel.
    #[serde(default = "default_true")]
    pub correlations: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReportSections {
    fn default() -> Self {
        Self {
            overview: true,
            columns: true,
            missing: true,
            correlations: true,
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Custom report title; derived from the report name when absent.
    pub title: Option<String>,
    /// Color theme.
    #[serde(default)]
    pub theme: ReportTheme,
    /// Section visibility.
    #[serde(default)]
    pub sections: ReportSections,
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: ReportTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
