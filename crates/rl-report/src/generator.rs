//! Report renderer implementation.

use crate::config::ReportConfig;
use crate::sections::OverviewSection;

use chrono::{DateTime, Utc};
use rl_profile::{ColumnProfile, TableProfile};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// MIME type of the exported document.
pub const EXPORT_MIME: &str = "text/html";

const FILE_NAME_SUFFIX: &str = "_data_report.html";
const DEFAULT_FILE_STEM: &str = "dataset";

/// Complete report data structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    /// User-facing report name (usually the source file name).
    pub report_name: Option<String>,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Generator version.
    pub generator_version: String,
    /// Whether the profile covers only the leading rows.
    pub truncated: bool,
    /// Rows the profile was computed over.
    pub analyzed_rows: usize,
    /// Rows in the loaded dataset.
    pub total_rows: usize,
    /// Wall-clock generation time in milliseconds.
    pub duration_ms: u64,
    /// The computed profile.
    pub profile: TableProfile,
}

impl ReportData {
    /// Get the report title.
    pub fn title(&self, config: &ReportConfig) -> String {
        config
            .title
            .clone()
            .or_else(|| {
                self.report_name
                    .as_ref()
                    .map(|name| format!("{name} — Data Report"))
            })
            .unwrap_or_else(|| "Data Report".to_string())
    }

    fn overview(&self) -> OverviewSection {
        OverviewSection {
            analyzed_rows: self.analyzed_rows,
            total_rows: self.total_rows,
            column_count: self.profile.column_count,
            missing_cells: self.profile.total_missing,
            truncated: self.truncated,
            duration_ms: self.duration_ms,
        }
    }
}

/// Report renderer.
pub struct ReportRenderer {
    config: ReportConfig,
}

impl ReportRenderer {
    /// Create a new renderer with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a renderer with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render the report as a standalone HTML document.
    pub fn render(&self, data: &ReportData) -> String {
        debug!(
            rows = data.analyzed_rows,
            columns = data.profile.column_count,
            "rendering report"
        );
        self.generate_html(data)
    }

    /// Export the report as document bytes, minified in release builds.
    ///
    /// Pure transform: no side effects beyond allocation.
    pub fn export(&self, data: &ReportData) -> Vec<u8> {
        let html = self.render(data);

        let output = if cfg!(debug_assertions) {
            html
        } else {
            let cfg = minify_html::Cfg {
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        };

        info!(bytes = output.len(), "report exported");
        output.into_bytes()
    }

    fn generate_html(&self, data: &ReportData) -> String {
        let title = data.title(&self.config);
        let theme_class = self.config.theme.css_class();

        let mut sections = Vec::new();
        if self.config.sections.overview {
            sections.push(self.generate_overview(&data.overview()));
        }
        if self.config.sections.columns {
            sections.push(self.generate_columns(&data.profile));
        }
        if self.config.sections.missing {
            sections.push(self.generate_missing(&data.profile));
        }
        if self.config.sections.correlations {
            sections.push(self.generate_correlations(&data.profile));
        }

        format!(
            r##"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="rl-report {version}">
    <meta name="robots" content="noindex, nofollow">
    <style>
        :root {{
            --bg-primary: #ffffff;
            --bg-secondary: #f9fafb;
            --text-primary: #111827;
            --text-secondary: #6b7280;
            --border-color: #e5e7eb;
            --accent-color: #3b82f6;
        }}
        .dark {{
            --bg-primary: #111827;
            --bg-secondary: #1f2937;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
            --border-color: #374151;
            --accent-color: #60a5fa;
        }}
        @media (prefers-color-scheme: dark) {{
            :root:not(.light) {{
                --bg-primary: #111827;
                --bg-secondary: #1f2937;
                --text-primary: #f9fafb;
                --text-secondary: #9ca3af;
                --border-color: #374151;
                --accent-color: #60a5fa;
            }}
        }}
        body {{
            background-color: var(--bg-primary);
            color: var(--text-primary);
            font-family: ui-sans-serif, system-ui, sans-serif;
            line-height: 1.5;
            max-width: 72rem;
            margin: 0 auto;
            padding: 2rem 1rem;
        }}
        h1 {{ font-size: 1.75rem; margin-bottom: 0.25rem; }}
        h2 {{ font-size: 1.25rem; margin: 1.5rem 0 0.75rem; }}
        .meta {{ color: var(--text-secondary); font-size: 0.875rem; }}
        .card {{
            background-color: var(--bg-secondary);
            border: 1px solid var(--border-color);
            border-radius: 0.5rem;
            padding: 1.25rem;
            margin-bottom: 1rem;
        }}
        .stat-grid {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(10rem, 1fr));
            gap: 1rem;
        }}
        .stat-card {{ text-align: center; padding: 0.75rem; }}
        .stat-value {{
            font-size: 1.75rem;
            font-weight: 700;
            color: var(--accent-color);
        }}
        .stat-label {{ font-size: 0.8rem; color: var(--text-secondary); }}
        .notice {{
            border-left: 3px solid var(--accent-color);
            padding: 0.5rem 0.75rem;
            margin-top: 1rem;
            font-size: 0.875rem;
            color: var(--text-secondary);
        }}
        table {{ width: 100%; border-collapse: collapse; font-size: 0.875rem; }}
        th, td {{
            padding: 0.4rem 0.6rem;
            text-align: left;
            border-bottom: 1px solid var(--border-color);
        }}
        th {{ color: var(--text-secondary); font-weight: 600; }}
        td.num {{ text-align: right; font-variant-numeric: tabular-nums; }}
        .type-badge {{
            display: inline-block;
            padding: 0.1rem 0.5rem;
            border-radius: 9999px;
            font-size: 0.75rem;
            background-color: var(--border-color);
        }}
        footer {{
            margin-top: 2rem;
            padding-top: 1rem;
            border-top: 1px solid var(--border-color);
            font-size: 0.8rem;
            text-align: center;
            color: var(--text-secondary);
        }}
        @media print {{
            body {{ font-size: 10pt; }}
            .card {{ page-break-inside: avoid; }}
        }}
    </style>
</head>
<body>
    <header>
        <h1>{title}</h1>
        <p class="meta">Generated: {generated_at}</p>
    </header>
    <main>
{sections}
    </main>
    <footer>
        <p>Rowlens Data Report v{version}</p>
    </footer>
</body>
</html>"##,
            theme_class = theme_class,
            title = html_escape(&title),
            version = env!("CARGO_PKG_VERSION"),
            generated_at = data.generated_at.format("%Y-%m-%d %H:%M UTC"),
            sections = sections.join("\n"),
        )
    }

    fn generate_overview(&self, overview: &OverviewSection) -> String {
        format!(
            r##"<section id="overview">
    <h2>Overview</h2>
    <div class="card">
        <div class="stat-grid">
            <div class="stat-card">
                <div class="stat-value">{rows}</div>
                <div class="stat-label">Rows Analyzed</div>
            </div>
            <div class="stat-card">
                <div class="stat-value">{columns}</div>
                <div class="stat-label">Columns</div>
            </div>
            <div class="stat-card">
                <div class="stat-value">{missing}</div>
                <div class="stat-label">Missing Cells ({missing_pct:.1}%)</div>
            </div>
            <div class="stat-card">
                <div class="stat-value">{duration}</div>
                <div class="stat-label">Generation Time</div>
            </div>
        </div>
        {notice}
    </div>
</section>"##,
            rows = overview.analyzed_rows,
            columns = overview.column_count,
            missing = overview.missing_cells,
            missing_pct = overview.missing_pct(),
            duration = overview.duration_formatted(),
            notice = match overview.truncation_notice() {
                Some(text) => format!(r#"<div class="notice">{}</div>"#, html_escape(&text)),
                None => String::new(),
            },
        )
    }

    fn generate_columns(&self, profile: &TableProfile) -> String {
        let rows_html: String = profile.columns.iter().map(column_row).collect();

        format!(
            r##"<section id="columns">
    <h2>Columns</h2>
    <div class="card" style="overflow-x: auto">
        <table>
            <thead>
                <tr>
                    <th>Name</th>
                    <th>Type</th>
                    <th>Missing</th>
                    <th>Distinct</th>
                    <th>Min</th>
                    <th>Mean</th>
                    <th>Std</th>
                    <th>Max</th>
                    <th>Example</th>
                </tr>
            </thead>
            <tbody>
{rows_html}            </tbody>
        </table>
    </div>
</section>"##,
        )
    }

    fn generate_missing(&self, profile: &TableProfile) -> String {
        let affected: Vec<&ColumnProfile> = profile
            .columns
            .iter()
            .filter(|c| c.missing_count > 0)
            .collect();

        let body = if affected.is_empty() {
            r#"<p class="meta">No missing values.</p>"#.to_string()
        } else {
            let rows: String = affected
                .iter()
                .map(|c| {
                    format!(
                        r#"                <tr>
                    <td>{}</td>
                    <td class="num">{}</td>
                    <td class="num">{:.1}%</td>
                </tr>
"#,
                        html_escape(&c.name),
                        c.missing_count,
                        c.missing_rate * 100.0,
                    )
                })
                .collect();
            format!(
                r#"<table>
            <thead>
                <tr><th>Column</th><th>Missing</th><th>Rate</th></tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>"#
            )
        };

        format!(
            r##"<section id="missing">
    <h2>Missing Values</h2>
    <div class="card">
        {body}
    </div>
</section>"##,
        )
    }

    fn generate_correlations(&self, profile: &TableProfile) -> String {
        let body = if profile.correlations.is_empty() {
            r#"<p class="meta">No correlatable numeric column pairs.</p>"#.to_string()
        } else {
            let rows: String = profile
                .correlations
                .iter()
                .map(|entry| {
                    format!(
                        r#"                <tr>
                    <td>{}</td>
                    <td>{}</td>
                    <td class="num">{:+.3}</td>
                </tr>
"#,
                        html_escape(&entry.left),
                        html_escape(&entry.right),
                        entry.r,
                    )
                })
                .collect();
            format!(
                r#"<table>
            <thead>
                <tr><th>Column</th><th>Column</th><th>Pearson r</th></tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>"#
            )
        };

        format!(
            r##"<section id="correlations">
    <h2>Correlations</h2>
    <div class="card">
        {body}
    </div>
</section>"##,
        )
    }
}

fn column_row(column: &ColumnProfile) -> String {
    let fmt_num = |v: Option<f64>| match v {
        Some(v) => format!("{v:.4}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        None => "—".to_string(),
    };
    let numeric = column.numeric.as_ref();

    format!(
        r#"                <tr>
                    <td>{name}</td>
                    <td><span class="type-badge">{ty}</span></td>
                    <td class="num">{missing} ({missing_pct:.1}%)</td>
                    <td class="num">{distinct}</td>
                    <td class="num">{min}</td>
                    <td class="num">{mean}</td>
                    <td class="num">{std}</td>
                    <td class="num">{max}</td>
                    <td>{example}</td>
                </tr>
"#,
        name = html_escape(&column.name),
        ty = column.inferred_type,
        missing = column.missing_count,
        missing_pct = column.missing_rate * 100.0,
        distinct = column.distinct_count,
        min = fmt_num(numeric.map(|n| n.min)),
        mean = fmt_num(numeric.map(|n| n.mean)),
        std = fmt_num(numeric.and_then(|n| n.std)),
        max = fmt_num(numeric.map(|n| n.max)),
        example = html_escape(column.example.as_deref().unwrap_or("—")),
    )
}

/// Derive the export file name from the user-supplied report name.
///
/// The stem is everything before the first `.` of the name; a missing,
/// empty, or dot-leading name falls back to a fixed stem. Never panics.
pub fn export_file_name(report_name: Option<&str>) -> String {
    let stem = report_name
        .unwrap_or("")
        .split('.')
        .next()
        .unwrap_or("")
        .trim();
    let stem = if stem.is_empty() { DEFAULT_FILE_STEM } else { stem };
    format!("{stem}{FILE_NAME_SUFFIX}")
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
