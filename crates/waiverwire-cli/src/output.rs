// Writing finished reports to disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::info;
use waiverwire_engine::{render_html, AnalysisReport};

/// Files produced for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub html: PathBuf,
    pub json: Option<PathBuf>,
}

/// File name stem for a report generated at `generated_at`.
pub fn report_stem(generated_at: DateTime<Utc>) -> String {
    format!("waiver-report-{}", generated_at.format("%Y%m%d-%H%M%S"))
}

/// Write the HTML report, and the JSON serialization when `write_json` is
/// set, into `dir` (created if missing).
pub fn write_report(report: &AnalysisReport, dir: &Path, write_json: bool) -> anyhow::Result<WrittenReport> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let stem = report_stem(report.generated_at);
    let html_path = dir.join(format!("{stem}.html"));
    std::fs::write(&html_path, render_html(report))
        .with_context(|| format!("failed to write {}", html_path.display()))?;
    info!(path = %html_path.display(), "wrote HTML report");

    let json_path = if write_json {
        let path = dir.join(format!("{stem}.json"));
        let body = serde_json::to_string_pretty(report).context("failed to serialize report")?;
        std::fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote JSON report");
        Some(path)
    } else {
        None
    };

    Ok(WrittenReport {
        html: html_path,
        json: json_path,
    })
}
