//! HTML report rendering
//!
//! Writes the merged report into a fresh output directory: the raw JSON
//! snapshot first, then a self-contained HTML document. The directory is
//! destroyed and recreated on every render so stale files from a previous
//! run never survive.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::model::MergedReport;

/// Raw merged snapshot, written before HTML generation
pub const RAW_JSON_FILE: &str = "merged-raw.json";

/// Rendered report document
pub const HTML_FILE: &str = "index.html";

/// Render `report` into `out_dir`, returning the path of the HTML file.
///
/// Any pre-existing directory at `out_dir` is removed first. The JSON
/// snapshot is written before the HTML so a render failure still leaves a
/// debuggable intermediate artifact. On success the returned path refers to
/// a readable, non-empty HTML file suitable for attachment.
pub fn render(report: &MergedReport, out_dir: &Path) -> Result<PathBuf> {
    if out_dir.exists() {
        debug!(dir = %out_dir.display(), "removing previous render output");
        fs::remove_dir_all(out_dir)?;
    }
    fs::create_dir_all(out_dir)?;

    let snapshot = serde_json::to_string_pretty(report)?;
    fs::write(out_dir.join(RAW_JSON_FILE), snapshot)?;

    let html_path = out_dir.join(HTML_FILE);
    fs::write(&html_path, render_html(report))?;
    verify_html_output(&html_path)?;

    info!(path = %html_path.display(), "report rendered");
    Ok(html_path)
}

/// Guard against a silent generator failure: the HTML file must exist and
/// be non-empty before the render counts as a success.
fn verify_html_output(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => Ok(()),
        Ok(_) => Err(ReportError::Render(format!(
            "generated file is empty: {}",
            path.display()
        ))),
        Err(_) => Err(ReportError::Render(format!(
            "no output file detected at {}",
            path.display()
        ))),
    }
}

fn render_html(report: &MergedReport) -> String {
    let mut suites = String::new();
    for suite in &report.suites {
        let mut rows = String::new();
        for test in &suite.tests {
            rows.push_str(&format!(
                "<tr class=\"{status}\"><td>{title}</td><td>{status}</td><td>{ms} ms</td></tr>\n",
                status = test.status.label(),
                title = escape(&test.title),
                ms = test.duration_ms,
            ));
        }
        let file = suite
            .file
            .as_deref()
            .map(|f| format!(" <span class=\"file\">({})</span>", escape(f)))
            .unwrap_or_default();
        suites.push_str(&format!(
            "<section>\n<h2>{}{}</h2>\n<table>\n\
             <tr><th>Test</th><th>Status</th><th>Duration</th></tr>\n{}</table>\n</section>\n",
            escape(&suite.title),
            file,
            rows,
        ));
    }

    let stats = &report.stats;
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>E2E Test Report</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2em; color: #222; }}\n\
         table {{ border-collapse: collapse; width: 100%; margin-bottom: 1.5em; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 0.4em 0.8em; text-align: left; }}\n\
         tr.passed td {{ background: #e8f5e9; }}\n\
         tr.failed td {{ background: #ffebee; }}\n\
         tr.pending td {{ background: #fff8e1; }}\n\
         tr.skipped td {{ background: #eceff1; }}\n\
         .file {{ color: #888; font-size: 0.8em; font-weight: normal; }}\n\
         </style>\n</head>\n<body>\n\
         <h1>E2E Test Report</h1>\n\
         <p>Generated at {generated}</p>\n\
         <table>\n\
         <tr><th>Artifacts</th><th>Suites</th><th>Tests</th><th>Passes</th>\
         <th>Failures</th><th>Pending</th><th>Skipped</th><th>Duration</th></tr>\n\
         <tr><td>{artifacts}</td><td>{suites_n}</td><td>{tests}</td><td>{passes}</td>\
         <td>{failures}</td><td>{pending}</td><td>{skipped}</td><td>{ms} ms</td></tr>\n\
         </table>\n{suites}</body>\n</html>\n",
        generated = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        artifacts = stats.artifacts,
        suites_n = stats.suites,
        tests = stats.tests,
        passes = stats.passes,
        failures = stats.failures,
        pending = stats.pending,
        skipped = stats.skipped,
        ms = stats.duration_ms,
        suites = suites,
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
