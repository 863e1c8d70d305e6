//! Artifact discovery and merge
//!
//! Reads every `*.json` file directly inside the reports directory and folds
//! them into one [`MergedReport`]. The merge is strict: a single unreadable
//! or malformed artifact fails the whole merge, because a silently partial
//! report could mask failures.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::model::{MergedReport, TestArtifact};

/// Merge all artifact files found in `dir` into a single report.
///
/// Zero matching files is a valid degenerate case and yields an empty report.
/// Suites appear in discovery order; files are sorted by name so that order
/// is deterministic across platforms. Pure read, no side effects.
pub fn merge_artifacts(dir: &Path) -> Result<MergedReport> {
    let files = discover_artifacts(dir)?;
    debug!(count = files.len(), dir = %dir.display(), "discovered artifact files");

    let mut report = MergedReport::empty();
    for file in &files {
        let artifact = read_artifact(file)?;
        report.absorb(artifact);
    }

    info!(
        artifacts = report.stats.artifacts,
        tests = report.stats.tests,
        failures = report.stats.failures,
        "merge complete"
    );
    Ok(report)
}

fn discover_artifacts(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| ReportError::ArtifactDir {
        dir: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ReportError::ArtifactDir {
            dir: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_artifact(file: &Path) -> Result<TestArtifact> {
    let raw = fs::read_to_string(file).map_err(|e| ReportError::ArtifactParse {
        file: file.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| ReportError::ArtifactParse {
        file: file.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_artifact(dir: &Path, name: &str, tests: usize, failures: usize, pending: usize) {
        let passes = tests - failures - pending;
        let artifact = serde_json::json!({
            "stats": {
                "suites": 1,
                "tests": tests,
                "passes": passes,
                "failures": failures,
                "pending": pending,
                "duration_ms": 100
            },
            "results": [{
                "title": format!("suite {name}"),
                "file": format!("cypress/e2e/{name}.cy.js"),
                "tests": (0..tests).map(|i| serde_json::json!({
                    "title": format!("case {i}"),
                    "status": if i < failures { "failed" }
                        else if i < failures + pending { "pending" }
                        else { "passed" },
                    "duration_ms": 10
                })).collect::<Vec<_>>()
            }]
        });
        fs::write(dir.join(name).with_extension("json"), artifact.to_string()).unwrap();
    }

    #[test]
    fn totals_are_sums_over_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "run-a", 5, 0, 0);
        write_artifact(dir.path(), "run-b", 3, 1, 0);
        write_artifact(dir.path(), "run-c", 2, 0, 1);

        let report = merge_artifacts(dir.path()).unwrap();
        assert_eq!(report.stats.artifacts, 3);
        assert_eq!(report.stats.tests, 10);
        assert_eq!(report.stats.passes, 8);
        assert_eq!(report.stats.failures, 1);
        assert_eq!(report.stats.pending, 1);
        assert_eq!(report.stats.duration_ms, 300);
    }

    #[test]
    fn empty_directory_yields_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = merge_artifacts(dir.path()).unwrap();
        assert_eq!(report.stats.artifacts, 0);
        assert_eq!(report.stats.tests, 0);
        assert!(report.suites.is_empty());
    }

    #[test]
    fn malformed_artifact_fails_whole_merge() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "run-a", 5, 0, 0);
        fs::write(dir.path().join("run-b.json"), "{not json").unwrap();

        let err = merge_artifacts(dir.path()).unwrap_err();
        match err {
            ReportError::ArtifactParse { file, .. } => {
                assert!(file.ends_with("run-b.json"));
            }
            other => panic!("expected ArtifactParse, got {other}"),
        }
    }

    #[test]
    fn wrong_shape_fails_whole_merge() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("run-a.json"), r#"{"unexpected": true}"#).unwrap();
        assert!(matches!(
            merge_artifacts(dir.path()),
            Err(ReportError::ArtifactParse { .. })
        ));
    }

    #[test]
    fn suites_follow_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "b-second", 1, 0, 0);
        write_artifact(dir.path(), "a-first", 1, 0, 0);
        // Non-JSON files are not artifacts
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let report = merge_artifacts(dir.path()).unwrap();
        let titles: Vec<_> = report.suites.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["suite a-first", "suite b-second"]);
    }

    #[test]
    fn missing_directory_is_a_merge_error() {
        assert!(matches!(
            merge_artifacts(Path::new("/nonexistent/postflight-reports")),
            Err(ReportError::ArtifactDir { .. })
        ));
    }
}
