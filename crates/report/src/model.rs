//! Report data model
//!
//! [`TestArtifact`] mirrors the JSON written by one upstream test run: the
//! reporter's aggregate counts plus the per-suite, per-test breakdown.
//! [`MergedReport`] is the union of all artifacts for one pipeline run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Pending,
    Skipped,
}

impl TestStatus {
    /// Lowercase wire/display form, also used as a CSS class in the renderer
    pub fn label(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Pending => "pending",
            TestStatus::Skipped => "skipped",
        }
    }
}

/// Result of a single test case within a suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCaseResult {
    pub title: String,
    pub status: TestStatus,
    #[serde(default)]
    pub duration_ms: u64,
}

/// Results of one suite as recorded by a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub title: String,

    /// Source spec file the suite came from, when the reporter recorded it
    #[serde(default)]
    pub file: Option<String>,

    pub tests: Vec<TestCaseResult>,
}

/// Aggregate counts as written by the upstream reporter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactStats {
    pub suites: usize,
    pub tests: usize,
    pub passes: usize,
    pub failures: usize,
    pub pending: usize,
    #[serde(default)]
    pub skipped: usize,
    #[serde(default)]
    pub duration_ms: u64,
}

/// One JSON result file produced by a single test run. Read-only to the
/// pipeline; whichever run produced it owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestArtifact {
    pub stats: ArtifactStats,
    pub results: Vec<SuiteResult>,
}

/// Totals across all merged artifacts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportStats {
    /// Number of source artifact files
    pub artifacts: usize,
    pub suites: usize,
    pub tests: usize,
    pub passes: usize,
    pub failures: usize,
    pub pending: usize,
    pub skipped: usize,
    pub duration_ms: u64,
}

/// The union of all artifacts for one pipeline run
///
/// Invariant: every field of `stats` equals the sum of the corresponding
/// field over the absorbed artifacts, and `suites` preserves artifact
/// discovery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedReport {
    pub stats: ReportStats,
    pub suites: Vec<SuiteResult>,
    pub generated_at: DateTime<Utc>,
}

impl MergedReport {
    /// Report with all counts zero, the valid result of merging no artifacts
    pub fn empty() -> Self {
        Self {
            stats: ReportStats::default(),
            suites: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    /// Fold one artifact into the report, summing its aggregate counts and
    /// appending its suites
    pub fn absorb(&mut self, artifact: TestArtifact) {
        self.stats.artifacts += 1;
        self.stats.suites += artifact.stats.suites;
        self.stats.tests += artifact.stats.tests;
        self.stats.passes += artifact.stats.passes;
        self.stats.failures += artifact.stats.failures;
        self.stats.pending += artifact.stats.pending;
        self.stats.skipped += artifact.stats.skipped;
        self.stats.duration_ms += artifact.stats.duration_ms;
        self.suites.extend(artifact.results);
    }
}
