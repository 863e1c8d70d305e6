//! Pipeline orchestration
//!
//! Runs merge, render, and dispatch strictly in sequence and aborts on the
//! first failure: if rendering fails no email is attempted, and if merging
//! fails nothing downstream runs.

use std::fmt;
use std::path::PathBuf;

use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::dispatch::{Dispatcher, MailTransport};
use crate::error::Result;
use crate::merge::merge_artifacts;
use crate::model::ReportStats;
use crate::render::render;

/// Pipeline stages. `Done` and `Failed` are terminal; no stage is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Merging,
    Rendering,
    Sending,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Merging => "merging",
            Stage::Rendering => "rendering",
            Stage::Sending => "sending",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful pipeline run
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub stats: ReportStats,
    pub html_path: PathBuf,
    pub delivery_id: String,
}

/// One-shot orchestrator over a mail transport
pub struct Pipeline<T> {
    config: PipelineConfig,
    dispatcher: Dispatcher<T>,
}

impl<T: MailTransport> Pipeline<T> {
    pub fn new(config: PipelineConfig, transport: T) -> Self {
        let dispatcher = Dispatcher::new(config.mail.clone(), transport);
        Self { config, dispatcher }
    }

    /// Run the full pipeline once. Any stage failure is logged with its
    /// originating stage and propagated; the caller decides the process
    /// exit status.
    pub async fn run(&self) -> Result<PipelineSummary> {
        let mut stage = Stage::Idle;
        match self.execute(&mut stage).await {
            Ok(summary) => {
                info!(stage = %Stage::Done, "pipeline completed");
                Ok(summary)
            }
            Err(e) => {
                error!(stage = %stage, error = %e, "pipeline aborted");
                Err(e)
            }
        }
    }

    async fn execute(&self, stage: &mut Stage) -> Result<PipelineSummary> {
        *stage = Stage::Merging;
        info!(dir = %self.config.reports_dir.display(), "merging artifacts");
        let report = merge_artifacts(&self.config.reports_dir)?;

        *stage = Stage::Rendering;
        info!(dir = %self.config.output_dir.display(), "rendering report");
        let html_path = render(&report, &self.config.output_dir)?;

        *stage = Stage::Sending;
        let delivery_id = self.dispatcher.dispatch(&html_path).await?;

        Ok(PipelineSummary {
            stats: report.stats,
            html_path,
            delivery_id,
        })
    }
}
