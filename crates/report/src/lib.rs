//! Postflight report pipeline
//!
//! Collects the JSON result artifacts written by independent e2e test runs,
//! merges them into one aggregate report, renders HTML into a clean output
//! directory, and emails the rendered report:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Pipeline (one run)                    │
//! ├──────────────────────────────────────────────────────────┤
//! │  merge_artifacts(reports_dir)  -> MergedReport           │
//! │  render(report, output_dir)    -> index.html             │
//! │  Dispatcher::dispatch(html)    -> delivery id            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline is all-or-nothing: any stage failure aborts the run and no
//! later stage executes. A partial report would misrepresent pass/fail state,
//! so the merger fails outright on the first unparsable artifact instead of
//! skipping it.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod render;

pub use config::{MailConfig, PipelineConfig};
pub use dispatch::{DeliveryCredentials, Dispatcher, MailTransport, OutgoingMessage, SmtpMailer};
pub use error::{ReportError, Result};
pub use merge::merge_artifacts;
pub use model::{MergedReport, TestArtifact, TestStatus};
pub use pipeline::{Pipeline, PipelineSummary, Stage};
pub use render::render;
