//! Postflight CLI - Main Entry Point
//!
//! Runs one report pipeline invocation: merge artifacts, render HTML, email
//! the result. Exit status is 0 on full success and 1 on any stage failure.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use postflight_report::{MailConfig, Pipeline, PipelineConfig, SmtpMailer};

/// Merge, render, and email aggregated e2e test reports
#[derive(Parser, Debug)]
#[command(name = "postflight")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing per-run JSON artifacts
    #[arg(short, long, default_value = "reports")]
    reports: PathBuf,

    /// Output directory for the merged report (recreated on every run)
    #[arg(short, long, default_value = "reports/merged")]
    output: PathBuf,

    /// SMTP relay host
    #[arg(long, default_value = "smtp.126.com")]
    smtp_host: String,

    /// SMTP relay port (implicit TLS)
    #[arg(long, default_value = "465")]
    smtp_port: u16,

    /// Sender address, also used as the SMTP username
    #[arg(long, default_value = "gateway-e2e@126.com")]
    from: String,

    /// Recipient address
    #[arg(long, default_value = "qa-reports@126.com")]
    to: String,

    /// Subject line prefix; the current date is appended
    #[arg(long, default_value = "Gateway e2e report")]
    subject_prefix: String,

    /// Environment variable holding the SMTP password
    #[arg(long, default_value = "SMTP_PASSWORD")]
    password_env: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config = PipelineConfig {
        reports_dir: cli.reports,
        output_dir: cli.output,
        mail: MailConfig {
            smtp_host: cli.smtp_host,
            smtp_port: cli.smtp_port,
            from: cli.from,
            to: cli.to,
            subject_prefix: cli.subject_prefix,
            password_env: cli.password_env,
        },
    };

    let mailer = SmtpMailer::new(&config.mail);
    let pipeline = Pipeline::new(config, mailer);

    match pipeline.run().await {
        Ok(summary) => {
            println!(
                "Report delivered ({} artifacts, {} tests, {} failures): {}",
                summary.stats.artifacts,
                summary.stats.tests,
                summary.stats.failures,
                summary.delivery_id
            );
        }
        Err(_) => {
            // Already logged with its originating stage by the orchestrator
            process::exit(1);
        }
    }
}
