//! Pipeline configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory containing per-run JSON artifacts
    pub reports_dir: PathBuf,

    /// Output directory for the merged report; destroyed and recreated on
    /// every render
    pub output_dir: PathBuf,

    /// Mail delivery settings
    pub mail: MailConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            output_dir: PathBuf::from("reports/merged"),
            mail: MailConfig::default(),
        }
    }
}

/// Mail delivery settings
///
/// The relay, sender, and recipient are fixed per deployment; the password
/// is never stored here, only the name of the environment variable that
/// supplies it at run time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,

    /// Sender address, also used as the SMTP username
    pub from: String,

    pub to: String,

    /// Subject line prefix; the current date is appended
    pub subject_prefix: String,

    /// Environment variable holding the SMTP password
    pub password_env: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.126.com".to_string(),
            smtp_port: 465,
            from: "gateway-e2e@126.com".to_string(),
            to: "qa-reports@126.com".to_string(),
            subject_prefix: "Gateway e2e report".to_string(),
            password_env: "SMTP_PASSWORD".to_string(),
        }
    }
}
