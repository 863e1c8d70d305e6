//! Email delivery of the rendered report
//!
//! [`Dispatcher`] checks its preconditions (report file present, credential
//! set) before any transport work, then sends exactly one message with the
//! HTML report attached. The transport is a seam: production uses
//! [`SmtpMailer`] over lettre, tests substitute a recording stub.

use std::env;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use chrono::Local;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::MailConfig;
use crate::error::{ReportError, Result};

/// SMTP password sourced from the environment. Absence is a hard
/// precondition failure, not a soft default.
#[derive(Clone)]
pub struct DeliveryCredentials {
    password: String,
}

impl DeliveryCredentials {
    pub fn from_env(var: &str) -> Result<Self> {
        match env::var(var) {
            Ok(password) if !password.trim().is_empty() => Ok(Self { password }),
            _ => Err(ReportError::Precondition(format!(
                "{var} is not set in the environment"
            ))),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// The password stays out of Debug output.
impl std::fmt::Debug for DeliveryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryCredentials")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One outbound message with a single HTML attachment
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment_name: String,
    pub attachment: Vec<u8>,
}

/// Transport seam for sending the report email
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one message, returning a delivery confirmation identifier
    async fn send(&self, credentials: &DeliveryCredentials, message: OutgoingMessage)
        -> Result<String>;
}

#[async_trait]
impl<T: MailTransport + ?Sized> MailTransport for &T {
    async fn send(
        &self,
        credentials: &DeliveryCredentials,
        message: OutgoingMessage,
    ) -> Result<String> {
        (**self).send(credentials, message).await
    }
}

/// Production transport: authenticated SMTP over implicit TLS via lettre
pub struct SmtpMailer {
    host: String,
    port: u16,
    username: String,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            username: config.from.clone(),
        }
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(
        &self,
        credentials: &DeliveryCredentials,
        message: OutgoingMessage,
    ) -> Result<String> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|e| ReportError::Delivery(format!("invalid sender {}: {e}", message.from)))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| ReportError::Delivery(format!("invalid recipient {}: {e}", message.to)))?;

        let attachment =
            Attachment::new(message.attachment_name).body(message.attachment, ContentType::TEXT_HTML);
        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(message.body))
                    .singlepart(attachment),
            )
            .map_err(|e| ReportError::Delivery(format!("message assembly: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)
            .map_err(|e| ReportError::Delivery(e.to_string()))?
            .port(self.port)
            .credentials(Credentials::new(
                self.username.clone(),
                credentials.password().to_string(),
            ))
            .build();

        let response = transport
            .send(email)
            .await
            .map_err(|e| ReportError::Delivery(e.to_string()))?;
        Ok(format!(
            "{} {}",
            response.code(),
            response.message().collect::<Vec<_>>().join(" ")
        ))
    }
}

/// Sends the rendered report to the configured recipient.
///
/// A single attempt per pipeline run; transport failures are not retried.
pub struct Dispatcher<T> {
    config: MailConfig,
    transport: T,
}

impl<T: MailTransport> Dispatcher<T> {
    pub fn new(config: MailConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Send `html_path` as an attachment. Both precondition checks run
    /// before the transport is touched, so a missing file or credential
    /// makes zero network calls.
    pub async fn dispatch(&self, html_path: &Path) -> Result<String> {
        if !html_path.is_file() {
            return Err(ReportError::Precondition(format!(
                "email attachment not found: {}",
                html_path.display()
            )));
        }
        let credentials = DeliveryCredentials::from_env(&self.config.password_env)?;

        let content = fs::read(html_path)?;
        let today = Local::now().format("%Y-%m-%d");
        let message = OutgoingMessage {
            from: self.config.from.clone(),
            to: self.config.to.clone(),
            subject: format!("{} {}", self.config.subject_prefix, today),
            body: "Testing completed. See the HTML report in attachments.".to_string(),
            attachment_name: format!("e2e-report-{today}.html"),
            attachment: content,
        };

        info!(to = %self.config.to, host = %self.config.smtp_host, "sending report email");
        let id = self.transport.send(&credentials, message).await?;
        info!(id = %id, "report email accepted by relay");
        Ok(id)
    }
}
