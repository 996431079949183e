//! Outbound delivery channels for contact submissions.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use shared::domain::{ChannelName, ContactSubmission};

pub mod config;
pub mod email;
pub mod sms;

pub use config::{DeliveryChannelConfig, EmailConfig, SmsConfig};
pub use email::{EmailChannel, SendGridClient};
pub use sms::{SmsChannel, TwilioClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    pub from: String,
    pub to: String,
    pub body: String,
}

/// One way of getting a submission to the site owner.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    fn name(&self) -> ChannelName;
    async fn deliver(&self, submission: &ContactSubmission) -> anyhow::Result<()>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, message: &EmailMessage) -> anyhow::Result<()>;
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_sms(&self, message: &SmsMessage) -> anyhow::Result<()>;
}

pub fn render_email(
    submission: &ContactSubmission,
    from: &str,
    to: &str,
    received_at: DateTime<Utc>,
) -> EmailMessage {
    let body = format!(
        "Name: {}\nEmail: {}\nPhone: {}\nSubject: {}\nMessage: {}\nReceived: {}\n",
        submission.name,
        submission.email,
        submission.phone,
        submission.subject,
        submission.message,
        received_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    EmailMessage {
        from: from.to_string(),
        to: to.to_string(),
        subject: format!("New Contact Form Submission: {}", submission.subject),
        body,
    }
}

pub fn render_sms(submission: &ContactSubmission, from: &str, to: &str) -> SmsMessage {
    SmsMessage {
        from: from.to_string(),
        to: to.to_string(),
        body: format!(
            "New contact form submission from {} ({}). Subject: {}",
            submission.name, submission.email, submission.subject
        ),
    }
}

/// Reads a provider error body for logging, capped so a large HTML error page
/// does not flood the log.
pub(crate) async fn provider_failure(response: reqwest::Response) -> anyhow::Error {
    const MAX_BODY_CHARS: usize = 512;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let body: String = body.chars().take(MAX_BODY_CHARS).collect();
    anyhow::anyhow!("provider returned {status}: {body}")
}

pub(crate) fn endpoint(base: &url::Url, path: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), path)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
