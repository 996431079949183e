use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use shared::domain::{ChannelName, ContactSubmission};
use tracing::debug;
use url::Url;

use crate::{endpoint, provider_failure, render_email, DeliveryChannel, EmailMessage, EmailSender};

pub const SENDGRID_API_BASE_URL: &str = "https://api.sendgrid.com/v3";

#[derive(Debug, Serialize)]
struct SendGridEmailRequest {
    personalizations: Vec<SendGridPersonalization>,
    from: SendGridContact,
    subject: String,
    content: Vec<SendGridContent>,
}

#[derive(Debug, Serialize)]
struct SendGridPersonalization {
    to: Vec<SendGridContact>,
}

#[derive(Debug, Serialize)]
struct SendGridContact {
    email: String,
}

#[derive(Debug, Serialize)]
struct SendGridContent {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

impl From<&EmailMessage> for SendGridEmailRequest {
    fn from(message: &EmailMessage) -> Self {
        Self {
            personalizations: vec![SendGridPersonalization {
                to: vec![SendGridContact {
                    email: message.to.clone(),
                }],
            }],
            from: SendGridContact {
                email: message.from.clone(),
            },
            subject: message.subject.clone(),
            content: vec![SendGridContent {
                content_type: "text/plain".to_string(),
                value: message.body.clone(),
            }],
        }
    }
}

/// Sends mail through a SendGrid-compatible `/mail/send` endpoint.
#[derive(Clone)]
pub struct SendGridClient {
    http: Client,
    api_base: Url,
    api_key: String,
}

impl SendGridClient {
    pub fn new(http: Client, api_base: Url, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_base,
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl EmailSender for SendGridClient {
    async fn send_email(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let url = endpoint(&self.api_base, "mail/send");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&SendGridEmailRequest::from(message))
            .send()
            .await
            .with_context(|| format!("email request to {url} failed"))?;

        if !response.status().is_success() {
            return Err(provider_failure(response).await);
        }
        debug!(to = %message.to, "email accepted by provider");
        Ok(())
    }
}

pub struct EmailChannel {
    sender: Arc<dyn EmailSender>,
    from: String,
    to: String,
}

impl EmailChannel {
    pub fn new(
        sender: Arc<dyn EmailSender>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            from: from.into(),
            to: to.into(),
        }
    }
}

#[async_trait]
impl DeliveryChannel for EmailChannel {
    fn name(&self) -> ChannelName {
        ChannelName::Email
    }

    async fn deliver(&self, submission: &ContactSubmission) -> anyhow::Result<()> {
        let message = render_email(submission, &self.from, &self.to, Utc::now());
        self.sender.send_email(&message).await
    }
}
