use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use shared::domain::{ChannelName, ContactSubmission};
use tracing::debug;
use url::Url;

use crate::{endpoint, provider_failure, render_sms, DeliveryChannel, SmsMessage, SmsSender};

pub const TWILIO_API_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

/// Sends text messages through the Twilio Messages REST resource.
#[derive(Clone)]
pub struct TwilioClient {
    http: Client,
    api_base: Url,
    account_sid: String,
    auth_token: String,
}

impl TwilioClient {
    pub fn new(
        http: Client,
        api_base: Url,
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_base,
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
        }
    }

    fn messages_url(&self) -> String {
        endpoint(
            &self.api_base,
            &format!("Accounts/{}/Messages.json", self.account_sid),
        )
    }
}

#[async_trait]
impl SmsSender for TwilioClient {
    async fn send_sms(&self, message: &SmsMessage) -> anyhow::Result<()> {
        let url = self.messages_url();
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("From", message.from.as_str()),
                ("To", message.to.as_str()),
                ("Body", message.body.as_str()),
            ])
            .send()
            .await
            .with_context(|| format!("sms request to {url} failed"))?;

        if !response.status().is_success() {
            return Err(provider_failure(response).await);
        }
        debug!(to = %message.to, "sms accepted by provider");
        Ok(())
    }
}

pub struct SmsChannel {
    sender: Arc<dyn SmsSender>,
    from: String,
    to: String,
}

impl SmsChannel {
    pub fn new(sender: Arc<dyn SmsSender>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            sender,
            from: from.into(),
            to: to.into(),
        }
    }
}

#[async_trait]
impl DeliveryChannel for SmsChannel {
    fn name(&self) -> ChannelName {
        ChannelName::Sms
    }

    async fn deliver(&self, submission: &ContactSubmission) -> anyhow::Result<()> {
        let message = render_sms(submission, &self.from, &self.to);
        self.sender.send_sms(&message).await
    }
}
