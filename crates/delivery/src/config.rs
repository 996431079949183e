use std::{fmt, sync::Arc, time::Duration};

use anyhow::Context;
use reqwest::Client;
use shared::domain::ChannelName;
use url::Url;

use crate::{DeliveryChannel, EmailChannel, SendGridClient, SmsChannel, TwilioClient};

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct EmailConfig {
    pub api_key: String,
    /// Used as both sender and recipient.
    pub address: String,
    pub api_base: Url,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &"<redacted>")
            .field("address", &self.address)
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}

#[derive(Clone)]
pub struct SmsConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub to_number: String,
    pub api_base: Url,
}

impl fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from_number", &self.from_number)
            .field("to_number", &self.to_number)
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}

/// Which delivery channels are active for the life of the process.
#[derive(Debug, Clone)]
pub struct DeliveryChannelConfig {
    pub email: Option<EmailConfig>,
    pub sms: Option<SmsConfig>,
    pub timeout: Duration,
}

impl Default for DeliveryChannelConfig {
    fn default() -> Self {
        Self::logging_only()
    }
}

impl DeliveryChannelConfig {
    pub fn logging_only() -> Self {
        Self {
            email: None,
            sms: None,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn active_channels(&self) -> Vec<ChannelName> {
        let mut channels = Vec::new();
        if self.email.is_some() {
            channels.push(ChannelName::Email);
        }
        if self.sms.is_some() {
            channels.push(ChannelName::Sms);
        }
        channels
    }

    /// Builds one channel per active provider, sharing a single HTTP client.
    pub fn build_channels(&self) -> anyhow::Result<Vec<Arc<dyn DeliveryChannel>>> {
        let mut channels: Vec<Arc<dyn DeliveryChannel>> = Vec::new();
        if self.email.is_none() && self.sms.is_none() {
            return Ok(channels);
        }

        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .context("failed to build provider HTTP client")?;

        if let Some(email) = &self.email {
            let sender = SendGridClient::new(http.clone(), email.api_base.clone(), &email.api_key);
            channels.push(Arc::new(EmailChannel::new(
                Arc::new(sender),
                &email.address,
                &email.address,
            )));
        }

        if let Some(sms) = &self.sms {
            let sender = TwilioClient::new(
                http,
                sms.api_base.clone(),
                &sms.account_sid,
                &sms.auth_token,
            );
            channels.push(Arc::new(SmsChannel::new(
                Arc::new(sender),
                &sms.from_number,
                &sms.to_number,
            )));
        }

        Ok(channels)
    }
}
