use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelName {
    Email,
    Sms,
}

impl ChannelName {
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelName::Email => "email",
            ChannelName::Sms => "sms",
        }
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five inputs of the contact form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 5] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Subject,
        ContactField::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }
}

/// A validated contact form submission. Every field is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelResult {
    Succeeded(ChannelName),
    Failed(ChannelName, String),
}

impl ChannelResult {
    pub fn channel(&self) -> ChannelName {
        match self {
            ChannelResult::Succeeded(channel) | ChannelResult::Failed(channel, _) => *channel,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChannelResult::Succeeded(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryReport {
    /// Accepted and logged; no delivery channel is active.
    NoChannelsConfigured,
    Delivered { services: Vec<ChannelName> },
}

impl DeliveryReport {
    pub fn services(&self) -> &[ChannelName] {
        match self {
            DeliveryReport::NoChannelsConfigured => &[],
            DeliveryReport::Delivered { services } => services,
        }
    }
}
