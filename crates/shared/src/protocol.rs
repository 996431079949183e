use serde::{Deserialize, Serialize};

use crate::domain::{ChannelName, ContactField, ContactSubmission, DeliveryReport};

pub const SEND_MESSAGE_ROUTE: &str = "/send-message";

pub const MSG_SENT: &str = "Message sent successfully";
pub const MSG_RECEIVED_UNDELIVERED: &str =
    "Message received successfully. We will get back to you soon!";
pub const NOTE_NO_SERVICES: &str =
    "Email/SMS services not configured - message logged to server log";
pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_DELIVERY_FAILED: &str = "Failed to send message. Please try again later.";
pub const MSG_UNEXPECTED: &str = "Error sending message";
pub const MSG_BODY_TOO_LARGE: &str = "Message is too large";

/// Inbound body of `POST /send-message`. Fields are optional on the wire so
/// that an absent field is reported the same way as an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmissionPayload {
    pub fn raw(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Name => self.name.as_deref(),
            ContactField::Email => self.email.as_deref(),
            ContactField::Phone => self.phone.as_deref(),
            ContactField::Subject => self.subject.as_deref(),
            ContactField::Message => self.message.as_deref(),
        }
    }

    /// Fields that are absent or blank after trimming, in form order.
    pub fn missing_fields(&self) -> Vec<ContactField> {
        ContactField::ALL
            .into_iter()
            .filter(|field| self.raw(*field).map(str::trim).unwrap_or("").is_empty())
            .collect()
    }

    pub fn into_submission(self) -> Result<ContactSubmission, Vec<ContactField>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(missing);
        }
        let take = |value: Option<String>| value.unwrap_or_default().trim().to_string();
        Ok(ContactSubmission {
            name: take(self.name),
            email: take(self.email),
            phone: take(self.phone),
            subject: take(self.subject),
            message: take(self.message),
        })
    }
}

impl From<&ContactSubmission> for SubmissionPayload {
    fn from(value: &ContactSubmission) -> Self {
        Self {
            name: Some(value.name.clone()),
            email: Some(value.email.clone()),
            phone: Some(value.phone.clone()),
            subject: Some(value.subject.clone()),
            message: Some(value.message.clone()),
        }
    }
}

/// Body of every `POST /send-message` response, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<ChannelName>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            services: None,
            note: None,
            error: None,
        }
    }

    pub fn with_error_detail(mut self, detail: Option<String>) -> Self {
        self.error = detail;
        self
    }
}

impl From<&DeliveryReport> for RelayResponse {
    fn from(report: &DeliveryReport) -> Self {
        match report {
            DeliveryReport::NoChannelsConfigured => Self {
                success: true,
                message: MSG_RECEIVED_UNDELIVERED.to_string(),
                services: Some(Vec::new()),
                note: Some(NOTE_NO_SERVICES.to_string()),
                error: None,
            },
            DeliveryReport::Delivered { services } => Self {
                success: true,
                message: MSG_SENT.to_string(),
                services: Some(services.clone()),
                note: None,
                error: None,
            },
        }
    }
}
