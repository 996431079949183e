use std::{collections::BTreeSet, time::Instant};

use shared::{
    domain::{ContactField, ContactSubmission},
    protocol::{RelayResponse, SubmissionPayload},
};
use tracing::{info, warn};

use crate::{
    notification::{NotificationKind, NotificationSurface},
    transport::{RelayTransport, TransportError},
};

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_SEND_SUCCESS: &str = "Message sent successfully!";
pub const MSG_SEND_FAILURE: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank fields; the relay was not contacted.
    Invalid,
    Sent,
    Failed,
}

#[derive(Debug, Default)]
pub struct ContactForm {
    values: SubmissionPayload,
    invalid: BTreeSet<ContactField>,
    submit: SubmitControl,
}

impl ContactForm {
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.values.name,
            ContactField::Email => &mut self.values.email,
            ContactField::Phone => &mut self.values.phone,
            ContactField::Subject => &mut self.values.subject,
            ContactField::Message => &mut self.values.message,
        };
        *slot = Some(value.into());
    }

    pub fn value(&self, field: ContactField) -> &str {
        self.values.raw(field).unwrap_or("")
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.invalid.iter().copied()
    }

    pub fn is_invalid(&self, field: ContactField) -> bool {
        self.invalid.contains(&field)
    }

    pub fn submit_control(&self) -> SubmitControl {
        self.submit
    }

    pub fn reset(&mut self) {
        self.values = SubmissionPayload::default();
        self.invalid.clear();
    }

    /// Marks blank fields invalid and returns the trimmed submission when none are.
    pub fn validate(&mut self) -> Option<ContactSubmission> {
        match self.values.clone().into_submission() {
            Ok(submission) => {
                self.invalid.clear();
                Some(submission)
            }
            Err(missing) => {
                self.invalid = missing.into_iter().collect();
                None
            }
        }
    }

    /// Validates and, when every field is filled, puts the submit control in
    /// its in-flight state. Blank fields raise an error notification instead.
    pub fn begin_submit(
        &mut self,
        notifications: &mut NotificationSurface,
    ) -> Option<ContactSubmission> {
        let Some(submission) = self.validate() else {
            notifications.push(MSG_FILL_ALL_FIELDS, NotificationKind::Error, Instant::now());
            return None;
        };

        self.submit = SubmitControl {
            disabled: true,
            loading: true,
        };
        Some(submission)
    }

    /// Settles an in-flight submission. The submit control is restored either way.
    pub fn finish_submit(
        &mut self,
        reply: Result<RelayResponse, TransportError>,
        notifications: &mut NotificationSurface,
    ) -> SubmitOutcome {
        let outcome = match reply {
            Ok(response) if response.success => {
                info!(services = ?response.services, "contact message sent");
                notifications.push(MSG_SEND_SUCCESS, NotificationKind::Success, Instant::now());
                self.reset();
                SubmitOutcome::Sent
            }
            Ok(response) => {
                warn!(message = %response.message, "relay rejected contact message");
                notifications.push(MSG_SEND_FAILURE, NotificationKind::Error, Instant::now());
                SubmitOutcome::Failed
            }
            Err(error) => {
                warn!(%error, "contact message not sent");
                notifications.push(MSG_SEND_FAILURE, NotificationKind::Error, Instant::now());
                SubmitOutcome::Failed
            }
        };

        self.submit = SubmitControl::default();
        outcome
    }

    pub async fn submit(
        &mut self,
        transport: &dyn RelayTransport,
        notifications: &mut NotificationSurface,
    ) -> SubmitOutcome {
        let Some(submission) = self.begin_submit(notifications) else {
            return SubmitOutcome::Invalid;
        };
        let reply = transport.send(&submission).await;
        self.finish_submit(reply, notifications)
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
