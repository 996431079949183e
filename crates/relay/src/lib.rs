//! Best-effort relay of contact submissions to the configured delivery channels.
//!
//! A submission moves through `Received -> Validated -> {NoChannelsConfigured |
//! ChannelsAttempted} -> Reported`. Nothing is retried; a failed submission is
//! only visible in the log.

use std::sync::Arc;

use delivery::DeliveryChannel;
use futures::future::join_all;
use shared::{
    domain::{ChannelName, ChannelResult, ContactField, ContactSubmission, DeliveryReport},
    error::RelayError,
    protocol::SubmissionPayload,
};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct RelayService {
    channels: Vec<Arc<dyn DeliveryChannel>>,
}

impl RelayService {
    pub fn new(channels: Vec<Arc<dyn DeliveryChannel>>) -> Self {
        Self { channels }
    }

    pub fn channel_names(&self) -> Vec<ChannelName> {
        self.channels.iter().map(|channel| channel.name()).collect()
    }

    pub async fn relay(&self, payload: SubmissionPayload) -> Result<DeliveryReport, RelayError> {
        let submission_id = Uuid::new_v4();

        let submission = payload.into_submission().map_err(|missing| {
            let missing: Vec<&'static str> =
                missing.into_iter().map(ContactField::as_str).collect();
            warn!(%submission_id, ?missing, "rejected contact submission");
            RelayError::InvalidRequest { missing }
        })?;

        info!(
            %submission_id,
            name = %submission.name,
            email = %submission.email,
            subject = %submission.subject,
            "contact submission received"
        );

        if self.channels.is_empty() {
            info!(
                %submission_id,
                phone = %submission.phone,
                message = %submission.message,
                "no delivery channels configured; submission logged only"
            );
        }

        let results = attempt_all(&self.channels, &submission).await;
        for result in &results {
            if let ChannelResult::Failed(channel, cause) = result {
                warn!(
                    %submission_id,
                    %channel,
                    code = ?result.error_code(),
                    %cause,
                    "channel delivery failed"
                );
            }
        }

        let outcome = aggregate(results);
        match &outcome {
            Ok(report) => info!(
                %submission_id,
                services = ?report.services(),
                "contact submission reported"
            ),
            Err(err) => error!(%submission_id, %err, "contact submission not delivered"),
        }
        outcome
    }
}

/// Attempts every channel concurrently. A failing channel never prevents the
/// others from being tried. Results are in channel order.
pub async fn attempt_all(
    channels: &[Arc<dyn DeliveryChannel>],
    submission: &ContactSubmission,
) -> Vec<ChannelResult> {
    join_all(channels.iter().map(|channel| async move {
        let name = channel.name();
        match channel.deliver(submission).await {
            Ok(()) => ChannelResult::Succeeded(name),
            Err(err) => ChannelResult::Failed(name, format!("{err:#}")),
        }
    }))
    .await
}

/// Folds per-channel outcomes into the aggregate verdict:
/// nothing attempted is accepted without delivery, all failed is an error,
/// otherwise the succeeded channels are reported and failures are dropped.
pub fn aggregate(results: Vec<ChannelResult>) -> Result<DeliveryReport, RelayError> {
    if results.is_empty() {
        return Ok(DeliveryReport::NoChannelsConfigured);
    }

    let services: Vec<ChannelName> = results
        .iter()
        .filter(|result| result.is_success())
        .map(ChannelResult::channel)
        .collect();

    if services.is_empty() {
        return Err(RelayError::DeliveryFailed { failures: results });
    }

    Ok(DeliveryReport::Delivered { services })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
