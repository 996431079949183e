use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ChannelName, ChannelResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    /// One provider call failed. Carried by `ChannelResult::Failed` and only
    /// logged; it never reaches the HTTP caller on its own.
    ChannelFailure,
    DeliveryFailed,
    UnexpectedFault,
}

impl ErrorCode {
    /// HTTP status the server answers with for this class of error.
    pub fn status(self) -> u16 {
        match self {
            ErrorCode::InvalidRequest => 400,
            ErrorCode::ChannelFailure | ErrorCode::DeliveryFailed | ErrorCode::UnexpectedFault => {
                500
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("missing or empty fields: {}", .missing.join(", "))]
    InvalidRequest { missing: Vec<&'static str> },

    #[error("every configured channel failed: {}", describe_failures(.failures))]
    DeliveryFailed { failures: Vec<ChannelResult> },

    #[error("unexpected fault: {0}")]
    UnexpectedFault(String),
}

impl ChannelResult {
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            ChannelResult::Succeeded(_) => None,
            ChannelResult::Failed(..) => Some(ErrorCode::ChannelFailure),
        }
    }
}

impl RelayError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RelayError::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            RelayError::DeliveryFailed { .. } => ErrorCode::DeliveryFailed,
            RelayError::UnexpectedFault(_) => ErrorCode::UnexpectedFault,
        }
    }

    pub fn failed_channels(&self) -> Vec<ChannelName> {
        match self {
            RelayError::DeliveryFailed { failures } => {
                failures.iter().map(ChannelResult::channel).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn describe_failures(failures: &[ChannelResult]) -> String {
    failures
        .iter()
        .map(|result| match result {
            ChannelResult::Failed(channel, cause) => format!("{channel} ({cause})"),
            ChannelResult::Succeeded(channel) => channel.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
