use thiserror::Error;

use super::Operation;

/// Any failure of a call to the delivery or submit service.
#[derive(Error, Debug, Clone)]
pub enum UpstreamError {
    #[error("{operation} failed: {message}")]
    Transport { operation: Operation, message: String },

    #[error("{operation} timed out")]
    Timeout { operation: Operation },

    #[error("{operation} returned {status}: {body}")]
    Status {
        operation: Operation,
        status: u16,
        body: String,
    },

    #[error("{operation} returned an unexpected body: {message}")]
    Decode { operation: Operation, message: String },
}

impl UpstreamError {
    pub fn from_reqwest(operation: Operation, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout { operation }
        } else {
            UpstreamError::Transport {
                operation,
                message: err.to_string(),
            }
        }
    }

    pub fn decode(operation: Operation, message: impl Into<String>) -> Self {
        UpstreamError::Decode {
            operation,
            message: message.into(),
        }
    }

    pub fn operation(&self) -> &Operation {
        match self {
            UpstreamError::Transport { operation, .. }
            | UpstreamError::Timeout { operation }
            | UpstreamError::Status { operation, .. }
            | UpstreamError::Decode { operation, .. } => operation,
        }
    }

    /// HTTP status the upstream answered with, when it answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout { .. })
    }
}
