//! Bridge errors

use thiserror::Error;

/// Failures raised by the bridge components.
///
/// None of these ever reach the webhook response: each is caught where it
/// happens and turned into a log line.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The platform refused the subscription request or was unreachable.
    #[error("Subscription error: {}", describe(status, body))]
    Subscription { status: Option<u16>, body: String },

    /// The notification body was not a telephony session event.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The CRM refused the call record or was unreachable.
    #[error("Forwarding error: {}", describe(status, message))]
    Forwarding { status: Option<u16>, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe(status: &Option<u16>, detail: &str) -> String {
    match status {
        Some(code) => format!("HTTP {} {}", code, detail),
        None => detail.to_string(),
    }
}

impl BridgeError {
    pub fn subscription_rejected(status: u16, body: impl Into<String>) -> Self {
        BridgeError::Subscription {
            status: Some(status),
            body: body.into(),
        }
    }

    pub fn subscription_unreachable(err: impl std::fmt::Display) -> Self {
        BridgeError::Subscription {
            status: None,
            body: err.to_string(),
        }
    }

    pub fn forwarding_rejected(status: u16, body: impl Into<String>) -> Self {
        BridgeError::Forwarding {
            status: Some(status),
            message: body.into(),
        }
    }

    pub fn forwarding_unreachable(err: impl std::fmt::Display) -> Self {
        BridgeError::Forwarding {
            status: None,
            message: err.to_string(),
        }
    }

    /// HTTP status carried by the error, if the remote side answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            BridgeError::Subscription { status, .. } | BridgeError::Forwarding { status, .. } => {
                *status
            }
            _ => None,
        }
    }
}
