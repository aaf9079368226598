//! Webhook subscription on the telephony platform
//!
//! The bridge creates exactly one subscription at startup and keeps nothing
//! about it beyond logging its id.

use serde::{Deserialize, Serialize};

/// Account-level telephony session events, restricted to missed calls
pub const MISSED_CALL_FILTER: &str = "/restapi/v1.0/account/~/telephony/sessions?missedCall=true";

/// Transport type for push delivery over HTTPS
pub const WEBHOOK_TRANSPORT: &str = "WebHook";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryMode {
    pub transport_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Shared secret echoed back by the platform on every delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_token: Option<String>,
}

impl DeliveryMode {
    pub fn webhook(address: impl Into<String>, validation_token: impl Into<String>) -> Self {
        Self {
            transport_type: WEBHOOK_TRANSPORT.to_string(),
            address: Some(address.into()),
            validation_token: Some(validation_token.into()),
        }
    }
}

/// Body of `POST /restapi/v1.0/subscription`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub event_filters: Vec<String>,
    pub delivery_mode: DeliveryMode,
}

impl SubscriptionRequest {
    pub fn webhook(
        event_filters: Vec<String>,
        address: impl Into<String>,
        validation_token: impl Into<String>,
    ) -> Self {
        Self {
            event_filters,
            delivery_mode: DeliveryMode::webhook(address, validation_token),
        }
    }
}

/// Subscription as returned by the platform
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    #[serde(default)]
    pub event_filters: Vec<String>,
    pub delivery_mode: Option<DeliveryMode>,
    pub status: Option<String>,
    pub creation_time: Option<String>,
    pub expiration_time: Option<String>,
    pub expires_in: Option<i64>,
}
