//! CRM call-log records
//!
//! A `ClassifiedCrmEvent` is built by the classifier and handed to a
//! `CallLogger` exactly once. It is never stored.

use super::shared::Result;
use super::telephony::PartyDirection;
use serde::{Deserialize, Serialize};

/// Call outcome reported to the CRM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrmEventKind {
    /// The platform flagged the call as missed
    Missed,
    /// The call ended in voicemail
    Voicemail,
    /// Inbound call dropped before it was answered
    Disconnected,
}

impl CrmEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrmEventKind::Missed => "Missed",
            CrmEventKind::Voicemail => "Voicemail",
            CrmEventKind::Disconnected => "Disconnected",
        }
    }
}

/// Record posted to `<crm-base>/api/calls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedCrmEvent {
    pub event: CrmEventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<PartyDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephony_session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// Port to the CRM's call log
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CallLogger: Send + Sync {
    /// Deliver one classified event. No retries are made.
    async fn log_call(&self, event: &ClassifiedCrmEvent) -> Result<()>;
}
