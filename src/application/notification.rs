//! Notification processing use case
//!
//! parse -> classify -> deliver. Runs after the webhook has already been
//! acknowledged, so nothing here may fail outward: every error ends as a log
//! line and a `ProcessOutcome`.

use crate::domain::telephony::Notification;
use crate::domain::{classify, CallLogger, CrmEventKind};
use std::sync::Arc;
use tracing::{debug, error, info};

/// What became of one notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// No body: validation request from the platform
    HandshakeOnly,
    /// Body was not a telephony session event
    Malformed,
    /// Parsed fine, but not a missed / dropped / voicemail call
    Ignored,
    /// Delivered to the CRM
    Forwarded(CrmEventKind),
    /// Classified, but the CRM did not take it. The event is lost.
    DeliveryFailed(CrmEventKind),
}

impl ProcessOutcome {
    /// Label used for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessOutcome::HandshakeOnly => "handshake",
            ProcessOutcome::Malformed => "malformed",
            ProcessOutcome::Ignored => "ignored",
            ProcessOutcome::Forwarded(_) => "forwarded",
            ProcessOutcome::DeliveryFailed(_) => "delivery_failed",
        }
    }

    pub fn event_kind(&self) -> Option<CrmEventKind> {
        match self {
            ProcessOutcome::Forwarded(kind) | ProcessOutcome::DeliveryFailed(kind) => Some(*kind),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct NotificationProcessor {
    call_logger: Arc<dyn CallLogger>,
}

impl NotificationProcessor {
    pub fn new(call_logger: Arc<dyn CallLogger>) -> Self {
        Self { call_logger }
    }

    /// Handle one raw webhook body.
    pub async fn process(&self, body: &[u8]) -> ProcessOutcome {
        if body.iter().all(u8::is_ascii_whitespace) {
            debug!("Notification without body, nothing to classify");
            return ProcessOutcome::HandshakeOnly;
        }

        let notification = match Notification::from_slice(body) {
            Ok(notification) => notification,
            Err(e) => {
                error!("Handler error: {}", e);
                return ProcessOutcome::Malformed;
            }
        };

        let session = notification
            .body
            .telephony_session_id
            .as_deref()
            .unwrap_or("<unknown>");

        let crm_event = match classify(&notification.body) {
            Some(event) => event,
            None => {
                debug!(
                    "Session {} (sequence {:?}, notification {:?}) is not a missed call, skipping",
                    session, notification.body.sequence, notification.uuid
                );
                return ProcessOutcome::Ignored;
            }
        };

        let kind = crm_event.event;
        match self.call_logger.log_call(&crm_event).await {
            Ok(()) => {
                info!("CRM logged: {:?}", crm_event);
                ProcessOutcome::Forwarded(kind)
            }
            Err(e) => {
                error!(
                    "CRM delivery failed for session {} ({}): {}",
                    session,
                    kind.as_str(),
                    e
                );
                ProcessOutcome::DeliveryFailed(kind)
            }
        }
    }
}
