//! Telephony webhook endpoint
//!
//! The platform expects a 200 with its `Validation-Token` header echoed back
//! on every delivery, and it does not wait for our downstream work. The
//! acknowledgment is therefore built before anything else happens and does
//! not depend on the body; processing runs in its own task.

use super::metrics_handler::{record_notification_received, record_outcome};
use crate::application::NotificationProcessor;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub const VALIDATION_TOKEN_HEADER: HeaderName = HeaderName::from_static("validation-token");

/// State shared by webhook requests. Read-only.
#[derive(Clone)]
pub struct WebhookState {
    pub processor: NotificationProcessor,
    /// Token registered with the subscription, used only to flag mismatches
    pub validation_token: Arc<str>,
}

impl WebhookState {
    pub fn new(processor: NotificationProcessor, validation_token: impl Into<Arc<str>>) -> Self {
        Self {
            processor,
            validation_token: validation_token.into(),
        }
    }
}

/// Receive one pushed notification
pub async fn receive_notification(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    record_notification_received();

    let response = acknowledge(&headers);

    if let Some(token) = headers.get(&VALIDATION_TOKEN_HEADER) {
        if !state.validation_token.is_empty()
            && token.as_bytes() != state.validation_token.as_bytes()
        {
            warn!("Validation-Token on notification does not match the configured token");
        }
    }

    match body {
        Ok(body) => {
            let processor = state.processor.clone();
            tokio::spawn(async move {
                let outcome = processor.process(&body).await;
                debug!("Notification processed: {}", outcome.as_str());
                record_outcome(&outcome);
            });
        }
        Err(rejection) => {
            error!("Handler error: could not read notification body: {}", rejection);
        }
    }

    response
}

/// 200, empty body, `Validation-Token` echoed verbatim when present.
pub fn acknowledge(headers: &HeaderMap) -> Response {
    let mut response = StatusCode::OK.into_response();
    if let Some(token) = headers.get(&VALIDATION_TOKEN_HEADER) {
        response
            .headers_mut()
            .insert(VALIDATION_TOKEN_HEADER, token.clone());
    }
    response
}
