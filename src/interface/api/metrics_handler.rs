//! Prometheus metrics handler

use crate::application::ProcessOutcome;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics exporter
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(
        "webhook_notifications_total",
        "Total number of webhook notifications received"
    );
    describe_counter!(
        "webhook_notifications_processed_total",
        "Webhook notifications by processing outcome"
    );
    describe_counter!(
        "crm_deliveries_total",
        "CRM call-log deliveries by event kind and result"
    );
    describe_counter!(
        "subscription_registrations_total",
        "Webhook subscription attempts against the telephony platform"
    );

    Ok(handle)
}

/// HTTP metrics handler
pub async fn metrics_handler(
    axum::extract::State(prometheus_handle): axum::extract::State<PrometheusHandle>,
) -> Response {
    let metrics = prometheus_handle.render();
    (StatusCode::OK, metrics).into_response()
}

/// Record an inbound webhook request
pub fn record_notification_received() {
    counter!("webhook_notifications_total").increment(1);
}

/// Record how a notification was handled
pub fn record_outcome(outcome: &ProcessOutcome) {
    counter!("webhook_notifications_processed_total", "outcome" => outcome.as_str()).increment(1);

    if let Some(kind) = outcome.event_kind() {
        let success = matches!(outcome, ProcessOutcome::Forwarded(_));
        counter!(
            "crm_deliveries_total",
            "event" => kind.as_str(),
            "success" => success.to_string()
        )
        .increment(1);
    }
}

/// Record a subscription attempt
pub fn record_subscription(success: bool) {
    counter!("subscription_registrations_total", "success" => success.to_string()).increment(1);
}
