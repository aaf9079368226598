//! API Router configuration

use super::health::health_check;
use super::metrics_handler::metrics_handler;
use super::webhook_handler::{receive_notification, WebhookState};
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

/// Build the HTTP router
///
/// `webhook_path` is the route registered with the platform as the
/// subscription's delivery address.
pub fn build_router(
    state: WebhookState,
    webhook_path: &str,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let health_routes = Router::new().route("/health", get(health_check));

    let webhook_routes = Router::new()
        .route(webhook_path, post(receive_notification))
        .with_state(state);

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    Router::new()
        .merge(health_routes)
        .merge(webhook_routes)
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http())
}
