//! Shared fixtures for the integration tests

#![allow(dead_code)]

use axum::Router;
use callbridge::application::NotificationProcessor;
use callbridge::config::Config;
use callbridge::infrastructure::crm::HttpCallLogger;
use callbridge::interface::api::{build_router, WebhookState};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::{MockServer, Request};

pub const VALIDATION_TOKEN: &str = "shared-secret";
pub const CRM_TOKEN: &str = "crm-token";
pub const PLATFORM_TOKEN: &str = "rc-access-token";

/// Complete configuration pointing both remotes at `server`
pub fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.platform.base_url = server.uri();
    config.platform.access_token = PLATFORM_TOKEN.to_string();
    config.webhook.address = "https://bridge.example.com/ringcentral/events".to_string();
    config.webhook.validation_token = VALIDATION_TOKEN.to_string();
    config.crm.base_url = server.uri();
    config.crm.token = CRM_TOKEN.to_string();
    config.http.request_timeout_secs = 5;
    config
}

/// Router wired to a real HTTP call logger, without a global metrics recorder
pub fn test_app(config: &Config) -> Router {
    let call_logger = Arc::new(HttpCallLogger::new(config).expect("client"));
    let processor = NotificationProcessor::new(call_logger);
    let state = WebhookState::new(processor, config.webhook.validation_token.as_str());
    let handle = PrometheusBuilder::new().build_recorder().handle();
    build_router(state, &config.server.webhook_path, handle)
}

/// Scenario A payload from the requirements
pub fn missed_call_event() -> Value {
    json!({
        "parties": [{
            "missedCall": true,
            "direction": "Inbound",
            "status": { "code": "Disconnected" },
            "from": { "phoneNumber": "+1555" },
            "to": { "phoneNumber": "+1999" }
        }],
        "telephonySessionId": "s1",
        "sequence": 3,
        "eventTime": "T1"
    })
}

/// Scenario B payload: same call, answered
pub fn answered_call_event() -> Value {
    json!({
        "parties": [{
            "missedCall": false,
            "direction": "Inbound",
            "status": { "code": "Answered" },
            "from": { "phoneNumber": "+1555" },
            "to": { "phoneNumber": "+1999" }
        }],
        "telephonySessionId": "s1",
        "sequence": 3,
        "eventTime": "T1"
    })
}

/// Poll until `server` has seen at least `count` requests or time runs out.
pub async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<Request> {
    for _ in 0..100 {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= count {
            return received;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    server.received_requests().await.unwrap_or_default()
}
