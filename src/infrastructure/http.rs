//! Outbound HTTP client construction

use crate::domain::{BridgeError, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("callbridge/", env!("CARGO_PKG_VERSION"));

/// Build the client used for calls to the platform and the CRM.
///
/// Every request is bounded by `timeout`, so a stalled remote cannot pin a
/// delivery task forever.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| BridgeError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Join a configured base URL and an API path without doubling slashes.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
