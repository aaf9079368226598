//! Configuration management
//!
//! Values are layered, lowest priority first:
//! 1. built-in defaults
//! 2. the short variable names used by older deployments (`RC_BASE`, `CRM_TOKEN`, ...)
//! 3. an optional `callbridge.toml` (or whatever path `CALLBRIDGE_CONFIG` names)
//! 4. `CALLBRIDGE__<SECTION>__<KEY>` environment variables
//!
//! The loaded value is immutable and shared by every component.

use crate::domain::{BridgeError, Result};
use crate::domain::subscription::MISSED_CALL_FILTER;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "callbridge";

/// Short environment names mapped onto config keys
const LEGACY_ENV: &[(&str, &str)] = &[
    ("RC_BASE", "platform.base_url"),
    ("RC_ACCESS_TOKEN", "platform.access_token"),
    ("WEBHOOK_URL", "webhook.address"),
    ("VALIDATION_TOKEN", "webhook.validation_token"),
    ("CRM_BASE", "crm.base_url"),
    ("CRM_TOKEN", "crm.token"),
    ("PORT", "server.port"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub platform: PlatformConfig,
    pub webhook: WebhookConfig,
    pub crm: CrmConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Route the platform pushes notifications to
    pub webhook_path: String,
}

/// Telephony platform REST API
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub base_url: String,
    pub access_token: String,
    pub event_filters: Vec<String>,
}

/// Public side of the webhook as registered with the platform
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub address: String,
    pub validation_token: String,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    pub base_url: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Upper bound on every outbound request
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            webhook_path: "/ringcentral/events".to_string(),
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            access_token: String::new(),
            event_filters: vec![MISSED_CALL_FILTER.to_string()],
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// Secrets stay out of `{:?}` output; startup logs the config.
impl std::fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &redact(&self.access_token))
            .field("event_filters", &self.event_filters)
            .finish()
    }
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("address", &self.address)
            .field("validation_token", &redact(&self.validation_token))
            .finish()
    }
}

impl std::fmt::Debug for CrmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmConfig")
            .field("base_url", &self.base_url)
            .field("token", &redact(&self.token))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl Config {
    /// Load from the default file name and the process environment.
    pub fn load() -> Result<Self> {
        let file = std::env::var("CALLBRIDGE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&file)
    }

    /// Load using `file` (extension optional, may be absent) plus the environment.
    pub fn load_from(file: &str) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        for (var, key) in LEGACY_ENV {
            if let Ok(value) = std::env::var(var) {
                builder = builder
                    .set_default(*key, value)
                    .map_err(|e| BridgeError::Config(e.to_string()))?;
            }
        }

        let settings = builder
            .add_source(::config::File::with_name(file).required(false))
            .add_source(
                ::config::Environment::with_prefix("CALLBRIDGE")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("platform.event_filters")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| BridgeError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| BridgeError::Config(e.to_string()))
    }

    /// Reject configurations the bridge cannot run with.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("platform.base_url", &self.platform.base_url),
            ("platform.access_token", &self.platform.access_token),
            ("webhook.address", &self.webhook.address),
            ("webhook.validation_token", &self.webhook.validation_token),
            ("crm.base_url", &self.crm.base_url),
            ("crm.token", &self.crm.token),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| *key)
            .collect();

        if !missing.is_empty() {
            return Err(BridgeError::Config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        }

        if !self.server.webhook_path.starts_with('/') {
            return Err(BridgeError::Config(format!(
                "server.webhook_path must start with '/': {}",
                self.server.webhook_path
            )));
        }

        if self.platform.event_filters.is_empty() {
            return Err(BridgeError::Config(
                "platform.event_filters must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
