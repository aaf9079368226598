//! HTTP call logger for the CRM's `/api/calls` endpoint

use crate::config::Config;
use crate::domain::{BridgeError, CallLogger, ClassifiedCrmEvent, Result};
use crate::infrastructure::http::{build_client, join_url};
use async_trait::async_trait;

const CALLS_PATH: &str = "/api/calls";

#[derive(Clone)]
pub struct HttpCallLogger {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl HttpCallLogger {
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_client(config.http.request_timeout())?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: join_url(&config.crm.base_url, CALLS_PATH),
            token: config.crm.token.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CallLogger for HttpCallLogger {
    async fn log_call(&self, event: &ClassifiedCrmEvent) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(event)
            .send()
            .await
            .map_err(BridgeError::forwarding_unreachable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::forwarding_rejected(status.as_u16(), body));
        }

        Ok(())
    }
}
