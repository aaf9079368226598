//! Subscription registrar
//!
//! Registers the bridge's webhook with the telephony platform. Runs once at
//! startup; a failure leaves the listener up but no events will arrive.

use crate::config::Config;
use crate::domain::subscription::{Subscription, SubscriptionRequest};
use crate::domain::{BridgeError, Result};
use crate::infrastructure::http::{build_client, join_url};
use tracing::{debug, info};

const SUBSCRIPTION_PATH: &str = "/restapi/v1.0/subscription";

pub struct SubscriptionRegistrar {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    request: SubscriptionRequest,
}

impl SubscriptionRegistrar {
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_client(config.http.request_timeout())?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: join_url(&config.platform.base_url, SUBSCRIPTION_PATH),
            access_token: config.platform.access_token.clone(),
            request: SubscriptionRequest::webhook(
                config.platform.event_filters.clone(),
                config.webhook.address.clone(),
                config.webhook.validation_token.clone(),
            ),
        }
    }

    /// Request body that `create_subscription` sends
    pub fn request(&self) -> &SubscriptionRequest {
        &self.request
    }

    /// Create the webhook subscription.
    ///
    /// Any non-2xx answer becomes `BridgeError::Subscription` with the
    /// platform's response body attached.
    pub async fn create_subscription(&self) -> Result<Subscription> {
        debug!(
            "Creating subscription at {} for filters {:?}",
            self.endpoint, self.request.event_filters
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&self.request)
            .send()
            .await
            .map_err(BridgeError::subscription_unreachable)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(BridgeError::subscription_unreachable)?;

        if !status.is_success() {
            return Err(BridgeError::subscription_rejected(status.as_u16(), body));
        }

        let subscription: Subscription = serde_json::from_str(&body).map_err(|e| {
            BridgeError::subscription_rejected(
                status.as_u16(),
                format!("unreadable subscription response ({}): {}", e, body),
            )
        })?;

        info!(
            "Subscription created: {} (status: {}, expires: {})",
            subscription.id,
            subscription.status.as_deref().unwrap_or("unknown"),
            subscription.expiration_time.as_deref().unwrap_or("unknown")
        );

        Ok(subscription)
    }
}
