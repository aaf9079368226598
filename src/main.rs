use callbridge::application::NotificationProcessor;
use callbridge::config::Config;
use callbridge::infrastructure::crm::HttpCallLogger;
use callbridge::infrastructure::platform::SubscriptionRegistrar;
use callbridge::interface::api::{build_router, init_metrics, record_subscription, WebhookState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting callbridge");

    // Load configuration
    let config = Config::load()?;
    config.validate()?;
    info!("Configuration loaded: {:?}", config);

    info!("Initializing Prometheus metrics exporter");
    let prometheus_handle = init_metrics()?;

    let call_logger = Arc::new(HttpCallLogger::new(&config)?);
    info!("CRM call log endpoint: {}", call_logger.endpoint());

    let processor = NotificationProcessor::new(call_logger);
    let state = WebhookState::new(processor, config.webhook.validation_token.as_str());
    let app = build_router(state, &config.server.webhook_path, prometheus_handle);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(
        "Webhook listening on http://{}{}",
        listener.local_addr()?,
        config.server.webhook_path
    );

    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    });

    // The listener is already up, so the platform's verification request
    // can be answered while the subscription is being created.
    let registrar = SubscriptionRegistrar::new(&config)?;
    register_subscription(&registrar).await;

    server.await??;
    info!("Shutting down...");

    Ok(())
}

/// Create the webhook subscription. Failure is logged, never fatal: the
/// listener keeps serving, it just won't receive any events.
async fn register_subscription(registrar: &SubscriptionRegistrar) {
    match registrar.create_subscription().await {
        Ok(subscription) => {
            record_subscription(true);
            info!("Subscription {} is active", subscription.id);
        }
        Err(e) => {
            record_subscription(false);
            error!("{}", e);
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
