//! API interface implementations

pub mod health;
pub mod metrics_handler;
pub mod router;
pub mod webhook_handler;

pub use health::{health_check, ApiResponse};
pub use metrics_handler::{init_metrics, record_subscription};
pub use router::build_router;
pub use webhook_handler::{WebhookState, VALIDATION_TOKEN_HEADER};
