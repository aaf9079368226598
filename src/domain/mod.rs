//! Domain layer - Core business logic and rules
//!
//! This layer contains:
//! - Telephony event model: what the platform pushes to us
//! - Classifier: which events become CRM call-log entries
//! - CRM record and the port used to deliver it
//! - Subscription model for the webhook channel

pub mod classifier;
pub mod crm;
pub mod shared;
pub mod subscription;
pub mod telephony;

// Re-export commonly used types
pub use classifier::classify;
pub use crm::{CallLogger, ClassifiedCrmEvent, CrmEventKind};
pub use shared::{BridgeError, Result};
