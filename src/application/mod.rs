//! Application layer - Use cases and application services
//!
//! This layer orchestrates domain objects to fulfill use cases.
//! It's responsible for:
//! - Turning a raw webhook body into a classified CRM event
//! - Handing classified events to the CRM port

pub mod notification;

pub use notification::{NotificationProcessor, ProcessOutcome};
