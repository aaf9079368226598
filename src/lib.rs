//! callbridge - telephony webhook to CRM call-log bridge
//!
//! Subscribes to telephony session events on the platform, receives the
//! pushed notifications, picks out missed, dropped and voicemail calls and
//! posts them to the CRM's call log.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::BridgeError;
pub use domain::shared::result::Result;
