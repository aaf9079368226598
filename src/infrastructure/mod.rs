//! Infrastructure layer - Technical implementations
//!
//! This layer contains:
//! - The shared outbound HTTP client
//! - Telephony platform client (webhook subscription)
//! - CRM client (call log delivery)

pub mod crm;
pub mod http;
pub mod platform;
