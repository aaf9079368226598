//! Interface layer - External interfaces
//!
//! This layer handles:
//! - The telephony webhook endpoint and its validation handshake
//! - Health and metrics endpoints
//! - Request/response formatting

pub mod api;
