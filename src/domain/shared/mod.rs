//! Shared kernel - error and result types used across all layers

pub mod error;
pub mod result;

pub use error::BridgeError;
pub use result::Result;
