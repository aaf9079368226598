//! CRM integration

pub mod call_logger;

pub use call_logger::HttpCallLogger;
