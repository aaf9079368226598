//! Telephony platform REST API

pub mod registrar;

pub use registrar::SubscriptionRegistrar;
