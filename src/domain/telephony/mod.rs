//! Telephony platform event model

pub mod event;

pub use event::{
    Notification, Party, PartyDirection, PartyEndpoint, PartyStatus, PartyStatusCode,
    TelephonySessionEvent,
};
