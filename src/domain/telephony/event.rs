//! Telephony session notification payloads
//!
//! Every field is optional: the platform omits whatever does not apply to the
//! current state of the call, and the bridge must cope with anything it sends.

use crate::domain::shared::{BridgeError, Result};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Direction of a party's leg of the call.
///
/// Values outside the known set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartyDirection {
    Inbound,
    Outbound,
    Other(String),
}

impl PartyDirection {
    pub fn as_str(&self) -> &str {
        match self {
            PartyDirection::Inbound => "Inbound",
            PartyDirection::Outbound => "Outbound",
            PartyDirection::Other(value) => value,
        }
    }
}

impl From<String> for PartyDirection {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Inbound" => PartyDirection::Inbound,
            "Outbound" => PartyDirection::Outbound,
            _ => PartyDirection::Other(value),
        }
    }
}

impl From<PartyDirection> for String {
    fn from(direction: PartyDirection) -> Self {
        match direction {
            PartyDirection::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// Telephony status code of a party (`status.code`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartyStatusCode {
    Setup,
    Proceeding,
    Answered,
    Disconnected,
    Gone,
    Parked,
    Hold,
    VoiceMail,
    FaxReceive,
    VoiceMailScreening,
    Other(String),
}

impl PartyStatusCode {
    pub fn as_str(&self) -> &str {
        match self {
            PartyStatusCode::Setup => "Setup",
            PartyStatusCode::Proceeding => "Proceeding",
            PartyStatusCode::Answered => "Answered",
            PartyStatusCode::Disconnected => "Disconnected",
            PartyStatusCode::Gone => "Gone",
            PartyStatusCode::Parked => "Parked",
            PartyStatusCode::Hold => "Hold",
            PartyStatusCode::VoiceMail => "VoiceMail",
            PartyStatusCode::FaxReceive => "FaxReceive",
            PartyStatusCode::VoiceMailScreening => "VoiceMailScreening",
            PartyStatusCode::Other(value) => value,
        }
    }
}

impl From<String> for PartyStatusCode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Setup" => PartyStatusCode::Setup,
            "Proceeding" => PartyStatusCode::Proceeding,
            "Answered" => PartyStatusCode::Answered,
            "Disconnected" => PartyStatusCode::Disconnected,
            "Gone" => PartyStatusCode::Gone,
            "Parked" => PartyStatusCode::Parked,
            "Hold" => PartyStatusCode::Hold,
            "VoiceMail" => PartyStatusCode::VoiceMail,
            "FaxReceive" => PartyStatusCode::FaxReceive,
            "VoiceMailScreening" => PartyStatusCode::VoiceMailScreening,
            _ => PartyStatusCode::Other(value),
        }
    }
}

impl From<PartyStatusCode> for String {
    fn from(code: PartyStatusCode) -> Self {
        match code {
            PartyStatusCode::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// Decode a field, treating a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode `parties` element by element so one bad entry does not take the
/// others with it. A non-object entry becomes an empty party.
fn lenient_parties<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<Party>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        )),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyStatus {
    #[serde(default, deserialize_with = "lenient")]
    pub code: Option<PartyStatusCode>,
    #[serde(default, deserialize_with = "lenient")]
    pub reason: Option<String>,
}

/// One end of a party's leg (`from` / `to`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyEndpoint {
    #[serde(default, deserialize_with = "lenient")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub extension_id: Option<String>,
}

/// One participant's leg of a telephony session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub direction: Option<PartyDirection>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<PartyStatus>,
    /// Only sent when the subscription filter carries `missedCall=true`.
    #[serde(default, deserialize_with = "lenient")]
    pub missed_call: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub from: Option<PartyEndpoint>,
    #[serde(default, deserialize_with = "lenient")]
    pub to: Option<PartyEndpoint>,
}

impl Party {
    pub fn status_code(&self) -> Option<&PartyStatusCode> {
        self.status.as_ref().and_then(|s| s.code.as_ref())
    }

    pub fn from_number(&self) -> Option<&str> {
        self.from.as_ref().and_then(|e| e.phone_number.as_deref())
    }

    pub fn to_number(&self) -> Option<&str> {
        self.to.as_ref().and_then(|e| e.phone_number.as_deref())
    }
}

/// Body of a telephony session notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelephonySessionEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub telephony_session_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sequence: Option<i64>,
    /// Kept as sent; it is copied to the CRM record without being parsed.
    #[serde(default, deserialize_with = "lenient")]
    pub event_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_parties")]
    pub parties: Option<Vec<Party>>,
}

impl TelephonySessionEvent {
    /// The party the classifier looks at. Only the first one is inspected.
    pub fn first_party(&self) -> Option<&Party> {
        self.parties.as_ref().and_then(|parties| parties.first())
    }

    fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(wrong_shape(&value, "an event object"));
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn wrong_shape(value: &Value, expected: &str) -> BridgeError {
    let unexpected = match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    };
    <serde_json::Error as de::Error>::invalid_type(unexpected, &expected).into()
}

/// A received notification: the session event plus whatever envelope
/// metadata came with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub uuid: Option<String>,
    pub event_filter: Option<String>,
    pub subscription_id: Option<String>,
    pub body: TelephonySessionEvent,
}

impl Notification {
    /// Parse a webhook body, accepting both the enveloped and the bare form.
    ///
    /// An object with a `body` key is the platform's envelope and its `body`
    /// must itself be an object; anything else is read as a bare event.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut root = match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => map,
            other => return Err(wrong_shape(&other, "a notification object")),
        };

        let Some(body) = root.remove("body") else {
            return Ok(Notification {
                body: TelephonySessionEvent::from_value(Value::Object(root))?,
                ..Default::default()
            });
        };

        let text = |key: &str| root.get(key).and_then(Value::as_str).map(str::to_string);
        Ok(Notification {
            uuid: text("uuid"),
            event_filter: text("event"),
            subscription_id: text("subscriptionId"),
            body: TelephonySessionEvent::from_value(body)?,
        })
    }
}
