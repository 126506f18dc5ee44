use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Slack message metadata: an event type plus free-form payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub(crate) struct Metadata {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub event_payload: Map<String, Value>,
}

impl Metadata {
    pub(crate) fn new(event_type: impl Into<String>, event_payload: Value) -> Self {
        let event_payload = match event_payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            event_type: event_type.into(),
            event_payload,
        }
    }

    /// String value of a payload field. Non-string values don't count.
    pub(crate) fn payload_str(&self, key: &str) -> Option<&str> {
        self.event_payload.get(key).and_then(Value::as_str)
    }
}

/// A message for the Slack poster, pushed to the notifications list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct Notification {
    pub channel: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// An emoji reaction, pushed to the reactions list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reaction {
    pub reaction: String,
    pub channel: String,
    pub ts: String,
}

/// A request to delete a message after `ttl` seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Deletion {
    pub channel: String,
    pub ts: String,
    pub ttl: u64,
}

/// A message as returned by `conversations.history` and `conversations.replies`.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub(crate) struct HistoryMessage {
    pub ts: String,
    #[serde(default)]
    pub thread_ts: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl HistoryMessage {
    /// The event type recorded in this message's metadata, or `""`.
    pub(crate) fn event_type(&self) -> &str {
        self.metadata
            .as_ref()
            .map_or("", |metadata| metadata.event_type.as_str())
    }
}
