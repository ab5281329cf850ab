//! Event body shapes and routing-key extraction.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Structural problems that make a message unroutable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedMessage {
    #[error("message body is not an object")]
    NotAnObject,

    #[error("message body has no action")]
    MissingAction,

    #[error("message body has no object key")]
    MissingObjectKey,
}

/// Extract `(action, object.key)` from a raw body.
///
/// Both must be non-empty strings. No other field is inspected.
pub fn routing_key(body: &Value) -> Result<(&str, &str), MalformedMessage> {
    let body = body.as_object().ok_or(MalformedMessage::NotAnObject)?;

    let action = body
        .get("action")
        .and_then(Value::as_str)
        .filter(|action| !action.is_empty())
        .ok_or(MalformedMessage::MissingAction)?;

    let key = body
        .get("object")
        .and_then(|object| object.get("key"))
        .and_then(Value::as_str)
        .filter(|key| !key.is_empty())
        .ok_or(MalformedMessage::MissingObjectKey)?;

    Ok((action, key))
}

/// Object-storage event notification, as emitted for bucket writes and deletes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    /// e.g. `PutObject`, `DeleteObject`.
    pub action: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,

    pub object: ObjectRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
}

/// The object an event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ObjectRef {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(default, rename = "eTag", skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
}

impl EventBody {
    /// Deserialize a typed body from a raw message body.
    pub fn from_value(body: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_routing_key() {
        let body = json!({"action": "PutObject", "object": {"key": "content/a.json"}});
        assert_eq!(routing_key(&body), Ok(("PutObject", "content/a.json")));
    }

    #[test]
    fn test_routing_key_ignores_other_fields() {
        let body = json!({
            "action": "PutObject",
            "bucket": 42,
            "object": {"key": "content/a.json", "size": "not-a-number"}
        });
        assert!(routing_key(&body).is_ok());
    }

    #[test]
    fn test_routing_key_malformed() {
        assert_eq!(
            routing_key(&json!("not an object")),
            Err(MalformedMessage::NotAnObject)
        );
        assert_eq!(
            routing_key(&json!({"object": {"key": "a"}})),
            Err(MalformedMessage::MissingAction)
        );
        assert_eq!(
            routing_key(&json!({"action": "", "object": {"key": "a"}})),
            Err(MalformedMessage::MissingAction)
        );
        assert_eq!(
            routing_key(&json!({"action": "PutObject"})),
            Err(MalformedMessage::MissingObjectKey)
        );
        assert_eq!(
            routing_key(&json!({"action": "PutObject", "object": {"key": ""}})),
            Err(MalformedMessage::MissingObjectKey)
        );
        assert_eq!(
            routing_key(&json!({"action": "PutObject", "object": {"key": 7}})),
            Err(MalformedMessage::MissingObjectKey)
        );
    }

    #[test]
    fn test_event_body_from_value() {
        let body = json!({
            "action": "PutObject",
            "bucket": "articles",
            "object": {"key": "content/a.json", "size": 1024, "eTag": "abc"},
            "eventTime": "2024-05-01T10:00:00Z"
        });
        let event = EventBody::from_value(&body).unwrap();
        assert_eq!(event.bucket.as_deref(), Some("articles"));
        assert_eq!(event.object.key, "content/a.json");
        assert_eq!(event.object.size, Some(1024));
        assert_eq!(event.object.e_tag.as_deref(), Some("abc"));
        assert_eq!(event.event_time.as_deref(), Some("2024-05-01T10:00:00Z"));
    }
}
