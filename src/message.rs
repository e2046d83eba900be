use serde::{Deserialize, Serialize};

use crate::catalog::Command;

/// Namespace prefix stamped onto command ids when deriving message types.
pub const MESSAGE_NAMESPACE: &str = "sp:";

/// Typed message delivered into the host page's extension runtime.
///
/// For every non-special command exactly one message is published per
/// selection, with `type` and `category` derived deterministically from the
/// source [`Command`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl RuntimeMessage {
    /// Derive the uniform message shape for a command: `sp:` + id, with the
    /// command's own category.
    pub fn derived(command: &Command) -> Self {
        Self {
            kind: format!("{MESSAGE_NAMESPACE}{}", command.id),
            category: command.category.clone(),
            payload: None,
        }
    }

    /// Build a fixed-shape message, for command families that converge on a
    /// shared type instead of deriving one from their id.
    pub fn fixed(kind: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            category: category.into(),
            payload: None,
        }
    }

    /// Attach a payload to this message.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(id: &str, title: &str, category: &str) -> Command {
        Command {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn derived_message_prefixes_id_and_copies_category() {
        let msg = RuntimeMessage::derived(&command("godMode", "God Mode", "Form"));
        assert_eq!(msg.kind, "sp:godMode");
        assert_eq!(msg.category, "Form");
        assert!(msg.payload.is_none());
    }

    #[test]
    fn payload_survives_serialization() {
        let msg = RuntimeMessage::fixed("sp:openRecordSpotlight", "Navigation")
            .with_payload(serde_json::json!({ "entity": "account" }));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "sp:openRecordSpotlight");
        assert_eq!(json["payload"]["entity"], "account");
    }

    #[test]
    fn payload_field_omitted_when_absent() {
        let msg = RuntimeMessage::fixed("sp:reset", "Impersonation");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("payload"));
    }
}
