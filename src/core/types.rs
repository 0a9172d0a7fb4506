//! Core domain types shared across the engine

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message in the session log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One entry in the session log
///
/// `content` is raw text; parsing into blocks happens at render time, never
/// at storage time. Messages are append-only and never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique within a session, provided by the injected id source
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    /// Quick actions attached by the assistant; always empty for user messages
    pub actions: Vec<Action>,
    /// True only for the synthetic "chat ended" marker
    pub is_terminal: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(id: String, content: String) -> Self {
        Self {
            id,
            role: MessageRole::User,
            content,
            actions: Vec::new(),
            is_terminal: false,
            created_at: Utc::now(),
        }
    }

    pub fn assistant(id: String, content: String, actions: Vec<Action>) -> Self {
        Self {
            id,
            role: MessageRole::Assistant,
            content,
            actions,
            is_terminal: false,
            created_at: Utc::now(),
        }
    }

    /// The synthetic assistant message that marks the end of a chat
    pub fn terminal(id: String, content: String) -> Self {
        Self {
            id,
            role: MessageRole::Assistant,
            content,
            actions: Vec::new(),
            is_terminal: true,
            created_at: Utc::now(),
        }
    }
}

/// Wire-level action type tag
///
/// Backend payloads may carry types this client does not know yet; those
/// deserialize to `Unknown` instead of failing the whole reply, and the
/// dispatcher ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Navigate,
    Contact,
    Copy,
    #[serde(other)]
    Unknown,
}

/// A suggested follow-up offered by the assistant
///
/// `value` is always present: an internal path, an external URL, an
/// email/phone string, or arbitrary text to copy. `label` may be empty and
/// is resolved to a display string by the action resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default)]
    pub label: String,
    pub value: String,
}

impl Action {
    pub fn new(kind: ActionKind, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Where the user was when they asked
///
/// Captured from the page-context collaborator when a send starts, not when
/// the reply arrives; the two may diverge if the user navigates mid-flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub route: String,
    pub donation_id: Option<String>,
    pub claim_id: Option<String>,
}

/// Parsed body of a successful transport response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantReply {
    pub reply: String,
    /// Classifier hint from the backend, logged for diagnostics only
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Backend suggests handing off to a human
    #[serde(default)]
    pub escalate: bool,
}

/// Source of per-message identifiers
///
/// Injected so sessions stay deterministic in tests; ids must be unique
/// within a session.
pub trait MessageIdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Monotonic counter ids ("msg-1", "msg-2", ...)
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageIdSource for SequentialIds {
    fn next_id(&self) -> String {
        format!("msg-{}", self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Random UUID v4 ids
#[derive(Debug, Default)]
pub struct UuidIds;

impl MessageIdSource for UuidIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_without_actions_deserializes_empty() {
        let reply: AssistantReply =
            serde_json::from_str(r#"{"reply": "Happy to help!"}"#).unwrap();
        assert_eq!(reply.reply, "Happy to help!");
        assert!(reply.actions.is_empty());
        assert!(reply.intent.is_none());
        assert!(!reply.escalate);
    }

    #[test]
    fn test_reply_with_full_payload() {
        let json = r#"{
            "reply": "You can post a donation from your dashboard.",
            "intent": "donation_howto",
            "escalate": false,
            "actions": [
                {"type": "navigate", "label": "Create Donation", "value": "/donor/create"}
            ]
        }"#;
        let reply: AssistantReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.intent.as_deref(), Some("donation_howto"));
        assert_eq!(reply.actions.len(), 1);
        assert_eq!(reply.actions[0].kind, ActionKind::Navigate);
        assert_eq!(reply.actions[0].value, "/donor/create");
    }

    #[test]
    fn test_unrecognized_action_type_maps_to_unknown() {
        let action: Action =
            serde_json::from_str(r#"{"type": "link", "label": "Docs", "value": "/help"}"#)
                .unwrap();
        assert_eq!(action.kind, ActionKind::Unknown);
        assert_eq!(action.label, "Docs");
    }

    #[test]
    fn test_action_label_defaults_to_empty() {
        let action: Action =
            serde_json::from_str(r#"{"type": "copy", "value": "REF-1234"}"#).unwrap();
        assert_eq!(action.kind, ActionKind::Copy);
        assert!(action.label.is_empty());
    }

    #[test]
    fn test_page_context_serializes_camel_case() {
        let context = PageContext {
            route: "/donor/list".to_string(),
            donation_id: Some("d-42".to_string()),
            claim_id: None,
        };
        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["route"], "/donor/list");
        assert_eq!(json["donationId"], "d-42");
        assert!(json["claimId"].is_null());
    }

    #[test]
    fn test_sequential_ids_are_monotonic() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(), "msg-1");
        assert_eq!(ids.next_id(), "msg-2");
        assert_eq!(ids.next_id(), "msg-3");
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let ids = UuidIds;
        let first = ids.next_id();
        let second = ids.next_id();
        assert!(!first.is_empty());
        assert_ne!(first, second);
    }

    #[test]
    fn test_message_serializes_camel_case() {
        let msg = Message::terminal("msg-9".to_string(), "This chat has ended.".to_string());
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["isTerminal"], true);
        assert_eq!(json["role"], "assistant");
        assert!(json["createdAt"].is_string());
    }
}
