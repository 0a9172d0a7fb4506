//! Chat session - append-only message log and lifecycle phase machine
//!
//! Handles:
//! - Message log ownership (insertion order is display order, never reordered)
//! - Phase transitions (Closed -> Open-Empty -> Open-Active -> Ended)
//! - Welcome/terminal message synthesis
//! - The `pending` flag that serializes sends
//!
//! Lifecycle operations are lenient: an operation that is not legal in the
//! current phase logs at debug level and leaves the session untouched.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use super::errors::SessionError;
use super::types::{Action, Message, MessageIdSource};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Widget collapsed; the log may still hold prior messages
    Closed,
    /// Widget open with only the synthesized welcome in the log
    OpenEmpty,
    /// At least one message exchanged, not ended
    OpenActive,
    /// Terminal message appended; sends are rejected until a new chat
    Ended,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::OpenEmpty => "open-empty",
            Self::OpenActive => "open-active",
            Self::Ended => "ended",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The conversational context for one widget lifetime
///
/// Exclusively owned by its widget instance; "New Chat" replaces the whole
/// value rather than mutating it in place, so an in-flight send can detect
/// that its session is gone by comparing `instance_id`.
pub struct ChatSession {
    instance_id: Uuid,
    messages: Vec<Message>,
    phase: SessionPhase,
    pending: bool,
    ids: Arc<dyn MessageIdSource>,
}

impl ChatSession {
    /// Create a closed, empty session (widget mounted but not yet opened)
    pub fn new(ids: Arc<dyn MessageIdSource>) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            messages: Vec::new(),
            phase: SessionPhase::Closed,
            pending: false,
            ids,
        }
    }

    /// Create the replacement session for "New Chat": a fresh log holding a
    /// single welcome message, already in the active phase
    pub fn with_welcome(ids: Arc<dyn MessageIdSource>, welcome_text: &str) -> Self {
        let mut session = Self::new(ids);
        let welcome = Message::assistant(
            session.ids.next_id(),
            welcome_text.to_string(),
            Vec::new(),
        );
        session.messages.push(welcome);
        session.phase = SessionPhase::OpenActive;
        session
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Whether this session has ended; the terminal marker is always the
    /// last message, so endedness survives `close()` without extra state
    pub fn is_ended(&self) -> bool {
        self.messages.last().is_some_and(|m| m.is_terminal)
    }

    pub fn has_user_message(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.role == super::types::MessageRole::User)
    }

    /// "End Chat" is offered only once a real exchange happened beyond the
    /// welcome, and never while a reply is in flight
    pub fn can_end(&self) -> bool {
        self.phase == SessionPhase::OpenActive && self.has_user_message() && !self.pending
    }

    /// Open the widget. Synthesizes the welcome message exactly once, on the
    /// first open of a never-used session; reopening shows the prior log as
    /// it was, including an ended one.
    pub fn open(&mut self, welcome_text: &str) -> Option<Message> {
        if self.phase != SessionPhase::Closed {
            tracing::debug!(phase = %self.phase, "open ignored: session is not closed");
            return None;
        }
        let target = if self.messages.is_empty() {
            SessionPhase::OpenEmpty
        } else if self.is_ended() {
            SessionPhase::Ended
        } else {
            SessionPhase::OpenActive
        };
        if let Err(err) = self.transition(target) {
            tracing::debug!(%err, "open rejected");
            return None;
        }
        if target == SessionPhase::OpenEmpty {
            let welcome = Message::assistant(
                self.ids.next_id(),
                welcome_text.to_string(),
                Vec::new(),
            );
            self.messages.push(welcome.clone());
            return Some(welcome);
        }
        None
    }

    /// Collapse the widget; the log is retained for the next open
    pub fn close(&mut self) {
        if self.phase == SessionPhase::Closed {
            return;
        }
        if let Err(err) = self.transition(SessionPhase::Closed) {
            tracing::debug!(%err, "close rejected");
        }
    }

    /// End the chat: append the terminal marker and lock out further sends.
    /// A second call is a no-op.
    pub fn end(&mut self, ended_text: &str) -> Option<Message> {
        if !self.can_end() {
            tracing::debug!(
                phase = %self.phase,
                pending = self.pending,
                "end chat ignored"
            );
            return None;
        }
        if let Err(err) = self.transition(SessionPhase::Ended) {
            tracing::debug!(%err, "end chat rejected");
            return None;
        }
        let marker = Message::terminal(self.ids.next_id(), ended_text.to_string());
        self.messages.push(marker.clone());
        Some(marker)
    }

    /// Append a user message; the first one promotes an empty open session
    /// to the active phase
    pub fn push_user(&mut self, content: String) -> Message {
        let message = Message::user(self.ids.next_id(), content);
        self.messages.push(message.clone());
        if self.phase == SessionPhase::OpenEmpty {
            let _ = self.transition(SessionPhase::OpenActive);
        }
        message
    }

    /// Append an assistant message with its quick actions
    pub fn push_assistant(&mut self, content: String, actions: Vec<Action>) -> Message {
        let message = Message::assistant(self.ids.next_id(), content, actions);
        self.messages.push(message.clone());
        message
    }

    fn transition(&mut self, to: SessionPhase) -> Result<(), SessionError> {
        use SessionPhase::*;
        let valid = match (self.phase, to) {
            // Opening the widget
            (Closed, OpenEmpty) => true,
            (Closed, OpenActive) => true,
            (Closed, Ended) => true,

            // First user exchange
            (OpenEmpty, OpenActive) => true,

            // End chat
            (OpenActive, Ended) => true,

            // Collapsing the widget, log retained
            (OpenEmpty, Closed) => true,
            (OpenActive, Closed) => true,
            (Ended, Closed) => true,

            // Ended -> OpenActive only happens via whole-instance replacement
            _ => false,
        };

        if !valid {
            return Err(SessionError::InvalidTransition {
                from: self.phase.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }

        self.phase = to;
        Ok(())
    }
}
