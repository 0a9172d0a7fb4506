//! Chat Service - the engine facade UI shells hold
//!
//! Owns the session behind a thread-safe handle, orchestrates the send
//! pipeline against the transport collaborator, and wraps the lifecycle
//! operations. Shells render from snapshots (`messages`, `phase`,
//! `is_pending`) and listen on the event channel instead of polling.
//!
//! Sends are serialized by the `pending` flag: it is checked and set under
//! the same write guard that appends the user message, so rapid double
//! submits cannot both pass. The session lock is never held across an await.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::mpsc;

use crate::actions::{LabelResolver, CONTACT_SUPPORT_LABEL};
use crate::config::ChatConfig;
use crate::core::session::{ChatSession, SessionPhase};
use crate::core::types::{Action, ActionKind, Message, MessageIdSource, SequentialIds};
use crate::transport::{ChatTransport, PageContextSource};

use super::events::ChatEvent;

/// Engine facade for one support chat widget instance
pub struct ChatService {
    /// Session state, replaced wholesale on "New Chat"
    session: Arc<RwLock<ChatSession>>,
    /// Backend chat capability
    transport: Arc<dyn ChatTransport>,
    /// Reader for the route/donation/claim the user is looking at
    page_context: Arc<dyn PageContextSource>,
    /// Id source handed to every session instance
    ids: Arc<dyn MessageIdSource>,
    config: ChatConfig,
    /// Event channel to the UI shell
    event_tx: mpsc::UnboundedSender<ChatEvent>,
}

impl ChatService {
    /// Create a service with deterministic sequential message ids
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        page_context: Arc<dyn PageContextSource>,
        config: ChatConfig,
        event_tx: mpsc::UnboundedSender<ChatEvent>,
    ) -> Self {
        Self::with_id_source(
            transport,
            page_context,
            config,
            event_tx,
            Arc::new(SequentialIds::new()),
        )
    }

    /// Create a service with a custom message id source
    pub fn with_id_source(
        transport: Arc<dyn ChatTransport>,
        page_context: Arc<dyn PageContextSource>,
        config: ChatConfig,
        event_tx: mpsc::UnboundedSender<ChatEvent>,
        ids: Arc<dyn MessageIdSource>,
    ) -> Self {
        let session = Arc::new(RwLock::new(ChatSession::new(ids.clone())));
        Self {
            session,
            transport,
            page_context,
            ids,
            config,
            event_tx,
        }
    }

    // ========== Private Helpers ==========

    /// Get a read lock on the session, recovering from poison
    fn read_session(&self) -> RwLockReadGuard<'_, ChatSession> {
        self.session.read().unwrap_or_else(|poisoned| {
            tracing::warn!("session read lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Get a write lock on the session, recovering from poison
    fn write_session(&self) -> RwLockWriteGuard<'_, ChatSession> {
        self.session.write().unwrap_or_else(|poisoned| {
            tracing::warn!("session write lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn emit(&self, event: ChatEvent) {
        let _ = self.event_tx.send(event);
    }

    // ========== Snapshots ==========

    pub fn phase(&self) -> SessionPhase {
        self.read_session().phase()
    }

    pub fn is_pending(&self) -> bool {
        self.read_session().is_pending()
    }

    /// Whether the "End Chat" affordance should be offered
    pub fn can_end_chat(&self) -> bool {
        self.read_session().can_end()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.read_session().messages().to_vec()
    }

    pub fn message_count(&self) -> usize {
        self.read_session().message_count()
    }

    /// Access messages with a zero-copy callback (preferred for rendering)
    pub fn with_messages<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[Message]) -> R,
    {
        let session = self.read_session();
        f(session.messages())
    }

    /// Label resolver carrying this service's localization overrides
    pub fn label_resolver(&self) -> LabelResolver {
        self.config.label_resolver()
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    // ========== Lifecycle ==========

    /// Open the widget; synthesizes the welcome exactly once per session
    pub fn open(&self) {
        let (welcome, phase_change) = {
            let mut session = self.write_session();
            let before = session.phase();
            let welcome = session.open(&self.config.welcome_message);
            let after = session.phase();
            (welcome, (before != after).then_some(after))
        };
        if let Some(phase) = phase_change {
            tracing::info!(%phase, "support chat opened");
            self.emit(ChatEvent::PhaseChanged(phase));
        }
        if let Some(message) = welcome {
            self.emit(ChatEvent::MessageAdded(message));
        }
    }

    /// Collapse the widget; the log survives for the next open
    pub fn close(&self) {
        let phase_change = {
            let mut session = self.write_session();
            let before = session.phase();
            session.close();
            let after = session.phase();
            (before != after).then_some(after)
        };
        if let Some(phase) = phase_change {
            self.emit(ChatEvent::PhaseChanged(phase));
        }
    }

    /// End the chat; a no-op unless a real exchange happened and nothing is
    /// in flight
    pub fn end_chat(&self) {
        let (marker, phase_change) = {
            let mut session = self.write_session();
            let before = session.phase();
            let marker = session.end(&self.config.ended_message);
            let after = session.phase();
            (marker, (before != after).then_some(after))
        };
        if let Some(phase) = phase_change {
            tracing::info!("support chat ended");
            self.emit(ChatEvent::PhaseChanged(phase));
        }
        if let Some(message) = marker {
            self.emit(ChatEvent::MessageAdded(message));
        }
    }

    /// Start over: replace the session instance with a fresh one holding a
    /// single welcome message. An in-flight reply for the old instance is
    /// discarded when it lands.
    pub fn new_chat(&self) {
        let (welcome, phase_change) = {
            let mut session = self.write_session();
            let before = session.phase();
            *session = ChatSession::with_welcome(self.ids.clone(), &self.config.welcome_message);
            let after = session.phase();
            (
                session.messages().last().cloned(),
                (before != after).then_some(after),
            )
        };
        tracing::info!("support chat reset");
        self.emit(ChatEvent::SessionReset);
        if let Some(phase) = phase_change {
            self.emit(ChatEvent::PhaseChanged(phase));
        }
        if let Some(message) = welcome {
            self.emit(ChatEvent::MessageAdded(message));
        }
    }

    // ========== Send Pipeline ==========

    /// Send a user message
    ///
    /// Outcome is observed through the session, not a return value. The call
    /// is a silent no-op when the trimmed text is empty, a send is already
    /// in flight, or the session has ended. A transport failure is absorbed
    /// into a fallback assistant message with a single contact action; the
    /// cause is never surfaced to the user.
    pub async fn send(&self, text: &str) {
        let trimmed = text.trim();

        let started = {
            let mut session = self.write_session();
            if trimmed.is_empty() {
                tracing::debug!("send skipped: empty message");
                None
            } else if session.is_pending() {
                tracing::debug!("send skipped: a send is already in flight");
                None
            } else if session.phase() == SessionPhase::Ended {
                tracing::debug!("send skipped: session has ended");
                None
            } else {
                let before = session.phase();
                let user_message = session.push_user(trimmed.to_string());
                session.set_pending(true);
                let after = session.phase();
                Some((
                    user_message,
                    (before != after).then_some(after),
                    session.instance_id(),
                ))
            }
        };
        let Some((user_message, phase_change, instance_id)) = started else {
            return;
        };

        self.emit(ChatEvent::MessageAdded(user_message));
        if let Some(phase) = phase_change {
            self.emit(ChatEvent::PhaseChanged(phase));
        }
        self.emit(ChatEvent::PendingChanged(true));

        // Context describes where the user asked from, not where the reply
        // arrived; capture it now, before the transport suspends.
        let context = self.page_context.current_context();
        let result = self.transport.send_chat_message(trimmed, &context).await;

        let settled = {
            let mut session = self.write_session();
            if session.instance_id() != instance_id {
                tracing::debug!("discarding reply addressed to a replaced session");
                None
            } else {
                let message = match result {
                    Ok(reply) => {
                        if let Some(intent) = &reply.intent {
                            tracing::debug!(%intent, "assistant reply classified");
                        }
                        if reply.escalate {
                            tracing::debug!("assistant suggested escalation to a human");
                        }
                        session.push_assistant(reply.reply, reply.actions)
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "chat transport failed, degrading to contact action");
                        let contact = Action::new(
                            ActionKind::Contact,
                            CONTACT_SUPPORT_LABEL,
                            self.config.support_email.clone(),
                        );
                        session.push_assistant(
                            self.config.fallback_message.clone(),
                            vec![contact],
                        )
                    }
                };
                session.set_pending(false);
                Some(message)
            }
        };

        if let Some(message) = settled {
            self.emit(ChatEvent::MessageAdded(message));
            self.emit(ChatEvent::PendingChanged(false));
        }
    }
}
