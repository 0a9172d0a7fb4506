//! Engine events
//!
//! Async notifications sent from the engine to the UI shell so it can
//! re-render without polling. Delivery is best-effort; a dropped receiver
//! never affects engine behavior.

use crate::core::session::SessionPhase;
use crate::core::types::Message;

/// Events emitted by the engine to the UI shell
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// A message was appended to the session log
    MessageAdded(Message),

    /// The session moved to a new lifecycle phase
    PhaseChanged(SessionPhase),

    /// A send started (`true`) or settled (`false`)
    PendingChanged(bool),

    /// "New Chat" replaced the session instance; re-read the whole log
    SessionReset,
}
