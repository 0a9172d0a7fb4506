//! Core domain modules
//!
//! Domain logic and types shared across the engine: the message/action data
//! model, the session phase machine, and domain errors.

pub mod errors;
pub mod session;
pub mod types;

// Re-export canonical types
pub use errors::SessionError;
pub use session::{ChatSession, SessionPhase};
pub use types::{
    Action, ActionKind, AssistantReply, Message, MessageIdSource, MessageRole, PageContext,
    SequentialIds, UuidIds,
};
