//! foodflow-chat-core: UI-agnostic support chat engine
//!
//! This library provides:
//! - Session lifecycle management (open/close/end/new-chat) with an
//!   append-only message log
//! - A send pipeline that serializes in-flight requests and degrades
//!   transport failures into a contact-support fallback
//! - Reply text segmentation into renderable blocks (paragraphs, lists,
//!   bold/plain spans)
//! - Quick-action label resolution and dispatch to host platform executors
//!
//! The HTTP transport, page-context reader, and platform executors are
//! collaborator traits the host implements; the engine owns none of them.

pub mod actions;
pub mod config;
pub mod content;
pub mod core;
pub mod transport;
pub mod ui_backend;

pub use config::ChatConfig;
pub use ui_backend::{ChatEvent, ChatService};
