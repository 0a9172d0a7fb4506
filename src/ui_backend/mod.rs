//! UI Backend - Backend-for-Frontend (BFF) Layer
//!
//! This module provides a clean separation between the chat engine and UI
//! rendering, so any shell (web widget, desktop, tests) can drive the same
//! behavior.
//!
//! ## Architecture
//!
//! - **ChatService**: lifecycle operations + the send pipeline
//! - **ChatEvent**: async event channel for UI updates
//! - Session state stays behind the service; shells read snapshots

mod events;
mod service;

pub use events::ChatEvent;
pub use service::ChatService;
