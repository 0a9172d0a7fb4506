//! Quick-action dispatch
//!
//! Routes a clicked action to one of the platform executors. The executors
//! are fire-and-forget capabilities owned by the host (browser navigation,
//! mailto/tel opening, clipboard); the engine never consumes their results.

use std::sync::Arc;

use crate::core::types::{Action, ActionKind};

/// Platform capabilities the host application provides
pub trait ActionExecutor: Send + Sync {
    /// In-app route change; keeps the widget mounted
    fn navigate_internal(&self, path: &str);
    /// Open a URL in a new browsing context
    fn open_external(&self, url: &str);
    fn open_mailto(&self, address: &str);
    fn open_tel(&self, number: &str);
    fn write_clipboard(&self, text: &str);
}

/// Maps a resolved action to the matching executor call
pub struct ActionDispatcher {
    executor: Arc<dyn ActionExecutor>,
}

impl ActionDispatcher {
    pub fn new(executor: Arc<dyn ActionExecutor>) -> Self {
        Self { executor }
    }

    /// Dispatch by action kind
    ///
    /// Navigate values starting with `/` stay in-app; anything else opens
    /// externally. Contact values without `@` go to the tel opener verbatim,
    /// malformed or not. Unknown kinds are a no-op so backend-added action
    /// types degrade silently.
    pub fn dispatch(&self, action: &Action) {
        match action.kind {
            ActionKind::Navigate => {
                if action.value.starts_with('/') {
                    self.executor.navigate_internal(&action.value);
                } else {
                    self.executor.open_external(&action.value);
                }
            }
            ActionKind::Contact => {
                if action.value.contains('@') {
                    self.executor.open_mailto(&action.value);
                } else {
                    self.executor.open_tel(&action.value);
                }
            }
            ActionKind::Copy => {
                self.executor.write_clipboard(&action.value);
            }
            ActionKind::Unknown => {
                tracing::debug!(label = %action.label, value = %action.value, "ignoring action with unrecognized type");
            }
        }
    }
}
