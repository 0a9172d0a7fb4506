//! Quick-action resolution and dispatch
//!
//! Resolution turns an action descriptor into a display label; dispatch
//! routes a click to the host's platform executors.

mod dispatcher;
mod resolver;

pub(crate) use resolver::CONTACT_SUPPORT_LABEL;

pub use dispatcher::{ActionDispatcher, ActionExecutor};
pub use resolver::{resolve_label, LabelResolver};
