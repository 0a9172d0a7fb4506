//! Quick-action label resolution
//!
//! Maps an action descriptor to a display label through two static lookup
//! tables (canonical label first, then canonical route value), with graceful
//! fallback to the raw label. The tables are pure data so backend copy
//! changes cannot break recognized quick actions, while unrecognized ones
//! degrade to passthrough instead of erroring.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::core::types::{Action, ActionKind};

/// Generic display label for the synthesized support contact action
pub(crate) const CONTACT_SUPPORT_LABEL: &str = "Contact Support";

/// Canonical backend labels -> display keys
static LABEL_KEYS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Create Donation", "create_donation"),
        ("My Donations", "my_donations"),
        ("My Messages", "my_messages"),
        ("My Claims", "my_claims"),
        ("Browse Food", "browse_food"),
        ("Settings", "settings"),
        ("Help Center", "help_center"),
        ("Email Support", "email_support"),
        (CONTACT_SUPPORT_LABEL, "contact_support"),
        ("Dashboard", "dashboard"),
    ])
});

/// Canonical internal routes -> display keys
static VALUE_KEYS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("/donor/create", "create_donation"),
        ("/donor/list", "my_donations"),
        ("/messages", "my_messages"),
        ("/receiver/claims", "my_claims"),
        ("/receiver/browse", "browse_food"),
        ("/settings", "settings"),
        ("/help", "help_center"),
        ("/admin", "dashboard"),
    ])
});

/// Built-in English display strings per display key
static DEFAULT_DISPLAY: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("create_donation", "Create Donation"),
        ("my_donations", "My Donations"),
        ("my_messages", "My Messages"),
        ("my_claims", "My Claims"),
        ("browse_food", "Browse Food"),
        ("settings", "Settings"),
        ("help_center", "Help Center"),
        ("email_support", "Email Support"),
        ("contact_support", CONTACT_SUPPORT_LABEL),
        ("dashboard", "Dashboard"),
    ])
});

/// Resolves action labels, layering configured localization overrides on top
/// of the built-in display strings
#[derive(Debug, Clone, Default)]
pub struct LabelResolver {
    overrides: HashMap<String, String>,
}

impl LabelResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides are keyed by display key (for example `browse_food`)
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Resolve the display label for an action
    ///
    /// Order: label table, then value table, then the contact-with-`@`
    /// fallthrough (preferring a supplied label), then the raw label
    /// verbatim, which may be empty.
    pub fn resolve(&self, action: &Action) -> String {
        if let Some(key) = LABEL_KEYS.get(action.label.as_str()) {
            return self.display_for(key, &action.label);
        }
        if let Some(key) = VALUE_KEYS.get(action.value.as_str()) {
            return self.display_for(key, &action.label);
        }
        if action.kind == ActionKind::Contact && action.value.contains('@') {
            if !action.label.is_empty() {
                return action.label.clone();
            }
            return self.display_for("contact_support", CONTACT_SUPPORT_LABEL);
        }
        action.label.clone()
    }

    fn display_for(&self, key: &str, fallback: &str) -> String {
        if let Some(localized) = self.overrides.get(key) {
            return localized.clone();
        }
        DEFAULT_DISPLAY
            .get(key)
            .map(|display| (*display).to_string())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Resolve with the built-in display strings only
pub fn resolve_label(action: &Action) -> String {
    LabelResolver::new().resolve(action)
}
