//! Configuration for the chat engine
//!
//! Carries every piece of user-facing copy the engine synthesizes plus the
//! localization override layer for quick-action labels. Hosts embed
//! `ChatConfig` in their own configuration; omitted fields take the FoodFlow
//! defaults.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::actions::LabelResolver;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Assistant greeting appended on the first open and on "New Chat"
    pub welcome_message: String,
    /// Content of the terminal message appended by "End Chat"
    pub ended_message: String,
    /// Uniform assistant copy appended when the transport fails
    pub fallback_message: String,
    /// Value of the contact action attached to the fallback message
    pub support_email: String,
    /// Display-key -> localized string overrides for quick-action labels
    pub label_overrides: HashMap<String, String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            welcome_message: "Hi! Welcome to FoodFlow support. How can I help you today?"
                .to_string(),
            ended_message: "This chat has ended. Start a new chat if you need anything else."
                .to_string(),
            fallback_message:
                "Sorry, I'm having trouble responding right now. Please try again in a moment \
                 or reach out to our support team."
                    .to_string(),
            support_email: "support@foodflow.com".to_string(),
            label_overrides: HashMap::new(),
        }
    }
}

impl ChatConfig {
    /// Build the label resolver carrying this config's overrides
    pub fn label_resolver(&self) -> LabelResolver {
        LabelResolver::with_overrides(self.label_overrides.clone())
    }
}
