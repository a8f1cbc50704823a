//! Editor Configuration

use fos_dom::EventType;

use crate::Preserve;

/// Editing toolkit configuration
#[derive(Debug, Clone)]
pub struct EditConfig {
    /// Tag used for items built from a payload
    pub item_tag: String,

    /// Class added to every built item
    pub item_class: Option<String>,

    /// Attribute holding an item's identity
    pub identity_attribute: String,

    /// Attribute holding an item's space-separated action tags
    pub action_attribute: String,

    /// Preserve set used by `Editor::replace_with_defaults`
    pub default_preserve: Preserve,

    /// Event type routed by `Editor::bind`
    pub event_type: EventType,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            item_tag: "li".to_string(),
            item_class: Some("task".to_string()),
            identity_attribute: "data-id".to_string(),
            action_attribute: "data-action".to_string(),
            default_preserve: Preserve::ALL,
            event_type: EventType::Click,
        }
    }
}

impl EditConfig {
    pub fn with_item_tag(mut self, tag: &str) -> Self {
        self.item_tag = tag.to_string();
        self
    }

    pub fn with_item_class(mut self, class: Option<&str>) -> Self {
        self.item_class = class.map(str::to_string);
        self
    }

    pub fn with_identity_attribute(mut self, name: &str) -> Self {
        self.identity_attribute = name.to_string();
        self
    }

    pub fn with_action_attribute(mut self, name: &str) -> Self {
        self.action_attribute = name.to_string();
        self
    }

    pub fn with_default_preserve(mut self, preserve: Preserve) -> Self {
        self.default_preserve = preserve;
        self
    }

    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }
}
