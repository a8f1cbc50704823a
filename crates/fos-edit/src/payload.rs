//! Item payloads
//!
//! An [`ItemSpec`] describes one item to build. Plain strings convert into a
//! spec carrying only text.

use std::collections::HashSet;

use fos_dom::{DomTree, NodeId, NodeOperations, TokenList};

use crate::{EditConfig, EditResult, IdentityStore};

/// Description of an item to construct
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSpec {
    pub text: String,
    /// Extra classes, added after the configured item class
    pub classes: Vec<String>,
    /// Explicit identity; a fresh one is assigned when absent
    pub identity: Option<String>,
    /// Action tags for delegated dispatch
    pub actions: Vec<String>,
    /// Tag override; the configured item tag is used when absent
    pub tag: Option<String>,
}

impl ItemSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_identity(mut self, identity: &str) -> Self {
        self.identity = Some(identity.to_string());
        self
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.actions.push(action.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }
}

impl From<&str> for ItemSpec {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ItemSpec {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Build a detached item. `scope` is the container the item is headed for;
/// a fresh identity is unique among its current children and never one of
/// `reserved`.
pub(crate) fn build_item(
    tree: &mut DomTree,
    config: &EditConfig,
    identities: &mut IdentityStore,
    spec: &ItemSpec,
    scope: Option<NodeId>,
    reserved: &HashSet<String>,
) -> EditResult<NodeId> {
    let tag = spec.tag.as_deref().unwrap_or(&config.item_tag);
    let item = tree.create_element(tag);

    if let Some(classes) = tree.class_list_mut(item) {
        if let Some(class) = config.item_class.as_deref() {
            classes.add(class);
        }
        for class in &spec.classes {
            classes.add(class);
        }
    }

    if !spec.text.is_empty() {
        let text = tree.create_text(&spec.text);
        tree.append_child(item, text)?;
    }

    let actions: TokenList = spec.actions.iter().map(String::as_str).collect();
    if !actions.is_empty() {
        tree.set_attribute(item, &config.action_attribute, &actions.value())?;
    }

    match spec.identity.as_deref() {
        Some(identity) => identities.set(tree, item, identity)?,
        None => {
            identities.assign_avoiding(tree, item, scope, reserved)?;
        }
    }

    Ok(item)
}
