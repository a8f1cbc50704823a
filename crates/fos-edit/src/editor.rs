//! Editor - High-level editing API
//!
//! Bundles the configuration and the identity store so callers only pass
//! the tree and the handles they are editing.

use std::collections::HashSet;

use fos_dom::{DomTree, NodeId};

use crate::insert::{insert_adjacent_element, target_container};
use crate::payload::build_item;
use crate::router::{self, ActionMap, RouterHandle};
use crate::{render, replace, sibling};
use crate::{EditConfig, EditResult, IdentityStore, InsertPosition, ItemSpec, Preserve};

/// Positional editing over a content tree
#[derive(Debug, Clone)]
pub struct Editor {
    config: EditConfig,
    identities: IdentityStore,
}

impl Editor {
    pub fn new(config: EditConfig) -> Self {
        let identities = IdentityStore::new(&config.identity_attribute);
        Self { config, identities }
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub fn identities(&self) -> &IdentityStore {
        &self.identities
    }

    pub fn identities_mut(&mut self) -> &mut IdentityStore {
        &mut self.identities
    }

    /// Build a detached item with a fresh identity
    pub fn create_item(
        &mut self,
        tree: &mut DomTree,
        spec: impl Into<ItemSpec>,
    ) -> EditResult<NodeId> {
        let spec = spec.into();
        build_item(tree, &self.config, &mut self.identities, &spec, None, &HashSet::new())
    }

    /// Build one item from `spec` and insert it at `position` relative to
    /// `reference`
    pub fn insert(
        &mut self,
        tree: &mut DomTree,
        reference: NodeId,
        position: InsertPosition,
        spec: impl Into<ItemSpec>,
    ) -> EditResult<NodeId> {
        let container = target_container(tree, reference, position).inspect_err(|err| {
            tracing::warn!("insert rejected: {}", err);
        })?;
        let spec = spec.into();
        let item = build_item(
            tree,
            &self.config,
            &mut self.identities,
            &spec,
            Some(container),
            &HashSet::new(),
        )?;
        insert_adjacent_element(tree, reference, position, item)
    }

    /// Insert `new_node` immediately after `reference`
    pub fn insert_after(
        &self,
        tree: &mut DomTree,
        reference: NodeId,
        new_node: NodeId,
    ) -> EditResult<NodeId> {
        sibling::insert_after(tree, reference, new_node).inspect_err(|err| {
            tracing::warn!("insert_after rejected: {}", err);
        })
    }

    /// Replace `old` with `new`, carrying over the `preserve` sets
    pub fn replace(
        &mut self,
        tree: &mut DomTree,
        old: NodeId,
        new: NodeId,
        preserve: Preserve,
    ) -> EditResult<NodeId> {
        replace::replace(tree, &self.config, &mut self.identities, old, new, preserve)
            .inspect_err(|err| {
                tracing::warn!("replace rejected: {}", err);
            })
    }

    /// Replace using the configured default preserve set
    pub fn replace_with_defaults(
        &mut self,
        tree: &mut DomTree,
        old: NodeId,
        new: NodeId,
    ) -> EditResult<NodeId> {
        let preserve = self.config.default_preserve;
        self.replace(tree, old, new, preserve)
    }

    /// Clear `container` and rebuild it from `items`
    pub fn render<I>(
        &mut self,
        tree: &mut DomTree,
        container: NodeId,
        items: I,
    ) -> EditResult<Vec<NodeId>>
    where
        I: IntoIterator,
        I::Item: Into<ItemSpec>,
    {
        render::render(tree, &self.config, &mut self.identities, container, items)
    }

    /// Bind a delegated router on `container` for the configured event type
    pub fn bind(
        &self,
        tree: &mut DomTree,
        container: NodeId,
        actions: ActionMap,
    ) -> EditResult<RouterHandle> {
        let attribute = &self.config.action_attribute;
        router::bind(tree, attribute, container, self.config.event_type, actions)
    }

    pub fn identity_of(&self, tree: &DomTree, item: NodeId) -> Option<String> {
        self.identities.identity_of(tree, item)
    }

    /// Find the item of `container` carrying `identity`
    pub fn find_item(&self, tree: &DomTree, container: NodeId, identity: &str) -> Option<NodeId> {
        self.identities.find(tree, container, identity)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditConfig::default())
    }
}
