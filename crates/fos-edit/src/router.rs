//! Delegated event routing
//!
//! One keyed listener on the container resolves the acting item at event
//! time by walking up from the event's origin to the nearest node carrying
//! the action attribute. Because nothing is resolved ahead of time, items
//! can be inserted, replaced or re-rendered freely; a replacement stays
//! dispatchable as long as it carries equivalent action tags.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use fos_dom::{DomEvent, DomTree, EventType, ListenerId, NodeId, TokenList};

use crate::{EditError, EditResult};

/// Listener key; a container holds at most one router per event type
const LISTENER_KEY: &str = "fos-edit:delegated-router";

/// Action handler: `(tree, matched node, event)`
pub type ActionHandler = Rc<dyn Fn(&mut DomTree, NodeId, &ActionEvent)>;

/// Interaction routed to an action handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEvent {
    /// Lowest-level node the interaction touched
    pub origin: NodeId,
    /// Container the router is bound on
    pub container: NodeId,
    pub event_type: EventType,
    /// Action tag that selected the handler
    pub action: String,
}

/// Action tag → handler table
#[derive(Clone, Default)]
pub struct ActionMap {
    handlers: HashMap<String, ActionHandler>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an action tag, replacing any previous one
    pub fn on(
        mut self,
        action: &str,
        handler: impl Fn(&mut DomTree, NodeId, &ActionEvent) + 'static,
    ) -> Self {
        self.handlers.insert(action.to_string(), Rc::new(handler));
        self
    }

    pub fn get(&self, action: &str) -> Option<&ActionHandler> {
        self.handlers.get(action)
    }

    pub fn contains(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for ActionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<_> = self.handlers.keys().collect();
        actions.sort();
        f.debug_struct("ActionMap").field("actions", &actions).finish()
    }
}

/// Handle to a bound router
#[derive(Debug)]
pub struct RouterHandle {
    container: NodeId,
    event_type: EventType,
    listener: ListenerId,
    bound: bool,
}

impl RouterHandle {
    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// False after `unbind`, or after another router replaced this one
    pub fn is_bound(&self, tree: &DomTree) -> bool {
        self.bound && tree.has_listener(self.listener)
    }

    /// Detach the router's listener. Repeated calls are no-ops; returns
    /// whether this call removed the listener.
    pub fn unbind(&mut self, tree: &mut DomTree) -> bool {
        if !self.bound {
            return false;
        }
        self.bound = false;
        let removed = tree.remove_event_listener(self.listener);
        tracing::debug!("router on {} unbound (listener removed: {})", self.container, removed);
        removed
    }
}

/// Walk from `origin` towards `container`, returning the nearest node whose
/// `action_attribute` carries at least one action tag. The container never
/// matches itself, and an origin that is not inside the container resolves
/// to `None` even when a tagged node lies on its path.
pub fn resolve_action_target(
    tree: &DomTree,
    action_attribute: &str,
    container: NodeId,
    origin: NodeId,
) -> Option<NodeId> {
    let mut matched = None;
    let mut node = origin;
    loop {
        if node == container {
            return matched;
        }
        if matched.is_none() && has_action_tags(tree, action_attribute, node) {
            matched = Some(node);
        }
        node = tree.parent(node)?;
    }
}

fn has_action_tags(tree: &DomTree, action_attribute: &str, node: NodeId) -> bool {
    tree.get_attribute(node, action_attribute)
        .is_some_and(|value| !TokenList::parse(&value).is_empty())
}

fn route(
    tree: &mut DomTree,
    action_attribute: &str,
    container: NodeId,
    actions: &ActionMap,
    event: &DomEvent,
) {
    let Some(matched) = resolve_action_target(tree, action_attribute, container, event.target)
    else {
        tracing::trace!("no action target for {} in {}", event.target, container);
        return;
    };

    let tags = tree
        .get_attribute(matched, action_attribute)
        .map(|value| TokenList::parse(&value))
        .unwrap_or_default();
    let Some((action, handler)) = tags
        .iter()
        .find_map(|tag| actions.get(tag).map(|handler| (tag.to_string(), Rc::clone(handler))))
    else {
        tracing::trace!("no handler for actions {:?} on {}", tags.value(), matched);
        return;
    };

    tracing::debug!("routing {} on {} to {:?}", event.event_type.name(), matched, action);
    let action_event = ActionEvent {
        origin: event.target,
        container,
        event_type: event.event_type,
        action,
    };
    handler(tree, matched, &action_event);
}

/// Bind a delegated router on `container`. A router already bound on the
/// same container for the same event type is replaced.
pub fn bind(
    tree: &mut DomTree,
    action_attribute: &str,
    container: NodeId,
    event_type: EventType,
    actions: ActionMap,
) -> EditResult<RouterHandle> {
    if !tree.is_element(container) {
        return Err(EditError::invalid("bind", "container"));
    }

    let attribute = action_attribute.to_string();
    let actions = Rc::new(actions);
    let listener = tree.add_keyed_listener(container, event_type, LISTENER_KEY, move |tree, event| {
        route(tree, &attribute, container, &actions, event)
    })?;

    tracing::debug!("router bound on {} for {}", container, event_type.name());
    Ok(RouterHandle {
        container,
        event_type,
        listener,
        bound: true,
    })
}
