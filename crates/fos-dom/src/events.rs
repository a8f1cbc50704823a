//! DOM Events
//!
//! Interaction events, listener registration and bubbling dispatch.
//!
//! Listener callbacks get `&mut DomTree`, so a handler may restructure the
//! tree it is running against. Callbacks are cloned out of the registry
//! before they run; a listener removed by an earlier handler in the same
//! dispatch is skipped.

use std::collections::HashMap;
use std::rc::Rc;

use crate::{DomError, DomResult, DomTree, NodeId};

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    DblClick,
    MouseDown,
    MouseUp,
    KeyDown,
    KeyUp,
    Input,
    Change,
    Focus,
    Blur,
    Submit,
    Custom(u32),
}

impl EventType {
    /// Check if this event type can bubble
    pub fn bubbles(&self) -> bool {
        !matches!(self, EventType::Focus | EventType::Blur)
    }

    pub fn name(&self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::DblClick => "dblclick",
            EventType::MouseDown => "mousedown",
            EventType::MouseUp => "mouseup",
            EventType::KeyDown => "keydown",
            EventType::KeyUp => "keyup",
            EventType::Input => "input",
            EventType::Change => "change",
            EventType::Focus => "focus",
            EventType::Blur => "blur",
            EventType::Submit => "submit",
            EventType::Custom(_) => "custom",
        }
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: EventType,
    /// Lowest-level node the interaction touched
    pub target: NodeId,
    /// Node whose listeners are currently running
    pub current_target: NodeId,
    pub bubbles: bool,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl DomEvent {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: target,
            bubbles: event_type.bubbles(),
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop propagation after the current node's listeners
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop propagation, skipping the remaining listeners on this node too
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Listener callback
pub type ListenerCallback = Rc<dyn Fn(&mut DomTree, &mut DomEvent)>;

/// Handle returned by listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Event listener options
#[derive(Debug, Clone, Default)]
pub struct ListenerOptions {
    /// Remove after the first invocation
    pub once: bool,
    /// A later registration with the same node, event type and key
    /// replaces this one
    pub key: Option<String>,
}

struct RegisteredListener {
    id: ListenerId,
    event_type: EventType,
    options: ListenerOptions,
    callback: ListenerCallback,
}

/// Listeners by node
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    by_node: HashMap<NodeId, Vec<RegisteredListener>>,
}

impl ListenerRegistry {
    pub(crate) fn len(&self) -> usize {
        self.by_node.values().map(Vec::len).sum()
    }

    fn insert(
        &mut self,
        node: NodeId,
        event_type: EventType,
        options: ListenerOptions,
        callback: ListenerCallback,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        let listeners = self.by_node.entry(node).or_default();
        if let Some(key) = options.key.as_deref() {
            listeners.retain(|l| {
                !(l.event_type == event_type && l.options.key.as_deref() == Some(key))
            });
        }
        listeners.push(RegisteredListener {
            id,
            event_type,
            options,
            callback,
        });
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        for listeners in self.by_node.values_mut() {
            if let Some(index) = listeners.iter().position(|l| l.id == id) {
                listeners.remove(index);
                return true;
            }
        }
        false
    }

    fn clear_node(&mut self, node: NodeId) -> usize {
        self.by_node.remove(&node).map_or(0, |listeners| listeners.len())
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.by_node.values().flatten().any(|l| l.id == id)
    }

    fn matching(
        &self,
        node: NodeId,
        event_type: EventType,
    ) -> Vec<(ListenerId, bool, ListenerCallback)> {
        self.by_node
            .get(&node)
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|l| l.event_type == event_type)
                    .map(|l| (l.id, l.options.once, Rc::clone(&l.callback)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl DomTree {
    /// Add event listener
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        callback: impl Fn(&mut DomTree, &mut DomEvent) + 'static,
    ) -> DomResult<ListenerId> {
        self.add_event_listener_with(node, event_type, ListenerOptions::default(), callback)
    }

    /// Add a listener that replaces any earlier one registered under `key`
    pub fn add_keyed_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        key: &str,
        callback: impl Fn(&mut DomTree, &mut DomEvent) + 'static,
    ) -> DomResult<ListenerId> {
        let options = ListenerOptions {
            key: Some(key.to_string()),
            ..Default::default()
        };
        self.add_event_listener_with(node, event_type, options, callback)
    }

    /// Add event listener with options
    pub fn add_event_listener_with(
        &mut self,
        node: NodeId,
        event_type: EventType,
        options: ListenerOptions,
        callback: impl Fn(&mut DomTree, &mut DomEvent) + 'static,
    ) -> DomResult<ListenerId> {
        if !self.contains(node) {
            return Err(DomError::NotFound(node));
        }
        let id = self.listeners.insert(node, event_type, options, Rc::new(callback));
        tracing::trace!("listener {:?} added on {} for {}", id, node, event_type.name());
        Ok(id)
    }

    /// Remove event listener. Returns false if it was already gone.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Drop every listener registered on `node` or any node below it.
    /// Returns how many were removed.
    pub fn clear_listeners(&mut self, node: NodeId) -> usize {
        let subtree: Vec<NodeId> = std::iter::once(node).chain(self.descendants(node)).collect();
        let removed: usize = subtree.into_iter().map(|n| self.listeners.clear_node(n)).sum();
        if removed > 0 {
            tracing::trace!("cleared {} listener(s) under {}", removed, node);
        }
        removed
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(id)
    }

    /// Number of listeners bound directly on a node
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.by_node.get(&node).map_or(0, Vec::len)
    }

    /// Dispatch an event at `target`, bubbling through its ancestors when the
    /// event type bubbles. The propagation path is fixed when dispatch starts.
    pub fn dispatch_event(&mut self, target: NodeId, event_type: EventType) -> DomResult<DomEvent> {
        if !self.contains(target) {
            return Err(DomError::NotFound(target));
        }

        let mut event = DomEvent::new(event_type, target);
        let path: Vec<NodeId> = if event.bubbles {
            std::iter::once(target).chain(self.ancestors(target)).collect()
        } else {
            vec![target]
        };

        for node in path {
            event.current_target = node;
            for (id, once, callback) in self.listeners.matching(node, event_type) {
                if !self.listeners.contains(id) {
                    continue;
                }
                if once {
                    self.listeners.remove(id);
                }
                callback(self, &mut event);
                if event.immediate_propagation_stopped {
                    break;
                }
            }
            if event.propagation_stopped {
                break;
            }
        }

        Ok(event)
    }
}
