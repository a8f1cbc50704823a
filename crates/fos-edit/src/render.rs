//! List rendering
//!
//! Clear-and-rebuild of a container from a data sequence. Items are built
//! detached first, then the container is emptied and refilled, so an invalid
//! container fails before anything changes. Listeners on the container
//! survive; listeners registered on the discarded items are dropped.

use std::collections::HashSet;

use fos_dom::{DomTree, NodeId, NodeOperations};

use crate::payload::build_item;
use crate::{EditConfig, EditError, EditResult, IdentityStore, ItemSpec};

/// Rebuild `container` from `items`, returning the new item handles in order
pub fn render<I>(
    tree: &mut DomTree,
    config: &EditConfig,
    identities: &mut IdentityStore,
    container: NodeId,
    items: I,
) -> EditResult<Vec<NodeId>>
where
    I: IntoIterator,
    I::Item: Into<ItemSpec>,
{
    if !tree.is_element(container) {
        return Err(EditError::invalid("render", "container"));
    }

    let specs: Vec<ItemSpec> = items.into_iter().map(Into::into).collect();

    // Fresh identities skip every identity supplied anywhere in the batch
    let reserved: HashSet<String> = specs.iter().filter_map(|spec| spec.identity.clone()).collect();
    let mut built = Vec::with_capacity(specs.len());
    for spec in &specs {
        built.push(build_item(tree, config, identities, spec, None, &reserved)?);
    }

    let removed = tree.child_count(container);
    while let Some(child) = tree.first_child(container) {
        tree.remove_child(container, child)?;
        tree.clear_listeners(child);
    }
    for &item in &built {
        tree.append_child(container, item)?;
    }

    tracing::debug!(
        "rendered {} items into {} (replaced {})",
        built.len(),
        container,
        removed
    );
    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::EventType;
    use std::cell::Cell;
    use std::rc::Rc;

    fn texts(tree: &DomTree, container: NodeId) -> Vec<String> {
        tree.children(container).map(|c| tree.text_content(c)).collect()
    }

    #[test]
    fn test_render_replaces_content() {
        let mut tree = DomTree::new();
        let config = EditConfig::default();
        let mut identities = IdentityStore::new(&config.identity_attribute);
        let ul = tree.create_element("ul");
        let stale = tree.create_element("li");
        tree.append_child(ul, stale).unwrap();

        let data = ["Learn DOM selectors", "Practice loops"];
        let items = render(&mut tree, &config, &mut identities, ul, data).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(texts(&tree, ul), vec!["Learn DOM selectors", "Practice loops"]);
        assert_eq!(tree.parent(stale), None);
    }

    #[test]
    fn test_render_twice_same_shape() {
        let mut tree = DomTree::new();
        let config = EditConfig::default();
        let mut identities = IdentityStore::new(&config.identity_attribute);
        let ul = tree.create_element("ul");
        let data = vec!["A".to_string(), "B".to_string(), "C".to_string()];

        render(&mut tree, &config, &mut identities, ul, data.clone()).unwrap();
        let first = texts(&tree, ul);
        render(&mut tree, &config, &mut identities, ul, data.clone()).unwrap();

        assert_eq!(texts(&tree, ul), first);
        assert_eq!(tree.child_count(ul), data.len());
    }

    #[test]
    fn test_render_empty_clears() {
        let mut tree = DomTree::new();
        let config = EditConfig::default();
        let mut identities = IdentityStore::new(&config.identity_attribute);
        let ul = tree.create_element("ul");
        render(&mut tree, &config, &mut identities, ul, ["A"]).unwrap();

        let empty = Vec::<ItemSpec>::new();
        let items = render(&mut tree, &config, &mut identities, ul, empty).unwrap();

        assert!(items.is_empty());
        assert_eq!(tree.child_count(ul), 0);
    }

    #[test]
    fn test_supplied_identities_kept() {
        let mut tree = DomTree::new();
        let config = EditConfig::default();
        let mut identities = IdentityStore::new(&config.identity_attribute);
        let ul = tree.create_element("ul");

        let items = render(
            &mut tree,
            &config,
            &mut identities,
            ul,
            [ItemSpec::new("A").with_identity("a"), ItemSpec::new("B")],
        )
        .unwrap();

        assert_eq!(identities.identity_of(&tree, items[0]).as_deref(), Some("a"));
        assert!(identities.identity_of(&tree, items[1]).is_some());
    }

    #[test]
    fn test_fresh_identity_skips_later_supplied_one() {
        let mut tree = DomTree::new();
        let config = EditConfig::default();
        let mut identities = IdentityStore::new(&config.identity_attribute);
        let ul = tree.create_element("ul");

        let items = render(
            &mut tree,
            &config,
            &mut identities,
            ul,
            [ItemSpec::new("A"), ItemSpec::new("B").with_identity("1")],
        )
        .unwrap();

        let a = identities.identity_of(&tree, items[0]);
        let b = identities.identity_of(&tree, items[1]);
        assert_eq!(b.as_deref(), Some("1"));
        assert_ne!(a, b);
        assert_eq!(identities.find(&tree, ul, "1"), Some(items[1]));
    }

    #[test]
    fn test_render_allocates_only_items() {
        let mut tree = DomTree::new();
        let config = EditConfig::default();
        let mut identities = IdentityStore::new(&config.identity_attribute);
        let ul = tree.create_element("ul");
        let before = tree.len();

        render(&mut tree, &config, &mut identities, ul, ["A", "B"]).unwrap();

        // one element and one text node per item
        assert_eq!(tree.len(), before + 4);
    }

    #[test]
    fn test_item_listeners_dropped() {
        let mut tree = DomTree::new();
        let config = EditConfig::default();
        let mut identities = IdentityStore::new(&config.identity_attribute);
        let ul = tree.create_element("ul");
        let old = render(&mut tree, &config, &mut identities, ul, ["A"]).unwrap();
        let text = tree.first_child(old[0]).unwrap();
        tree.add_event_listener(old[0], EventType::Click, |_, _| {}).unwrap();
        tree.add_event_listener(text, EventType::Click, |_, _| {}).unwrap();

        render(&mut tree, &config, &mut identities, ul, ["B"]).unwrap();

        assert_eq!(tree.listener_count(old[0]), 0);
        assert_eq!(tree.listener_count(text), 0);
    }

    #[test]
    fn test_container_listener_survives() {
        let mut tree = DomTree::new();
        let config = EditConfig::default();
        let mut identities = IdentityStore::new(&config.identity_attribute);
        let ul = tree.create_element("ul");
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        tree.add_event_listener(ul, EventType::Click, move |_, _| counter.set(counter.get() + 1))
            .unwrap();

        render(&mut tree, &config, &mut identities, ul, ["A"]).unwrap();
        let items = render(&mut tree, &config, &mut identities, ul, ["B"]).unwrap();
        tree.dispatch_event(items[0], EventType::Click).unwrap();

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_render_into_text_node_fails() {
        let mut tree = DomTree::new();
        let config = EditConfig::default();
        let mut identities = IdentityStore::new(&config.identity_attribute);
        let text = tree.create_text("x");

        assert_eq!(
            render(&mut tree, &config, &mut identities, text, ["A"]),
            Err(EditError::invalid("render", "container"))
        );
    }
}
