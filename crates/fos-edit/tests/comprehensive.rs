//! Comprehensive tests for fos-edit
//!
//! End-to-end editing of a task list: rendering, positional inserts,
//! replacement and delegated dispatch through the `Editor` API.

use std::cell::RefCell;
use std::rc::Rc;

use fos_dom::{Document, DomTree, EventType, NodeId, NodeOperations};
use fos_edit::{ActionMap, Editor, InsertPosition, ItemSpec, Preserve};

fn texts(tree: &DomTree, container: NodeId) -> Vec<String> {
    tree.children(container).map(|c| tree.text_content(c)).collect()
}

fn identities(editor: &Editor, tree: &DomTree, container: NodeId) -> Vec<String> {
    tree.children(container)
        .filter_map(|c| editor.identity_of(tree, c))
        .collect()
}

fn task_list(tree: &mut DomTree) -> NodeId {
    let ul = tree.create_element("ul");
    let root = tree.root();
    tree.append_child(root, ul).unwrap();
    ul
}

#[test]
fn test_task_list_scenario() {
    let mut doc = Document::new().unwrap();
    let body = doc.body();
    let ul = doc.create_section(body, "ul", "tasks").unwrap();
    let tree = doc.tree_mut();
    let mut editor = Editor::default();

    editor.render(tree, ul, ["A", "B", "C"]).unwrap();
    assert_eq!(texts(tree, ul), ["A", "B", "C"]);
    assert_eq!(identities(&editor, tree, ul), ["1", "2", "3"]);

    let b = editor.find_item(tree, ul, "2").unwrap();
    let b2 = tree.create_element("li");
    tree.set_text_content(b2, "B2").unwrap();
    editor.replace(tree, b, b2, Preserve::IDENTITY).unwrap();
    assert_eq!(texts(tree, ul), ["A", "B2", "C"]);
    assert_eq!(identities(&editor, tree, ul), ["1", "2", "3"]);
    assert_eq!(editor.find_item(tree, ul, "2"), Some(b2));
    assert_eq!(tree.parent(b), None);

    let x = editor.create_item(tree, "X").unwrap();
    editor.insert_after(tree, b2, x).unwrap();
    assert_eq!(texts(tree, ul), ["A", "B2", "X", "C"]);

    let d = editor.insert(tree, ul, InsertPosition::BeforeEnd, "D").unwrap();
    assert_eq!(tree.last_child(ul), Some(d));
    assert_eq!(tree.child_count(ul), 5);
    assert_eq!(texts(tree, ul), ["A", "B2", "X", "C", "D"]);

    let ids = identities(&editor, tree, ul);
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(ids.len(), 5);
    assert_eq!(unique.len(), 5);

    assert_eq!(doc.get_element_by_id("tasks"), Some(ul));
}

#[test]
fn test_insert_positions_count_and_index() {
    for position in InsertPosition::ALL {
        let mut tree = DomTree::new();
        let mut editor = Editor::default();
        let ul = task_list(&mut tree);
        let items = editor.render(&mut tree, ul, ["A", "B", "C"]).unwrap();
        let reference = if position.is_inside() { ul } else { items[1] };
        let container = if position.is_inside() { ul } else { tree.parent(items[1]).unwrap() };
        let before = tree.child_count(container);

        let node = editor.insert(&mut tree, reference, position, "N").unwrap();

        assert_eq!(tree.child_count(container), before + 1, "{position}");
        assert_eq!(tree.parent(node), Some(container), "{position}");
        let expected_index = match position {
            InsertPosition::BeforeBegin => 1,
            InsertPosition::AfterBegin => 0,
            InsertPosition::BeforeEnd => 3,
            InsertPosition::AfterEnd => 2,
        };
        assert_eq!(tree.index_of(node), Some(expected_index), "{position}");
    }
}

#[test]
fn test_insert_around_container() {
    let mut doc = Document::new().unwrap();
    let body = doc.body();
    let ul = doc.create_section(body, "ul", "tasks").unwrap();
    let tree = doc.tree_mut();
    let mut editor = Editor::default();

    let heading = editor
        .insert(tree, ul, InsertPosition::BeforeBegin, ItemSpec::new("Tasks").with_tag("h2"))
        .unwrap();
    let footer = editor
        .insert(tree, ul, InsertPosition::AfterEnd, ItemSpec::new("3 left").with_tag("p"))
        .unwrap();

    let order: Vec<_> = tree.children(body).collect();
    assert_eq!(order, vec![heading, ul, footer]);
    assert_eq!(tree.child_count(ul), 0);
}

#[test]
fn test_insert_after_is_next_sibling() {
    let mut tree = DomTree::new();
    let mut editor = Editor::default();
    let ul = task_list(&mut tree);
    let items = editor.render(&mut tree, ul, ["A", "B", "C"]).unwrap();

    for &reference in &items {
        let node = editor.create_item(&mut tree, "N").unwrap();
        editor.insert_after(&mut tree, reference, node).unwrap();
        assert_eq!(tree.next_sibling(reference), Some(node));
    }

    assert_eq!(texts(&tree, ul), ["A", "N", "B", "N", "C", "N"]);
}

#[test]
fn test_insert_after_last_appends() {
    let mut tree = DomTree::new();
    let mut editor = Editor::default();
    let ul = task_list(&mut tree);
    let items = editor.render(&mut tree, ul, ["A", "B"]).unwrap();
    let node = editor.create_item(&mut tree, "Z").unwrap();

    editor.insert_after(&mut tree, items[1], node).unwrap();

    assert_eq!(tree.last_child(ul), Some(node));
}

#[test]
fn test_replace_keeps_index_and_preserved_sets() {
    let mut tree = DomTree::new();
    let mut editor = Editor::default();
    let ul = task_list(&mut tree);
    let items = editor
        .render(
            &mut tree,
            ul,
            [
                ItemSpec::new("A"),
                ItemSpec::new("B").with_action("toggle").with_class("done"),
                ItemSpec::new("C"),
            ],
        )
        .unwrap();
    let new = tree.create_element("li");
    tree.set_text_content(new, "B2").unwrap();

    editor.replace(&mut tree, items[1], new, Preserve::ALL).unwrap();

    assert_eq!(tree.index_of(new), Some(1));
    assert_eq!(tree.parent(items[1]), None);
    assert_eq!(editor.identity_of(&tree, new).as_deref(), Some("2"));
    assert_eq!(tree.get_attribute(new, "data-action").as_deref(), Some("toggle"));
    let classes = tree.class_list(new).unwrap();
    assert!(classes.contains("task"));
    assert!(classes.contains("done"));
}

#[test]
fn test_replace_without_identity_gets_fresh_one() {
    let mut tree = DomTree::new();
    let mut editor = Editor::default();
    let ul = task_list(&mut tree);
    let items = editor.render(&mut tree, ul, ["A", "B"]).unwrap();
    let new = tree.create_element("li");

    editor
        .replace(&mut tree, items[0], new, Preserve::BEHAVIOR | Preserve::STYLE)
        .unwrap();

    let identity = editor.identity_of(&tree, new).unwrap();
    assert_ne!(identity, "1");
    assert_ne!(identity, "2");
}

#[test]
fn test_dispatch_survives_replacement() {
    let mut tree = DomTree::new();
    let mut editor = Editor::default();
    let ul = task_list(&mut tree);
    let items = editor
        .render(&mut tree, ul, ["A", "B", "C"].map(|t| ItemSpec::new(t).with_action("toggle")))
        .unwrap();

    let toggled = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&toggled);
    let actions = ActionMap::new().on("toggle", move |tree, item, _| {
        seen.borrow_mut().push(tree.text_content(item));
    });
    editor.bind(&mut tree, ul, actions).unwrap();

    let b2 = tree.create_element("li");
    tree.set_text_content(b2, "B2").unwrap();
    editor.replace(&mut tree, items[1], b2, Preserve::ALL).unwrap();

    let text = tree.first_child(b2).unwrap();
    tree.dispatch_event(text, EventType::Click).unwrap();

    assert_eq!(*toggled.borrow(), ["B2"]);
}

#[test]
fn test_dispatch_reaches_rendered_and_inserted_items() {
    let mut tree = DomTree::new();
    let mut editor = Editor::default();
    let ul = task_list(&mut tree);
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    let actions = ActionMap::new().on("toggle", move |_, _, _| *counter.borrow_mut() += 1);
    editor.bind(&mut tree, ul, actions).unwrap();

    let items = editor
        .render(&mut tree, ul, [ItemSpec::new("A").with_action("toggle")])
        .unwrap();
    let late = editor
        .insert(&mut tree, ul, InsertPosition::AfterBegin, ItemSpec::new("B").with_action("toggle"))
        .unwrap();

    tree.dispatch_event(items[0], EventType::Click).unwrap();
    tree.dispatch_event(late, EventType::Click).unwrap();
    editor
        .render(&mut tree, ul, [ItemSpec::new("C").with_action("toggle")])
        .unwrap();
    let fresh = tree.first_child(ul).unwrap();
    tree.dispatch_event(fresh, EventType::Click).unwrap();

    assert_eq!(*count.borrow(), 3);
}

#[test]
fn test_delete_handler_removes_item_once() {
    let mut tree = DomTree::new();
    let mut editor = Editor::default();
    let ul = task_list(&mut tree);
    let items = editor
        .render(&mut tree, ul, ["A", "B", "C"].map(|t| ItemSpec::new(t).with_action("delete")))
        .unwrap();

    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let actions = ActionMap::new().on("delete", move |tree, item, event| {
        *counter.borrow_mut() += 1;
        tree.remove_child(event.container, item).unwrap();
    });
    editor.bind(&mut tree, ul, actions).unwrap();

    let replacement = tree.create_element("li");
    tree.set_text_content(replacement, "B2").unwrap();
    editor.replace(&mut tree, items[1], replacement, Preserve::ALL).unwrap();

    tree.dispatch_event(replacement, EventType::Click).unwrap();

    assert_eq!(*calls.borrow(), 1);
    assert_eq!(texts(&tree, ul), ["A", "C"]);

    // A detached item no longer reaches the container
    tree.dispatch_event(replacement, EventType::Click).unwrap();
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_render_twice_same_shape() {
    let mut tree = DomTree::new();
    let mut editor = Editor::default();
    let ul = task_list(&mut tree);

    let first = editor.render(&mut tree, ul, ["A", "B", "C"]).unwrap();
    let first_texts = texts(&tree, ul);
    let second = editor.render(&mut tree, ul, ["A", "B", "C"]).unwrap();

    assert_eq!(first.len(), second.len());
    assert_eq!(texts(&tree, ul), first_texts);
    assert!(first.iter().all(|&item| tree.parent(item).is_none()));
}

#[test]
fn test_live_view_follows_edits() {
    let mut tree = DomTree::new();
    let mut editor = Editor::default();
    let ul = task_list(&mut tree);
    let live = tree.live_by_class(ul, "task");
    let frozen = tree.snapshot_by_class(ul, "task");

    editor.render(&mut tree, ul, ["A", "B"]).unwrap();
    editor.insert(&mut tree, ul, InsertPosition::BeforeEnd, "C").unwrap();

    assert_eq!(live.length(&tree), 3);
    assert_eq!(frozen.length(), 0);
}
