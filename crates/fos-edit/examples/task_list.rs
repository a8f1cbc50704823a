//! Example: editing a task list
//!
//! Run with `RUST_LOG=fos_edit=debug` to see each edit.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use fos_dom::{Document, DomTree, EventType, NodeId, NodeOperations};
use fos_edit::{ActionMap, Editor, InsertPosition, ItemSpec, Preserve};

fn print_list(tree: &DomTree, ul: NodeId, editor: &Editor) {
    let line: Vec<String> = tree
        .children(ul)
        .map(|item| {
            let id = editor.identity_of(tree, item).unwrap_or_default();
            format!("{}#{}", tree.text_content(item), id)
        })
        .collect();
    println!("[{}]", line.join(", "));
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new()?;
    let body = doc.body();
    let ul = doc.create_section(body, "ul", "tasks")?;
    let mut editor = Editor::default();
    let tree = doc.tree_mut();

    let deleted = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&deleted);
    let actions = ActionMap::new()
        .on("delete", move |tree, item, event| {
            log.borrow_mut().push(tree.text_content(item));
            if let Err(err) = tree.remove_child(event.container, item) {
                tracing::warn!("delete failed: {}", err);
            }
        })
        .on("toggle", |tree, item, _| {
            if let Some(classes) = tree.class_list_mut(item) {
                classes.toggle("done");
            }
        });
    editor.bind(tree, ul, actions)?;

    let task = |text: &str| ItemSpec::new(text).with_action("delete");
    editor.render(tree, ul, ["A", "B", "C"].map(task))?;
    print_list(tree, ul, &editor);

    let b = editor.find_item(tree, ul, "2").context("item 2 missing after render")?;
    let b2 = tree.create_element("li");
    tree.set_text_content(b2, "B2")?;
    editor.replace(tree, b, b2, Preserve::ALL)?;
    print_list(tree, ul, &editor);

    let x = editor.create_item(tree, task("X"))?;
    editor.insert_after(tree, b2, x)?;
    editor.insert(tree, ul, InsertPosition::BeforeEnd, task("D"))?;
    print_list(tree, ul, &editor);

    // The router reaches the replacement without any rebinding
    tree.dispatch_event(b2, EventType::Click)?;
    print_list(tree, ul, &editor);

    let footer_spec = ItemSpec::new("footer").with_tag("p");
    let footer = editor.insert(tree, ul, InsertPosition::AfterEnd, footer_spec)?;
    tree.set_attribute(footer, "data-action", "toggle")?;
    tree.dispatch_event(footer, EventType::Click)?;
    println!("footer outside the list: {:?}", tree.class_list(footer).map(|c| c.value()));

    let deleted = deleted.borrow();
    println!("deleted {} item(s): {:?}", deleted.len(), *deleted);
    Ok(())
}
