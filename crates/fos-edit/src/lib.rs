//! fOS Edit - positional editing for content trees
//!
//! A small toolkit over [`fos_dom::DomTree`] for ordered lists of sibling
//! items inside a container:
//!
//! - [`Editor::insert`]: build an item and place it at one of four
//!   [`InsertPosition`]s relative to a reference
//! - [`insert_after`]: place a node right after a sibling, built from
//!   `insert_before(next_sibling)`
//! - [`Editor::replace`]: swap an item in place, optionally carrying over its
//!   identity, action tags and classes ([`Preserve`])
//! - [`Editor::render`]: clear a container and rebuild it from data
//! - [`Editor::bind`]: one delegated listener per container that dispatches by
//!   action tag and keeps working across structural churn
//!
//! # Example
//! ```rust
//! use fos_dom::{DomTree, EventType, NodeOperations};
//! use fos_edit::{ActionMap, Editor, ItemSpec, Preserve};
//!
//! let mut tree = DomTree::new();
//! let ul = tree.create_element("ul");
//! let mut editor = Editor::default();
//!
//! let items = editor
//!     .render(&mut tree, ul, ["A", "B", "C"].map(|t| ItemSpec::new(t).with_action("delete")))
//!     .unwrap();
//!
//! let actions = ActionMap::new().on("delete", |tree, item, event| {
//!     tree.remove_child(event.container, item).unwrap();
//! });
//! editor.bind(&mut tree, ul, actions).unwrap();
//!
//! let b2 = tree.create_element("li");
//! tree.set_text_content(b2, "B2").unwrap();
//! editor.replace(&mut tree, items[1], b2, Preserve::ALL).unwrap();
//!
//! tree.dispatch_event(b2, EventType::Click).unwrap();
//! assert_eq!(tree.child_count(ul), 2);
//! ```

mod config;
mod editor;
mod error;
mod identity;
mod insert;
mod payload;
mod render;
mod replace;
mod router;
mod sibling;

pub use config::EditConfig;
pub use editor::Editor;
pub use error::{EditError, EditResult};
pub use identity::IdentityStore;
pub use insert::{insert_adjacent_element, insert_adjacent_text, target_container, InsertPosition};
pub use payload::ItemSpec;
pub use render::render;
pub use replace::{replace, Preserve};
pub use router::{bind, resolve_action_target, ActionEvent, ActionHandler, ActionMap, RouterHandle};
pub use sibling::insert_after;
