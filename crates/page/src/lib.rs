//! Fractal page objects - composable, lazy DOM queries for tests
//!
//! Describe a page as a tree of page objects instead of repeating
//! `query_selector` calls. Each page object knows how to find its elements
//! relative to its parent; nothing is queried until `element()` or
//! `elements()` is read, so the same tree stays valid across re-renders.
//!
//! ## Design
//!
//! - **Paths, not handles**: a page object is a selector path, resolved per read
//! - **One resolution rule**: `DomQuery` walks `{selector, index}` fragments
//! - **Composition over inheritance**: custom page objects embed a `PageNode`
//!   and implement `PageObject`
//!
//! ```text
//! PageObject → PageNode → Parent (Node | Element | Root)
//!                  ↓
//!        DomQuery {root, SelectorPath} → dom::Element
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod factory;
pub mod node;
pub mod query;
pub mod root;
pub mod selector_path;
pub mod utils;

pub use collection::NodeList;
pub use config::PageConfig;
pub use error::{PageError, Result};
pub use factory::{create_node, global_selector, selector, LazyChild};
pub use node::{IndexKey, Page, PageNode, PageObject, Parent};
pub use query::DomQuery;
pub use root::{get_root, reset_root, scoped_root, set_root, RootGuard};
pub use selector_path::{Fragment, SelectorPath, Step};
pub use utils::{assert_exists, get_description, text};

pub use dom::{Document, Element};
