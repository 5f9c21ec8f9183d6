//! Host document model for page object queries
//!
//! A small, mutable, single-threaded HTML document with native-style
//! `query_selector` queries, built on `scraper`'s parser and selector engine.
//!
//! ## Philosophy
//!
//! - **Data structures first**: one arena per document, nodes addressed by index
//! - **Handles, not references**: `Document`/`Element` never hold a borrow, so
//!   the tree can be re-rendered between any two reads
//! - **No special cases**: documents and fragments are both "containers" that
//!   anchor queries the same way
//!
//! ## Core Design
//!
//! ```text
//! HTML → DomArena (ego_tree) ← Document (Rc<RefCell>) ← Element {document, NodeId}
//!                                      ↓
//!                       selector::compile → scraper::Selector
//! ```

pub mod arena;
pub mod document;
pub mod error;
pub mod selector;
pub mod serializer;
pub mod types;

pub use arena::DomArena;
pub use document::{Document, Element};
pub use error::{DomError, Result};
pub use serializer::{DomSerializer, NodeSnapshot, SerializerConfig};
pub use types::*;

/// Re-exported so callers can hold compiled selectors
pub use scraper::Selector;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_document() {
        let doc = Document::parse("<main><h1>Title</h1></main>");
        let h1 = doc.query_selector("main > h1").unwrap().unwrap();
        assert_eq!(h1.text(), "Title");
        assert!(h1.is_connected());
        assert_eq!(h1.node_type(), NodeType::Element);
    }
}
