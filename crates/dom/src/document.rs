//! Document and element handles
//!
//! A `Document` is a shared handle to one `DomArena`; an `Element` is a
//! `(document, node id)` pair. Handles are cheap to clone, compare by
//! identity and never borrow the tree beyond a single call, so the tree can
//! be mutated freely between two reads.

use crate::arena::DomArena;
use crate::error::Result;
use crate::selector;
use crate::serializer::{DomSerializer, NodeSnapshot};
use crate::types::{NodeId, NodeType};
use scraper::Selector;
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use uuid::Uuid;

/// Shared handle to a live, mutable document
#[derive(Clone)]
pub struct Document {
    arena: Rc<RefCell<DomArena>>,
}

impl Document {
    /// Parse a full HTML document
    pub fn parse(markup: &str) -> Self {
        Self::from_arena(DomArena::parse(markup))
    }

    /// An empty document with `<html>`, `<head>` and `<body>`
    pub fn empty() -> Self {
        Self::from_arena(DomArena::new())
    }

    pub fn from_arena(arena: DomArena) -> Self {
        Self {
            arena: Rc::new(RefCell::new(arena)),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.arena.borrow().uuid()
    }

    /// Whether both handles point at the same document
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena)
    }

    /// The document node itself (a container, never a query result)
    pub fn root(&self) -> Element {
        let id = self.arena.borrow().root_id();
        self.handle(id)
    }

    /// The `<html>` element
    pub fn document_element(&self) -> Option<Element> {
        let id = self.arena.borrow().document_element_id();
        id.map(|id| self.handle(id))
    }

    pub fn body(&self) -> Option<Element> {
        let id = self.arena.borrow().body_id();
        id.map(|id| self.handle(id))
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
        self.root().query_selector(selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>> {
        self.root().query_selector_all(selector)
    }

    /// Replace the body's content, e.g. to simulate a re-render
    pub fn set_body_html(&self, markup: &str) -> Result<()> {
        match self.body() {
            Some(body) => body.set_inner_html(markup),
            None => self.root().append_html(markup),
        }
    }

    /// Create a detached container holding the parsed `markup`. Stands in
    /// for a `DocumentFragment` or an open shadow root.
    pub fn create_fragment(&self, markup: &str) -> Result<Element> {
        let id = self.arena.borrow_mut().create_fragment(markup)?;
        tracing::debug!("[Document {}] Created fragment {:?}", self.uuid(), id);
        Ok(self.handle(id))
    }

    /// Create a detached element from `markup`, returning its first element
    pub fn create_detached(&self, markup: &str) -> Result<Option<Element>> {
        let fragment = self.create_fragment(markup)?;
        Ok(fragment.children().into_iter().next())
    }

    pub(crate) fn with_arena<R>(&self, f: impl FnOnce(&DomArena) -> R) -> R {
        f(&self.arena.borrow())
    }

    pub(crate) fn with_arena_mut<R>(&self, f: impl FnOnce(&mut DomArena) -> R) -> R {
        f(&mut self.arena.borrow_mut())
    }

    fn handle(&self, id: NodeId) -> Element {
        Element {
            document: self.clone(),
            id,
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Document {}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Document({})", self.uuid())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

/// Handle to one node of a `Document`: an element, or a container (the
/// document node or a fragment) that can anchor queries.
#[derive(Clone)]
pub struct Element {
    document: Document,
    id: NodeId,
}

impl Element {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn node_id(&self) -> NodeId {
        self.id
    }

    pub fn node_type(&self) -> NodeType {
        self.document
            .with_arena(|arena| arena.node_type(self.id))
            .unwrap_or(NodeType::DocumentFragment)
    }

    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Documents and fragments: valid anchors, never matches
    pub fn is_container(&self) -> bool {
        self.node_type().is_container()
    }

    pub fn is_connected(&self) -> bool {
        self.document
            .with_arena(|arena| arena.is_connected(self.id))
            .unwrap_or(false)
    }

    /// Lowercase tag name, `None` for non-elements
    pub fn tag_name(&self) -> Option<String> {
        self.document.with_arena(|arena| {
            arena
                .element(self.id)
                .ok()
                .map(|el| el.value().name().to_string())
        })
    }

    /// The `id` attribute
    pub fn id(&self) -> Option<String> {
        self.attr("id")
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.document.with_arena(|arena| {
            arena
                .element(self.id)
                .ok()
                .and_then(|el| el.value().attr(name).map(str::to_string))
        })
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.document.with_arena(|arena| {
            arena.element(self.id).is_ok_and(|el| {
                el.value()
                    .has_class(class, scraper::CaseSensitivity::CaseSensitive)
            })
        })
    }

    /// Concatenated text content of the subtree
    pub fn text(&self) -> String {
        self.document
            .with_arena(|arena| arena.text(self.id))
            .unwrap_or_default()
    }

    pub fn inner_html(&self) -> String {
        self.document
            .with_arena(|arena| arena.inner_html(self.id))
            .unwrap_or_default()
    }

    pub fn outer_html(&self) -> String {
        self.document
            .with_arena(|arena| arena.outer_html(self.id))
            .unwrap_or_default()
    }

    pub fn parent(&self) -> Option<Element> {
        let parent = self
            .document
            .with_arena(|arena| arena.parent_id(self.id).ok().flatten());
        parent.map(|id| self.document.handle(id))
    }

    /// Element children, in document order
    pub fn children(&self) -> Vec<Element> {
        self.document
            .with_arena(|arena| arena.child_element_ids(self.id))
            .unwrap_or_default()
            .into_iter()
            .map(|id| self.document.handle(id))
            .collect()
    }

    /// Native `querySelector`: the selector must be valid as written
    pub fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
        let parsed = selector::parse(selector)?;
        Ok(self.select_first(&parsed))
    }

    /// Native `querySelectorAll`: the selector must be valid as written
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>> {
        let parsed = selector::parse(selector)?;
        Ok(self.select_all(&parsed))
    }

    /// First descendant matching an already parsed selector
    pub fn select_first(&self, selector: &Selector) -> Option<Element> {
        let id = self
            .document
            .with_arena(|arena| arena.select_first(self.id, selector).ok().flatten());
        id.map(|id| self.document.handle(id))
    }

    /// All descendants matching an already parsed selector, in document order
    pub fn select_all(&self, selector: &Selector) -> Vec<Element> {
        self.document
            .with_arena(|arena| arena.select_all(self.id, selector))
            .unwrap_or_default()
            .into_iter()
            .map(|id| self.document.handle(id))
            .collect()
    }

    pub fn set_inner_html(&self, markup: &str) -> Result<()> {
        tracing::debug!("[Document {}] Replacing content of {:?}", self.document.uuid(), self);
        self.document
            .with_arena_mut(|arena| arena.set_inner_html(self.id, markup))
    }

    pub fn append_html(&self, markup: &str) -> Result<()> {
        tracing::debug!("[Document {}] Appending to {:?}", self.document.uuid(), self);
        self.document
            .with_arena_mut(|arena| arena.append_html(self.id, markup))
    }

    /// Detach from the parent; the handle stays usable but disconnected
    pub fn remove(&self) -> Result<()> {
        tracing::debug!("[Document {}] Removing {:?}", self.document.uuid(), self);
        self.document.with_arena_mut(|arena| arena.detach(self.id))
    }

    pub fn snapshot(&self) -> Result<NodeSnapshot> {
        self.document
            .with_arena(|arena| DomSerializer::new().snapshot(arena, self.id))
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.document.ptr_eq(&other.document)
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.document.arena).hash(state);
        self.id.hash(state);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(tag) = self.tag_name() else {
            return f.write_str(self.node_type().node_name());
        };
        write!(f, "<{tag}")?;
        if let Some(id) = self.id() {
            write!(f, " id=\"{id}\"")?;
        }
        if let Some(class) = self.attr("class") {
            write!(f, " class=\"{class}\"")?;
        }
        f.write_str(">")
    }
}
