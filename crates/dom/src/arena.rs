//! Arena-based DOM tree storage
//!
//! The parsed tree lives in a single `ego_tree` arena owned by one `Html`.
//! Everything outside this module talks about nodes through `NodeId`s, so a
//! handle never dangles: removing a node only detaches it from its parent.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<Node>
//!        [Document][html][head][body]...[Fragment][p]...
//!         ↑ connected tree                ↑ detached (orphan) subtrees
//! ```

use crate::error::{DomError, Result};
use crate::types::{NodeId, NodeType};
use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};
use uuid::Uuid;

/// Arena holding one document and any detached fragments created from it
///
/// Design:
/// - One `Html` tree; detached fragments are orphans in the same arena
/// - No Rc between nodes: use indices everywhere
/// - A UUID per arena so handles can tell documents apart
#[derive(Debug)]
pub struct DomArena {
    html: Html,
    uuid: Uuid,
}

impl DomArena {
    /// Create an empty document (`<html><head></head><body></body></html>`)
    pub fn new() -> Self {
        Self::parse("")
    }

    /// Parse a full HTML document
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
            uuid: Uuid::new_v4(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Get node by ID
    pub fn get(&self, node_id: NodeId) -> Result<NodeRef<'_, Node>> {
        self.html
            .tree
            .get(node_id)
            .ok_or_else(|| DomError::NodeNotFound(format!("{node_id:?}")))
    }

    /// Get element by ID, failing for any other node type
    pub fn element(&self, node_id: NodeId) -> Result<ElementRef<'_>> {
        let node = self.get(node_id)?;
        ElementRef::wrap(node).ok_or_else(|| DomError::InvalidNodeType {
            expected: NodeType::Element.to_string(),
            actual: NodeType::of(node.value()).to_string(),
        })
    }

    pub fn node_type(&self, node_id: NodeId) -> Result<NodeType> {
        Ok(NodeType::of(self.get(node_id)?.value()))
    }

    /// The document node
    pub fn root_id(&self) -> NodeId {
        self.html.tree.root().id()
    }

    /// The `<html>` element
    pub fn document_element_id(&self) -> Option<NodeId> {
        self.html
            .tree
            .root()
            .children()
            .find(|child| child.value().is_element())
            .map(|child| child.id())
    }

    /// The first connected `<body>` element
    pub fn body_id(&self) -> Option<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "body")
            .map(|el| el.id())
    }

    pub fn parent_id(&self, node_id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(node_id)?.parent().map(|p| p.id()))
    }

    /// Element children, in document order
    pub fn child_element_ids(&self, node_id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self
            .get(node_id)?
            .children()
            .filter(|child| child.value().is_element())
            .map(|child| child.id())
            .collect())
    }

    /// Whether the node is reachable from the document node
    pub fn is_connected(&self, node_id: NodeId) -> Result<bool> {
        let node = self.get(node_id)?;
        let root = self.root_id();
        Ok(node.id() == root || node.ancestors().any(|a| a.id() == root))
    }

    /// Traverse a subtree depth-first, in document order
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(NodeRef<'_, Node>) -> Result<()>,
    {
        for node in self.get(start_id)?.descendants() {
            visit(node)?;
        }
        Ok(())
    }

    /// All elements below `anchor` matching `selector`, in document order.
    ///
    /// Element anchors bind `:scope` to themselves. Container anchors have no
    /// element identity, so `:scope` falls back to the selector engine's
    /// default. The anchor itself is never part of the result.
    pub fn select_all(&self, anchor: NodeId, selector: &Selector) -> Result<Vec<NodeId>> {
        let node = self.get(anchor)?;
        let ids = match ElementRef::wrap(node) {
            Some(scope) => scope.select(selector).map(|el| el.id()).collect(),
            None => node
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .filter(|el| selector.matches(el))
                .map(|el| el.id())
                .collect(),
        };
        Ok(ids)
    }

    /// First element below `anchor` matching `selector`
    pub fn select_first(&self, anchor: NodeId, selector: &Selector) -> Result<Option<NodeId>> {
        let node = self.get(anchor)?;
        let id = match ElementRef::wrap(node) {
            Some(scope) => scope.select(selector).next().map(|el| el.id()),
            None => node
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .find(|el| selector.matches(el))
                .map(|el| el.id()),
        };
        Ok(id)
    }

    /// Concatenated text of every text node in the subtree
    pub fn text(&self, node_id: NodeId) -> Result<String> {
        let mut text = String::new();
        self.traverse_df(node_id, |node| {
            if let Some(t) = node.value().as_text() {
                text.push_str(t);
            }
            Ok(())
        })?;
        Ok(text)
    }

    /// Serialized markup of the node's children
    pub fn inner_html(&self, node_id: NodeId) -> Result<String> {
        let node = self.get(node_id)?;
        if let Some(el) = ElementRef::wrap(node) {
            return Ok(el.inner_html());
        }
        Ok(node.children().map(|child| Self::markup_of(child)).collect())
    }

    /// Serialized markup of the node itself
    pub fn outer_html(&self, node_id: NodeId) -> Result<String> {
        let node = self.get(node_id)?;
        if ElementRef::wrap(node).is_some() {
            return Ok(Self::markup_of(node));
        }
        self.inner_html(node_id)
    }

    fn markup_of(node: NodeRef<'_, Node>) -> String {
        match node.value() {
            Node::Element(_) => ElementRef::wrap(node).map(|el| el.html()).unwrap_or_default(),
            Node::Text(t) => (**t).to_string(),
            Node::Comment(c) => format!("<!--{}-->", &**c),
            _ => node.children().map(Self::markup_of).collect(),
        }
    }

    /// Replace all children of `node_id` with the parsed `markup`
    pub fn set_inner_html(&mut self, node_id: NodeId, markup: &str) -> Result<()> {
        let old_children: Vec<NodeId> = self.get(node_id)?.children().map(|c| c.id()).collect();
        for child in old_children {
            self.detach(child)?;
        }
        self.append_html(node_id, markup)
    }

    /// Parse `markup` and append the resulting nodes to `node_id`
    pub fn append_html(&mut self, node_id: NodeId, markup: &str) -> Result<()> {
        self.get(node_id)?;
        let parsed = self.graft_fragment(markup);
        self.move_children(parsed, node_id)
    }

    /// Detach a node (and its subtree) from its parent. The node stays in the
    /// arena, so existing handles to it remain valid but disconnected.
    pub fn detach(&mut self, node_id: NodeId) -> Result<()> {
        let mut node = self
            .html
            .tree
            .get_mut(node_id)
            .ok_or_else(|| DomError::NodeNotFound(format!("{node_id:?}")))?;
        node.detach();
        Ok(())
    }

    /// Create a detached fragment container holding the parsed `markup`
    pub fn create_fragment(&mut self, markup: &str) -> Result<NodeId> {
        let parsed = self.graft_fragment(markup);
        let fragment = self.html.tree.orphan(Node::Fragment).id();
        self.move_children(parsed, fragment)?;
        Ok(fragment)
    }

    /// Parse `markup` into this arena as an orphan subtree and return the id
    /// of the wrapper element whose children are the parsed nodes.
    fn graft_fragment(&mut self, markup: &str) -> Option<NodeId> {
        let parsed = Html::parse_fragment(markup);
        let merged_root = self.html.tree.extend_tree(parsed.tree).id();
        self.html.tree.get(merged_root).and_then(|root| {
            root.children()
                .find(|child| child.value().is_element())
                .map(|wrapper| wrapper.id())
        })
    }

    fn move_children(&mut self, from: Option<NodeId>, to: NodeId) -> Result<()> {
        let Some(from) = from else {
            return Ok(());
        };
        let child_ids: Vec<NodeId> = self.get(from)?.children().map(|c| c.id()).collect();
        let mut target = self
            .html
            .tree
            .get_mut(to)
            .ok_or_else(|| DomError::NodeNotFound(format!("{to:?}")))?;
        for child_id in child_ids {
            target.append_id(child_id);
        }
        Ok(())
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
