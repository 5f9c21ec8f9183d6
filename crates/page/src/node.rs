//! Page objects - lazy, tree-positioned descriptions of DOM queries
//!
//! A node never holds a matched element, only how to find one: its own
//! selector and index, plus a back-reference to its parent. Reading
//! `element()`/`elements()` walks the parent chain into a `DomQuery` and runs
//! it against the live document.
//!
//! Custom page objects embed a `PageNode` and implement `PageObject`:
//!
//! ```ignore
//! struct ListItem { node: PageNode }
//!
//! impl PageObject for ListItem {
//!     fn from_node(node: PageNode) -> Self { Self { node } }
//!     fn node(&self) -> &PageNode { &self.node }
//! }
//! ```

use crate::collection::NodeList;
use crate::error::Result;
use crate::factory;
use crate::query::DomQuery;
use crate::root;
use dom::Element;
use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeBounds;
use std::rc::Rc;

/// What a node's query is relative to
#[derive(Debug, Clone)]
pub enum Parent {
    /// The thread's current root (see `root::get_root`), resolved per query
    Root,
    /// A literal scope anchor
    Element(Element),
    /// Another page object; its resolved path prefixes this node's
    Node(PageNode),
}

impl From<Element> for Parent {
    fn from(element: Element) -> Self {
        Parent::Element(element)
    }
}

impl From<PageNode> for Parent {
    fn from(node: PageNode) -> Self {
        Parent::Node(node)
    }
}

impl From<Option<Element>> for Parent {
    fn from(element: Option<Element>) -> Self {
        element.map_or(Parent::Root, Parent::Element)
    }
}

#[derive(Debug)]
struct NodeState {
    selector: String,
    parent: Parent,
    index: Option<i64>,
}

/// Immutable node state, shared between a node and its children
#[derive(Clone)]
pub struct PageNode {
    state: Rc<NodeState>,
}

impl PageNode {
    pub fn new(selector: impl Into<String>, parent: impl Into<Parent>, index: Option<i64>) -> Self {
        Self {
            state: Rc::new(NodeState {
                selector: selector.into(),
                parent: parent.into(),
                index,
            }),
        }
    }

    pub fn selector(&self) -> &str {
        &self.state.selector
    }

    pub fn parent(&self) -> &Parent {
        &self.state.parent
    }

    pub fn index(&self) -> Option<i64> {
        self.state.index
    }

    /// Resolve the root and path by walking up the parent chain
    pub fn dom_query(&self) -> DomQuery {
        let base = match self.parent() {
            Parent::Root => DomQuery::new(root::get_root()),
            Parent::Element(element) => DomQuery::new(Some(element.clone())),
            Parent::Node(node) => node.dom_query(),
        };
        base.create_child(self.selector(), self.index())
    }

    /// Index-bound clone: an empty selector under this node
    pub fn with_index(&self, index: i64) -> PageNode {
        PageNode::new("", Parent::Node(self.clone()), Some(index))
    }

    /// Whether both values share the same node state
    pub fn ptr_eq(&self, other: &PageNode) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for PageNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageNode")
            .field("selector", &self.state.selector)
            .field("index", &self.state.index)
            .field("parent", &self.state.parent)
            .finish()
    }
}

/// Keys accepted by `PageObject::get`
///
/// Integers (negative and out-of-range included) select an index. Floats
/// only when they are whole numbers; strings only when they parse as one.
pub trait IndexKey {
    fn to_index(&self) -> Option<i64>;
}

macro_rules! impl_index_key {
    ($($t:ty),*) => {
        $(impl IndexKey for $t {
            fn to_index(&self) -> Option<i64> {
                // Unsigned keys past i64::MAX are out of range anyway
                Some(i64::try_from(*self).unwrap_or(i64::MAX))
            }
        })*
    };
}

impl_index_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl IndexKey for f64 {
    fn to_index(&self) -> Option<i64> {
        let in_range = *self >= i64::MIN as f64 && *self < i64::MAX as f64;
        (self.is_finite() && self.fract() == 0.0 && in_range).then_some(*self as i64)
    }
}

impl IndexKey for f32 {
    fn to_index(&self) -> Option<i64> {
        f64::from(*self).to_index()
    }
}

impl IndexKey for &str {
    fn to_index(&self) -> Option<i64> {
        let key = self.trim();
        if key.is_empty() {
            return None;
        }
        key.parse::<i64>()
            .ok()
            .or_else(|| key.parse::<f64>().ok().and_then(|f| f.to_index()))
    }
}

impl IndexKey for String {
    fn to_index(&self) -> Option<i64> {
        self.as_str().to_index()
    }
}

/// A page object: anything built around a `PageNode`
///
/// Only `from_node` and `node` are required. Everything else is provided and
/// may be overridden; sequence operations treat the node as the list of its
/// matches, one indexed clone per matched element.
pub trait PageObject: Sized {
    fn from_node(node: PageNode) -> Self;

    fn node(&self) -> &PageNode;

    /// First matching element, queried now
    fn element(&self) -> Option<Element> {
        self.dom_query().query()
    }

    /// Every matching element, queried now
    fn elements(&self) -> Vec<Element> {
        self.dom_query().query_all()
    }

    fn dom_query(&self) -> DomQuery {
        self.node().dom_query()
    }

    /// The resolved selector path, e.g. `.list li[2]`
    fn description(&self) -> String {
        self.dom_query().path.to_string()
    }

    /// The same kind of page object, restricted to the match at `index`.
    /// Always succeeds; an index with no match just finds nothing.
    fn at(&self, index: i64) -> Self {
        Self::from_node(self.node().with_index(index))
    }

    /// Like `at`, for keys that may not be integers
    fn get<K: IndexKey>(&self, key: K) -> Option<Self> {
        key.to_index().map(|index| self.at(index))
    }

    /// Child page object whose query is scoped to this one
    fn child<C: PageObject>(&self, selector: &str) -> Result<C> {
        factory::check_selector(selector)?;
        Ok(factory::create_node(selector, self.node().clone(), None))
    }

    /// Child page object that ignores this one and queries from `root`, or
    /// from the thread's current root when `None`
    fn global_child<C: PageObject>(&self, selector: &str, root: Option<Element>) -> Result<C> {
        factory::check_selector(selector)?;
        Ok(factory::create_node(selector, root, None))
    }

    /// One indexed clone per matched element
    fn all(&self) -> NodeList<Self> {
        (0..self.elements().len())
            .map(|i| self.at(i64::try_from(i).unwrap_or(i64::MAX)))
            .collect()
    }

    fn len(&self) -> usize {
        self.elements().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> std::vec::IntoIter<Self> {
        self.all().into_iter()
    }

    fn map<R, F: FnMut(&Self) -> R>(&self, f: F) -> Vec<R> {
        self.all().map(f)
    }

    fn filter<F: FnMut(&Self) -> bool>(&self, predicate: F) -> NodeList<Self> {
        self.all().filter(predicate)
    }

    fn find<F: FnMut(&Self) -> bool>(&self, mut predicate: F) -> Option<Self> {
        self.all().into_iter().find(|item| predicate(item))
    }

    fn position<F: FnMut(&Self) -> bool>(&self, predicate: F) -> Option<usize> {
        self.all().position(predicate)
    }

    fn slice<R: RangeBounds<usize>>(&self, range: R) -> NodeList<Self> {
        self.all().slice(range)
    }

    fn sort_by<F: FnMut(&Self, &Self) -> Ordering>(&self, compare: F) -> NodeList<Self> {
        self.all().sort_by(compare)
    }

    fn reverse(&self) -> NodeList<Self> {
        self.all().reverse()
    }

    fn every<F: FnMut(&Self) -> bool>(&self, predicate: F) -> bool {
        self.all().every(predicate)
    }

    fn some<F: FnMut(&Self) -> bool>(&self, predicate: F) -> bool {
        self.all().some(predicate)
    }

    fn for_each<F: FnMut(&Self)>(&self, f: F) {
        self.all().for_each(f)
    }

    fn reduce<A, F: FnMut(A, &Self) -> A>(&self, init: A, f: F) -> A {
        self.all().reduce(init, f)
    }

    fn first(&self) -> Option<Self> {
        self.all().into_iter().next()
    }

    fn last(&self) -> Option<Self> {
        self.all().into_iter().last()
    }

    fn to_vec(&self) -> Vec<Self> {
        self.all().into_vec()
    }
}

/// The plain page object
#[derive(Debug, Clone)]
pub struct Page {
    node: PageNode,
}

impl Page {
    /// Page object for `selector` under `parent`. An empty selector matches
    /// the parent itself.
    pub fn new(selector: impl Into<String>, parent: impl Into<Parent>) -> Self {
        Self::from_node(PageNode::new(selector, parent, None))
    }

    /// Page object for the thread's current root
    pub fn root() -> Self {
        Self::new("", Parent::Root)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::root()
    }
}

impl PageObject for Page {
    fn from_node(node: PageNode) -> Self {
        Self { node }
    }

    fn node(&self) -> &PageNode {
        &self.node
    }
}
