//! Factories - construct page objects and declare their children
//!
//! `create_node` builds a page object directly. `selector` and
//! `global_selector` validate eagerly and return a `LazyChild` slot meant to
//! be stored as a field: the child is created on first access and memoized,
//! while its query stays live.

use crate::error::{PageError, Result};
use crate::node::{PageNode, PageObject, Parent};
use crate::root;
use dom::Element;
use std::cell::OnceCell;
use std::fmt;

/// Build a page object of type `T` for `selector` under `parent`
pub fn create_node<T: PageObject>(selector: &str, parent: impl Into<Parent>, index: Option<i64>) -> T {
    T::from_node(PageNode::new(selector, parent, index))
}

/// Declare a child scoped to the page object that owns the slot
pub fn selector<T: PageObject>(selector: &str) -> Result<LazyChild<T>> {
    check_selector(selector)?;
    Ok(LazyChild::new(selector, ChildScope::Local))
}

/// Declare a child that queries from `root` (or the thread's current root
/// when `None`) instead of from the page object that owns the slot
pub fn global_selector<T: PageObject>(selector: &str, root: Option<Element>) -> Result<LazyChild<T>> {
    check_selector(selector)?;
    Ok(LazyChild::new(selector, ChildScope::Global(root)))
}

/// Reject blank selectors and, unless disabled in `PageConfig`, selectors
/// the engine cannot use even after scope-safe rewriting
pub(crate) fn check_selector(selector: &str) -> Result<()> {
    if selector.trim().is_empty() {
        return Err(PageError::EmptySelector);
    }
    if root::config().validate_selectors {
        dom::selector::validate(selector).map_err(PageError::from_selector_error)?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
enum ChildScope {
    Local,
    Global(Option<Element>),
}

/// A child page object, created on first access
///
/// The first owner passed to `get` becomes the child's parent; later calls
/// return the memoized child.
pub struct LazyChild<T> {
    selector: String,
    scope: ChildScope,
    cell: OnceCell<T>,
}

impl<T: PageObject> LazyChild<T> {
    fn new(selector: &str, scope: ChildScope) -> Self {
        Self {
            selector: selector.to_string(),
            scope,
            cell: OnceCell::new(),
        }
    }

    pub fn get<O: PageObject>(&self, owner: &O) -> &T {
        self.cell.get_or_init(|| {
            tracing::trace!("[LazyChild] Creating `{}`", self.selector);
            let parent = match &self.scope {
                ChildScope::Local => Parent::Node(owner.node().clone()),
                ChildScope::Global(root) => Parent::from(root.clone()),
            };
            create_node(&self.selector, parent, None)
        })
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn is_global(&self) -> bool {
        matches!(self.scope, ChildScope::Global(_))
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> fmt::Debug for LazyChild<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyChild")
            .field("selector", &self.selector)
            .field("scope", &self.scope)
            .field("initialized", &self.cell.get().is_some())
            .finish()
    }
}
