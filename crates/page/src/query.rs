//! DOM query - resolve a selector path against a live document
//!
//! A `DomQuery` is just a root and a path; every `query`/`query_all` call
//! walks the live tree again, so mutations between two calls are observed.
//!
//! Walk, per fragment, starting with the root as the current scope:
//! - `sel`     → first match of `sel` under the scope
//! - `[0]`     → the scope itself (containers never match themselves)
//! - `[n]`     → nothing, for any other `n`
//! - `sel[n]`  → the nth match of `sel` under the scope
//!
//! A fragment that finds nothing ends the walk.

use crate::selector_path::{Fragment, SelectorPath, Step};
use dom::{selector, Element, Selector};
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomQuery {
    pub root: Option<Element>,
    pub path: SelectorPath,
}

impl DomQuery {
    pub fn new(root: Option<Element>) -> Self {
        Self::with_path(root, SelectorPath::new())
    }

    pub fn with_path(root: Option<Element>, path: SelectorPath) -> Self {
        Self { root, path }
    }

    /// Same root, path extended by one step
    pub fn extend(&self, step: impl Into<Step>) -> DomQuery {
        Self::with_path(self.root.clone(), self.path.extend(step))
    }

    /// Same root, path extended by `selector` and then `index`
    pub fn create_child(&self, selector: &str, index: Option<i64>) -> DomQuery {
        Self::with_path(self.root.clone(), self.path.create_child(selector, index))
    }

    /// First matching element, if any
    pub fn query(&self) -> Option<Element> {
        let root = self.root.as_ref()?;
        tracing::trace!("[DomQuery] query `{}`", self.path);

        let mut scope = root.clone();
        for fragment in self.path.fragments() {
            scope = match (fragment.has_selector(), fragment.index) {
                (true, None) => {
                    let compiled = compile(fragment)?;
                    scope.select_first(&compiled)
                }
                (false, Some(0)) => Some(scope).filter(|s| !s.is_container()),
                (false, _) => None,
                (true, Some(index)) => {
                    let compiled = compile(fragment)?;
                    nth(scope.select_all(&compiled), index)
                }
            }?;
        }

        Some(scope).filter(|s| !s.is_container())
    }

    /// Every matching element, in document order
    pub fn query_all(&self) -> Vec<Element> {
        let Some(root) = self.root.as_ref() else {
            return Vec::new();
        };
        tracing::trace!("[DomQuery] query_all `{}`", self.path);

        let mut set = vec![root.clone()];
        for fragment in self.path.fragments() {
            // A step always queries from a single anchor
            let Some(anchor) = set.into_iter().next() else {
                return Vec::new();
            };
            set = match (fragment.has_selector(), fragment.index) {
                (true, None) => match compile(fragment) {
                    Some(compiled) => anchor.select_all(&compiled),
                    None => Vec::new(),
                },
                (false, Some(0)) if !anchor.is_container() => vec![anchor],
                (false, _) => Vec::new(),
                (true, Some(index)) => match compile(fragment) {
                    Some(compiled) => nth(anchor.select_all(&compiled), index).into_iter().collect(),
                    None => Vec::new(),
                },
            };
        }

        set.retain(|el| !el.is_container());
        set
    }
}

/// Compile a fragment's selector. A selector the engine rejects matches
/// nothing.
fn compile(fragment: &Fragment) -> Option<Rc<Selector>> {
    match selector::compile(&fragment.selector) {
        Ok(compiled) => Some(compiled),
        Err(err) => {
            tracing::warn!("[DomQuery] {err}, treating as no match");
            None
        }
    }
}

fn nth(matches: Vec<Element>, index: i64) -> Option<Element> {
    let index = usize::try_from(index).ok()?;
    matches.into_iter().nth(index)
}
