//! Root resolution - where parentless page objects start their queries
//!
//! State is per thread, so each test thread starts clean:
//! - the document page objects query by default
//! - an explicit root override, plus a stack of scoped overrides
//! - the `PageConfig` in effect
//!
//! Resolution order: innermost scoped root → override → configured test
//! container → `<body>`. Each `RootGuard` removes only its own scope, so
//! guards may be dropped in any order.

use crate::config::PageConfig;
use dom::{Document, Element};
use std::cell::RefCell;

#[derive(Debug, Default)]
struct RootContext {
    document: Option<Document>,
    root: Option<Element>,
    scoped: Vec<(u64, Element)>,
    next_scope: u64,
    config: PageConfig,
}

thread_local! {
    static CONTEXT: RefCell<RootContext> = RefCell::new(RootContext::default());
}

/// Install the document parentless page objects query
pub fn set_document(document: Document) {
    tracing::debug!("[Root] Installed document {}", document.uuid());
    CONTEXT.with(|ctx| ctx.borrow_mut().document = Some(document));
}

pub fn document() -> Option<Document> {
    CONTEXT.with(|ctx| ctx.borrow().document.clone())
}

/// Remove the installed document and every root override
pub fn clear_document() {
    tracing::debug!("[Root] Cleared document");
    CONTEXT.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        ctx.document = None;
        ctx.root = None;
        ctx.scoped.clear();
    });
}

/// Override the default root for this thread
pub fn set_root(element: Element) {
    tracing::debug!("[Root] Root set to {:?}", element);
    CONTEXT.with(|ctx| ctx.borrow_mut().root = Some(element));
}

/// The root parentless page objects resolve against, if any
pub fn get_root() -> Option<Element> {
    let (root, document, container) = CONTEXT.with(|ctx| {
        let ctx = ctx.borrow();
        (
            ctx.scoped
                .last()
                .map(|(_, element)| element.clone())
                .or_else(|| ctx.root.clone()),
            ctx.document.clone(),
            ctx.config.container_selector.clone(),
        )
    });

    if root.is_some() {
        return root;
    }

    let document = document?;
    if let Some(container) = container {
        match document.query_selector(&container) {
            Ok(Some(found)) => return Some(found),
            Ok(None) => {}
            Err(err) => tracing::warn!("[Root] Ignoring container selector: {err}"),
        }
    }
    document.body()
}

/// Drop the root override and any scoped roots, back to default resolution
pub fn reset_root() {
    let had_override = CONTEXT.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        let had_override = ctx.root.is_some() || !ctx.scoped.is_empty();
        ctx.root = None;
        ctx.scoped.clear();
        had_override
    });
    if had_override {
        tracing::debug!("[Root] Root reset");
    }
}

/// Override the root until the returned guard is dropped
#[must_use = "the override is undone when the guard is dropped"]
pub fn scoped_root(element: Element) -> RootGuard {
    tracing::debug!("[Root] Scoped root set to {:?}", element);
    let id = CONTEXT.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        let id = ctx.next_scope;
        ctx.next_scope += 1;
        ctx.scoped.push((id, element));
        id
    });
    RootGuard { id }
}

/// Removes its own scoped root on drop
#[derive(Debug)]
pub struct RootGuard {
    id: u64,
}

impl Drop for RootGuard {
    fn drop(&mut self) {
        let id = self.id;
        // try_with: the guard may outlive the thread-local during thread teardown
        let _ = CONTEXT.try_with(|ctx| {
            let mut ctx = ctx.borrow_mut();
            ctx.scoped.retain(|(scope, _)| *scope != id);
            tracing::debug!("[Root] Scoped root {id} released, {} remaining", ctx.scoped.len());
        });
    }
}

pub fn configure(config: PageConfig) {
    tracing::debug!("[Root] Configured {:?}", config);
    CONTEXT.with(|ctx| ctx.borrow_mut().config = config);
}

pub fn config() -> PageConfig {
    CONTEXT.with(|ctx| ctx.borrow().config.clone())
}

/// Clear document, override and configuration
pub fn reset() {
    CONTEXT.with(|ctx| *ctx.borrow_mut() = RootContext::default());
}
