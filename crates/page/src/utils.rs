//! Assertion helpers for tests written against page objects

use crate::error::{PageError, Result};
use crate::node::PageObject;
use dom::{DomSerializer, Element};

/// The fully resolved selector path of a page object
pub fn get_description<P: PageObject>(page: &P) -> String {
    page.description()
}

/// Fail fast when a page object matches nothing, naming the path tried.
///
/// The error carries a JSON snapshot of the root the path started from.
pub fn assert_exists<P: PageObject>(message: &str, page: &P) -> Result<Element> {
    let query = page.dom_query();
    query.query().ok_or_else(|| {
        let snapshot = query.root.as_ref().and_then(|root| {
            DomSerializer::new()
                .to_json(root)
                .map_err(|err| tracing::warn!("[Assert] Could not snapshot root: {err}"))
                .ok()
        });
        PageError::ElementMissing {
            message: message.to_string(),
            description: query.path.to_string(),
            snapshot,
        }
    })
}

/// Trimmed text content of the matched element
pub fn text<P: PageObject>(page: &P) -> Option<String> {
    page.element().map(|el| el.text().trim().to_string())
}
