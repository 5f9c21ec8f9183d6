//! Selector parsing, scope-safe rewriting and validation
//!
//! Query fragments are written relative to a scope, so a fragment like
//! `> li` is meaningful even though it is not a standalone selector. Such
//! fragments are rewritten to `:scope > li` before they reach the engine.

use crate::error::{DomError, Result};
use ahash::AHashMap;
use scraper::Selector;
use std::cell::RefCell;
use std::rc::Rc;

/// The implicit self-scope marker
pub const SCOPE_MARKER: &str = ":scope";

/// Parsed selectors kept per thread before the cache is flushed
const CACHE_CAPACITY: usize = 1024;

thread_local! {
    static PARSED: RefCell<AHashMap<String, Rc<Selector>>> = RefCell::new(AHashMap::new());
}

/// Prefix a selector with the self-scope marker. A no-op for selectors that
/// are already valid, and turns combinator-led fragments into valid ones.
pub fn scope_safe(selector: &str) -> String {
    format!("{SCOPE_MARKER} {selector}")
}

/// Whether the selector starts with a combinator (`>`, `+` or `~`)
pub fn starts_with_combinator(selector: &str) -> bool {
    matches!(selector.trim_start().chars().next(), Some('>' | '+' | '~'))
}

/// Parse a selector exactly as written, like the browser's native
/// `querySelector` would.
pub fn parse(selector: &str) -> Result<Rc<Selector>> {
    if let Some(hit) = PARSED.with(|cache| cache.borrow().get(selector).cloned()) {
        return Ok(hit);
    }

    let parsed = Rc::new(
        Selector::parse(selector).map_err(|e| DomError::invalid_selector(selector, e))?,
    );

    PARSED.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.len() >= CACHE_CAPACITY {
            cache.clear();
        }
        cache.insert(selector.to_string(), Rc::clone(&parsed));
    });

    Ok(parsed)
}

/// Parse a query fragment. Combinator-led fragments go straight to their
/// scope-safe rewrite; anything else is tried literally first, then
/// rewritten if the literal form is rejected. Errors always name the literal.
pub fn compile(selector: &str) -> Result<Rc<Selector>> {
    if starts_with_combinator(selector) {
        return parse(&scope_safe(selector)).or_else(|_| parse(selector));
    }
    match parse(selector) {
        Ok(parsed) => Ok(parsed),
        Err(literal_err) => parse(&scope_safe(selector)).map_err(|_| literal_err),
    }
}

/// Check that a selector can be used as a query fragment.
///
/// Matching a compiled selector cannot fail, so compiling is the whole check.
pub fn validate(selector: &str) -> Result<()> {
    compile(selector).map(|_| ())
}

/// Cap text length for diagnostics
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_safe() {
        assert_eq!(scope_safe("> span"), ":scope > span");
        assert_eq!(scope_safe("div"), ":scope div");
    }

    #[test]
    fn test_starts_with_combinator() {
        assert!(starts_with_combinator("> span"));
        assert!(starts_with_combinator("  + li"));
        assert!(starts_with_combinator("~ p"));
        assert!(!starts_with_combinator("div > span"));
        assert!(!starts_with_combinator(""));
    }

    #[test]
    fn test_parse_is_strict() {
        assert!(parse("div.item").is_ok());
        assert!(matches!(parse("> span"), Err(DomError::InvalidSelector { .. })));
    }

    #[test]
    fn test_compile_falls_back_to_scope() {
        assert!(compile("> span").is_ok());
        assert!(compile("div span").is_ok());
    }

    #[test]
    fn test_compile_reports_literal() {
        match compile("div[") {
            Err(DomError::InvalidSelector { selector, .. }) => assert_eq!(selector, "div["),
            other => panic!("expected invalid selector, got {other:?}"),
        }
        match compile("> div[") {
            Err(DomError::InvalidSelector { selector, .. }) => assert_eq!(selector, "> div["),
            other => panic!("expected invalid selector, got {other:?}"),
        }
    }

    #[test]
    fn test_combinator_fragment_skips_literal_parse() {
        let compiled = compile("> span").unwrap();
        assert!(Rc::ptr_eq(&compiled, &parse(":scope > span").unwrap()));
        assert!(PARSED.with(|cache| !cache.borrow().contains_key("> span")));
    }

    #[test]
    fn test_parse_is_cached() {
        let a = parse("ul > li").unwrap();
        let b = parse("ul > li").unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_validate() {
        assert!(validate(".thing").is_ok());
        assert!(validate("> .thing").is_ok());
        assert!(validate("..thing").is_err());
        assert!(validate("}").is_err());
    }

    #[test]
    fn test_cap_text_length() {
        assert_eq!(cap_text_length("hello", 10), "hello");
        assert_eq!(cap_text_length("hello world", 5), "hello...");
    }
}
