//! Selector path - the ordered `{selector, index}` steps of one query
//!
//! ```text
//! extend("span") → extend(1) → extend("strong")
//!   [span]       → [span[1]]  → [span[1], strong]      renders "span[1] strong"
//! ```
//!
//! Rules:
//! - A selector merges into the last fragment while that fragment has no index
//! - An index attaches to the last fragment while it has none, otherwise it
//!   starts an index-only fragment
//! - Extending never mutates: every `extend` returns a new path

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// One step of a selector path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fragment {
    pub selector: String,
    pub index: Option<i64>,
}

impl Fragment {
    pub fn has_selector(&self) -> bool {
        !self.selector.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector)?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

/// Value a path can be extended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Selector(String),
    Index(i64),
}

impl From<&str> for Step {
    fn from(selector: &str) -> Self {
        Step::Selector(selector.to_string())
    }
}

impl From<String> for Step {
    fn from(selector: String) -> Self {
        Step::Selector(selector)
    }
}

impl From<i64> for Step {
    fn from(index: i64) -> Self {
        Step::Index(index)
    }
}

impl From<i32> for Step {
    fn from(index: i32) -> Self {
        Step::Index(i64::from(index))
    }
}

impl From<usize> for Step {
    fn from(index: usize) -> Self {
        Step::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

/// Ordered, copy-on-extend sequence of fragments
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectorPath {
    fragments: SmallVec<[Fragment; 4]>,
}

impl SelectorPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Return a new path with `step` applied. Blank selectors leave the path
    /// unchanged.
    pub fn extend(&self, step: impl Into<Step>) -> SelectorPath {
        let mut next = self.clone();
        match step.into() {
            Step::Selector(selector) => {
                let selector = selector.trim();
                if selector.is_empty() {
                    return next;
                }
                match next.fragments.last_mut() {
                    Some(last) if last.index.is_none() => {
                        last.selector = format!("{} {}", last.selector, selector);
                    }
                    _ => next.fragments.push(Fragment {
                        selector: selector.to_string(),
                        index: None,
                    }),
                }
            }
            Step::Index(index) => match next.fragments.last_mut() {
                Some(last) if last.index.is_none() => last.index = Some(index),
                _ => next.fragments.push(Fragment {
                    selector: String::new(),
                    index: Some(index),
                }),
            },
        }
        next
    }

    /// Extend with the selector first, then the index if there is one
    pub fn create_child(&self, selector: &str, index: Option<i64>) -> SelectorPath {
        let child = self.extend(selector);
        match index {
            Some(index) => child.extend(index),
            None => child,
        }
    }
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{fragment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let path = SelectorPath::new();
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_selectors_merge() {
        let path = SelectorPath::new().extend("div").extend("span");
        assert_eq!(path.len(), 1);
        assert_eq!(path.to_string(), "div span");
    }

    #[test]
    fn test_index_attaches_to_last_fragment() {
        let path = SelectorPath::new().extend("div").extend(1);
        assert_eq!(path.fragments(), &[Fragment { selector: "div".into(), index: Some(1) }]);
        assert_eq!(path.to_string(), "div[1]");
    }

    #[test]
    fn test_index_only_fragment() {
        assert_eq!(SelectorPath::new().extend(0).to_string(), "[0]");

        let path = SelectorPath::new().extend("div").extend(1).extend(2);
        assert_eq!(path.len(), 2);
        assert_eq!(path.to_string(), "div[1] [2]");
    }

    #[test]
    fn test_selector_after_index_starts_fragment() {
        let path = SelectorPath::new().extend("span").extend(1).extend("strong");
        assert_eq!(path.to_string(), "span[1] strong");

        let path = SelectorPath::new()
            .extend("div")
            .extend(1)
            .extend("span")
            .extend(2);
        assert_eq!(path.to_string(), "div[1] span[2]");

        let path = SelectorPath::new().extend("span").extend(0).extend("strong");
        assert_eq!(path.to_string(), "span[0] strong");
    }

    #[test]
    fn test_extend_does_not_mutate() {
        let base = SelectorPath::new().extend("ul");
        let a = base.extend("li");
        let b = base.extend(3);
        assert_eq!(base.to_string(), "ul");
        assert_eq!(a.to_string(), "ul li");
        assert_eq!(b.to_string(), "ul[3]");
    }

    #[test]
    fn test_blank_selector_is_noop() {
        let path = SelectorPath::new().extend("div").extend(0);
        assert_eq!(path.extend(""), path);
        assert_eq!(path.extend("   "), path);
    }

    #[test]
    fn test_create_child() {
        let path = SelectorPath::new().create_child("span", None);
        assert_eq!(path.to_string(), "span");
        let path = path.create_child("strong", Some(2));
        assert_eq!(path.to_string(), "span strong[2]");
        let path = SelectorPath::new().create_child("", Some(1));
        assert_eq!(path.to_string(), "[1]");
    }

    #[test]
    fn test_negative_index_renders() {
        let path = SelectorPath::new().extend("li").extend(-1);
        assert_eq!(path.to_string(), "li[-1]");
    }
}
