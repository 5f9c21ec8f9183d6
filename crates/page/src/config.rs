//! Per-thread page object configuration

use serde::{Deserialize, Serialize};

/// Container the Ember test harness renders into
pub const EMBER_TESTING_CONTAINER: &str = "#ember-testing";

/// Page object configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Host-framework test container, tried by `get_root()` after the
    /// explicit override and before `<body>`
    pub container_selector: Option<String>,
    /// Run a trial match on selectors handed to the factories
    pub validate_selectors: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            container_selector: Some(EMBER_TESTING_CONTAINER.to_string()),
            validate_selectors: true,
        }
    }
}

impl PageConfig {
    pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = Some(selector.into());
        self
    }

    pub fn without_container(mut self) -> Self {
        self.container_selector = None;
        self
    }

    pub fn with_validate_selectors(mut self, validate: bool) -> Self {
        self.validate_selectors = validate;
        self
    }
}
