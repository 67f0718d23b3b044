//! Configuration consumed by the constructor table.

use serde::{Deserialize, Serialize};

/// Documentation settings used to build `links.about`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Base URL of the error documentation; `links.about` becomes `<url>/<code>`.
    /// Empty by default, which yields links such as `/0`.
    pub url: String,
}

impl DocsConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Documentation link for an error code.
    #[must_use]
    pub fn about(&self, code: &str) -> String {
        format!("{}/{code}", self.url)
    }
}

/// Top-level `errors` section of the hosting application's configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErrorsConfig {
    pub docs: DocsConfig,
}
