//! List configuration.
//!
//! Settings are read from TOML. Every key is optional:
//!
//! ```toml
//! sort_order = "descending"        # or "ascending" (default)
//! case_sensitive = false           # default true
//! broadcast_missing_on_load = true # default true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use bibliography_list_core::logging::targets;

use crate::error::{ListError, Result};
use crate::model::{SortOptions, SortOrder};

/// Behavioural settings for a [`BibliographyList`](crate::BibliographyList).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Direction of the displayed sort.
    pub sort_order: SortOrder,
    /// Whether the displayed sort distinguishes case.
    pub case_sensitive: bool,
    /// Whether rows that `load` adds are re-broadcast as `add_item`.
    ///
    /// Turn this off for activities that are not shared.
    pub broadcast_missing_on_load: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::Ascending,
            case_sensitive: true,
            broadcast_missing_on_load: true,
        }
    }
}

impl ListConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ListError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    /// The sort options the display should use.
    pub fn sort_options(&self) -> SortOptions {
        SortOptions {
            order: self.sort_order,
            case_sensitive: self.case_sensitive,
        }
    }
}
