//! Collection configuration.
//!
//! Everything here has a default, so an empty document is a valid config:
//!
//! ```yaml
//! primary_field: sku
//! page_size: 12
//! on_handler_failure: continue
//! pager_link_prefix: "/catalog?page="
//! views:
//!   item: catalog/card
//!   empty: ""          # no empty view
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pager::PageWindow;
use crate::views::ViewOverrides;

/// What `fill` does when an identifier handler fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerFailure {
    /// Stop and return the error; the collection is left empty.
    #[default]
    Abort,
    /// Log a warning and continue with whatever identifiers the chain produced.
    Continue,
}

/// Settings for a paged collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionConfig {
    /// Field holding the entity identifier.
    pub primary_field: String,
    /// View-name overrides applied on top of the paged defaults.
    pub views: ViewOverrides,
    /// Items per page for [`pager`](Self::pager). Zero shows everything.
    pub page_size: usize,
    pub on_handler_failure: HandlerFailure,
    /// Prepended to page numbers in pager links.
    pub pager_link_prefix: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            primary_field: "id".to_string(),
            views: ViewOverrides::default(),
            page_size: 20,
            on_handler_failure: HandlerFailure::default(),
            pager_link_prefix: PageWindow::DEFAULT_LINK_PREFIX.to_string(),
        }
    }
}

impl CollectionConfig {
    /// Parses a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document; treat it as all defaults.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    /// A first-page [`PageWindow`] sized and linked per this config.
    pub fn pager(&self) -> PageWindow {
        PageWindow::new(1, self.page_size).with_link_prefix(self.pager_link_prefix.clone())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.primary_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "primary_field must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
