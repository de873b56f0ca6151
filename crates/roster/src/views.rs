//! View names and the data handed to a surrounding presentation layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Output of `to_view`: rendered fragments keyed by `prefix + name`.
pub type ViewData = BTreeMap<String, String>;

/// The three views a collection renders through.
///
/// `empty` is optional: without it an empty collection renders as an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewNames {
    /// Wrapper view, receives the concatenated item output as `items`.
    pub index: String,
    /// Per-item view, receives the record as `item`.
    pub item: String,
    /// Rendered instead of the index when there are no items.
    pub empty: Option<String>,
}

impl ViewNames {
    /// Defaults for a plain collection.
    pub fn generic() -> Self {
        Self {
            index: "www/index".to_string(),
            item: "www/item".to_string(),
            empty: Some("www/empty".to_string()),
        }
    }

    /// Defaults for a paged collection.
    pub fn paged() -> Self {
        Self {
            index: "www/collection/index".to_string(),
            item: "www/collection/item/index".to_string(),
            empty: Some("www/collection/item/empty".to_string()),
        }
    }

    /// Replaces the index view.
    pub fn index(mut self, name: impl Into<String>) -> Self {
        self.index = name.into();
        self
    }

    /// Replaces the item view.
    pub fn item(mut self, name: impl Into<String>) -> Self {
        self.item = name.into();
        self
    }

    /// Replaces the empty view. `None` disables it.
    pub fn empty(mut self, name: Option<&str>) -> Self {
        self.empty = name.map(str::to_string);
        self
    }
}

impl Default for ViewNames {
    fn default() -> Self {
        Self::generic()
    }
}

/// Partial view-name overrides, as read from configuration.
///
/// An `empty` override of `""` disables the empty view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewOverrides {
    pub index: Option<String>,
    pub item: Option<String>,
    pub empty: Option<String>,
}

impl ViewOverrides {
    /// Applies the overrides on top of `base`.
    pub fn apply(&self, base: ViewNames) -> ViewNames {
        let mut views = base;
        if let Some(index) = &self.index {
            views.index = index.clone();
        }
        if let Some(item) = &self.item {
            views.item = item.clone();
        }
        if let Some(empty) = &self.empty {
            views.empty = (!empty.is_empty()).then(|| empty.clone());
        }
        views
    }
}
