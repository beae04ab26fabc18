//! Asset paths for item icons.
//!
//! Icons are looked up by stable item ID, never by display name.

use serde::{Deserialize, Serialize};

use crate::catalog::Item;

/// Default directory for item icons, relative to the base URL.
pub const ITEM_ICON_DIR: &str = "mod/assets/item";

/// Resolves asset locations under a base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPaths {
    /// Prefix for every asset path, normally ending in `/`.
    pub base_url: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::new("/")
    }
}

impl AssetPaths {
    /// Create asset paths rooted at a base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Prefix a path with the base URL, dropping one leading `/`.
    #[must_use]
    pub fn asset_path(&self, path: &str) -> String {
        let clean = path.strip_prefix('/').unwrap_or(path);
        format!("{}{}", self.base_url, clean)
    }

    /// Icon path for an item.
    #[must_use]
    pub fn item_icon(&self, item: &Item) -> String {
        match &item.icon_path {
            Some(path) => self.asset_path(path),
            None => self.asset_path(&format!("{ITEM_ICON_DIR}/{}.png", item.id)),
        }
    }
}
