//! ID types for catalog items and recipes.
//!
//! Catalog identifiers are opaque, stable strings supplied by the catalog
//! author. They are wrapped in newtypes so an item id can never be passed where
//! a recipe id is expected.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for an item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemGuid(String);

impl ItemGuid {
    /// Creates an item ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemGuid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemGuid {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemGuid {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique identifier for a crafting recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeGuid(String);

impl RecipeGuid {
    /// Creates a recipe ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecipeGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RecipeGuid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecipeGuid {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecipeGuid {
    fn from(id: String) -> Self {
        Self(id)
    }
}
