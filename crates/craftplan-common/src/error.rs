//! Error types for craftplan.
//!
//! Resolution itself never fails; errors only arise at the catalog loading
//! boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for craftplan operations.
#[derive(Debug, Error)]
pub enum CraftplanError {
    /// Catalog loading or validation errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Catalog loading and validation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file not found
    #[error("Catalog file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read catalog file
    #[error("Failed to read catalog file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse catalog JSON
    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Record violates a constraint resolution depends on
    #[error("Invalid {kind} '{id}': {reason}")]
    Validation {
        /// Record kind ("item" or "recipe")
        kind: &'static str,
        /// Offending record identifier
        id: String,
        /// What is wrong with it
        reason: String,
    },
}

impl CatalogError {
    /// Creates a validation error for an item record.
    #[must_use]
    pub fn invalid_item(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            kind: "item",
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a validation error for a recipe record.
    #[must_use]
    pub fn invalid_recipe(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            kind: "recipe",
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for craftplan operations.
pub type CraftplanResult<T> = Result<T, CraftplanError>;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
