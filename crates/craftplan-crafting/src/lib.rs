//! # Craftplan Crafting
//!
//! Crafting catalog and raw-material resolution.
//!
//! This crate provides:
//! - Item and recipe catalog model with JSON loading
//! - Recipe resolver that flattens nested recipes into base materials
//! - Resolver configuration
//! - Inventory stock and craftability checks
//! - Item icon asset paths

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod assets;
pub mod catalog;
pub mod config;
pub mod craftability;
pub mod inventory;
pub mod resolver;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::assets::*;
    pub use crate::catalog::*;
    pub use crate::config::*;
    pub use crate::craftability::*;
    pub use crate::inventory::*;
    pub use crate::resolver::*;
}

pub use prelude::*;
