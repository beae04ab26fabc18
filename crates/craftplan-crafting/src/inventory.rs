//! Inventory stock.
//!
//! A read-only view of what the player currently holds, assembled by the
//! caller. Crafting never mutates it here.

use std::collections::HashMap;

use craftplan_common::ItemGuid;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Item counts held by the player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Items and their quantities
    items: HashMap<ItemGuid, u64>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct items held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the count of a specific item.
    #[must_use]
    pub fn count(&self, item: &str) -> u64 {
        self.items.get(item).copied().unwrap_or(0)
    }

    /// Checks if the inventory contains at least the given amount.
    #[must_use]
    pub fn has(&self, item: &str, amount: u64) -> bool {
        self.count(item) >= amount
    }

    /// Adds items to the stock.
    pub fn add(&mut self, item: impl Into<ItemGuid>, amount: u64) {
        if amount == 0 {
            return;
        }
        let entry = self.items.entry(item.into()).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Sets the held amount of an item, removing it at zero.
    pub fn set(&mut self, item: impl Into<ItemGuid>, amount: u64) {
        let item = item.into();
        if amount == 0 {
            self.items.remove(&item);
        } else {
            self.items.insert(item, amount);
        }
    }

    /// Returns how many inventory slots an item occupies, given its stack cap.
    ///
    /// Items missing from the catalog are treated as unstackable.
    #[must_use]
    pub fn stacks(&self, item: &str, catalog: &Catalog) -> u64 {
        let max_stack = catalog.item(item).map_or(1, |i| u64::from(i.max_stack.max(1)));
        self.count(item).div_ceil(max_stack)
    }

    /// Returns an iterator over all items.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemGuid, u64)> + '_ {
        self.items.iter().map(|(id, &count)| (id, count))
    }
}

impl<I: Into<ItemGuid>> FromIterator<(I, u64)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (I, u64)>>(iter: T) -> Self {
        let mut inventory = Self::new();
        for (item, amount) in iter {
            inventory.add(item, amount);
        }
        inventory
    }
}
