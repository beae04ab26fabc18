//! Craftability checks against current stock.
//!
//! Only a recipe's direct requirements are compared; nested recipes are not
//! expanded. Tool requirements must be held but are never used up, so they
//! do not limit how many times a recipe can be repeated.

use craftplan_common::ItemGuid;
use serde::{Deserialize, Serialize};

use crate::catalog::CraftRecipe;
use crate::inventory::Inventory;

/// A requirement the stock cannot cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// Item that is short.
    pub item: ItemGuid,
    /// Amount needed for one craft.
    pub needed: u64,
    /// Amount available.
    pub have: u64,
}

impl Shortfall {
    /// Units still missing.
    #[must_use]
    pub fn missing(&self) -> u64 {
        self.needed.saturating_sub(self.have)
    }
}

/// Result of comparing one recipe against the stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Craftability {
    /// Requirements the stock cannot cover.
    pub shortfalls: Vec<Shortfall>,
}

impl Craftability {
    /// Compares a recipe's direct requirements against the stock.
    ///
    /// Requirements naming the same item are summed before comparison.
    #[must_use]
    pub fn check(recipe: &CraftRecipe, inventory: &Inventory) -> Self {
        let mut needed: Vec<(&ItemGuid, u64)> = Vec::new();
        for requirement in &recipe.required_items {
            let count = u64::from(requirement.count);
            match needed.iter_mut().find(|(item, _)| *item == &requirement.item) {
                Some((_, total)) => *total = total.saturating_add(count),
                None => needed.push((&requirement.item, count)),
            }
        }

        let shortfalls = needed
            .into_iter()
            .filter_map(|(item, needed)| {
                let have = inventory.count(item.as_str());
                (have < needed).then(|| Shortfall {
                    item: item.clone(),
                    needed,
                    have,
                })
            })
            .collect();

        Self { shortfalls }
    }

    /// Whether the recipe can be crafted right now.
    #[must_use]
    pub fn can_craft(&self) -> bool {
        self.shortfalls.is_empty()
    }

    /// How many consecutive crafts the stock supports.
    ///
    /// Products of earlier crafts are not fed back in.
    #[must_use]
    pub fn max_crafts(recipe: &CraftRecipe, inventory: &Inventory) -> u64 {
        if !Self::check(recipe, inventory).can_craft() {
            return 0;
        }

        let mut consumed: Vec<(&ItemGuid, u64)> = Vec::new();
        for requirement in recipe.consumed() {
            let count = u64::from(requirement.count);
            match consumed
                .iter_mut()
                .find(|(item, _)| *item == &requirement.item)
            {
                Some((_, total)) => *total = total.saturating_add(count),
                None => consumed.push((&requirement.item, count)),
            }
        }

        consumed
            .into_iter()
            .map(|(item, per_craft)| inventory.count(item.as_str()) / per_craft)
            .min()
            .unwrap_or(u64::MAX)
    }
}
