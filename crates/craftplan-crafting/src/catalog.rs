//! Item and recipe catalog.
//!
//! This module provides:
//! - Item, recipe and requirement records in the catalog JSON format
//! - A builder for assembling recipes in code
//! - Catalog validation on construction
//! - Loading catalogs from JSON files
//! - Lookup by ID and search over recipes

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use craftplan_common::{CatalogError, CatalogResult, ItemGuid, RecipeGuid};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const fn default_unlocked() -> bool {
    true
}

// ============================================================================
// Catalog records
// ============================================================================

/// An item definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable item identifier.
    #[serde(rename = "itemGuid")]
    pub id: ItemGuid,
    /// Display name.
    pub name: String,
    /// Maximum stack size.
    pub max_stack: u32,
    /// Icon asset path, if the item overrides the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    /// Whether the item is available from the start.
    #[serde(default = "default_unlocked")]
    pub initial_unlocked: bool,
}

impl Item {
    /// Create a new item definition.
    #[must_use]
    pub fn new(id: impl Into<ItemGuid>, name: impl Into<String>, max_stack: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_stack,
            icon_path: None,
            initial_unlocked: true,
        }
    }

    /// Set the icon asset path.
    #[must_use]
    pub fn with_icon(mut self, path: impl Into<String>) -> Self {
        self.icon_path = Some(path.into());
        self
    }

    /// Validates the item definition.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.id.is_empty() {
            return Err(CatalogError::invalid_item(&self.name, "empty itemGuid"));
        }
        if self.max_stack == 0 {
            return Err(CatalogError::invalid_item(
                self.id.as_str(),
                "maxStack must be positive",
            ));
        }
        Ok(())
    }
}

/// A material requirement of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Item consumed (or held, for tools).
    #[serde(rename = "itemGuid")]
    pub item: ItemGuid,
    /// Quantity per single craft.
    pub count: u32,
    /// Held as a tool and not consumed.
    #[serde(default)]
    pub is_remain: bool,
}

impl Requirement {
    /// Create a consumed requirement.
    #[must_use]
    pub fn new(item: impl Into<ItemGuid>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
            is_remain: false,
        }
    }

    /// Create a tool requirement (held, not consumed).
    #[must_use]
    pub fn tool(item: impl Into<ItemGuid>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
            is_remain: true,
        }
    }
}

/// A crafting recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftRecipe {
    /// Stable recipe identifier.
    #[serde(rename = "craftRecipeGuid")]
    pub id: RecipeGuid,
    /// Item produced.
    #[serde(rename = "craftResultItemGuid")]
    pub result_item: ItemGuid,
    /// Items produced per craft.
    #[serde(rename = "craftResultCount")]
    pub result_count: u32,
    /// Ordered requirements.
    #[serde(default)]
    pub required_items: Vec<Requirement>,
    /// Time to craft in seconds.
    #[serde(default)]
    pub craft_time: f64,
    /// Whether the recipe is available from the start.
    #[serde(default = "default_unlocked")]
    pub initial_unlocked: bool,
}

impl CraftRecipe {
    /// Create a new recipe builder.
    #[must_use]
    pub fn builder(
        id: impl Into<RecipeGuid>,
        result_item: impl Into<ItemGuid>,
        result_count: u32,
    ) -> CraftRecipeBuilder {
        CraftRecipeBuilder::new(id.into(), result_item.into(), result_count)
    }

    /// Requirements that are consumed by crafting.
    pub fn consumed(&self) -> impl Iterator<Item = &Requirement> {
        self.required_items.iter().filter(|r| !r.is_remain)
    }

    /// Requirements that are only held as tools.
    pub fn tools(&self) -> impl Iterator<Item = &Requirement> {
        self.required_items.iter().filter(|r| r.is_remain)
    }

    /// Validates the recipe definition.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.id.is_empty() {
            return Err(CatalogError::invalid_recipe(
                self.result_item.as_str(),
                "empty craftRecipeGuid",
            ));
        }
        if self.result_item.is_empty() {
            return Err(CatalogError::invalid_recipe(
                self.id.as_str(),
                "empty craftResultItemGuid",
            ));
        }
        if self.result_count == 0 {
            return Err(CatalogError::invalid_recipe(
                self.id.as_str(),
                "craftResultCount must be positive",
            ));
        }
        for (i, requirement) in self.required_items.iter().enumerate() {
            if requirement.item.is_empty() {
                return Err(CatalogError::invalid_recipe(
                    self.id.as_str(),
                    format!("requirement {i} has empty itemGuid"),
                ));
            }
            if requirement.count == 0 {
                return Err(CatalogError::invalid_recipe(
                    self.id.as_str(),
                    format!("requirement {i} has zero count"),
                ));
            }
        }
        if !self.craft_time.is_finite() || self.craft_time < 0.0 {
            return Err(CatalogError::invalid_recipe(
                self.id.as_str(),
                format!("invalid craftTime {}", self.craft_time),
            ));
        }
        Ok(())
    }
}

/// Builder for CraftRecipe.
#[derive(Debug)]
pub struct CraftRecipeBuilder {
    recipe: CraftRecipe,
}

impl CraftRecipeBuilder {
    fn new(id: RecipeGuid, result_item: ItemGuid, result_count: u32) -> Self {
        Self {
            recipe: CraftRecipe {
                id,
                result_item,
                result_count,
                required_items: Vec::new(),
                craft_time: 1.0,
                initial_unlocked: true,
            },
        }
    }

    /// Add a consumed requirement.
    #[must_use]
    pub fn requires(mut self, item: impl Into<ItemGuid>, count: u32) -> Self {
        self.recipe
            .required_items
            .push(Requirement::new(item, count));
        self
    }

    /// Add a tool requirement (held, not consumed).
    #[must_use]
    pub fn tool(mut self, item: impl Into<ItemGuid>, count: u32) -> Self {
        self.recipe
            .required_items
            .push(Requirement::tool(item, count));
        self
    }

    /// Set craft time in seconds.
    #[must_use]
    pub fn craft_time(mut self, seconds: f64) -> Self {
        self.recipe.craft_time = seconds;
        self
    }

    /// Mark the recipe as locked until unlocked by gameplay.
    #[must_use]
    pub const fn locked(mut self) -> Self {
        self.recipe.initial_unlocked = false;
        self
    }

    /// Build the recipe.
    #[must_use]
    pub fn build(self) -> CraftRecipe {
        self.recipe
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Catalog file contents: a bare array or an object with a `data` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> CatalogFile<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// An immutable snapshot of the item and recipe catalogs.
///
/// Record order is preserved; when two records share an identifier the first
/// one wins every lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    recipes: Vec<CraftRecipe>,
    /// Item index by ID (first match).
    item_index: AHashMap<ItemGuid, usize>,
    /// Recipe index by ID (first match).
    recipe_index: AHashMap<RecipeGuid, usize>,
}

impl Catalog {
    /// Builds a catalog, validating every record.
    pub fn new(items: Vec<Item>, recipes: Vec<CraftRecipe>) -> CatalogResult<Self> {
        for item in &items {
            item.validate()?;
        }
        for recipe in &recipes {
            recipe.validate()?;
        }

        let mut item_index = AHashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if item_index.contains_key(&item.id) {
                warn!("Duplicate item ID {}, keeping first definition", item.id);
                continue;
            }
            item_index.insert(item.id.clone(), idx);
        }

        let mut recipe_index = AHashMap::with_capacity(recipes.len());
        for (idx, recipe) in recipes.iter().enumerate() {
            if recipe_index.contains_key(&recipe.id) {
                warn!(
                    "Duplicate recipe ID {}, keeping first definition",
                    recipe.id
                );
                continue;
            }
            recipe_index.insert(recipe.id.clone(), idx);
        }

        debug!(
            "Built catalog with {} items and {} recipes",
            items.len(),
            recipes.len()
        );

        Ok(Self {
            items,
            recipes,
            item_index,
            recipe_index,
        })
    }

    /// Parses a catalog from item and recipe JSON.
    ///
    /// Each document is either an array of records or an object whose `data`
    /// field holds the array.
    pub fn from_json_str(items_json: &str, recipes_json: &str) -> CatalogResult<Self> {
        let items: CatalogFile<Item> = serde_json::from_str(items_json)?;
        let recipes: CatalogFile<CraftRecipe> = serde_json::from_str(recipes_json)?;
        Self::new(items.into_records(), recipes.into_records())
    }

    /// Loads a catalog from an item JSON file and a recipe JSON file.
    pub fn load(
        items_path: impl AsRef<Path>,
        recipes_path: impl AsRef<Path>,
    ) -> CatalogResult<Self> {
        let items_path = items_path.as_ref();
        let recipes_path = recipes_path.as_ref();

        let items_json = read_catalog_file(items_path)?;
        let recipes_json = read_catalog_file(recipes_path)?;
        let catalog = Self::from_json_str(&items_json, &recipes_json)?;

        info!(
            "Loaded {} items from {} and {} recipes from {}",
            catalog.items.len(),
            items_path.display(),
            catalog.recipes.len(),
            recipes_path.display()
        );

        Ok(catalog)
    }

    /// Returns all items in catalog order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns all recipes in catalog order.
    #[must_use]
    pub fn recipes(&self) -> &[CraftRecipe] {
        &self.recipes
    }

    /// Gets an item by ID.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.item_index.get(id).map(|&idx| &self.items[idx])
    }

    /// Gets a recipe by ID.
    #[must_use]
    pub fn recipe(&self, id: &str) -> Option<&CraftRecipe> {
        self.recipe_index.get(id).map(|&idx| &self.recipes[idx])
    }

    /// Returns the display name of an item, or the ID itself if the item is
    /// unknown or unnamed.
    #[must_use]
    pub fn item_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.item(id)
            .map(|item| item.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(id)
    }

    /// Returns recipes that are unlocked from the start.
    pub fn unlocked_recipes(&self) -> impl Iterator<Item = &CraftRecipe> {
        self.recipes.iter().filter(|r| r.initial_unlocked)
    }

    /// Searches recipes by result item name or recipe ID (case-insensitive).
    #[must_use]
    pub fn search_recipes(&self, query: &str) -> Vec<&CraftRecipe> {
        let query_lower = query.to_lowercase();
        self.recipes
            .iter()
            .filter(|r| {
                self.item_name(r.result_item.as_str())
                    .to_lowercase()
                    .contains(&query_lower)
                    || r.id.as_str().to_lowercase().contains(&query_lower)
            })
            .collect()
    }

    /// Returns the number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Checks if the catalog has no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

fn read_catalog_file(path: &Path) -> CatalogResult<String> {
    if !path.exists() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }
    debug!("Reading catalog file: {:?}", path);
    Ok(fs::read_to_string(path)?)
}

// ============================================================================
// Tests
// ============================================================================
