//! Raw-material recipe resolution.
//!
//! The resolver expands a recipe depth-first through the "produced-by"
//! relation between items and recipes, folding the cost of every nested
//! recipe into counts of base materials (items no recipe produces).
//!
//! Each craft of a sub-recipe yields `result_count` items, so the number of
//! sub-crafts needed for a demand of `n` is `ceil(n / result_count)`. Surplus
//! from rounding up is accepted and not reported.
//!
//! Cycles are detected against the recipes currently on the expansion path.
//! A cycle aborts the rest of the expansion; materials accumulated before it
//! was found stay in the result and `has_circular_dependency` is set.

use std::cmp::Ordering;

use ahash::{AHashMap, AHashSet};
use craftplan_common::{ItemGuid, RecipeGuid};
use feruca::Collator;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::catalog::{Catalog, CraftRecipe};
use crate::config::ResolverConfig;

// ============================================================================
// Results
// ============================================================================

/// Aggregated demand for one base material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    /// Base material.
    #[serde(rename = "itemGuid")]
    pub item: ItemGuid,
    /// Total units needed.
    pub count: u64,
}

/// Flattened raw-material cost of a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecompositionResult {
    /// Base materials sorted by display name.
    pub raw_materials: Vec<MaterialRequirement>,
    /// Sum of all material counts.
    pub total_items: u64,
    /// A recipe was reached again while it was still being expanded.
    pub has_circular_dependency: bool,
    /// An expansion path exceeded the configured maximum depth.
    pub depth_limit_reached: bool,
}

impl DecompositionResult {
    /// The answer for an unknown recipe.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the totals are exact (no branch was aborted).
    #[must_use]
    pub fn is_exact(&self) -> bool {
        !self.has_circular_dependency && !self.depth_limit_reached
    }

    /// Units of a material in the result, 0 if absent.
    #[must_use]
    pub fn count_of(&self, item: &str) -> u64 {
        self.raw_materials
            .iter()
            .find(|m| m.item.as_str() == item)
            .map_or(0, |m| m.count)
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves recipes of one catalog snapshot into raw materials.
///
/// The resolver holds no state between calls; `resolve` may be called
/// concurrently from several threads.
#[derive(Debug, Clone)]
pub struct RecipeResolver {
    catalog: Catalog,
    config: ResolverConfig,
    /// Items produced by at least one recipe.
    craftable: AHashSet<ItemGuid>,
    /// First recipe (by catalog order) producing each craftable item.
    producers: AHashMap<ItemGuid, usize>,
}

impl RecipeResolver {
    /// Creates a resolver with the default configuration.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, ResolverConfig::default())
    }

    /// Creates a resolver with a specific configuration.
    #[must_use]
    pub fn with_config(catalog: Catalog, mut config: ResolverConfig) -> Self {
        config.validate();

        let craftable: AHashSet<ItemGuid> = catalog
            .recipes()
            .iter()
            .map(|r| r.result_item.clone())
            .collect();

        let mut producers = AHashMap::with_capacity(craftable.len());
        for (idx, recipe) in catalog.recipes().iter().enumerate() {
            producers.entry(recipe.result_item.clone()).or_insert(idx);
        }

        debug!(
            "Recipe resolver ready: {} recipes, {} craftable items",
            catalog.len(),
            craftable.len()
        );

        Self {
            catalog,
            config,
            craftable,
            producers,
        }
    }

    /// Returns the catalog snapshot.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves a recipe into its raw materials.
    ///
    /// Shared sub-recipes are expanded again on every path that reaches them.
    #[must_use]
    pub fn resolve(&self, recipe_id: &str) -> DecompositionResult {
        self.run(recipe_id, false)
    }

    /// Resolves a recipe, reusing sub-recipe expansions within the call.
    ///
    /// Produces the same result as [`resolve`](Self::resolve). Expansions are
    /// cached by `(recipe, multiplier)` for the duration of the call only.
    #[must_use]
    pub fn resolve_memoized(&self, recipe_id: &str) -> DecompositionResult {
        self.run(recipe_id, true)
    }

    /// Resolves a recipe using the strategy selected by the configuration.
    #[must_use]
    pub fn resolve_configured(&self, recipe_id: &str) -> DecompositionResult {
        self.run(recipe_id, self.config.memoize)
    }

    /// Resolves the recipe producing an item.
    ///
    /// Base materials have no recipe and give the empty result.
    #[must_use]
    pub fn resolve_item(&self, item: &str) -> DecompositionResult {
        match self.recipe_for_item(item) {
            Some(recipe) => self.resolve_configured(recipe.id.as_str()),
            None => DecompositionResult::empty(),
        }
    }

    /// Returns the first recipe (by catalog order) producing an item.
    #[must_use]
    pub fn recipe_for_item(&self, item: &str) -> Option<&CraftRecipe> {
        self.producers
            .get(item)
            .map(|&idx| &self.catalog.recipes()[idx])
    }

    /// Checks if any recipe produces the item.
    #[must_use]
    pub fn is_craftable(&self, item: &str) -> bool {
        self.craftable.contains(item)
    }

    /// Returns every craftable item.
    pub fn craftable_items(&self) -> impl Iterator<Item = &ItemGuid> {
        self.craftable.iter()
    }

    /// Returns the display name of an item, or the ID itself if unknown.
    #[must_use]
    pub fn item_name<'a>(&'a self, item: &'a str) -> &'a str {
        self.catalog.item_name(item)
    }

    fn run(&self, recipe_id: &str, memoize: bool) -> DecompositionResult {
        let Some(root) = self.catalog.recipe(recipe_id) else {
            debug!("Unknown recipe {recipe_id}, returning empty decomposition");
            return DecompositionResult::empty();
        };

        let mut expansion = Expansion::new(self, memoize);
        let mut materials = Accumulator::default();
        let outcome = expansion.expand(root, 1, &mut materials);

        let mut raw_materials = materials.into_materials();
        let mut collator = Collator::default();
        raw_materials.sort_by(|a, b| {
            locale_cmp(
                &mut collator,
                self.item_name(a.item.as_str()),
                self.item_name(b.item.as_str()),
            )
        });
        let total_items = raw_materials
            .iter()
            .fold(0u64, |total, m| total.saturating_add(m.count));

        DecompositionResult {
            raw_materials,
            total_items,
            has_circular_dependency: outcome == Outcome::Cycle,
            depth_limit_reached: outcome == Outcome::DepthExceeded,
        }
    }
}

// ============================================================================
// Expansion
// ============================================================================

/// How an expansion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Complete,
    Cycle,
    DepthExceeded,
}

/// Material counts in first-seen order.
#[derive(Debug, Default)]
struct Accumulator {
    materials: Vec<MaterialRequirement>,
    index: AHashMap<ItemGuid, usize>,
}

impl Accumulator {
    fn add(&mut self, item: &ItemGuid, count: u64) {
        if let Some(&idx) = self.index.get(item) {
            let entry = &mut self.materials[idx];
            entry.count = entry.count.saturating_add(count);
        } else {
            self.index.insert(item.clone(), self.materials.len());
            self.materials.push(MaterialRequirement {
                item: item.clone(),
                count,
            });
        }
    }

    fn merge(&mut self, other: &[MaterialRequirement]) {
        for material in other {
            self.add(&material.item, material.count);
        }
    }

    fn into_materials(self) -> Vec<MaterialRequirement> {
        self.materials
    }
}

/// A cached sub-tree expansion.
#[derive(Debug)]
struct CachedExpansion {
    materials: Vec<MaterialRequirement>,
    /// Path length the sub-tree added below its parent.
    height: usize,
}

/// State of a single top-level resolution.
struct Expansion<'r> {
    resolver: &'r RecipeResolver,
    /// Recipes currently being expanded.
    active: AHashSet<&'r RecipeGuid>,
    /// Longest path seen since the last reset.
    deepest: usize,
    memo: Option<AHashMap<(usize, u64), CachedExpansion>>,
}

impl<'r> Expansion<'r> {
    fn new(resolver: &'r RecipeResolver, memoize: bool) -> Self {
        Self {
            resolver,
            active: AHashSet::new(),
            deepest: 0,
            memo: memoize.then(AHashMap::new),
        }
    }

    fn expand(
        &mut self,
        recipe: &'r CraftRecipe,
        multiplier: u64,
        acc: &mut Accumulator,
    ) -> Outcome {
        if self.active.contains(&recipe.id) {
            debug!("Circular dependency at recipe {}", recipe.id);
            return Outcome::Cycle;
        }
        if self.active.len() >= self.resolver.config.max_depth {
            warn!(
                "Recipe {} exceeds maximum expansion depth {}",
                recipe.id, self.resolver.config.max_depth
            );
            return Outcome::DepthExceeded;
        }

        self.active.insert(&recipe.id);
        self.deepest = self.deepest.max(self.active.len());
        trace!("Expanding {} x{}", recipe.id, multiplier);

        let outcome = self.expand_requirements(recipe, multiplier, acc);

        self.active.remove(&recipe.id);
        outcome
    }

    fn expand_requirements(
        &mut self,
        recipe: &'r CraftRecipe,
        multiplier: u64,
        acc: &mut Accumulator,
    ) -> Outcome {
        let resolver = self.resolver;

        for requirement in recipe.consumed() {
            let required = u64::from(requirement.count).saturating_mul(multiplier);

            let producer = resolver
                .producers
                .get(&requirement.item)
                .filter(|_| resolver.craftable.contains(&requirement.item));

            match producer {
                Some(&idx) => {
                    let sub = &resolver.catalog.recipes()[idx];
                    let crafts = required.div_ceil(u64::from(sub.result_count));
                    let outcome = self.expand_child(idx, sub, crafts, acc);
                    if outcome != Outcome::Complete {
                        return outcome;
                    }
                },
                None => acc.add(&requirement.item, required),
            }
        }

        Outcome::Complete
    }

    fn expand_child(
        &mut self,
        idx: usize,
        recipe: &'r CraftRecipe,
        multiplier: u64,
        acc: &mut Accumulator,
    ) -> Outcome {
        if self.memo.is_none() {
            return self.expand(recipe, multiplier, acc);
        }

        let base = self.active.len();
        let key = (idx, multiplier);
        let max_depth = self.resolver.config.max_depth;

        if let Some(cached) = self.memo.as_ref().and_then(|memo| memo.get(&key)) {
            // A clean sub-tree cannot cycle back into the current path, but it
            // may no longer fit under the depth limit at this position.
            if base + cached.height <= max_depth {
                acc.merge(&cached.materials);
                self.deepest = self.deepest.max(base + cached.height);
                return Outcome::Complete;
            }
        }

        let outer_deepest = std::mem::replace(&mut self.deepest, base);
        let mut sub_acc = Accumulator::default();
        let outcome = self.expand(recipe, multiplier, &mut sub_acc);
        let height = self.deepest - base;
        self.deepest = self.deepest.max(outer_deepest);

        let materials = sub_acc.into_materials();
        acc.merge(&materials);

        if outcome == Outcome::Complete {
            if let Some(memo) = self.memo.as_mut() {
                memo.insert(key, CachedExpansion { materials, height });
            }
        }
        outcome
    }
}

/// Orders display names by the CLDR root collation.
fn locale_cmp(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;

    fn items(names: &[(&str, &str)]) -> Vec<Item> {
        names
            .iter()
            .map(|(id, name)| Item::new(*id, *name, 99))
            .collect()
    }

    /// R1: 2×A + 1×B → 1×C, R2: 3×C → 1×D.
    fn chain_recipes() -> Vec<CraftRecipe> {
        vec![
            CraftRecipe::builder("r1", "c", 1)
                .requires("a", 2)
                .requires("b", 1)
                .build(),
            CraftRecipe::builder("r2", "d", 1).requires("c", 3).build(),
        ]
    }

    fn chain_items() -> Vec<Item> {
        items(&[("a", "Item A"), ("b", "Item B"), ("c", "Item C"), ("d", "Item D")])
    }

    fn resolver(items: Vec<Item>, recipes: Vec<CraftRecipe>) -> RecipeResolver {
        RecipeResolver::new(Catalog::new(items, recipes).expect("valid catalog"))
    }

    fn material(item: &str, count: u64) -> MaterialRequirement {
        MaterialRequirement {
            item: ItemGuid::new(item),
            count,
        }
    }

    #[test]
    fn test_two_level_chain() {
        let resolver = resolver(chain_items(), chain_recipes());
        let result = resolver.resolve("r2");

        assert_eq!(
            result.raw_materials,
            vec![material("a", 6), material("b", 3)]
        );
        assert_eq!(result.total_items, 9);
        assert!(!result.has_circular_dependency);
        assert!(result.is_exact());
    }

    #[test]
    fn test_unknown_recipe_is_empty() {
        let resolver = resolver(chain_items(), chain_recipes());
        let result = resolver.resolve("missing");
        assert_eq!(result, DecompositionResult::empty());
        assert!(result.raw_materials.is_empty());
        assert_eq!(result.total_items, 0);
        assert!(!result.has_circular_dependency);
    }

    #[test]
    fn test_cycle_detected_from_every_member() {
        let mut recipes = chain_recipes();
        recipes.push(CraftRecipe::builder("r3", "a", 1).requires("d", 1).build());
        let resolver = resolver(chain_items(), recipes);

        for id in ["r1", "r2", "r3"] {
            let result = resolver.resolve(id);
            assert!(result.has_circular_dependency, "{id} should report a cycle");
            assert!(!result.depth_limit_reached);
        }
    }

    #[test]
    fn test_self_referential_recipe() {
        let recipes = vec![CraftRecipe::builder("loop", "x", 1)
            .requires("base", 2)
            .requires("x", 1)
            .build()];
        let resolver = resolver(vec![], recipes);
        let result = resolver.resolve("loop");

        assert!(result.has_circular_dependency);
        // Materials gathered before the cycle was found are kept.
        assert_eq!(result.count_of("base"), 2);
        assert_eq!(result.total_items, 2);
    }

    #[test]
    fn test_cycle_stops_remaining_requirements() {
        let recipes = vec![
            CraftRecipe::builder("outer", "o", 1)
                .requires("a", 1)
                .requires("loop_item", 1)
                .requires("b", 1)
                .build(),
            CraftRecipe::builder("loop", "loop_item", 1)
                .requires("loop_item", 1)
                .build(),
        ];
        let resolver = resolver(vec![], recipes);
        let result = resolver.resolve("outer");

        assert!(result.has_circular_dependency);
        assert_eq!(result.count_of("a"), 1);
        assert_eq!(result.count_of("b"), 0);
    }

    #[test]
    fn test_ceiling_multiplier() {
        // Need 10 of an item produced 4 at a time: 3 crafts.
        let recipes = vec![
            CraftRecipe::builder("sub", "s", 4).requires("ore", 1).build(),
            CraftRecipe::builder("top", "t", 1).requires("s", 10).build(),
        ];
        let resolver = resolver(vec![], recipes);
        let result = resolver.resolve("top");

        assert_eq!(result.raw_materials, vec![material("ore", 3)]);
        assert_eq!(result.total_items, 3);
    }

    #[test]
    fn test_ceiling_applies_per_path() {
        // Each path rounds up independently.
        let recipes = vec![
            CraftRecipe::builder("nail", "nail", 10).requires("iron", 1).build(),
            CraftRecipe::builder("box", "box", 1)
                .requires("nail", 1)
                .requires("frame", 1)
                .build(),
            CraftRecipe::builder("frame", "frame", 1).requires("nail", 1).build(),
        ];
        let resolver = resolver(vec![], recipes);
        assert_eq!(resolver.resolve("box").count_of("iron"), 2);
    }

    #[test]
    fn test_remain_requirement_excluded() {
        let recipes = vec![
            CraftRecipe::builder("hammer", "hammer", 1).requires("iron", 5).build(),
            CraftRecipe::builder("nail", "nail", 1)
                .requires("iron", 1)
                .tool("hammer", 1)
                .tool("anvil", 1)
                .build(),
        ];
        let resolver = resolver(vec![], recipes);
        let result = resolver.resolve("nail");

        assert_eq!(result.raw_materials, vec![material("iron", 1)]);
        assert_eq!(result.count_of("anvil"), 0);
        assert_eq!(result.count_of("hammer"), 0);
    }

    #[test]
    fn test_remain_requirement_does_not_trigger_cycle() {
        let recipes = vec![CraftRecipe::builder("whetstone", "whetstone", 1)
            .requires("stone", 1)
            .tool("whetstone", 1)
            .build()];
        let resolver = resolver(vec![], recipes);
        let result = resolver.resolve("whetstone");
        assert!(!result.has_circular_dependency);
        assert_eq!(result.total_items, 1);
    }

    #[test]
    fn test_shared_sub_recipe_visited_by_siblings() {
        // A diamond is not a cycle.
        let recipes = vec![
            CraftRecipe::builder("plank", "plank", 2).requires("log", 1).build(),
            CraftRecipe::builder("stick", "stick", 1).requires("plank", 1).build(),
            CraftRecipe::builder("sign", "sign", 1)
                .requires("plank", 3)
                .requires("stick", 1)
                .build(),
        ];
        let resolver = resolver(vec![], recipes);
        let result = resolver.resolve("sign");

        assert!(!result.has_circular_dependency);
        // 3 planks: 2 crafts; 1 stick -> 1 plank: 1 craft.
        assert_eq!(result.raw_materials, vec![material("log", 3)]);
    }

    #[test]
    fn test_sorted_by_display_name() {
        let item_list = items(&[("z", "apple"), ("y", "Banana"), ("x", "cherry")]);
        let recipes = vec![CraftRecipe::builder("pie", "pie", 1)
            .requires("x", 1)
            .requires("unknown-id", 1)
            .requires("y", 1)
            .requires("z", 1)
            .build()];
        let resolver = resolver(item_list, recipes);
        let order: Vec<_> = resolver
            .resolve("pie")
            .raw_materials
            .into_iter()
            .map(|m| m.item.as_str().to_owned())
            .collect();

        // Unknown items sort by their raw ID.
        assert_eq!(order, vec!["z", "y", "x", "unknown-id"]);
    }

    #[test]
    fn test_first_matching_producer_wins() {
        let recipes = vec![
            CraftRecipe::builder("cheap", "gear", 1).requires("tin", 1).build(),
            CraftRecipe::builder("costly", "gear", 1).requires("gold", 9).build(),
            CraftRecipe::builder("machine", "machine", 1).requires("gear", 2).build(),
        ];
        let resolver = resolver(vec![], recipes);
        let result = resolver.resolve("machine");

        assert_eq!(result.raw_materials, vec![material("tin", 2)]);
        assert_eq!(
            resolver.recipe_for_item("gear").map(|r| r.id.as_str()),
            Some("cheap")
        );
    }

    #[test]
    fn test_totals_aggregate_across_paths() {
        let recipes = vec![
            CraftRecipe::builder("ingot", "ingot", 1).requires("ore", 2).build(),
            CraftRecipe::builder("tool", "tool", 1)
                .requires("ingot", 2)
                .requires("ore", 1)
                .requires("wood", 1)
                .build(),
        ];
        let resolver = resolver(vec![], recipes);
        let result = resolver.resolve("tool");

        assert_eq!(result.count_of("ore"), 5);
        assert_eq!(result.count_of("wood"), 1);
        assert_eq!(result.total_items, 6);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = resolver(chain_items(), chain_recipes());
        assert_eq!(resolver.resolve("r2"), resolver.resolve("r2"));
    }

    #[test]
    fn test_resolve_item() {
        let resolver = resolver(chain_items(), chain_recipes());
        assert_eq!(resolver.resolve_item("d"), resolver.resolve("r2"));
        assert_eq!(resolver.resolve_item("a"), DecompositionResult::empty());
    }

    #[test]
    fn test_resolve_item_follows_configured_strategy() {
        let config = ResolverConfig {
            memoize: true,
            ..ResolverConfig::default()
        };
        let catalog = Catalog::new(chain_items(), chain_recipes()).expect("catalog");
        let resolver = RecipeResolver::with_config(catalog, config);
        assert_eq!(resolver.resolve_item("d"), resolver.resolve_configured("r2"));
        assert_eq!(resolver.resolve_item("d"), resolver.resolve_memoized("r2"));
    }

    #[test]
    fn test_craftable_items() {
        let resolver = resolver(chain_items(), chain_recipes());
        assert!(resolver.is_craftable("c"));
        assert!(resolver.is_craftable("d"));
        assert!(!resolver.is_craftable("a"));
        assert_eq!(resolver.craftable_items().count(), 2);
    }

    #[test]
    fn test_item_name() {
        let resolver = resolver(chain_items(), chain_recipes());
        assert_eq!(resolver.item_name("a"), "Item A");
        assert_eq!(resolver.item_name("nope"), "nope");
    }

    fn long_chain(len: usize) -> Vec<CraftRecipe> {
        (0..len)
            .map(|i| {
                CraftRecipe::builder(format!("r{i}"), format!("i{i}"), 1)
                    .requires(format!("i{}", i + 1), 1)
                    .build()
            })
            .collect()
    }

    #[test]
    fn test_depth_limit_aborts_long_chain() {
        let catalog = Catalog::new(vec![], long_chain(10)).expect("catalog");
        let config = ResolverConfig {
            max_depth: 5,
            memoize: false,
        };
        let resolver = RecipeResolver::with_config(catalog, config);
        let result = resolver.resolve("r0");

        assert!(result.depth_limit_reached);
        assert!(!result.has_circular_dependency);
        assert!(!result.is_exact());
        assert!(result.raw_materials.is_empty());
    }

    #[test]
    fn test_chain_within_depth_limit() {
        let resolver = resolver(vec![], long_chain(10));
        let result = resolver.resolve("r0");
        assert!(result.is_exact());
        assert_eq!(result.raw_materials, vec![material("i10", 1)]);
    }

    #[test]
    fn test_large_multipliers_saturate() {
        let recipes = vec![
            CraftRecipe::builder("a", "a", 1).requires("b", u32::MAX).build(),
            CraftRecipe::builder("b", "b", 1).requires("c", u32::MAX).build(),
            CraftRecipe::builder("c", "c", 1).requires("ore", u32::MAX).build(),
        ];
        let resolver = resolver(vec![], recipes);
        let result = resolver.resolve("a");
        assert_eq!(result.count_of("ore"), u64::MAX);
        assert_eq!(result.total_items, u64::MAX);
    }

    #[test]
    fn test_memoized_matches_plain() {
        let recipes = vec![
            CraftRecipe::builder("plank", "plank", 4).requires("log", 1).build(),
            CraftRecipe::builder("stick", "stick", 4).requires("plank", 2).build(),
            CraftRecipe::builder("torch", "torch", 4)
                .requires("stick", 1)
                .requires("coal", 1)
                .build(),
            CraftRecipe::builder("wall", "wall", 1)
                .requires("plank", 6)
                .requires("stick", 4)
                .requires("torch", 2)
                .requires("stick", 4)
                .build(),
        ];
        let resolver = resolver(vec![], recipes);
        for id in ["plank", "stick", "torch", "wall"] {
            assert_eq!(resolver.resolve(id), resolver.resolve_memoized(id));
        }
    }

    #[test]
    fn test_memoized_respects_depth_limit() {
        // r0 is first expanded near the root, then reached again one level deeper.
        let mut recipes = long_chain(3);
        recipes.push(
            CraftRecipe::builder("root", "root", 1)
                .requires("i0", 1)
                .requires("wrap", 1)
                .build(),
        );
        recipes.push(CraftRecipe::builder("wrap", "wrap", 1).requires("i0", 1).build());
        let catalog = Catalog::new(vec![], recipes).expect("catalog");
        let config = ResolverConfig {
            max_depth: 4,
            memoize: true,
        };
        let resolver = RecipeResolver::with_config(catalog, config);

        let plain = resolver.resolve("root");
        assert!(plain.depth_limit_reached);
        assert_eq!(plain, resolver.resolve_memoized("root"));
        assert_eq!(plain, resolver.resolve_configured("root"));
    }

    #[test]
    fn test_memoized_cycle_matches_plain() {
        let mut recipes = chain_recipes();
        recipes.push(CraftRecipe::builder("r3", "a", 1).requires("d", 1).build());
        let resolver = resolver(chain_items(), recipes);
        for id in ["r1", "r2", "r3"] {
            assert_eq!(resolver.resolve(id), resolver.resolve_memoized(id));
        }
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let resolver = resolver(chain_items(), chain_recipes());
        let json = serde_json::to_string(&resolver.resolve("r2")).expect("serialize");
        assert!(json.contains("\"rawMaterials\""));
        assert!(json.contains("\"itemGuid\":\"a\""));
        assert!(json.contains("\"totalItems\":9"));
        assert!(json.contains("\"hasCircularDependency\":false"));
    }

    #[test]
    fn test_resolver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecipeResolver>();
    }

    #[test]
    fn test_locale_cmp() {
        let mut collator = Collator::default();
        assert_eq!(locale_cmp(&mut collator, "apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp(&mut collator, "a", "A"), Ordering::Less);
        assert_eq!(locale_cmp(&mut collator, "same", "same"), Ordering::Equal);
        assert_eq!(locale_cmp(&mut collator, "Éclair", "Zinc"), Ordering::Less);
        // Kana order by reading, not by code block.
        assert_eq!(locale_cmp(&mut collator, "アイアン", "かわ"), Ordering::Less);
    }

    #[test]
    fn test_accented_and_kana_names_sort_by_reading() {
        let resolver = resolver(
            items(&[("z", "Zinc"), ("e", "Éclair"), ("ka", "かわ"), ("a", "アイアン")]),
            vec![CraftRecipe::builder("r", "out", 1)
                .requires("z", 1)
                .requires("ka", 1)
                .requires("e", 1)
                .requires("a", 1)
                .build()],
        );
        let result = resolver.resolve("r");
        let order: Vec<&str> = result
            .raw_materials
            .iter()
            .map(|m| m.item.as_str())
            .collect();
        assert_eq!(order, vec!["e", "z", "a", "ka"]);
    }

    #[test]
    fn test_unnamed_items_sort_by_id() {
        let resolver = resolver(
            items(&[("zeta", ""), ("a", "Alpha")]),
            vec![CraftRecipe::builder("r", "out", 1)
                .requires("zeta", 1)
                .requires("a", 1)
                .build()],
        );
        let result = resolver.resolve("r");
        assert_eq!(resolver.item_name("zeta"), "zeta");
        assert_eq!(
            result.raw_materials,
            vec![material("a", 1), material("zeta", 1)]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Recipe `i` produces `c{i}` from base items and earlier craftables.
        fn acyclic_catalog() -> impl Strategy<Value = Vec<CraftRecipe>> {
            prop::collection::vec(
                (
                    1u32..5,
                    prop::collection::vec((0usize..12, 1u32..6, any::<bool>()), 0..5),
                ),
                1..8,
            )
            .prop_map(|specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (yield_count, reqs))| {
                        let mut builder =
                            CraftRecipe::builder(format!("r{i}"), format!("c{i}"), yield_count);
                        for (pick, count, tool) in reqs {
                            // Half the picks are base items, half earlier craftables.
                            let item = if pick < 6 || i == 0 {
                                format!("base{pick}")
                            } else {
                                format!("c{}", pick % i)
                            };
                            builder = if tool {
                                builder.tool(item, count)
                            } else {
                                builder.requires(item, count)
                            };
                        }
                        builder.build()
                    })
                    .collect()
            })
        }

        /// Requirements may point at any recipe output, cycles included.
        fn any_catalog() -> impl Strategy<Value = Vec<CraftRecipe>> {
            prop::collection::vec(
                (1u32..4, prop::collection::vec((0usize..10, 1u32..4), 0..4)),
                1..7,
            )
            .prop_map(|specs| {
                let n = specs.len();
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (yield_count, reqs))| {
                        let mut builder =
                            CraftRecipe::builder(format!("r{i}"), format!("c{i}"), yield_count);
                        for (pick, count) in reqs {
                            let item = if pick < 4 {
                                format!("base{pick}")
                            } else {
                                format!("c{}", pick % n)
                            };
                            builder = builder.requires(item, count);
                        }
                        builder.build()
                    })
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn prop_acyclic_resolves_to_base_items(recipes in acyclic_catalog()) {
                let ids: Vec<String> = recipes.iter().map(|r| r.id.to_string()).collect();
                let resolver = resolver(vec![], recipes);
                for id in &ids {
                    let result = resolver.resolve(id);
                    prop_assert!(!result.has_circular_dependency);
                    for m in &result.raw_materials {
                        prop_assert!(!resolver.is_craftable(m.item.as_str()));
                        prop_assert!(m.count > 0);
                    }
                }
            }

            #[test]
            fn prop_total_is_sum_and_memo_agrees(recipes in any_catalog()) {
                let ids: Vec<String> = recipes.iter().map(|r| r.id.to_string()).collect();
                let resolver = resolver(vec![], recipes);
                for id in &ids {
                    let result = resolver.resolve(id);
                    let sum: u64 = result.raw_materials.iter().map(|m| m.count).sum();
                    prop_assert_eq!(result.total_items, sum);

                    let mut seen = AHashSet::new();
                    for m in &result.raw_materials {
                        prop_assert!(seen.insert(m.item.clone()));
                    }

                    prop_assert_eq!(&result, &resolver.resolve_memoized(id));
                    prop_assert_eq!(&result, &resolver.resolve(id));
                }
            }
        }
    }
}
