//! Command-line argument handling and report rendering.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use craftplan_common::{CraftplanError, CraftplanResult};
use craftplan_crafting::{
    Catalog, DecompositionResult, RecipeResolver, ResolverConfig, CONFIG_FILE,
};
use tracing::{info, warn};

/// Craftplan - resolve crafting recipes into raw materials
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "craftplan")]
#[command(version, about, long_about = None)]
pub struct Options {
    /// Resolver config file
    #[arg(long = "config", value_name = "PATH", default_value = CONFIG_FILE)]
    pub config_path: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Force the memoizing resolver
    #[arg(long)]
    pub memoize: bool,

    /// Item catalog file
    #[arg(value_name = "ITEMS")]
    pub items_path: PathBuf,

    /// Recipe catalog file
    #[arg(value_name = "RECIPES")]
    pub recipes_path: PathBuf,

    /// Recipes to resolve (all recipes when none are given)
    #[arg(value_name = "RECIPE_ID")]
    pub recipe_ids: Vec<String>,
}

/// Runs the tool.
pub fn run(options: &Options) -> Result<()> {
    let mut config = ResolverConfig::load_from(&options.config_path);
    if options.memoize {
        config.memoize = true;
    }

    let catalog = load_catalog(&options.items_path, &options.recipes_path)
        .context("loading catalog")?;
    let resolver = RecipeResolver::with_config(catalog, config);

    let ids: Vec<String> = if options.recipe_ids.is_empty() {
        resolver
            .catalog()
            .recipes()
            .iter()
            .map(|r| r.id.to_string())
            .collect()
    } else {
        options.recipe_ids.clone()
    };

    let mut reports = Vec::with_capacity(ids.len());
    for id in &ids {
        if resolver.catalog().recipe(id).is_none() {
            warn!("Unknown recipe {id}");
        }
        reports.push((id.as_str(), resolver.resolve_configured(id)));
    }

    let output = if options.json {
        render_json(&reports)?
    } else {
        reports
            .iter()
            .map(|(id, result)| render_text(&resolver, id, result))
            .collect::<Vec<_>>()
            .join("\n")
    };
    println!("{output}");

    info!("Resolved {} recipes", reports.len());
    Ok(())
}

fn load_catalog(items: &Path, recipes: &Path) -> CraftplanResult<Catalog> {
    Ok(Catalog::load(items, recipes)?)
}

/// Renders results as a JSON object keyed by recipe ID.
fn render_json(reports: &[(&str, DecompositionResult)]) -> CraftplanResult<String> {
    let map: serde_json::Map<String, serde_json::Value> = reports
        .iter()
        .map(|(id, result)| {
            serde_json::to_value(result)
                .map(|value| ((*id).to_string(), value))
                .map_err(|e| CraftplanError::Serialization(e.to_string()))
        })
        .collect::<CraftplanResult<_>>()?;

    serde_json::to_string_pretty(&map).map_err(|e| CraftplanError::Serialization(e.to_string()))
}

/// Renders one result as an indented material list.
fn render_text(resolver: &RecipeResolver, recipe_id: &str, result: &DecompositionResult) -> String {
    let mut out = String::new();

    let title = resolver
        .catalog()
        .recipe(recipe_id)
        .map_or("unknown recipe", |r| resolver.item_name(r.result_item.as_str()));
    let _ = writeln!(out, "{title} ({recipe_id})");

    if result.raw_materials.is_empty() {
        let _ = writeln!(out, "  (no materials)");
    }
    for material in &result.raw_materials {
        let _ = writeln!(
            out,
            "  {} x{}",
            resolver.item_name(material.item.as_str()),
            material.count
        );
    }
    let _ = writeln!(out, "  total: {}", result.total_items);

    if result.has_circular_dependency {
        let _ = writeln!(out, "  ! circular dependency, totals are incomplete");
    }
    if result.depth_limit_reached {
        let _ = writeln!(out, "  ! maximum depth reached, totals are incomplete");
    }
    out
}
