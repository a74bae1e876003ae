//! Command-line interface for ingreedy.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **match**: Boolean ingredient match, e.g. `rice and urad dal or chicken`
//! - **similar**: Similarity ranking of the catalog against a few terms
//! - **chat**: Answer a free-text message the way the web chat does
//! - **catalog**: List, show, search, export or merge recipes
//! - **serve**: Start the JSON web API
//!
//! ## Usage
//!
//! ```text
//! # Recipes with both rice and urad dal
//! ingreedy match rice and urad dal
//!
//! # Either group may match
//! ingreedy match "rice and urad dal or chicken" --format json
//!
//! # Free text
//! ingreedy chat "I have eggs, potatoes and onions"
//!
//! # Use a custom catalog and substring matching
//! ingreedy --catalog my_recipes.json --lenient match pepper
//!
//! # Start the API server
//! ingreedy serve --port 8080 --open
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::store::RecipeCatalog;
use crate::core::recipe::Recipe;
use crate::core::types::MatchMode;
use crate::matching::engine::MatchingConfig;
use crate::matching::priority::PriorityRules;
use crate::matching::recommend::DEFAULT_MAX_RESULTS;

pub mod catalog;
pub mod chat;
pub mod match_cmd;
pub mod similar;

#[derive(Parser)]
#[command(name = "ingreedy")]
#[command(version)]
#[command(about = "Find recipes for the ingredients you have")]
#[command(
    long_about = "ingreedy matches the ingredients you have against a recipe catalog.\n\nQueries combine ingredients with AND and OR, where AND binds tighter:\n- `rice and urad dal` needs both\n- `rice and urad dal or chicken` needs both of the first two, or chicken\n\nWhen nothing matches exactly, recipes are ranked by ingredient similarity instead."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Path to a custom recipe catalog (defaults to the embedded catalog)
    #[arg(long, global = true, env = "INGREEDY_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Also match terms that are only substrings of an ingredient name
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Maximum number of recipes returned per search
    #[arg(
        long,
        global = true,
        env = "MAX_RECIPES_PER_SEARCH",
        default_value_t = DEFAULT_MAX_RESULTS
    )]
    pub max_results: usize,

    /// Source domains listed first in results (comma-separated)
    #[arg(long, global = true, env = "PRIORITY_SOURCES", value_delimiter = ',')]
    pub priority_sources: Option<Vec<String>>,

    /// Disable source and cuisine prioritization
    #[arg(long, global = true)]
    pub no_priority: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find recipes matching an ingredient expression
    Match(match_cmd::MatchArgs),

    /// Rank recipes by ingredient similarity
    Similar(similar::SimilarArgs),

    /// Get recommendations for a free-text message
    Chat(chat::ChatArgs),

    /// Manage the recipe catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub format: OutputFormat,
    pub verbose: bool,
    pub catalog: Option<PathBuf>,
    pub max_results: usize,
    pub matching: MatchingConfig,
}

impl Cli {
    /// Fold the global flags into the options handed to each command
    pub fn options(&self) -> GlobalOptions {
        let priority = if self.no_priority {
            PriorityRules::none()
        } else {
            match &self.priority_sources {
                Some(sources) => PriorityRules::default().with_sources(sources),
                None => PriorityRules::default(),
            }
        };

        GlobalOptions {
            format: self.format,
            verbose: self.verbose,
            catalog: self.catalog.clone(),
            max_results: self.max_results,
            matching: MatchingConfig {
                mode: if self.lenient {
                    MatchMode::Lenient
                } else {
                    MatchMode::Strict
                },
                priority,
                ..MatchingConfig::default()
            },
        }
    }
}

impl GlobalOptions {
    /// Load the configured catalog, or the embedded one
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed.
    pub fn load_catalog(&self) -> anyhow::Result<RecipeCatalog> {
        let catalog = RecipeCatalog::load(self.catalog.as_deref())?;

        if self.verbose {
            eprintln!("Loaded catalog with {} recipes", catalog.len());
        }
        if catalog.is_empty() {
            tracing::warn!("Catalog is empty, no recipes to match against");
        }

        Ok(catalog)
    }
}

/// Truncate a string for table output
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a plain recipe list in the requested format
pub(crate) fn print_recipes(recipes: &[&Recipe], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if recipes.is_empty() {
                println!("No recipes found.");
                return Ok(());
            }
            println!("{:<10} {:<40} {:>11} Source", "ID", "Title", "Ingredients");
            println!("{}", "-".repeat(80));
            for recipe in recipes {
                println!(
                    "{:<10} {:<40} {:>11} {}",
                    recipe.id,
                    truncate(&recipe.title, 40),
                    recipe.ingredients.len(),
                    recipe.source_domain().unwrap_or_else(|| "-".to_string())
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(recipes)?);
        }
        OutputFormat::Tsv => {
            println!("id\ttitle\tingredients\tsource_url");
            for recipe in recipes {
                println!(
                    "{}\t{}\t{}\t{}",
                    recipe.id,
                    recipe.title,
                    recipe
                        .ingredients
                        .iter()
                        .map(|i| i.name.as_str())
                        .collect::<Vec<_>>()
                        .join(";"),
                    recipe.source_url.as_deref().unwrap_or("")
                );
            }
        }
    }
    Ok(())
}
