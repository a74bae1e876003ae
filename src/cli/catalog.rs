use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::catalog::store::RecipeCatalog;
use crate::cli::{print_recipes, GlobalOptions, OutputFormat};
use crate::core::recipe::Recipe;
use crate::core::types::RecipeId;
use crate::utils::validation::{clamp_random_count, validate_merge_size};

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all recipes in the catalog
    List {
        /// Only recipes tagged with this cuisine (case-insensitive)
        #[arg(long)]
        cuisine: Option<String>,
    },

    /// Show details of a specific recipe
    Show {
        /// Recipe ID
        #[arg(required = true)]
        id: u64,
    },

    /// Search recipe titles
    Search {
        /// Text to look for in titles (case-insensitive)
        #[arg(required = true)]
        query: String,
    },

    /// Pick random recipes
    Random {
        /// Number of recipes
        #[arg(short = 'n', long, default_value = "5")]
        number: usize,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,
    },

    /// Merge recipes from a file into the catalog and write the result
    Merge {
        /// Recipes to add (catalog file or bare JSON array)
        #[arg(required = true)]
        input: PathBuf,

        /// Output file for the merged catalog
        #[arg(short, long, required = true)]
        output: PathBuf,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if a catalog cannot be loaded or written, or a recipe is not found.
pub fn run(args: CatalogArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let catalog = options.load_catalog()?;

    match args.command {
        CatalogCommands::List { cuisine } => run_list(&catalog, cuisine.as_deref(), options.format),
        CatalogCommands::Show { id } => run_show(&catalog, id, options.format),
        CatalogCommands::Search { query } => {
            print_recipes(&catalog.search_title(&query), options.format)
        }
        CatalogCommands::Random { number } => {
            print_recipes(&catalog.random(clamp_random_count(number)), options.format)
        }
        CatalogCommands::Export { output } => run_export(&catalog, &output),
        CatalogCommands::Merge { input, output } => run_merge(catalog, &input, &output),
    }
}

fn run_list(
    catalog: &RecipeCatalog,
    cuisine: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let filtered: Vec<&Recipe> = catalog
        .recipes()
        .iter()
        .filter(|recipe| {
            cuisine.map_or(true, |wanted| {
                recipe
                    .cuisines
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(wanted))
            })
        })
        .collect();

    print_recipes(&filtered, format)?;

    if format == OutputFormat::Text {
        println!("\nTotal: {} recipes", filtered.len());
    }
    Ok(())
}

fn run_show(catalog: &RecipeCatalog, id: u64, format: OutputFormat) -> anyhow::Result<()> {
    let recipe = catalog
        .get(RecipeId::new(id))
        .ok_or_else(|| anyhow::anyhow!("Recipe '{}' not found", id))?;

    match format {
        OutputFormat::Text => {
            println!("Recipe: {}\n", recipe.title);
            println!("ID:       {}", recipe.id);
            if let Some(minutes) = recipe.ready_in_minutes {
                println!("Ready in: {minutes} minutes");
            }
            if let Some(servings) = recipe.servings {
                println!("Servings: {servings}");
            }
            if !recipe.cuisines.is_empty() {
                println!("Cuisines: {}", recipe.cuisines.join(", "));
            }
            if let Some(url) = &recipe.source_url {
                println!("Source:   {url}");
            }
            if !recipe.summary.is_empty() {
                println!("\n{}", recipe.summary);
            }

            println!("\nIngredients:");
            for ingredient in &recipe.ingredients {
                if ingredient.amount > 0.0 {
                    println!(
                        "  - {} {} {}",
                        ingredient.amount, ingredient.unit, ingredient.name
                    );
                } else {
                    println!("  - {}", ingredient.name);
                }
            }

            if !recipe.instructions.is_empty() {
                println!("\nInstructions:\n{}", recipe.instructions);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(recipe)?);
        }
        OutputFormat::Tsv => {
            println!("name\tamount\tunit");
            for ingredient in &recipe.ingredients {
                println!(
                    "{}\t{}\t{}",
                    ingredient.name, ingredient.amount, ingredient.unit
                );
            }
        }
    }

    Ok(())
}

fn run_export(catalog: &RecipeCatalog, output: &Path) -> anyhow::Result<()> {
    let json = catalog.to_json()?;
    std::fs::write(output, json)?;

    println!("Exported {} recipes to {}", catalog.len(), output.display());

    Ok(())
}

fn run_merge(mut catalog: RecipeCatalog, input: &Path, output: &Path) -> anyhow::Result<()> {
    let incoming = RecipeCatalog::load_from_file(input)?;
    validate_merge_size(incoming.len())?;

    let summary = catalog.merge(incoming.recipes().iter().cloned());
    std::fs::write(output, catalog.to_json()?)?;

    println!(
        "Merged {} recipes ({} added, {} replaced) into {} ({} total)",
        summary.added + summary.replaced,
        summary.added,
        summary.replaced,
        output.display(),
        catalog.len()
    );

    Ok(())
}
