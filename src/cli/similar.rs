use clap::Args;

use crate::cli::{truncate, GlobalOptions, OutputFormat};
use crate::matching::engine::{MatchingEngine, SimilarityResult};
use crate::utils::validation::validate_terms;

#[derive(Args)]
pub struct SimilarArgs {
    /// Ingredient terms; quote multi-word ingredients ("urad dal")
    #[arg(required = true, num_args = 1..)]
    pub terms: Vec<String>,
}

/// Execute similar subcommand
///
/// # Errors
///
/// Returns an error if the terms are invalid or the catalog cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SimilarArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    validate_terms(&args.terms, &[])?;

    let catalog = options.load_catalog()?;
    let engine = MatchingEngine::with_config(&catalog, options.matching.clone());

    let mut results = engine.find_similar(&args.terms);
    results.truncate(options.max_results);

    print_results(&results, options.format)
}

pub(crate) fn print_results(
    results: &[SimilarityResult],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if results.is_empty() {
                println!("No similar recipes found.");
                return Ok(());
            }
            println!("{:<4} {:<10} {:<40} {:>10}", "#", "ID", "Title", "Similarity");
            println!("{}", "-".repeat(67));
            for (i, r) in results.iter().enumerate() {
                println!(
                    "{:<4} {:<10} {:<40} {:>10.3}",
                    i + 1,
                    r.recipe.id,
                    truncate(&r.recipe.title, 40),
                    r.similarity
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        OutputFormat::Tsv => {
            println!("rank\tid\ttitle\tsimilarity");
            for (i, r) in results.iter().enumerate() {
                println!(
                    "{}\t{}\t{}\t{:.6}",
                    i + 1,
                    r.recipe.id,
                    r.recipe.title,
                    r.similarity
                );
            }
        }
    }
    Ok(())
}
