use clap::Args;

use crate::cli::{truncate, GlobalOptions, OutputFormat};
use crate::core::query::IngredientQuery;
use crate::matching::engine::{MatchResult, MatchingEngine};
use crate::utils::validation::validate_terms;

#[derive(Args)]
pub struct MatchArgs {
    /// Ingredient expression, e.g. `rice and urad dal or chicken`
    #[arg(required = true, num_args = 1..)]
    pub expression: Vec<String>,

    /// Fall back to similarity ranking when nothing matches
    #[arg(long)]
    pub fallback: bool,
}

/// Execute match subcommand
///
/// # Errors
///
/// Returns an error if the query is invalid or the catalog cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MatchArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let query = IngredientQuery::parse_expression(&args.expression.join(" "));
    validate_terms(query.terms(), query.operators())?;

    if options.verbose {
        eprintln!("Query: {query}");
    }

    let catalog = options.load_catalog()?;
    let engine = MatchingEngine::with_config(&catalog, options.matching.clone());

    let mut matches = engine.find_matches(&query);
    matches.truncate(options.max_results);

    if matches.is_empty() && args.fallback {
        if options.verbose {
            eprintln!("No exact matches, ranking by similarity");
        }
        let mut similar = engine.find_similar(query.terms());
        similar.truncate(options.max_results);
        return crate::cli::similar::print_results(&similar, options.format);
    }

    match options.format {
        OutputFormat::Text => print_text_results(&query, &matches),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&matches)?),
        OutputFormat::Tsv => print_tsv_results(&matches),
    }

    Ok(())
}

fn print_text_results(query: &IngredientQuery, matches: &[MatchResult]) {
    if matches.is_empty() {
        println!("No recipes match: {query}");
        println!("Try --lenient for substring matching or --fallback for similar recipes.");
        return;
    }

    println!("Recipes matching: {query}\n");
    println!(
        "{:<4} {:<10} {:<36} {:>7} {:>8} {:>7}",
        "#", "ID", "Title", "Groups", "Matched", "Terms"
    );
    println!("{}", "-".repeat(77));
    for (i, m) in matches.iter().enumerate() {
        println!(
            "{:<4} {:<10} {:<36} {:>7} {:>7.1}% {:>7}",
            i + 1,
            m.recipe.id,
            truncate(&m.recipe.title, 36),
            format!("{}/{}", m.score.groups_covered, m.score.total_groups),
            m.score.percentage_matched * 100.0,
            m.score.total_matches
        );
    }
}

fn print_tsv_results(matches: &[MatchResult]) {
    println!("rank\tid\ttitle\tgroups_covered\ttotal_groups\tpercentage_matched\ttotal_matches");
    for (i, m) in matches.iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{:.4}\t{}",
            i + 1,
            m.recipe.id,
            m.recipe.title,
            m.score.groups_covered,
            m.score.total_groups,
            m.score.percentage_matched,
            m.score.total_matches
        );
    }
}
