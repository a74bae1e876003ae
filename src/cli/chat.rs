use clap::Args;

use crate::cli::{truncate, GlobalOptions, OutputFormat};
use crate::matching::recommend::{respond, ChatReply};
use crate::utils::validation::validate_message;

#[derive(Args)]
pub struct ChatArgs {
    /// Message describing the ingredients you have
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

/// Execute chat subcommand
///
/// # Errors
///
/// Returns an error if the message is invalid or the catalog cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ChatArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let message = args.message.join(" ");
    validate_message(&message)?;

    let catalog = options.load_catalog()?;
    let reply = respond(&catalog, &message, &options.matching, options.max_results);

    if options.verbose {
        eprintln!(
            "Recognized {} ingredients, strategy: {}",
            reply.ingredients.len(),
            reply.strategy
        );
    }

    match options.format {
        OutputFormat::Text => print_text_reply(&reply),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reply)?),
        OutputFormat::Tsv => {
            println!("id\ttitle\tstrategy");
            for recipe in &reply.recipes {
                println!("{}\t{}\t{}", recipe.id, recipe.title, reply.strategy);
            }
        }
    }

    Ok(())
}

fn print_text_reply(reply: &ChatReply) {
    println!("{}\n", reply.message);
    for (i, recipe) in reply.recipes.iter().enumerate() {
        let timing = recipe
            .ready_in_minutes
            .map(|m| format!(" ({m} min)"))
            .unwrap_or_default();
        println!("{:>3}. {}{}", i + 1, truncate(&recipe.title, 60), timing);
    }
}
