use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod matching;
mod parsing;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins when set, otherwise the verbosity flag decides
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ingreedy=debug,info")
        } else {
            EnvFilter::new("ingreedy=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let options = cli.options();

    match cli.command {
        cli::Commands::Match(args) => {
            cli::match_cmd::run(args, &options)?;
        }
        cli::Commands::Similar(args) => {
            cli::similar::run(args, &options)?;
        }
        cli::Commands::Chat(args) => {
            cli::chat::run(args, &options)?;
        }
        cli::Commands::Catalog(args) => {
            cli::catalog::run(args, &options)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args, &options)?;
        }
    }

    Ok(())
}
