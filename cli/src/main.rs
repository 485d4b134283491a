mod browse;
mod cli;
mod error;
mod init;
mod ui;

use browse::ShowArgs;
use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let result = match cli.command {
        Commands::Show {
            uri,
            rels,
            vars,
            raw,
        } => browse::execute_show(
            &cli.global,
            ShowArgs {
                uri,
                rels,
                vars,
                raw,
            },
        ),
        Commands::Links { uri } => browse::execute_links(&cli.global, uri),
        Commands::Init { force } => init::execute(&cli.global, force),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings, or request logging with `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "hal_client=debug,hal=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
