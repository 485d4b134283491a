use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "hal.toml";

#[derive(Parser)]
#[command(name = "hal")]
#[command(author, version, about = "Browse HAL hypermedia APIs from the command line")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Configuration file (defaults to hal.toml when present)
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Root URL of the API, overriding the configuration file
    #[clap(long, global = true)]
    pub root: Option<String>,

    /// Extra default header as "Name: value" (repeatable)
    #[clap(short = 'H', long = "header", global = true)]
    pub headers: Vec<String>,

    /// Enable verbose output with request logging
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a resource, optionally following relations, and print it
    Show {
        /// URI relative to the root URL (defaults to the root)
        uri: Option<String>,

        /// Relation to follow through its first link (repeatable, applied in order)
        #[clap(short, long = "rel")]
        rels: Vec<String>,

        /// URI template variable as KEY=VALUE (repeatable; repeated keys form a list)
        #[clap(long = "var")]
        vars: Vec<String>,

        /// Print the raw response body of the last request
        #[clap(long, default_value_t = false)]
        raw: bool,
    },

    /// List the relations and embedded resources of a resource
    Links {
        /// URI relative to the root URL (defaults to the root)
        uri: Option<String>,
    },

    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[clap(long, default_value_t = false)]
        force: bool,
    },
}
