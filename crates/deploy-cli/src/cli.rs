//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// deploy - Resolve deployment configs and their requirements
#[derive(Parser, Debug)]
#[command(name = "deploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (refine with RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the resolved configs in dependency order
    ///
    /// Examples:
    ///   deploy resolve                       # Resolve ./deploy.yaml
    ///   deploy resolve -f stack/main.yaml    # Resolve another root document
    ///   deploy resolve -p staging -c api     # Only `api` and what it needs
    Resolve {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print each resolved config with its direct requirements
    Graph {
        #[command(flatten)]
        selection: SelectionArgs,
    },
}

/// Arguments shared by every command that runs a resolution.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionArgs {
    /// Root document (a file, or a directory holding deploy.yaml)
    #[arg(short = 'f', long = "filename", env = "DEPLOY_CONFIG")]
    pub filename: Option<PathBuf>,

    /// Profile to activate on the root document's configs (repeatable)
    #[arg(
        short,
        long = "profile",
        env = "DEPLOY_PROFILE",
        value_delimiter = ','
    )]
    pub profiles: Vec<String>,

    /// Only emit these configs and their requirements (repeatable)
    #[arg(short, long = "config", value_delimiter = ',')]
    pub configs: Vec<String>,

    /// Options file (TOML, JSON or YAML); flags take precedence
    #[arg(long)]
    pub options: Option<PathBuf>,
}
