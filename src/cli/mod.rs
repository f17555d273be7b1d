//! CLI module for the Duckboard dashboard
//!
//! Provides the command-line interface that drives the synchronization
//! store: a continuous watch loop and one-shot queries.

mod commands;
mod output;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

/// Duckboard - Duck CI dashboard
#[derive(Parser, Debug)]
#[command(name = "duckboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the server and render build status continuously
    Watch {
        /// Duck server address (overrides configuration)
        #[arg(long)]
        server: Option<String>,

        /// View to filter builds through
        #[arg(long)]
        view: Option<String>,

        /// Seconds between rounds (overrides configuration)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Fetch and print the current build list
    Builds {
        /// Duck server address (overrides configuration)
        #[arg(long)]
        server: Option<String>,

        /// View to filter builds through
        #[arg(long)]
        view: Option<String>,
    },

    /// Show server information
    Server {
        /// Duck server address (overrides configuration)
        #[arg(long)]
        server: Option<String>,
    },

    /// List the views the server provides
    Views {
        /// Duck server address (overrides configuration)
        #[arg(long)]
        server: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.output.format();
    let quiet = cli.output.quiet;

    match cli.command {
        Commands::Watch {
            server,
            view,
            interval,
        } => commands::watch::run(server, view, interval, format, quiet).await,
        Commands::Builds { server, view } => {
            commands::builds::run(server, view, format, quiet).await
        }
        Commands::Server { server } => commands::server::run(server, format).await,
        Commands::Views { server } => commands::views::run(server, format).await,
        Commands::Config { command } => commands::config::run(command, format).await,
    }
}
