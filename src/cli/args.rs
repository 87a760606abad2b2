//! CLI argument definitions using clap
//!
//! Commands:
//! - gallery-api serve --config <path> [--port <n>] [--in-memory]
//! - gallery-api invoke <gallery|images> --config <path> [--in-memory]
//! - gallery-api check-config --config <path>

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// gallery-api - CRUD handlers for a people/photo gallery
#[derive(Parser, Debug)]
#[command(name = "gallery-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the handlers over HTTP
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./gallery.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Use an in-memory store instead of DATABASE_URL
        #[arg(long)]
        in_memory: bool,
    },

    /// Run one request envelope from stdin through a handler
    Invoke {
        /// Handler to run
        #[arg(value_enum)]
        function: Function,

        /// Path to configuration file
        #[arg(long, default_value = "./gallery.json")]
        config: PathBuf,

        /// Use an in-memory store instead of DATABASE_URL
        #[arg(long)]
        in_memory: bool,
    },

    /// Validate configuration and print it
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./gallery.json")]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Function {
    Gallery,
    Images,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
