//! CLI module for gallery-api
//!
//! Provides command-line interface for:
//! - serve: run the HTTP server
//! - invoke: run one request envelope through a handler
//! - check-config: validate configuration

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, Function};
pub use commands::{check_config, invoke, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_request, read_request, write_json};
