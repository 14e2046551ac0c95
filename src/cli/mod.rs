//! CLI module for validall
//!
//! Provides command-line interface for:
//! - check: Run the guarded email-record function
//! - input: Run only the input validator
//! - result: Run only the result validator
//! - show-config: Print the effective configuration

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, input, parse_kwargs, rejection_payload, result, run, run_check, run_command, show_config, CheckOutcome};
pub use config::GuardConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_response, ok_response, write_error, write_response};
