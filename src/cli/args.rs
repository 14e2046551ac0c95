//! CLI argument definitions using clap
//!
//! Commands:
//! - validall check [--config <path>] [--kwarg KEY=VALUE]... <VALUES>...
//! - validall input [--config <path>] <VALUE>
//! - validall result [--config <path>] <JSON>
//! - validall show-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// validall - validate function inputs and results
#[derive(Parser, Debug)]
#[command(name = "validall")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the guarded email-record function
    Check {
        /// Path to configuration file (defaults apply when omitted).
        /// A negative repeat_count blocks until the result is accepted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Keyword argument passed through without validation
        #[arg(long = "kwarg", value_name = "KEY=VALUE")]
        kwargs: Vec<String>,

        /// Positional arguments
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Run only the input validator
    Input {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Value to check
        value: String,
    },

    /// Run only the result validator
    #[command(name = "result")]
    ResultCheck {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON value to check
        json: String,
    },

    /// Print the effective configuration
    ShowConfig {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
