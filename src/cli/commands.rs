//! CLI command implementations
//!
//! Each command loads the configuration (or the defaults), does its work and
//! writes exactly one JSON response line to stdout.

use std::path::Path;

use serde_json::{json, Value};

use crate::demo::email_guard;
use crate::guard::{Kwargs, ValidationError};
use crate::observability::Event;

use super::args::Command;
use super::config::GuardConfig;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Outcome of a guarded call made from the command line
pub type CheckOutcome = Result<Value, ValidationError<Value, Value>>;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Check { config, kwargs, values } => check(config.as_deref(), &kwargs, &values),
        Command::Input { config, value } => write_response(input(config.as_deref(), &value)?),
        Command::ResultCheck { config, json } => write_response(result(config.as_deref(), &json)?),
        Command::ShowConfig { config } => write_response(show_config(config.as_deref())?),
    }
}

/// Run the guarded email-record function and report the outcome.
///
/// A rejected call writes an error response and fails with
/// `VALIDALL_CLI_VALIDATION_FAILED`.
pub fn check(config_path: Option<&Path>, kwargs: &[String], values: &[String]) -> CliResult<()> {
    match run_check(config_path, kwargs, values)? {
        Ok(result) => write_response(result),
        Err(rejection) => {
            let message = rejection_message(&rejection);
            write_error(rejection.code(), &message, rejection_payload(&rejection))?;
            Err(CliError::validation_failed(message))
        }
    }
}

/// Builds the guard from configuration and calls it.
///
/// The outer `Result` carries configuration and argument errors, the inner
/// one the guard's verdict.
pub fn run_check(config_path: Option<&Path>, kwargs: &[String], values: &[String]) -> CliResult<CheckOutcome> {
    let config = GuardConfig::load_or_default(config_path)?;
    let logger = config.logger();
    let decorator = config.decorator()?;
    let repeat_count = decorator.repeat_count().to_string();
    let fallback = if decorator.has_fallback() { "true" } else { "false" };
    logger.event(Event::ConfigLoaded, &[("repeat_count", &repeat_count), ("fallback", fallback)]);
    if decorator.policy().is_unbounded() {
        logger.event(Event::UnboundedRepeat, &[("repeat_count", &repeat_count)]);
    }
    let guard = email_guard(&decorator);
    let args: Vec<Value> = values.iter().cloned().map(Value::String).collect();
    let kwargs = parse_kwargs(kwargs)?;

    let arg_count = args.len().to_string();
    logger.event(Event::CheckStart, &[("args", &arg_count)]);

    let outcome = guard.call_with_kwargs(&args, &kwargs);
    match &outcome {
        Ok(_) => logger.event(Event::CheckAccepted, &[]),
        Err(e) => logger.event(Event::CheckRejected, &[("code", e.code()), ("phase", e.phase().as_str())]),
    }

    Ok(outcome)
}

/// Run only the input validator over `value`.
pub fn input(config_path: Option<&Path>, value: &str) -> CliResult<Value> {
    let config = GuardConfig::load_or_default(config_path)?;
    let validator = config.input_validator()?;

    Ok(json!({ "valid": validator.is_match(value) }))
}

/// Run only the result validator over the JSON text `raw`.
pub fn result(config_path: Option<&Path>, raw: &str) -> CliResult<Value> {
    let config = GuardConfig::load_or_default(config_path)?;
    let validator = config.result_validator()?;
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CliError::invalid_argument(format!("Result is not valid JSON: {}", e)))?;

    match validator.validate(&value) {
        Ok(()) => Ok(json!({ "valid": true })),
        Err(e) => Ok(json!({
            "valid": false,
            "code": e.code().code(),
            "violation": e.message(),
        })),
    }
}

/// Return the effective configuration.
pub fn show_config(config_path: Option<&Path>) -> CliResult<Value> {
    let config = GuardConfig::load_or_default(config_path)?;
    Ok(serde_json::to_value(&config)?)
}

/// Parses `KEY=VALUE` pairs into string keyword arguments.
pub fn parse_kwargs(raw: &[String]) -> CliResult<Kwargs<Value>> {
    raw.iter()
        .map(|pair| {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                CliError::invalid_argument(format!("Keyword argument '{}' is not KEY=VALUE", pair))
            })?;
            if key.is_empty() {
                return Err(CliError::invalid_argument(format!(
                    "Keyword argument '{}' has an empty key",
                    pair
                )));
            }
            Ok((key.to_string(), Value::String(value.to_string())))
        })
        .collect()
}

/// The offending payload of a rejection as JSON.
pub fn rejection_payload(rejection: &ValidationError<Value, Value>) -> Value {
    match rejection {
        ValidationError::InputInvalid { args } => Value::Array(args.clone()),
        ValidationError::ResultInvalid { results } => Value::Array(results.clone()),
        ValidationError::ZeroBudgetRejected { repeat_count } => json!(repeat_count),
    }
}

/// Human-readable rejection with the payload rendered as JSON text.
pub fn rejection_message(rejection: &ValidationError<Value, Value>) -> String {
    match rejection {
        ValidationError::ZeroBudgetRejected { .. } => rejection.to_string(),
        _ => format!("{} validation failed: {}", rejection.phase(), rejection_payload(rejection)),
    }
}
