//! JSON output handling for CLI
//!
//! - Output: single JSON object per line via stdout
//! - UTF-8 only

use std::io::{self, Write};

use serde_json::{json, Value};

use super::errors::CliResult;

/// Builds a success response
pub fn ok_response(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Builds an error response; `payload` is omitted when null
pub fn error_response(code: &str, message: &str, payload: Value) -> Value {
    let mut response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    if !payload.is_null() {
        response["payload"] = payload;
    }
    response
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_value(&ok_response(data))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str, payload: Value) -> CliResult<()> {
    write_value(&error_response(code, message, payload))
}

fn write_value(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
