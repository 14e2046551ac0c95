//! Demo collaborators: an email-record function and its guard
//!
//! `email_record` turns its first argument into `{"email": ...}`. Guarded
//! with the email pattern and the email-record schema it accepts
//! `user@innopolis.com`, rejects `a` before the call and rejects addresses
//! longer than 20 characters after it.

use serde_json::{json, Value};

use crate::guard::{Guarded, Kwargs, ValidAll};
use crate::observability::{Event, Logger};
use crate::validators::{PatternValidator, SchemaValidator};

/// Signature of the demo target function
pub type EmailRecordFn = fn(&[Value], &Kwargs<Value>) -> Value;

/// The demo function wrapped by the email guard
pub type EmailGuard = Guarded<Value, Value, EmailRecordFn, PatternValidator, SchemaValidator>;

/// Returns `{"email": <first argument>}`.
///
/// Strings are used verbatim, other values by their JSON text, and a
/// missing argument yields an empty string. Keyword arguments are ignored.
pub fn email_record(args: &[Value], _kwargs: &Kwargs<Value>) -> Value {
    let email = match args.first() {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    json!({ "email": email })
}

/// Fallback that reports the exhausted retries through the logger.
pub fn notify_fallback(logger: Logger, repeat_count: i64) -> impl Fn() + Send + Sync + 'static {
    move || {
        logger.event(Event::FallbackInvoked, &[("repeat_count", &repeat_count.to_string())]);
    }
}

/// Wraps `email_record` with `decorator`.
pub fn email_guard(decorator: &ValidAll<PatternValidator, SchemaValidator>) -> EmailGuard {
    decorator.wrap(email_record as EmailRecordFn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::ValidationError;

    fn default_guard() -> EmailGuard {
        let decorator = ValidAll::new(
            PatternValidator::email().unwrap(),
            SchemaValidator::email_record().unwrap(),
        );
        email_guard(&decorator)
    }

    #[test]
    fn test_email_record_shapes() {
        let kwargs = Kwargs::new();
        assert_eq!(email_record(&[json!("a@b.co")], &kwargs), json!({ "email": "a@b.co" }));
        assert_eq!(email_record(&[json!(7)], &kwargs), json!({ "email": "7" }));
        assert_eq!(email_record(&[], &kwargs), json!({ "email": "" }));
    }

    #[test]
    fn test_valid_address_passes() {
        let result = default_guard().call(&[json!("user@innopolis.com")]);
        assert_eq!(result, Ok(json!({ "email": "user@innopolis.com" })));
    }

    #[test]
    fn test_short_input_rejected_before_call() {
        let err = default_guard().call(&[json!("a")]).unwrap_err();
        assert_eq!(err, ValidationError::InputInvalid { args: vec![json!("a")] });
    }

    #[test]
    fn test_long_address_rejected_after_retry() {
        let long = "user777777777777777@innopolis.com";
        let err = default_guard().call(&[json!(long)]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ResultInvalid {
                results: vec![json!({ "email": long })]
            }
        );
    }

    #[test]
    fn test_fallback_returns_invalid_record() {
        let decorator = ValidAll::new(
            PatternValidator::email().unwrap(),
            SchemaValidator::email_record().unwrap(),
        )
        .with_fallback(notify_fallback(Logger::default(), 1));

        let long = "user777777777777777@innopolis.com";
        let result = email_guard(&decorator).call(&[json!(long)]);
        assert_eq!(result, Ok(json!({ "email": long })));
    }
}
