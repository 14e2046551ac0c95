//! The validating decorator and the functions it wraps
//!
//! `ValidAll` is configured once and can wrap any number of functions.
//! Each wrapped function is a `Guarded`, which runs every call through:
//!
//! 1. Input phase: each positional argument must pass the input validator
//! 2. Invocation: the function runs once
//! 3. Result phase: the result must pass the result validator
//! 4. On rejection: the repeat policy decides between retry, fallback and error
//!
//! Keyword arguments are passed through without validation.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::errors::{GuardResult, ValidationError};
use super::policy::RepeatPolicy;
use crate::validators::{InputValidator, ResultValidator};

/// Keyword arguments of a guarded call
pub type Kwargs<A> = BTreeMap<String, A>;

type FallbackFn = Arc<dyn Fn() + Send + Sync>;

/// Decorator configuration: validators, repeat count and optional fallback.
///
/// The repeat count is fixed when the decorator is built:
/// - `>= 1`: retry that many times, then fall back or fail
/// - `0`: fail as soon as the result is rejected
/// - `< 0`: retry until a result is accepted
pub struct ValidAll<I, V> {
    input: Arc<I>,
    result: Arc<V>,
    repeat_count: i64,
    policy: RepeatPolicy,
    fallback: Option<FallbackFn>,
}

impl<I, V> ValidAll<I, V> {
    /// Creates a decorator with a repeat count of 1 and no fallback.
    pub fn new(input_validator: I, result_validator: V) -> Self {
        Self {
            input: Arc::new(input_validator),
            result: Arc::new(result_validator),
            repeat_count: 1,
            policy: RepeatPolicy::default(),
            fallback: None,
        }
    }

    /// Sets the repeat count.
    pub fn repeat(mut self, repeat_count: i64) -> Self {
        self.repeat_count = repeat_count;
        self.policy = RepeatPolicy::from_count(repeat_count);
        self
    }

    /// Sets the action run after bounded retries are spent.
    ///
    /// Its return value is discarded. With a fallback configured, bounded
    /// mode returns the last retry's result instead of an error.
    pub fn with_fallback<F, T>(mut self, fallback: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(move || {
            let _ = fallback();
        }));
        self
    }

    pub fn repeat_count(&self) -> i64 {
        self.repeat_count
    }

    pub fn policy(&self) -> RepeatPolicy {
        self.policy
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Wraps `func` so every call is validated.
    pub fn wrap<A, R, F>(&self, func: F) -> Guarded<A, R, F, I, V>
    where
        F: Fn(&[A], &Kwargs<A>) -> R,
    {
        Guarded {
            func,
            config: self.clone(),
            _call: PhantomData,
        }
    }
}

impl<I, V> Clone for ValidAll<I, V> {
    fn clone(&self) -> Self {
        Self {
            input: Arc::clone(&self.input),
            result: Arc::clone(&self.result),
            repeat_count: self.repeat_count,
            policy: self.policy,
            fallback: self.fallback.clone(),
        }
    }
}

impl<I, V> fmt::Debug for ValidAll<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidAll")
            .field("repeat_count", &self.repeat_count)
            .field("policy", &self.policy)
            .field("fallback", &self.fallback.as_ref().map(|_| "<fallback>"))
            .finish()
    }
}

/// A function wrapped by `ValidAll`.
///
/// Holds no per-call state, so one instance can serve many calls, from
/// several threads if the function and validators allow it.
///
/// # Divergence
///
/// With a negative repeat count a call blocks until the result validator
/// accepts a result. A function that never produces an acceptable result
/// makes the call hang; there is no timeout.
pub struct Guarded<A, R, F, I, V> {
    func: F,
    config: ValidAll<I, V>,
    _call: PhantomData<fn(&[A]) -> R>,
}

impl<A, R, F, I, V> Guarded<A, R, F, I, V>
where
    A: Clone + fmt::Debug,
    R: fmt::Debug,
    F: Fn(&[A], &Kwargs<A>) -> R,
    I: InputValidator<A>,
    V: ResultValidator<R>,
{
    /// Calls the function with positional arguments only.
    pub fn call(&self, args: &[A]) -> GuardResult<R, A> {
        self.call_with_kwargs(args, &Kwargs::new())
    }

    /// Calls the function with positional and keyword arguments.
    ///
    /// # Errors
    ///
    /// - `InputInvalid` if any positional argument is rejected; the function
    ///   is not called
    /// - `ResultInvalid` if bounded retries are spent and no fallback is set
    /// - `ZeroBudgetRejected` if the repeat count is 0 and the result is rejected
    pub fn call_with_kwargs(&self, args: &[A], kwargs: &Kwargs<A>) -> GuardResult<R, A> {
        let input = &*self.config.input;
        if !args.iter().all(|arg| InputValidator::accepts(input, arg)) {
            return Err(ValidationError::InputInvalid {
                args: args.to_vec(),
            });
        }

        let result = (self.func)(args, kwargs);
        if self.result_accepted(&result) {
            return Ok(result);
        }

        match self.config.policy {
            RepeatPolicy::Bounded(retries) => self.retry_bounded(retries.get(), args, kwargs),
            RepeatPolicy::RejectImmediately => Err(ValidationError::ZeroBudgetRejected {
                repeat_count: self.config.repeat_count,
            }),
            RepeatPolicy::Unbounded => Ok(self.retry_until_accepted(args, kwargs)),
        }
    }

    /// Runs the function `retries` more times.
    ///
    /// Retry results are collected but not validated.
    fn retry_bounded(&self, retries: u64, args: &[A], kwargs: &Kwargs<A>) -> GuardResult<R, A> {
        let mut results = Vec::new();
        let mut last = (self.func)(args, kwargs);
        for _ in 1..retries {
            results.push(last);
            last = (self.func)(args, kwargs);
        }

        if let Some(fallback) = &self.config.fallback {
            fallback();
            return Ok(last);
        }

        results.push(last);
        Err(ValidationError::ResultInvalid { results })
    }

    fn retry_until_accepted(&self, args: &[A], kwargs: &Kwargs<A>) -> R {
        loop {
            let result = (self.func)(args, kwargs);
            if self.result_accepted(&result) {
                return result;
            }
        }
    }

    /// A validator fault counts as rejection.
    fn result_accepted(&self, result: &R) -> bool {
        ResultValidator::accepts(&*self.config.result, result)
    }
}

impl<A, R, F: Clone, I, V> Clone for Guarded<A, R, F, I, V> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
            config: self.config.clone(),
            _call: PhantomData,
        }
    }
}

impl<A, R, F, I, V> fmt::Debug for Guarded<A, R, F, I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guarded")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn non_empty(s: &String) -> bool {
        !s.is_empty()
    }

    fn even(n: &usize) -> bool {
        n % 2 == 0
    }

    #[test]
    fn test_accepted_result_returned() {
        let guard = ValidAll::new(non_empty, even).wrap(|args: &[String], _: &Kwargs<String>| args.len() * 2);
        assert_eq!(guard.call(&["a".to_string()]), Ok(2));
    }

    #[test]
    fn test_rejected_input_skips_call() {
        let calls = AtomicUsize::new(0);
        let guard = ValidAll::new(non_empty, even).wrap(|_: &[String], _: &Kwargs<String>| {
            calls.fetch_add(1, Ordering::SeqCst);
            0
        });

        let err = guard.call(&["ok".to_string(), String::new()]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InputInvalid {
                args: vec!["ok".to_string(), String::new()]
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_kwargs_bypass_input_validation() {
        let guard = ValidAll::new(non_empty, even).wrap(|_: &[String], kwargs: &Kwargs<String>| kwargs.len() * 2);
        let mut kwargs = Kwargs::new();
        kwargs.insert("empty".to_string(), String::new());

        assert_eq!(guard.call_with_kwargs(&["x".to_string()], &kwargs), Ok(2));
    }

    #[test]
    fn test_bounded_retries_collect_results() {
        let calls = AtomicUsize::new(0);
        let guard = ValidAll::new(non_empty, even)
            .repeat(3)
            .wrap(|_: &[String], _: &Kwargs<String>| 2 * calls.fetch_add(1, Ordering::SeqCst) + 1);

        let err = guard.call(&["x".to_string()]).unwrap_err();
        assert_eq!(err, ValidationError::ResultInvalid { results: vec![3, 5, 7] });
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_bounded_retries_do_not_stop_on_accepted_retry() {
        let calls = AtomicUsize::new(0);
        let guard = ValidAll::new(non_empty, even)
            .repeat(2)
            .wrap(|_: &[String], _: &Kwargs<String>| calls.fetch_add(1, Ordering::SeqCst) + 1);

        // First call yields 1 (rejected); retries yield 2 and 3, unvalidated.
        let err = guard.call(&["x".to_string()]).unwrap_err();
        assert_eq!(err, ValidationError::ResultInvalid { results: vec![2, 3] });
    }

    #[test]
    fn test_fallback_returns_last_retry() {
        let fallbacks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fallbacks);
        let calls = AtomicUsize::new(0);
        let guard = ValidAll::new(non_empty, even)
            .repeat(2)
            .with_fallback(move || counter.fetch_add(1, Ordering::SeqCst))
            .wrap(|_: &[String], _: &Kwargs<String>| 2 * calls.fetch_add(1, Ordering::SeqCst) + 1);

        assert_eq!(guard.call(&["x".to_string()]), Ok(5));
        assert_eq!(fallbacks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_budget_rejects_without_retry() {
        let calls = AtomicUsize::new(0);
        let guard = ValidAll::new(non_empty, even).repeat(0).wrap(|_: &[String], _: &Kwargs<String>| {
            calls.fetch_add(1, Ordering::SeqCst);
            1
        });

        let err = guard.call(&["x".to_string()]).unwrap_err();
        assert_eq!(err, ValidationError::ZeroBudgetRejected { repeat_count: 0 });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_budget_ignores_fallback() {
        let guard = ValidAll::new(non_empty, even)
            .repeat(0)
            .with_fallback(|| ())
            .wrap(|_: &[String], _: &Kwargs<String>| 1);

        assert!(matches!(
            guard.call(&["x".to_string()]),
            Err(ValidationError::ZeroBudgetRejected { .. })
        ));
    }

    #[test]
    fn test_unbounded_retries_until_accepted() {
        let calls = AtomicUsize::new(0);
        let guard = ValidAll::new(non_empty, |n: &usize| *n >= 5)
            .repeat(-1)
            .wrap(|_: &[String], _: &Kwargs<String>| calls.fetch_add(1, Ordering::SeqCst) + 1);

        assert_eq!(guard.call(&["x".to_string()]), Ok(5));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_decorator_wraps_many_functions() {
        let decorator = ValidAll::new(non_empty, even).repeat(0);
        let double = decorator.wrap(|args: &[String], _: &Kwargs<String>| args.len() * 2);
        let single = decorator.wrap(|args: &[String], _: &Kwargs<String>| args.len());

        assert_eq!(double.call(&["a".to_string()]), Ok(2));
        assert!(single.call(&["a".to_string()]).is_err());
        assert_eq!(decorator.repeat_count(), 0);
    }

    #[test]
    fn test_debug_hides_callables() {
        let decorator = ValidAll::new(non_empty, even).with_fallback(|| ());
        let debug = format!("{:?}", decorator);
        assert!(debug.contains("repeat_count: 1"));
        assert!(debug.contains("<fallback>"));
    }
}
