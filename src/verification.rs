//! Fail-fast verification with accumulated error context
//!
//! A [`VerificationResult`] is either a success or a list of messages
//! ordered most-specific first. Chains stop at the first failure:
//!
//! ```rust
//! use gq_elgamal::verification::{check, verify};
//!
//! let result = verify(2 + 2 == 4, "arithmetic is broken")
//!     .and_then(|| check(|| "abc".len() == 4, "length must be 4"))
//!     .and_then(|| verify(false, "never evaluated"))
//!     .with_context("input validation");
//!
//! assert!(!result.is_verified());
//! assert_eq!(result.error_messages(), ["length must be 4", "input validation"]);
//! ```

use std::fmt;

use crate::error::{CryptoError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct VerificationResult {
    errors: Vec<String>,
}

impl VerificationResult {
    pub fn success() -> Self {
        VerificationResult { errors: Vec::new() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        VerificationResult {
            errors: vec![message.into()],
        }
    }

    pub fn is_verified(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error messages, most specific first. Empty when verified.
    pub fn error_messages(&self) -> &[String] {
        &self.errors
    }

    /// Run `next` only if this result is a success
    pub fn and_then<F>(self, next: F) -> Self
    where
        F: FnOnce() -> VerificationResult,
    {
        if self.is_verified() {
            next()
        } else {
            self
        }
    }

    /// Append an outer context message to a failure; successes are unchanged
    pub fn with_context(mut self, message: impl Into<String>) -> Self {
        if !self.is_verified() {
            self.errors.push(message.into());
        }
        self
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_verified() {
            Ok(())
        } else {
            Err(CryptoError::VerificationFailed(self.errors))
        }
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_verified() {
            write!(f, "verified")
        } else {
            write!(f, "{}", CryptoError::VerificationFailed(self.errors.clone()))
        }
    }
}

/// An eagerly evaluated predicate
pub fn verify(condition: bool, message: impl Into<String>) -> VerificationResult {
    if condition {
        VerificationResult::success()
    } else {
        VerificationResult::failure(message)
    }
}

/// A lazily evaluated predicate
pub fn check<F>(predicate: F, message: impl Into<String>) -> VerificationResult
where
    F: FnOnce() -> bool,
{
    verify(predicate(), message)
}

/// Conjunction over a sequence of results, stopping at the first failure
pub fn all<I, F>(checks: I) -> VerificationResult
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> VerificationResult,
{
    for next in checks {
        let result = next();
        if !result.is_verified() {
            return result;
        }
    }
    VerificationResult::success()
}
