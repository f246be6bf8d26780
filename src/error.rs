//! Error types for the group and cryptosystem layers

use num_bigint::BigUint;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptoError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid slot count: {0} (must be at least 1)")]
    InvalidSlotCount(usize),

    #[error("Mismatched lengths: {0}")]
    LengthMismatch(String),

    #[error("Mismatched groups: {0}")]
    GroupMismatch(String),

    #[error("Value is not a member of the group")]
    NotAGroupMember,

    #[error("Exponent is not in the range [0, q)")]
    ExponentOutOfRange,

    #[error("Empty list provided for batch operation")]
    EmptyBatch,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No generator found in {{2, 3, 4}} for p = {p}; p is not a safe prime")]
    NoGeneratorFound { p: BigUint },

    #[error("Domain search gave up after {0} candidates")]
    IterationLimitExceeded(u64),

    #[error("Invalid security level: {0}")]
    InvalidSecurityLevel(String),

    #[error("Verification failed: {}", outermost_first(.0))]
    VerificationFailed(Vec<String>),
}

// Messages are stored most-specific first; render them as "outer: inner".
fn outermost_first(messages: &[String]) -> String {
    messages
        .iter()
        .rev()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(": ")
}
