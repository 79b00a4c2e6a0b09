//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid environment {name:?}: {reason}")]
    InvalidEnvironment { name: String, reason: &'static str },

    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),
}
