//! Condition error types.

use thiserror::Error;

/// Errors raised while building a [`Condition`](crate::Condition).
#[derive(Debug, Error)]
pub enum ConditionError {
    /// The matcher is not a valid regular expression.
    #[error("invalid match pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The field name is neither a feed key nor a known field name.
    #[error("unknown course field: {0}")]
    UnknownField(String),
}
