//! Errors raised while interpreting user selections.

use thiserror::Error;

/// A city, month or day answer that is not in the accepted set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown city '{0}'")]
    UnknownCity(String),
    #[error("unknown month '{0}' (expected all or january through june)")]
    UnknownMonth(String),
    #[error("unknown day '{0}' (expected all or monday through sunday)")]
    UnknownDay(String),
}
