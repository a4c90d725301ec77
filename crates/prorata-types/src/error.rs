use thiserror::Error;

/// Error raised when a calculation is asked to run on input it cannot accept.
///
/// There is no transient failure mode in the calculator: every error is a
/// precondition violation and surfaces synchronously, never as a partially
/// computed result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProrationError {
    /// A scalar input or configuration value is out of range.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field, e.g. `area` or `move_in_month`.
        field: &'static str,
        /// Human readable explanation of the violated bound.
        reason: String,
    },
}

impl ProrationError {
    /// Shorthand for building an [`ProrationError::InvalidInput`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput { field, reason: reason.into() }
    }

    /// The field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }
}
