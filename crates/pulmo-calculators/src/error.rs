use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculatorError {
    /// A required value is missing, malformed, non-finite, out of its
    /// plausible range, or would divide by zero.
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),
}

impl CalculatorError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CalculatorError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
