use thiserror::Error;

/// Reasons a submitted trip is rejected before it reaches the encoder.
///
/// Every variant names the form field and the constraint it violated so the
/// Predict view can report it verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TripError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a number (got '{raw}')")]
    NotANumber { field: &'static str, raw: String },

    #[error("{field} must be between {min:.1} and {max:.1} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be at least {min:.1} (got {value})")]
    BelowMinimum {
        field: &'static str,
        value: f64,
        min: f64,
    },

    #[error("{field} must be one of {allowed} (got '{value}')")]
    UnknownCategory {
        field: &'static str,
        value: String,
        allowed: String,
    },
}

/// Result type for trip validation
pub type TripResult<T> = Result<T, TripError>;

impl TripError {
    /// Form field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            TripError::Missing { field }
            | TripError::NotANumber { field, .. }
            | TripError::OutOfRange { field, .. }
            | TripError::BelowMinimum { field, .. }
            | TripError::UnknownCategory { field, .. } => field,
        }
    }
}
