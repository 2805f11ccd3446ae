//! Error types for health factor projection

use thiserror::Error;

/// Errors a projection can fail with.
///
/// Projections are pure arithmetic, so the only failures are inputs outside
/// the domain of the formulas and decimal overflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Ratio {value} is outside [0, 1]")]
    RatioOutOfRange { value: String },

    #[error("Decimal overflow while computing {operation}")]
    Overflow { operation: &'static str },
}

/// Result type alias for projection operations
pub type Result<T> = std::result::Result<T, ProjectionError>;

impl ProjectionError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::RatioOutOfRange { .. } => "ratio_out_of_range",
            Self::Overflow { .. } => "overflow",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } | Self::RatioOutOfRange { .. } => 400,
            Self::Overflow { .. } => 422,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_error_codes() {
        let err = ProjectionError::invalid_input("negative debt");
        assert_eq!(err.error_code(), "invalid_input");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Invalid input: negative debt");

        let err = ProjectionError::Overflow {
            operation: "weighted collateral",
        };
        assert_eq!(err.error_code(), "overflow");
        assert_eq!(err.status_code(), 422);
    }
}
