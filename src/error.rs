use std::fmt;

/// Result type for Minerva operations
pub type Result<T> = std::result::Result<T, MinervaError>;

/// Main error type for the Minerva library
#[derive(Debug, Clone)]
pub enum MinervaError {
    /// Hidden-layer activation kind that the network does not implement
    UnsupportedActivation(String),

    /// Invalid dimensions for operations
    ShapeMismatch {
        expected: String,
        actual: String,
    },

    /// Invalid parameter value
    InvalidParameter {
        name: String,
        reason: String,
    },
}

impl fmt::Display for MinervaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinervaError::UnsupportedActivation(kind) => {
                write!(f, "Unsupported hidden-layer activation '{}'", kind)
            }
            MinervaError::ShapeMismatch { expected, actual } => {
                write!(f, "Shape mismatch: expected {}, got {}", expected, actual)
            }
            MinervaError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
        }
    }
}

impl std::error::Error for MinervaError {}

// Helper functions for common error patterns
impl MinervaError {
    pub fn shape_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        MinervaError::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        MinervaError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
