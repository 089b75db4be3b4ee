// ============================================================================
// Domain Errors
// Error types for context construction and scalar conversion
// ============================================================================

use std::fmt;

/// Errors raised by the precision domain.
///
/// Every failure is a caller-input problem surfaced at the point of misuse;
/// nothing is retried and no partially built scalar escapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainError {
    /// Contradictory or invalid precision configuration
    Config(String),
    /// A value cannot be turned into a scalar of this context
    Conversion(String),
}

impl DomainError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        DomainError::Config(msg.into())
    }

    pub(crate) fn conversion(msg: impl Into<String>) -> Self {
        DomainError::Conversion(msg.into())
    }

    /// Returns `true` for configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, DomainError::Config(_))
    }

    /// Returns `true` for conversion errors.
    pub fn is_conversion(&self) -> bool {
        matches!(self, DomainError::Conversion(_))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Config(msg) => write!(f, "invalid precision configuration: {}", msg),
            DomainError::Conversion(msg) => write!(f, "conversion failed: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
