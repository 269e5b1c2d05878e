//! Effect catalog resolution errors.

use crate::common::ErrorSeverity;

/// Errors raised when a logical effect cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A string alias is not in the fixed alias table
    #[error("Unknown effect name '{0}'")]
    UnknownEffectName(String),

    /// An integer effect constant does not name any effect
    #[error("Unknown effect id {0}")]
    UnknownEffectId(i32),
}

impl CatalogError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Create an unknown-name error.
    pub fn unknown_name(name: impl Into<String>) -> Self {
        CatalogError::UnknownEffectName(name.into())
    }
}
