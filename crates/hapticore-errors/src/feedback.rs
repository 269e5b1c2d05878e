//! View feedback routing errors.
//!
//! The router's boolean entry point swallows these; the fallible entry point
//! reports them so callers can tell why nothing was played.

use crate::common::ErrorSeverity;

/// Reasons a feedback request produced no vibration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackError {
    /// The feedback kind needs a newer platform API level
    #[error("Feedback kind {kind} requires API level {required}, running {actual}")]
    UnsupportedFeedbackKind {
        /// Feedback kind name
        kind: &'static str,
        /// Minimum API level required
        required: u32,
        /// API level of the running platform
        actual: u32,
    },

    /// An integer constant that names no feedback kind
    #[error("Unknown feedback kind {0}")]
    UnknownFeedbackKind(i32),

    /// The system accessibility setting disables haptic feedback
    #[error("Haptic feedback is disabled by system settings")]
    DisabledBySystem,

    /// The view opted out of haptic feedback
    #[error("Haptic feedback is disabled for view {0}")]
    DisabledForView(u64),
}

impl FeedbackError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FeedbackError::UnsupportedFeedbackKind { .. } => ErrorSeverity::Warning,
            FeedbackError::UnknownFeedbackKind(_) => ErrorSeverity::Error,
            FeedbackError::DisabledBySystem | FeedbackError::DisabledForView(_) => {
                ErrorSeverity::Info
            }
        }
    }

    /// True when feedback was suppressed by a setting rather than by a
    /// platform gap.
    pub fn is_suppression(&self) -> bool {
        matches!(
            self,
            FeedbackError::DisabledBySystem | FeedbackError::DisabledForView(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kind_display() {
        let err = FeedbackError::UnsupportedFeedbackKind {
            kind: "ToggleOn",
            required: 34,
            actual: 31,
        };
        let msg = err.to_string();
        assert!(msg.contains("ToggleOn"));
        assert!(msg.contains("34"));
        assert!(msg.contains("31"));
    }

    #[test]
    fn test_suppression_classification() {
        assert!(FeedbackError::DisabledBySystem.is_suppression());
        assert!(FeedbackError::DisabledForView(7).is_suppression());
        assert!(!FeedbackError::UnknownFeedbackKind(99).is_suppression());
        assert_eq!(
            FeedbackError::DisabledBySystem.severity(),
            ErrorSeverity::Info
        );
    }
}
