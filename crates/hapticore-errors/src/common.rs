//! Common error types and utilities shared by all hapticore crates.
//!
//! The top-level error enum wraps every domain error and classifies it by
//! category and severity.

use core::fmt;

use crate::{CatalogError, DeviceError, FeedbackError, WaveformError};

/// Top-level error type that can wrap all hapticore sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum HapticsError {
    /// Waveform or one-shot validation failed
    #[error("Waveform error: {0}")]
    Waveform(#[from] WaveformError),

    /// Effect name or id could not be resolved
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// View feedback could not be performed
    #[error("Feedback error: {0}")]
    Feedback(#[from] FeedbackError),

    /// Vibrator driver errors
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// I/O errors (configuration files)
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No async runtime available to drive playback
    #[error("Runtime unavailable: {0}")]
    Runtime(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl HapticsError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            HapticsError::Waveform(_) => ErrorCategory::Waveform,
            HapticsError::Catalog(_) => ErrorCategory::Catalog,
            HapticsError::Feedback(_) => ErrorCategory::Feedback,
            HapticsError::Device(_) => ErrorCategory::Device,
            HapticsError::Io(_) => ErrorCategory::IO,
            HapticsError::Config(_) => ErrorCategory::Config,
            HapticsError::Runtime(_) => ErrorCategory::Runtime,
            HapticsError::Other(_) => ErrorCategory::Other,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HapticsError::Waveform(e) => e.severity(),
            HapticsError::Catalog(e) => e.severity(),
            HapticsError::Feedback(e) => e.severity(),
            HapticsError::Device(e) => e.severity(),
            HapticsError::Io(_) => ErrorSeverity::Error,
            HapticsError::Config(_) => ErrorSeverity::Error,
            HapticsError::Runtime(_) => ErrorSeverity::Critical,
            HapticsError::Other(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// True for errors raised while validating caller input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            HapticsError::Waveform(_) | HapticsError::Catalog(_)
        )
    }

    /// Create a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        HapticsError::Config(msg.into())
    }

    /// Create a runtime error with a message.
    pub fn runtime(msg: impl Into<String>) -> Self {
        HapticsError::Runtime(msg.into())
    }

    /// Create a generic error with a message.
    pub fn other(msg: impl Into<String>) -> Self {
        HapticsError::Other(msg.into())
    }
}

impl From<std::io::Error> for HapticsError {
    fn from(e: std::io::Error) -> Self {
        HapticsError::Io(e)
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Waveform and one-shot validation
    Waveform = 0,
    /// Effect catalog resolution
    Catalog = 1,
    /// View feedback routing
    Feedback = 2,
    /// Vibrator driver
    Device = 3,
    /// Configuration errors
    Config = 4,
    /// I/O errors
    IO = 5,
    /// Async runtime errors
    Runtime = 6,
    /// Other errors
    Other = 255,
}

impl ErrorCategory {
    /// Stable lowercase name, used in machine-readable output.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Waveform => "waveform",
            ErrorCategory::Catalog => "catalog",
            ErrorCategory::Feedback => "feedback",
            ErrorCategory::Device => "device",
            ErrorCategory::Config => "config",
            ErrorCategory::IO => "io",
            ErrorCategory::Runtime => "runtime",
            ErrorCategory::Other => "other",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the haptics stack cannot operate
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorSeverity::Info => "info",
            ErrorSeverity::Warning => "warn",
            ErrorSeverity::Error => "error",
            ErrorSeverity::Critical => "critical",
        };
        f.write_str(label)
    }
}
