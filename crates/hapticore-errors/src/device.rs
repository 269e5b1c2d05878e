//! Vibrator driver errors.
//!
//! Drivers report these from actuation calls. The scheduler logs and counts
//! them; they never interrupt the caller that dispatched the command. The
//! strict presence check is the one place that returns
//! [`DeviceError::UnsupportedDevice`] to a caller.

use crate::common::ErrorSeverity;

/// Vibrator and driver errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// The device has no vibration actuator
    #[error("Device has no vibration actuator")]
    UnsupportedDevice,

    /// The vibrator service could not be reached; for driver implementations
    #[error("Vibrator service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An actuation call was rejected by the driver
    #[error("Driver rejected {operation}: {message}")]
    ActuationFailed {
        /// Driver operation that failed
        operation: &'static str,
        /// Driver supplied reason
        message: String,
    },

    /// The driver does not implement a primitive effect
    #[error("Primitive {0} is not supported by the vibrator")]
    PrimitiveUnsupported(i32),
}

impl DeviceError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DeviceError::UnsupportedDevice => ErrorSeverity::Warning,
            DeviceError::ServiceUnavailable(_) => ErrorSeverity::Error,
            DeviceError::ActuationFailed { .. } => ErrorSeverity::Error,
            DeviceError::PrimitiveUnsupported(_) => ErrorSeverity::Info,
        }
    }

    /// Check if this error indicates the vibrator is unavailable.
    pub fn is_device_unavailable(&self) -> bool {
        matches!(
            self,
            DeviceError::UnsupportedDevice | DeviceError::ServiceUnavailable(_)
        )
    }

    /// Create an actuation failure.
    pub fn actuation(operation: &'static str, message: impl Into<String>) -> Self {
        DeviceError::ActuationFailed {
            operation,
            message: message.into(),
        }
    }
}
