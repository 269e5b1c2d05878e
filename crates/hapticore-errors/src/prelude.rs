//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use hapticore_errors::prelude::*;
//!
//! fn lookup(name: &str) -> HapticsResult<u8> {
//!     match name {
//!         "light" => Ok(64),
//!         other => Err(CatalogError::unknown_name(other).into()),
//!     }
//! }
//!
//! assert!(lookup("light").is_ok());
//! assert!(lookup("bogus").is_err());
//! ```

pub use crate::{
    HapticsResult,
    catalog::CatalogError,
    common::{ErrorCategory, ErrorSeverity, HapticsError},
    device::DeviceError,
    feedback::FeedbackError,
    waveform::WaveformError,
};

/// Early-return with an error when a condition does not hold.
///
/// The error is converted with `Into`, so a domain error can be returned
/// from a function whose error type is [`HapticsError`](crate::HapticsError)
/// or the domain error itself.
#[macro_export]
macro_rules! ensure {
    ($condition:expr, $error:expr) => {
        if !$condition {
            return Err($error.into());
        }
    };
}
