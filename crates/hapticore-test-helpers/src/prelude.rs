//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use hapticore_test_helpers::prelude::*;
//! ```

pub use crate::must::{must, must_some};

#[cfg(feature = "mock")]
pub use crate::mock::{DriverCall, RecordingVibrator};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
