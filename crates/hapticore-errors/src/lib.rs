//! Centralized error types for hapticore
//!
//! Every failure the haptics core can report is a typed value. Nothing here is
//! fatal to the host process: callers receive an error at dispatch time and
//! decide what to do with it.
//!
//! # Architecture
//!
//! - [`common`]: Top-level [`HapticsError`], category and severity classification
//! - [`waveform`]: Waveform and one-shot validation errors
//! - [`catalog`]: Effect name and id resolution errors
//! - [`feedback`]: View feedback routing errors
//! - [`device`]: Vibrator driver errors
//!
//! Capability gaps (no amplitude control, no vibrator at all) are deliberately
//! absent from the taxonomy of dispatch failures; the core degrades instead of
//! failing. [`DeviceError::UnsupportedDevice`] is only returned by the strict
//! `require_vibrator` presence check.
//!
//! # Example
//!
//! ```
//! use hapticore_errors::prelude::*;
//!
//! fn check_repeat(repeat: i32, len: usize) -> HapticsResult<()> {
//!     if repeat >= 0 && repeat as usize >= len {
//!         return Err(WaveformError::InvalidRepeatIndex { repeat, len }.into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_repeat(5, 3).is_err());
//! assert!(check_repeat(-1, 3).is_ok());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub mod common;
pub mod device;
pub mod feedback;
pub mod prelude;
pub mod waveform;

pub use catalog::CatalogError;
pub use common::{ErrorCategory, ErrorSeverity, HapticsError};
pub use device::DeviceError;
pub use feedback::FeedbackError;
pub use waveform::WaveformError;

/// A specialized `Result` type for haptics operations.
pub type HapticsResult<T> = std::result::Result<T, HapticsError>;
