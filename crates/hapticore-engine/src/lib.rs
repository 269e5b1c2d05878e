//! Haptics engine: the public facade over the hapticore crates.
//!
//! - **Haptics**: named impacts, effects, notifications, one-shots and
//!   custom waveforms on top of a single [`VibrationScheduler`]
//! - **FeedbackRouter**: UI interaction kinds gated by API level, the system
//!   accessibility toggle and per-view suppression
//! - **HapticsConfig**: YAML/JSON configuration
//! - **init_logging**: `tracing-subscriber` setup
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hapticore_engine::{Haptics, ViewHandle};
//! use hapticore_effects::FeedbackKind;
//! use hapticore_scheduler::LogVibrator;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let haptics = Haptics::new(Arc::new(LogVibrator::new()))?;
//! assert!(haptics.is_supported());
//!
//! haptics.impact("medium")?;
//! haptics.notification("success")?;
//! assert!(haptics.impact("bogus").is_err());
//!
//! let view = ViewHandle::new(1);
//! assert!(haptics.perform_haptic_feedback(view, FeedbackKind::Confirm));
//! haptics.cancel();
//! # Ok(())
//! # }
//! ```
//!
//! [`VibrationScheduler`]: hapticore_scheduler::VibrationScheduler

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod accessibility;
pub mod config;
pub mod haptics;
pub mod logging;
pub mod router;

pub mod prelude;

pub use accessibility::{AccessibilitySettings, StaticAccessibility};
pub use config::{HapticsConfig, LoggingConfig};
pub use haptics::{Haptics, HapticsBuilder};
pub use logging::init_logging;
pub use router::{FeedbackRouter, ViewHandle};
