//! Vibration session scheduling over a single hardware channel.
//!
//! This crate drives a [`VibratorDriver`] on behalf of callers. It includes:
//!
//! - **CapabilityProbe**: lazily probes and caches what the vibrator can do
//! - **VibrationScheduler**: owns the single active session, supersedes and
//!   cancels, loops waveforms from their repeat index
//! - **LogVibrator**: a simulated driver that logs every call
//!
//! # Session guarantees
//!
//! - At most one session actuates at any instant
//! - A new dispatch stops the previous session before starting
//! - `cancel()` stops the actuator before returning and no segment of the
//!   cancelled session is played afterwards
//! - Dropping the scheduler cancels the active session
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hapticore_effects::{Amplitude, OneShotCommand};
//! use hapticore_scheduler::{CapabilityProbe, LogVibrator, VibrationScheduler};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let probe = CapabilityProbe::new(Arc::new(LogVibrator::new()));
//! let scheduler = VibrationScheduler::new(Arc::clone(probe.driver()), probe.capability());
//!
//! let session = scheduler.dispatch_one_shot(OneShotCommand::new(80, Amplitude::HEAVY)?)?;
//! assert_eq!(scheduler.current_session(), Some(session));
//!
//! scheduler.cancel();
//! assert!(!scheduler.is_playing());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(unused_must_use)]

pub mod capability;
pub mod driver;
pub mod scheduler;
pub mod session;

pub mod prelude;

pub use capability::{Capability, CapabilityProbe};
pub use driver::{LogVibrator, VibratorDriver};
pub use scheduler::{SchedulerConfig, VibrationScheduler};
pub use session::{CommandKind, SchedulerStats, SessionHandle, SessionState, StatsSnapshot};
