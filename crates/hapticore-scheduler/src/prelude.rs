//! Prelude module for common scheduler types.

pub use crate::capability::{Capability, CapabilityProbe};
pub use crate::driver::{LogVibrator, VibratorDriver};
pub use crate::scheduler::{SchedulerConfig, VibrationScheduler};
pub use crate::session::{CommandKind, SessionHandle, SessionState, StatsSnapshot};
