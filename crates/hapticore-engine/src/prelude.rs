//! Prelude module for the haptics facade.

pub use crate::accessibility::{AccessibilitySettings, StaticAccessibility};
pub use crate::config::HapticsConfig;
pub use crate::haptics::Haptics;
pub use crate::router::{FeedbackRouter, ViewHandle};

pub use hapticore_effects::{EffectId, FeedbackKind, WaveformRequest};
pub use hapticore_errors::{HapticsError, HapticsResult};
pub use hapticore_scheduler::{SessionHandle, SessionState};
