//! Haptic effect definitions and waveform validation
//!
//! This crate holds the pure, device-independent half of the haptics stack:
//! intensity levels, one-shot commands, the waveform validator, the logical
//! effect catalog and UI feedback kinds. Nothing here touches a driver.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod amplitude;
pub mod catalog;
pub mod constants;
pub mod feedback;
pub mod waveform;

pub use amplitude::{Amplitude, OneShotCommand};
pub use catalog::{
    EffectCatalog, EffectId, ImpactStyle, NotificationKind, PrimitiveCommand, PrimitiveId,
    PrimitiveSupport,
};
pub use constants::*;
pub use feedback::{FeedbackAction, FeedbackKind};
pub use waveform::{
    Repeat, Segment, SegmentLevel, WaveformDescriptor, WaveformRequest, WaveformValidator,
};
