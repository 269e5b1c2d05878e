//! Vibration intensity and the one-shot command

use core::fmt;
use core::num::NonZeroU8;
use core::time::Duration;

use hapticore_errors::WaveformError;
use serde::{Deserialize, Serialize};

use crate::constants::{AMPLITUDE_DEFAULT, AMPLITUDE_MAX, AMPLITUDE_MIN};

/// Vibration intensity: a level in `[1, 255]` or the device default.
///
/// # Examples
///
/// ```
/// use hapticore_effects::Amplitude;
///
/// let light = Amplitude::from_raw(64).unwrap();
/// assert_eq!(light.raw(), 64);
///
/// // -1 is the "let the device decide" sentinel
/// assert_eq!(Amplitude::from_raw(-1).unwrap(), Amplitude::Default);
///
/// // 0 is not a valid one-shot intensity
/// assert!(Amplitude::from_raw(0).is_err());
///
/// // Devices without amplitude control always play at default intensity
/// assert_eq!(light.clamp_for(false), Amplitude::Default);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Amplitude {
    /// Device default intensity
    #[default]
    Default,
    /// Explicit intensity level
    Level(NonZeroU8),
}

impl Amplitude {
    /// Soft preset (64)
    pub const LIGHT: Amplitude = Amplitude::Level(NonZeroU8::MIN.saturating_add(63));
    /// Medium preset (128)
    pub const MEDIUM: Amplitude = Amplitude::Level(NonZeroU8::MIN.saturating_add(127));
    /// Strong preset (255)
    pub const HEAVY: Amplitude = Amplitude::Level(NonZeroU8::MAX);
    /// Strongest level
    pub const MAX: Amplitude = Amplitude::Level(NonZeroU8::MAX);

    /// Explicit level, `None` for 0.
    pub fn level(level: u8) -> Option<Self> {
        NonZeroU8::new(level).map(Amplitude::Level)
    }

    /// Parse an integer constant: `-1` is the default sentinel, `1..=255`
    /// an explicit level.
    pub fn from_raw(raw: i32) -> Result<Self, WaveformError> {
        if raw == AMPLITUDE_DEFAULT {
            return Ok(Amplitude::Default);
        }
        if !(AMPLITUDE_MIN..=AMPLITUDE_MAX).contains(&raw) {
            return Err(WaveformError::InvalidAmplitude(raw));
        }
        u8::try_from(raw)
            .ok()
            .and_then(Self::level)
            .ok_or(WaveformError::InvalidAmplitude(raw))
    }

    /// Integer form, `-1` for [`Amplitude::Default`].
    pub fn raw(self) -> i32 {
        match self {
            Amplitude::Default => AMPLITUDE_DEFAULT,
            Amplitude::Level(level) => i32::from(level.get()),
        }
    }

    /// Degrade to [`Amplitude::Default`] on devices without amplitude control.
    #[must_use]
    pub fn clamp_for(self, has_amplitude_control: bool) -> Self {
        if has_amplitude_control {
            self
        } else {
            Amplitude::Default
        }
    }

    pub fn is_default(self) -> bool {
        matches!(self, Amplitude::Default)
    }
}

impl fmt::Display for Amplitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amplitude::Default => write!(f, "default"),
            Amplitude::Level(level) => write!(f, "{level}"),
        }
    }
}

/// A single pulse of fixed duration and intensity.
///
/// # Examples
///
/// ```
/// use hapticore_effects::{Amplitude, OneShotCommand};
///
/// let cmd = OneShotCommand::new(80, Amplitude::HEAVY).unwrap();
/// assert_eq!(cmd.duration_ms(), 80);
///
/// assert!(OneShotCommand::new(0, Amplitude::Default).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OneShotRepr")]
pub struct OneShotCommand {
    duration_ms: u32,
    amplitude: Amplitude,
}

impl OneShotCommand {
    /// Build a one-shot; the duration must be greater than zero.
    pub fn new(duration_ms: u32, amplitude: Amplitude) -> Result<Self, WaveformError> {
        if duration_ms == 0 {
            return Err(WaveformError::InvalidDuration);
        }
        Ok(Self {
            duration_ms,
            amplitude,
        })
    }

    /// Build a one-shot from integer arguments as exposed to callers.
    pub fn from_raw(duration_ms: u32, amplitude: i32) -> Result<Self, WaveformError> {
        Self::new(duration_ms, Amplitude::from_raw(amplitude)?)
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }

    pub fn amplitude(&self) -> Amplitude {
        self.amplitude
    }

    /// Same pulse with the amplitude degraded for the given device.
    #[must_use]
    pub fn clamp_for(self, has_amplitude_control: bool) -> Self {
        Self {
            amplitude: self.amplitude.clamp_for(has_amplitude_control),
            ..self
        }
    }
}

#[derive(Deserialize)]
struct OneShotRepr {
    duration_ms: u32,
    #[serde(default)]
    amplitude: Amplitude,
}

impl TryFrom<OneShotRepr> for OneShotCommand {
    type Error = WaveformError;

    fn try_from(repr: OneShotRepr) -> Result<Self, Self::Error> {
        OneShotCommand::new(repr.duration_ms, repr.amplitude)
    }
}
