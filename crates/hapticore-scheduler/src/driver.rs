//! Vibrator driver abstraction
//!
//! The scheduler talks to the hardware exclusively through [`VibratorDriver`].
//! Calls are synchronous and short; the scheduler owns all timing.

use core::time::Duration;

use hapticore_effects::{Amplitude, MIN_API_LEVEL, PrimitiveId, PrimitiveSupport};
use hapticore_errors::DeviceError;
use tracing::info;

/// Platform vibration motor.
///
/// Implementations must be `Send + Sync`: the scheduler drives the
/// driver from tokio tasks on any worker thread.
pub trait VibratorDriver: Send + Sync {
    /// Physical vibrator ids exposed by a multi-vibrator manager.
    ///
    /// An empty list means the driver has no manager and presence is
    /// answered by [`has_vibrator`](VibratorDriver::has_vibrator).
    fn vibrator_ids(&self) -> Vec<u32> {
        Vec::new()
    }

    /// Legacy single-vibrator presence check.
    fn has_vibrator(&self) -> bool;

    fn has_amplitude_control(&self) -> bool;

    /// Primitives the driver plays natively.
    fn supported_primitives(&self) -> PrimitiveSupport {
        PrimitiveSupport::none()
    }

    /// Platform API level of the running system.
    fn api_level(&self) -> u32 {
        MIN_API_LEVEL
    }

    /// Run the motor at `amplitude` for at most `duration`.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver rejects the actuation.
    fn actuate(&self, amplitude: Amplitude, duration: Duration) -> Result<(), DeviceError>;

    /// Play a native primitive.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::PrimitiveUnsupported`] when the primitive is
    /// not available.
    fn play_primitive(&self, primitive: PrimitiveId) -> Result<(), DeviceError>;

    /// Stop the motor immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver rejects the stop request.
    fn stop(&self) -> Result<(), DeviceError>;
}

/// Driver that performs no hardware I/O and logs every call.
///
/// # Examples
///
/// ```
/// use hapticore_scheduler::{LogVibrator, VibratorDriver};
///
/// let driver = LogVibrator::new().with_amplitude_control(false);
/// assert!(driver.has_vibrator());
/// assert!(!driver.has_amplitude_control());
/// ```
#[derive(Debug, Clone)]
pub struct LogVibrator {
    vibrator_ids: Vec<u32>,
    amplitude_control: bool,
    primitives: PrimitiveSupport,
    api_level: u32,
}

impl Default for LogVibrator {
    fn default() -> Self {
        Self::new()
    }
}

impl LogVibrator {
    /// A single vibrator with amplitude control and every primitive.
    pub fn new() -> Self {
        Self {
            vibrator_ids: vec![0],
            amplitude_control: true,
            primitives: PrimitiveSupport::all(),
            api_level: 34,
        }
    }

    /// A device without any actuator.
    pub fn absent() -> Self {
        Self {
            vibrator_ids: Vec::new(),
            ..Self::new()
        }
    }

    pub fn with_vibrator_ids(mut self, ids: Vec<u32>) -> Self {
        self.vibrator_ids = ids;
        self
    }

    pub fn with_amplitude_control(mut self, enabled: bool) -> Self {
        self.amplitude_control = enabled;
        self
    }

    pub fn with_primitives(mut self, primitives: PrimitiveSupport) -> Self {
        self.primitives = primitives;
        self
    }

    pub fn with_api_level(mut self, api_level: u32) -> Self {
        self.api_level = api_level;
        self
    }
}

impl VibratorDriver for LogVibrator {
    fn vibrator_ids(&self) -> Vec<u32> {
        self.vibrator_ids.clone()
    }

    fn has_vibrator(&self) -> bool {
        !self.vibrator_ids.is_empty()
    }

    fn has_amplitude_control(&self) -> bool {
        self.amplitude_control
    }

    fn supported_primitives(&self) -> PrimitiveSupport {
        self.primitives
    }

    fn api_level(&self) -> u32 {
        self.api_level
    }

    fn actuate(&self, amplitude: Amplitude, duration: Duration) -> Result<(), DeviceError> {
        info!(%amplitude, duration_ms = duration.as_millis(), "vibrate");
        Ok(())
    }

    fn play_primitive(&self, primitive: PrimitiveId) -> Result<(), DeviceError> {
        if !self.primitives.contains(primitive) {
            return Err(DeviceError::PrimitiveUnsupported(primitive.raw()));
        }
        info!(%primitive, "primitive");
        Ok(())
    }

    fn stop(&self) -> Result<(), DeviceError> {
        info!("stop");
        Ok(())
    }
}
