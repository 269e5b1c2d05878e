//! Recording vibrator driver.
//!
//! [`RecordingVibrator`] implements the scheduler's driver trait, records
//! every call in order and can be told to fail, so tests can assert exactly
//! what reached the actuator.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use hapticore_effects::{Amplitude, PrimitiveId, PrimitiveSupport};
use hapticore_errors::DeviceError;
use hapticore_scheduler::VibratorDriver;
use parking_lot::Mutex;

/// One call received by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCall {
    Actuate {
        amplitude: Amplitude,
        duration: Duration,
    },
    Primitive(PrimitiveId),
    Stop,
}

impl DriverCall {
    pub fn is_actuation(&self) -> bool {
        !matches!(self, DriverCall::Stop)
    }
}

pub struct RecordingVibrator {
    vibrator_ids: Vec<u32>,
    legacy_present: bool,
    amplitude_control: bool,
    primitives: PrimitiveSupport,
    api_level: u32,
    fail_calls: AtomicBool,
    probes: AtomicUsize,
    calls: Mutex<Vec<DriverCall>>,
}

impl RecordingVibrator {
    /// One vibrator with amplitude control and every primitive, API 34.
    pub fn new() -> Self {
        Self {
            vibrator_ids: vec![0],
            legacy_present: true,
            amplitude_control: true,
            primitives: PrimitiveSupport::all(),
            api_level: 34,
            fail_calls: AtomicBool::new(false),
            probes: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A device that reports no actuator on either probing path.
    pub fn absent() -> Self {
        Self {
            vibrator_ids: Vec::new(),
            legacy_present: false,
            ..Self::new()
        }
    }

    /// A device without a vibrator manager that answers only the legacy
    /// presence check.
    pub fn legacy_only() -> Self {
        Self {
            vibrator_ids: Vec::new(),
            legacy_present: true,
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

    /// Make every following driver call fail.
    pub fn set_failing(&self, failing: bool) {
        self.fail_calls.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.lock().clone()
    }

    /// Drain recorded calls.
    pub fn take_calls(&self) -> Vec<DriverCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    pub fn actuations(&self) -> Vec<DriverCall> {
        self.calls().into_iter().filter(DriverCall::is_actuation).collect()
    }

    pub fn stop_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, DriverCall::Stop))
            .count()
    }

    /// Number of times the vibrator id list was queried.
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    fn record(&self, call: DriverCall) -> Result<(), DeviceError> {
        if self.fail_calls.load(Ordering::SeqCst) {
            return Err(DeviceError::actuation("mock", "injected failure"));
        }
        self.calls.lock().push(call);
        Ok(())
    }
}

impl Default for RecordingVibrator {
    fn default() -> Self {
        Self::new()
    }
}

impl VibratorDriver for RecordingVibrator {
    fn vibrator_ids(&self) -> Vec<u32> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.vibrator_ids.clone()
    }

    fn has_vibrator(&self) -> bool {
        self.legacy_present
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
        self.record(DriverCall::Actuate {
            amplitude,
            duration,
        })
    }

    fn play_primitive(&self, primitive: PrimitiveId) -> Result<(), DeviceError> {
        if !self.primitives.contains(primitive) {
            return Err(DeviceError::PrimitiveUnsupported(primitive.raw()));
        }
        self.record(DriverCall::Primitive(primitive))
    }

    fn stop(&self) -> Result<(), DeviceError> {
        self.record(DriverCall::Stop)
    }
}
