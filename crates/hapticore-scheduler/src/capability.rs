//! Device capability probing

use std::sync::{Arc, OnceLock};

use hapticore_effects::{PrimitiveId, PrimitiveSupport};
use hapticore_errors::DeviceError;
use serde::Serialize;
use tracing::debug;

use crate::driver::VibratorDriver;

/// Immutable snapshot of what the vibrator can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capability {
    pub has_vibrator: bool,
    pub has_amplitude_control: bool,
    pub api_level: u32,
    #[serde(skip)]
    pub primitives: PrimitiveSupport,
}

impl Capability {
    /// Capability of a device with no actuator.
    pub fn none(api_level: u32) -> Self {
        Self {
            has_vibrator: false,
            has_amplitude_control: false,
            api_level,
            primitives: PrimitiveSupport::none(),
        }
    }

    pub fn supports_primitive(&self, primitive: PrimitiveId) -> bool {
        self.has_vibrator && self.primitives.contains(primitive)
    }
}

/// Lazily queries the driver once and caches the result for the lifetime
/// of the probe.
///
/// Presence is true if the driver reports any vibrator id; a driver without
/// a multi-vibrator manager falls back to its legacy presence check.
pub struct CapabilityProbe {
    driver: Arc<dyn VibratorDriver>,
    cached: OnceLock<Capability>,
}

impl CapabilityProbe {
    pub fn new(driver: Arc<dyn VibratorDriver>) -> Self {
        Self {
            driver,
            cached: OnceLock::new(),
        }
    }

    pub fn capability(&self) -> Capability {
        *self.cached.get_or_init(|| self.query())
    }

    pub fn supports_vibration(&self) -> bool {
        self.capability().has_vibrator
    }

    /// Strict presence check for callers that cannot degrade silently.
    ///
    /// # Errors
    ///
    /// [`DeviceError::UnsupportedDevice`] when no vibrator was found.
    pub fn require_vibrator(&self) -> Result<Capability, DeviceError> {
        let capability = self.capability();
        if !capability.has_vibrator {
            return Err(DeviceError::UnsupportedDevice);
        }
        Ok(capability)
    }

    /// False also when there is no vibrator at all.
    pub fn supports_amplitude_control(&self) -> bool {
        self.capability().has_amplitude_control
    }

    pub fn supports_primitive(&self, primitive: PrimitiveId) -> bool {
        self.capability().supports_primitive(primitive)
    }

    pub fn api_level(&self) -> u32 {
        self.capability().api_level
    }

    pub fn driver(&self) -> &Arc<dyn VibratorDriver> {
        &self.driver
    }

    fn query(&self) -> Capability {
        let ids = self.driver.vibrator_ids();
        let has_vibrator = !ids.is_empty() || self.driver.has_vibrator();
        let api_level = self.driver.api_level();
        if !has_vibrator {
            debug!(api_level, "no vibrator present");
            return Capability::none(api_level);
        }
        let capability = Capability {
            has_vibrator,
            has_amplitude_control: self.driver.has_amplitude_control(),
            api_level,
            primitives: self.driver.supported_primitives(),
        };
        debug!(
            vibrators = ids.len(),
            amplitude_control = capability.has_amplitude_control,
            api_level,
            "probed vibrator capability"
        );
        capability
    }
}

impl core::fmt::Debug for CapabilityProbe {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CapabilityProbe")
            .field("cached", &self.cached.get())
            .finish_non_exhaustive()
    }
}
