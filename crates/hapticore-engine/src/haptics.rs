//! The haptics facade
//!
//! [`Haptics`] wires a driver into the probe, catalog, scheduler and feedback
//! router and exposes the logical operations callers use: named impacts,
//! effects, notifications, one-shots, waveforms and view feedback.
//!
//! A device without a vibrator is not an error. Every operation still
//! validates its input and returns a detached [`SessionHandle`].

use std::sync::Arc;

use hapticore_effects::{
    EffectCatalog, EffectId, FeedbackKind, OneShotCommand, WaveformRequest, WaveformValidator,
};
use hapticore_errors::HapticsResult;
use hapticore_scheduler::{
    Capability, CapabilityProbe, SchedulerConfig, SessionHandle, SessionState, StatsSnapshot,
    VibrationScheduler, VibratorDriver,
};
use tracing::{debug, info};

use crate::accessibility::{AccessibilitySettings, StaticAccessibility};
use crate::config::HapticsConfig;
use crate::router::{FeedbackRouter, ViewHandle};

pub struct HapticsBuilder {
    driver: Arc<dyn VibratorDriver>,
    config: HapticsConfig,
    accessibility: Arc<dyn AccessibilitySettings>,
}

impl HapticsBuilder {
    #[must_use]
    pub fn config(mut self, config: HapticsConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn accessibility(mut self, accessibility: Arc<dyn AccessibilitySettings>) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Probe the device and assemble the facade.
    ///
    /// # Errors
    ///
    /// Returns [`hapticore_errors::HapticsError::Config`] when the
    /// configuration does not validate.
    pub fn build(self) -> HapticsResult<Haptics> {
        self.config.validate()?;

        let probe = CapabilityProbe::new(self.driver);
        let capability = probe.capability();

        let catalog = EffectCatalog::new(capability.primitives, capability.has_amplitude_control)
            .with_forced_fallback(self.config.catalog.force_waveform_fallback);
        let validator = WaveformValidator::new(capability.has_amplitude_control);
        let scheduler = Arc::new(VibrationScheduler::with_config(
            Arc::clone(probe.driver()),
            capability,
            SchedulerConfig {
                primitive_duration: self.config.scheduler.primitive_duration(),
            },
        ));
        let router = FeedbackRouter::new(
            Arc::clone(&scheduler),
            catalog.clone(),
            self.accessibility,
        )
        .with_respect_accessibility(self.config.feedback.respect_accessibility);

        info!(
            has_vibrator = capability.has_vibrator,
            has_amplitude_control = capability.has_amplitude_control,
            api_level = capability.api_level,
            "haptics initialized"
        );

        Ok(Haptics {
            probe,
            catalog,
            validator,
            scheduler,
            router,
        })
    }
}

pub struct Haptics {
    probe: CapabilityProbe,
    catalog: EffectCatalog,
    validator: WaveformValidator,
    scheduler: Arc<VibrationScheduler>,
    router: FeedbackRouter,
}

impl Haptics {
    pub fn builder(driver: Arc<dyn VibratorDriver>) -> HapticsBuilder {
        HapticsBuilder {
            driver,
            config: HapticsConfig::default(),
            accessibility: Arc::new(StaticAccessibility::enabled()),
        }
    }

    /// Facade with the default configuration and accessibility enabled.
    ///
    /// # Errors
    ///
    /// See [`HapticsBuilder::build`].
    pub fn new(driver: Arc<dyn VibratorDriver>) -> HapticsResult<Self> {
        Self::builder(driver).build()
    }

    pub fn is_supported(&self) -> bool {
        self.probe.supports_vibration()
    }

    /// Like [`Haptics::is_supported`], but a missing vibrator is an error.
    pub fn require_vibrator(&self) -> HapticsResult<Capability> {
        Ok(self.probe.require_vibrator()?)
    }

    pub fn has_amplitude_control(&self) -> bool {
        self.probe.supports_amplitude_control()
    }

    pub fn capability(&self) -> Capability {
        self.probe.capability()
    }

    /// Play an impact by tier name: `light`, `medium` or `heavy`.
    ///
    /// # Errors
    ///
    /// Returns a catalog error for an unknown name, or a scheduler error.
    pub fn impact(&self, style: &str) -> HapticsResult<SessionHandle> {
        let command = self.catalog.resolve_name(style)?;
        debug!(style, effect = %command.effect(), "impact");
        self.scheduler.dispatch_effect(command)
    }

    /// # Errors
    ///
    /// Returns a scheduler error when dispatch fails.
    pub fn effect(&self, effect: EffectId) -> HapticsResult<SessionHandle> {
        self.scheduler.dispatch_effect(self.catalog.resolve(effect))
    }

    /// Play an effect by its integer constant.
    ///
    /// # Errors
    ///
    /// Returns a catalog error for an unknown id, or a scheduler error.
    pub fn effect_raw(&self, raw: i32) -> HapticsResult<SessionHandle> {
        let command = self.catalog.resolve_raw(raw)?;
        self.scheduler.dispatch_effect(command)
    }

    /// Selection change tick.
    ///
    /// # Errors
    ///
    /// Returns a scheduler error when dispatch fails.
    pub fn selection(&self) -> HapticsResult<SessionHandle> {
        self.effect(EffectId::Tick)
    }

    /// # Errors
    ///
    /// Returns a scheduler error when dispatch fails.
    pub fn double_click(&self) -> HapticsResult<SessionHandle> {
        self.effect(EffectId::DoubleClick)
    }

    /// Play a notification pattern: `success`, `warning` or `error`.
    ///
    /// # Errors
    ///
    /// Returns a catalog error for an unknown category, or a scheduler error.
    pub fn notification(&self, category: &str) -> HapticsResult<SessionHandle> {
        let command = self.catalog.resolve_notification(category)?;
        self.scheduler.dispatch_effect(command)
    }

    /// Vibrate once. `amplitude` is 1..=255 or `AMPLITUDE_DEFAULT`.
    ///
    /// # Errors
    ///
    /// Returns a waveform error for a zero duration or out of range
    /// amplitude, or a scheduler error.
    pub fn one_shot(&self, duration_ms: u32, amplitude: i32) -> HapticsResult<SessionHandle> {
        let command = OneShotCommand::from_raw(duration_ms, amplitude)?;
        self.scheduler.dispatch_one_shot(command)
    }

    /// Play a custom waveform. Loops until cancelled when `repeat >= 0`.
    ///
    /// # Errors
    ///
    /// Returns a waveform error for invalid arrays or repeat index, or a
    /// scheduler error.
    pub fn waveform(&self, request: &WaveformRequest) -> HapticsResult<SessionHandle> {
        let waveform = self.validator.validate_request(request)?;
        self.scheduler.dispatch_waveform(waveform)
    }

    pub fn cancel(&self) {
        self.scheduler.cancel();
    }

    /// View feedback; true when something was played.
    pub fn perform_haptic_feedback(&self, view: ViewHandle, kind: FeedbackKind) -> bool {
        self.router.perform_feedback(view, kind)
    }

    /// Release per-view feedback state when a view goes away.
    pub fn forget_view(&self, view: ViewHandle) -> bool {
        self.router.forget_view(view)
    }

    pub fn router(&self) -> &FeedbackRouter {
        &self.router
    }

    pub fn scheduler(&self) -> &Arc<VibrationScheduler> {
        &self.scheduler
    }

    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    /// Validator normalizing for the probed amplitude control.
    pub fn validator(&self) -> &WaveformValidator {
        &self.validator
    }

    pub fn state(&self) -> SessionState {
        self.scheduler.state()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.scheduler.stats()
    }

    /// Cancel and refuse further sessions.
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }
}

impl Drop for Haptics {
    fn drop(&mut self) {
        self.scheduler.cancel();
    }
}

impl std::fmt::Debug for Haptics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Haptics")
            .field("probe", &self.probe)
            .field("catalog", &self.catalog)
            .field("scheduler", &self.scheduler)
            .field("router", &self.router)
            .finish()
    }
}
