//! View-level haptic feedback routing
//!
//! Maps UI interaction kinds onto scheduler commands. A kind is skipped,
//! without touching the actuator, when:
//!
//! - the running API level predates the kind
//! - the system accessibility toggle disables haptic feedback
//! - the view has been suppressed with [`FeedbackKind::NoHaptics`]
//!
//! Suppression is sticky per view until re-enabled with
//! [`FeedbackRouter::set_view_feedback_enabled`].

use core::fmt;
use std::collections::HashSet;
use std::sync::Arc;

use hapticore_effects::{EffectCatalog, FeedbackAction, FeedbackKind};
use hapticore_errors::{FeedbackError, HapticsResult};
use hapticore_scheduler::{SessionHandle, VibrationScheduler};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::accessibility::AccessibilitySettings;

/// Opaque identifier of a UI view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewHandle(u64);

impl ViewHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

pub struct FeedbackRouter {
    scheduler: Arc<VibrationScheduler>,
    catalog: EffectCatalog,
    accessibility: Arc<dyn AccessibilitySettings>,
    respect_accessibility: bool,
    api_level: u32,
    suppressed: Mutex<HashSet<ViewHandle>>,
}

impl FeedbackRouter {
    pub fn new(
        scheduler: Arc<VibrationScheduler>,
        catalog: EffectCatalog,
        accessibility: Arc<dyn AccessibilitySettings>,
    ) -> Self {
        let api_level = scheduler.capability().api_level;
        Self {
            scheduler,
            catalog,
            accessibility,
            respect_accessibility: true,
            api_level,
            suppressed: Mutex::new(HashSet::new()),
        }
    }

    /// Ignore the system toggle. Only meant for hosts that apply it
    /// themselves.
    #[must_use]
    pub fn with_respect_accessibility(mut self, respect: bool) -> Self {
        self.respect_accessibility = respect;
        self
    }

    /// Perform feedback; true when a command reached the scheduler.
    pub fn perform_feedback(&self, view: ViewHandle, kind: FeedbackKind) -> bool {
        match self.try_perform_feedback(view, kind) {
            Ok(session) => !session.is_detached(),
            Err(error) => {
                debug!(%view, %kind, severity = %error.severity(), %error, "feedback skipped");
                false
            }
        }
    }

    /// Perform feedback for one of the `FEEDBACK_*` integer constants.
    pub fn perform_feedback_raw(&self, view: ViewHandle, raw: i32) -> bool {
        match FeedbackKind::from_raw(raw) {
            Ok(kind) => self.perform_feedback(view, kind),
            Err(error) => {
                debug!(%view, severity = %error.severity(), %error, "feedback skipped");
                false
            }
        }
    }

    /// Perform feedback, reporting why it was skipped.
    ///
    /// [`FeedbackKind::NoHaptics`] suppresses the view and returns a
    /// detached handle.
    ///
    /// # Errors
    ///
    /// - [`FeedbackError::UnsupportedFeedbackKind`] below the kind's API level
    /// - [`FeedbackError::DisabledBySystem`] when the accessibility toggle is off
    /// - [`FeedbackError::DisabledForView`] for a suppressed view
    /// - scheduler errors from the dispatch itself
    pub fn try_perform_feedback(
        &self,
        view: ViewHandle,
        kind: FeedbackKind,
    ) -> HapticsResult<SessionHandle> {
        if !kind.is_supported_on(self.api_level) {
            return Err(FeedbackError::UnsupportedFeedbackKind {
                kind: kind.as_str(),
                required: kind.min_api_level(),
                actual: self.api_level,
            }
            .into());
        }

        let action = kind.action();
        if action == FeedbackAction::Suppress {
            self.suppressed.lock().insert(view);
            debug!(%view, "haptic feedback suppressed for view");
            return Ok(SessionHandle::detached());
        }

        if self.respect_accessibility && !self.accessibility.haptic_feedback_enabled() {
            return Err(FeedbackError::DisabledBySystem.into());
        }
        if self.is_view_suppressed(view) {
            return Err(FeedbackError::DisabledForView(view.id()).into());
        }

        let session = match action {
            FeedbackAction::Effect(effect) => {
                self.scheduler.dispatch_effect(self.catalog.resolve(effect))?
            }
            FeedbackAction::Waveform(waveform) => self.scheduler.dispatch_waveform(waveform)?,
            FeedbackAction::Suppress => SessionHandle::detached(),
        };
        debug!(%view, %kind, %session, "feedback performed");
        Ok(session)
    }

    /// Re-enable or suppress feedback for a view.
    pub fn set_view_feedback_enabled(&self, view: ViewHandle, enabled: bool) {
        let mut suppressed = self.suppressed.lock();
        if enabled {
            suppressed.remove(&view);
        } else {
            suppressed.insert(view);
        }
    }

    pub fn is_view_suppressed(&self, view: ViewHandle) -> bool {
        self.suppressed.lock().contains(&view)
    }

    /// Drop all state held for a view that is being torn down.
    ///
    /// Returns true when the view was suppressed. A later view reusing the
    /// same id starts with feedback enabled.
    pub fn forget_view(&self, view: ViewHandle) -> bool {
        let removed = self.suppressed.lock().remove(&view);
        if removed {
            debug!(%view, "forgot suppressed view");
        }
        removed
    }

    /// Number of views currently suppressed.
    pub fn suppressed_views(&self) -> usize {
        self.suppressed.lock().len()
    }

    pub fn api_level(&self) -> u32 {
        self.api_level
    }
}

impl fmt::Debug for FeedbackRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackRouter")
            .field("api_level", &self.api_level)
            .field("respect_accessibility", &self.respect_accessibility)
            .field("suppressed", &self.suppressed.lock().len())
            .finish_non_exhaustive()
    }
}
