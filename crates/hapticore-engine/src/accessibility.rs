//! System accessibility settings

use core::sync::atomic::{AtomicBool, Ordering};

/// Source of the system-wide "haptic feedback enabled" toggle.
pub trait AccessibilitySettings: Send + Sync {
    fn haptic_feedback_enabled(&self) -> bool;
}

/// Toggle held in memory, for hosts without a settings service and for tests.
#[derive(Debug)]
pub struct StaticAccessibility {
    enabled: AtomicBool,
}

impl StaticAccessibility {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn enabled() -> Self {
        Self::new(true)
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

impl Default for StaticAccessibility {
    fn default() -> Self {
        Self::enabled()
    }
}

impl AccessibilitySettings for StaticAccessibility {
    fn haptic_feedback_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let settings = StaticAccessibility::default();
        assert!(settings.haptic_feedback_enabled());
        settings.set_enabled(false);
        assert!(!settings.haptic_feedback_enabled());
    }
}
