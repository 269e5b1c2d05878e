//! UI interaction feedback kinds

use core::fmt;

use hapticore_errors::FeedbackError;
use serde::{Deserialize, Serialize};

use crate::catalog::EffectId;
use crate::constants::*;
use crate::waveform::WaveformDescriptor;

/// Semantic UI interaction that may produce haptic feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKind {
    LongPress,
    VirtualKey,
    KeyboardTap,
    KeyboardRelease,
    ClockTick,
    ContextClick,
    Confirm,
    Reject,
    GestureStart,
    GestureEnd,
    DragStart,
    SegmentTick,
    SegmentFrequentTick,
    ToggleOn,
    ToggleOff,
    /// Disables feedback for the view it is performed on
    NoHaptics,
}

/// What a feedback kind plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackAction {
    Effect(EffectId),
    Waveform(WaveformDescriptor),
    /// Play nothing and suppress the view
    Suppress,
}

impl FeedbackKind {
    pub const ALL: [FeedbackKind; 16] = [
        FeedbackKind::LongPress,
        FeedbackKind::VirtualKey,
        FeedbackKind::KeyboardTap,
        FeedbackKind::KeyboardRelease,
        FeedbackKind::ClockTick,
        FeedbackKind::ContextClick,
        FeedbackKind::Confirm,
        FeedbackKind::Reject,
        FeedbackKind::GestureStart,
        FeedbackKind::GestureEnd,
        FeedbackKind::DragStart,
        FeedbackKind::SegmentTick,
        FeedbackKind::SegmentFrequentTick,
        FeedbackKind::ToggleOn,
        FeedbackKind::ToggleOff,
        FeedbackKind::NoHaptics,
    ];

    /// Parse one of the `FEEDBACK_*` constants. `FEEDBACK_KEYBOARD_PRESS`
    /// shares its value with `FEEDBACK_KEYBOARD_TAP`.
    pub fn from_raw(raw: i32) -> Result<Self, FeedbackError> {
        let kind = match raw {
            FEEDBACK_LONG_PRESS => FeedbackKind::LongPress,
            FEEDBACK_VIRTUAL_KEY => FeedbackKind::VirtualKey,
            FEEDBACK_KEYBOARD_TAP => FeedbackKind::KeyboardTap,
            FEEDBACK_KEYBOARD_RELEASE => FeedbackKind::KeyboardRelease,
            FEEDBACK_CLOCK_TICK => FeedbackKind::ClockTick,
            FEEDBACK_CONTEXT_CLICK => FeedbackKind::ContextClick,
            FEEDBACK_CONFIRM => FeedbackKind::Confirm,
            FEEDBACK_REJECT => FeedbackKind::Reject,
            FEEDBACK_GESTURE_START => FeedbackKind::GestureStart,
            FEEDBACK_GESTURE_END => FeedbackKind::GestureEnd,
            FEEDBACK_DRAG_START => FeedbackKind::DragStart,
            FEEDBACK_SEGMENT_TICK => FeedbackKind::SegmentTick,
            FEEDBACK_SEGMENT_FREQUENT_TICK => FeedbackKind::SegmentFrequentTick,
            FEEDBACK_TOGGLE_ON => FeedbackKind::ToggleOn,
            FEEDBACK_TOGGLE_OFF => FeedbackKind::ToggleOff,
            FEEDBACK_NO_HAPTICS => FeedbackKind::NoHaptics,
            other => return Err(FeedbackError::UnknownFeedbackKind(other)),
        };
        Ok(kind)
    }

    pub fn raw(self) -> i32 {
        match self {
            FeedbackKind::LongPress => FEEDBACK_LONG_PRESS,
            FeedbackKind::VirtualKey => FEEDBACK_VIRTUAL_KEY,
            FeedbackKind::KeyboardTap => FEEDBACK_KEYBOARD_TAP,
            FeedbackKind::KeyboardRelease => FEEDBACK_KEYBOARD_RELEASE,
            FeedbackKind::ClockTick => FEEDBACK_CLOCK_TICK,
            FeedbackKind::ContextClick => FEEDBACK_CONTEXT_CLICK,
            FeedbackKind::Confirm => FEEDBACK_CONFIRM,
            FeedbackKind::Reject => FEEDBACK_REJECT,
            FeedbackKind::GestureStart => FEEDBACK_GESTURE_START,
            FeedbackKind::GestureEnd => FEEDBACK_GESTURE_END,
            FeedbackKind::DragStart => FEEDBACK_DRAG_START,
            FeedbackKind::SegmentTick => FEEDBACK_SEGMENT_TICK,
            FeedbackKind::SegmentFrequentTick => FEEDBACK_SEGMENT_FREQUENT_TICK,
            FeedbackKind::ToggleOn => FEEDBACK_TOGGLE_ON,
            FeedbackKind::ToggleOff => FEEDBACK_TOGGLE_OFF,
            FeedbackKind::NoHaptics => FEEDBACK_NO_HAPTICS,
        }
    }

    /// Lowest platform API level that defines the kind.
    pub fn min_api_level(self) -> u32 {
        match self {
            FeedbackKind::NoHaptics => 0,
            FeedbackKind::LongPress => 3,
            FeedbackKind::VirtualKey => 5,
            FeedbackKind::KeyboardTap => 8,
            FeedbackKind::ClockTick => 21,
            FeedbackKind::ContextClick => 23,
            FeedbackKind::KeyboardRelease => 27,
            FeedbackKind::Confirm | FeedbackKind::Reject => 30,
            FeedbackKind::GestureStart
            | FeedbackKind::GestureEnd
            | FeedbackKind::DragStart
            | FeedbackKind::SegmentTick
            | FeedbackKind::SegmentFrequentTick => 33,
            FeedbackKind::ToggleOn | FeedbackKind::ToggleOff => 34,
        }
    }

    pub fn is_supported_on(self, api_level: u32) -> bool {
        api_level >= self.min_api_level()
    }

    pub fn action(self) -> FeedbackAction {
        let effect = match self {
            FeedbackKind::NoHaptics => return FeedbackAction::Suppress,
            FeedbackKind::SegmentFrequentTick => {
                return FeedbackAction::Waveform(WaveformDescriptor::from_template(
                    &[0, 8],
                    &[0, 64],
                ));
            }
            FeedbackKind::LongPress => EffectId::HeavyClick,
            FeedbackKind::VirtualKey
            | FeedbackKind::ContextClick
            | FeedbackKind::GestureEnd
            | FeedbackKind::DragStart
            | FeedbackKind::ToggleOn => EffectId::Click,
            FeedbackKind::KeyboardTap
            | FeedbackKind::KeyboardRelease
            | FeedbackKind::ClockTick
            | FeedbackKind::GestureStart
            | FeedbackKind::SegmentTick
            | FeedbackKind::ToggleOff => EffectId::Tick,
            FeedbackKind::Confirm => EffectId::NotificationSuccess,
            FeedbackKind::Reject => EffectId::NotificationError,
        };
        FeedbackAction::Effect(effect)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::LongPress => "long_press",
            FeedbackKind::VirtualKey => "virtual_key",
            FeedbackKind::KeyboardTap => "keyboard_tap",
            FeedbackKind::KeyboardRelease => "keyboard_release",
            FeedbackKind::ClockTick => "clock_tick",
            FeedbackKind::ContextClick => "context_click",
            FeedbackKind::Confirm => "confirm",
            FeedbackKind::Reject => "reject",
            FeedbackKind::GestureStart => "gesture_start",
            FeedbackKind::GestureEnd => "gesture_end",
            FeedbackKind::DragStart => "drag_start",
            FeedbackKind::SegmentTick => "segment_tick",
            FeedbackKind::SegmentFrequentTick => "segment_frequent_tick",
            FeedbackKind::ToggleOn => "toggle_on",
            FeedbackKind::ToggleOff => "toggle_off",
            FeedbackKind::NoHaptics => "no_haptics",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip() {
        for kind in FeedbackKind::ALL {
            assert_eq!(FeedbackKind::from_raw(kind.raw()), Ok(kind));
        }
    }

    #[test]
    fn test_keyboard_press_alias() {
        assert_eq!(
            FeedbackKind::from_raw(FEEDBACK_KEYBOARD_PRESS),
            Ok(FeedbackKind::KeyboardTap)
        );
    }

    #[test]
    fn test_unknown_raw() {
        assert_eq!(
            FeedbackKind::from_raw(99),
            Err(FeedbackError::UnknownFeedbackKind(99))
        );
    }

    #[test]
    fn test_api_gating() {
        assert!(FeedbackKind::LongPress.is_supported_on(MIN_API_LEVEL));
        assert!(FeedbackKind::Confirm.is_supported_on(30));
        assert!(!FeedbackKind::GestureStart.is_supported_on(32));
        assert!(FeedbackKind::GestureStart.is_supported_on(33));
        assert!(!FeedbackKind::ToggleOn.is_supported_on(33));
        assert!(FeedbackKind::NoHaptics.is_supported_on(0));
    }

    #[test]
    fn test_actions() {
        assert_eq!(FeedbackKind::NoHaptics.action(), FeedbackAction::Suppress);
        assert_eq!(
            FeedbackKind::LongPress.action(),
            FeedbackAction::Effect(EffectId::HeavyClick)
        );
        assert_eq!(
            FeedbackKind::Reject.action(),
            FeedbackAction::Effect(EffectId::NotificationError)
        );
        match FeedbackKind::SegmentFrequentTick.action() {
            FeedbackAction::Waveform(wf) => {
                assert_eq!(wf.timings(), &[0, 8]);
                assert!(!wf.is_looping());
            }
            other => assert_eq!(other, FeedbackAction::Suppress, "expected waveform"),
        }
    }
}
