//! Stable integer constants exposed to callers
//!
//! Values are stable within a major release. Primitive effect ids and the
//! pre-API-33 feedback ids match the platform values so they can be passed
//! through unchanged.

/// Lowest platform API level the haptics stack supports
pub const MIN_API_LEVEL: u32 = 29;

/// Predefined click primitive
pub const EFFECT_CLICK: i32 = 0;
/// Predefined double-click primitive
pub const EFFECT_DOUBLE_CLICK: i32 = 1;
/// Predefined tick primitive
pub const EFFECT_TICK: i32 = 2;
/// Predefined heavy-click primitive
pub const EFFECT_HEAVY_CLICK: i32 = 5;
/// Two-pulse positive confirmation pattern
pub const EFFECT_NOTIFICATION_SUCCESS: i32 = 100;
/// Two medium pulses alert pattern
pub const EFFECT_NOTIFICATION_WARNING: i32 = 101;
/// Three sharp pulses failure pattern
pub const EFFECT_NOTIFICATION_ERROR: i32 = 102;

/// Let the device pick the intensity
pub const AMPLITUDE_DEFAULT: i32 = -1;
/// Softest accepted amplitude
pub const AMPLITUDE_MIN: i32 = 1;
/// Strongest accepted amplitude
pub const AMPLITUDE_MAX: i32 = 255;
/// Soft preset
pub const AMPLITUDE_LIGHT: i32 = 64;
/// Medium preset
pub const AMPLITUDE_MEDIUM: i32 = 128;
/// Strong preset
pub const AMPLITUDE_HEAVY: i32 = 255;

/// Repeat index meaning "play once"
pub const REPEAT_ONCE: i32 = -1;

pub const FEEDBACK_LONG_PRESS: i32 = 0;
pub const FEEDBACK_VIRTUAL_KEY: i32 = 1;
pub const FEEDBACK_KEYBOARD_TAP: i32 = 3;
/// Alias of [`FEEDBACK_KEYBOARD_TAP`], as on the platform
pub const FEEDBACK_KEYBOARD_PRESS: i32 = FEEDBACK_KEYBOARD_TAP;
pub const FEEDBACK_CLOCK_TICK: i32 = 4;
pub const FEEDBACK_CONTEXT_CLICK: i32 = 6;
pub const FEEDBACK_KEYBOARD_RELEASE: i32 = 7;
pub const FEEDBACK_CONFIRM: i32 = 16;
pub const FEEDBACK_REJECT: i32 = 17;
pub const FEEDBACK_GESTURE_START: i32 = 49;
pub const FEEDBACK_GESTURE_END: i32 = 50;
pub const FEEDBACK_DRAG_START: i32 = 51;
pub const FEEDBACK_SEGMENT_TICK: i32 = 52;
pub const FEEDBACK_SEGMENT_FREQUENT_TICK: i32 = 53;
pub const FEEDBACK_TOGGLE_ON: i32 = 54;
pub const FEEDBACK_TOGGLE_OFF: i32 = 55;
/// Suppression marker: disables feedback on the view it is performed on
pub const FEEDBACK_NO_HAPTICS: i32 = -1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amplitude_presets_within_range() {
        for preset in [AMPLITUDE_LIGHT, AMPLITUDE_MEDIUM, AMPLITUDE_HEAVY] {
            assert!((AMPLITUDE_MIN..=AMPLITUDE_MAX).contains(&preset));
        }
        assert!(AMPLITUDE_DEFAULT < AMPLITUDE_MIN);
    }

    #[test]
    fn test_effect_ids_distinct() {
        let ids = [
            EFFECT_CLICK,
            EFFECT_DOUBLE_CLICK,
            EFFECT_TICK,
            EFFECT_HEAVY_CLICK,
            EFFECT_NOTIFICATION_SUCCESS,
            EFFECT_NOTIFICATION_WARNING,
            EFFECT_NOTIFICATION_ERROR,
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in ids.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
