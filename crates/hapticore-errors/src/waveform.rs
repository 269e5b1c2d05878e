//! Waveform and one-shot validation errors.
//!
//! These are raised synchronously at dispatch time, before anything reaches
//! the vibrator.

use crate::common::ErrorSeverity;

/// Validation errors for waveforms and one-shot pulses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaveformError {
    /// The timings array is empty
    #[error("Waveform has no timings")]
    EmptyWaveform,

    /// Amplitudes were supplied but do not pair up with the timings
    #[error("Timings and amplitudes length mismatch: {timings} timings vs {amplitudes} amplitudes")]
    ArrayLengthMismatch {
        /// Number of timing entries
        timings: usize,
        /// Number of amplitude entries
        amplitudes: usize,
    },

    /// The repeat index is neither -1 nor a valid segment index
    #[error("Invalid repeat index {repeat} for a waveform of {len} segments")]
    InvalidRepeatIndex {
        /// The rejected repeat index
        repeat: i32,
        /// Number of segments in the waveform
        len: usize,
    },

    /// A zero-duration segment after the leading delay, or a loop starting
    /// at `index` that spans no time
    #[error("Segment {index} has zero duration; only a non-looping leading delay may be 0ms")]
    ZeroDurationSegment {
        /// Index of the offending segment
        index: usize,
    },

    /// A one-shot pulse with zero duration
    #[error("One-shot duration must be greater than 0ms")]
    InvalidDuration,

    /// An amplitude outside `[1, 255]` that is not the default sentinel
    #[error("Amplitude {0} is out of range [1, 255] and is not the default sentinel")]
    InvalidAmplitude(i32),
}

impl WaveformError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = WaveformError::ArrayLengthMismatch {
            timings: 4,
            amplitudes: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("4 timings"));
        assert!(msg.contains("2 amplitudes"));
    }

    #[test]
    fn test_repeat_index_message() {
        let err = WaveformError::InvalidRepeatIndex { repeat: 5, len: 3 };
        assert_eq!(
            err.to_string(),
            "Invalid repeat index 5 for a waveform of 3 segments"
        );
    }

    #[test]
    fn test_severity() {
        assert_eq!(WaveformError::EmptyWaveform.severity(), ErrorSeverity::Error);
    }
}
