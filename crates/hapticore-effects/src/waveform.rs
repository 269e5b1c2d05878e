//! Waveform validation and the canonical waveform descriptor
//!
//! # Segment semantics
//!
//! A waveform is an ordered list of segments, one per timing entry.
//!
//! - With amplitudes, each segment plays at its own amplitude; `0` is an
//!   off-segment.
//! - Without amplitudes the waveform is amplitude-agnostic and segments
//!   alternate off/on starting with *off*: index 0 is the delay before the
//!   first pulse, odd indices vibrate at device default intensity.
//!
//! Segment parity is absolute, so a loop that re-enters at an even index
//! re-enters on an off-segment. Only index 0 may have a zero duration, which
//! lets a waveform start immediately; a loop must span a non-zero duration.

use core::time::Duration;

use hapticore_errors::{WaveformError, ensure};
use serde::{Deserialize, Serialize};

use crate::amplitude::Amplitude;
use crate::constants::REPEAT_ONCE;

/// Where playback goes after the last segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Repeat {
    /// Play the segments once
    Once,
    /// Loop forever, re-entering at this segment index
    From(usize),
}

impl Repeat {
    /// Parse a raw repeat index against a waveform of `len` segments.
    pub fn from_raw(repeat: i32, len: usize) -> Result<Self, WaveformError> {
        if repeat == REPEAT_ONCE {
            return Ok(Repeat::Once);
        }
        match usize::try_from(repeat) {
            Ok(index) if index < len => Ok(Repeat::From(index)),
            _ => Err(WaveformError::InvalidRepeatIndex { repeat, len }),
        }
    }

    /// Raw repeat index, `-1` for [`Repeat::Once`].
    pub fn raw(self) -> i32 {
        match self {
            Repeat::Once => REPEAT_ONCE,
            Repeat::From(index) => i32::try_from(index).unwrap_or(i32::MAX),
        }
    }
}

/// Output level of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentLevel {
    /// Actuator off for the segment
    Off,
    /// Actuator on at the given intensity
    On(Amplitude),
}

/// One timed step of a waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub index: usize,
    pub duration: Duration,
    pub level: SegmentLevel,
}

/// A validated waveform.
///
/// Construction goes through [`WaveformDescriptor::new`] or
/// [`WaveformValidator::validate`], so every descriptor satisfies:
///
/// - `timings` is non-empty and only index 0 may be zero
/// - `amplitudes`, when present, has the same length as `timings`
/// - `repeat` is [`Repeat::Once`] or points inside the waveform
///
/// Deserialization validates the same way. The serialized form carries the
/// raw repeat index (`-1` plays once) and the `default_intensity` flag set by
/// normalization.
///
/// # Examples
///
/// ```
/// use hapticore_effects::{Repeat, WaveformDescriptor};
///
/// // Phone-ring style loop
/// let ring = WaveformDescriptor::new(vec![0, 400, 200], Some(vec![0, 200, 0]), 0).unwrap();
/// assert_eq!(ring.repeat(), Repeat::From(0));
/// assert!(ring.is_looping());
/// assert_eq!(ring.total_duration(), None);
///
/// // Repeat index past the end is rejected
/// assert!(WaveformDescriptor::new(vec![0, 400, 200], Some(vec![0, 200, 0]), 5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveformDescriptor {
    timings: Vec<u64>,
    amplitudes: Option<Vec<u8>>,
    repeat: Repeat,
    default_intensity: bool,
}

impl WaveformDescriptor {
    /// Validate raw waveform data into a descriptor.
    ///
    /// # Errors
    ///
    /// - [`WaveformError::EmptyWaveform`] when `timings` is empty
    /// - [`WaveformError::ArrayLengthMismatch`] when amplitudes do not pair up
    /// - [`WaveformError::InvalidRepeatIndex`] when `repeat` is out of range
    /// - [`WaveformError::ZeroDurationSegment`] for a zero timing past index 0,
    ///   or a loop whose span has no duration
    pub fn new(
        timings: Vec<u64>,
        amplitudes: Option<Vec<u8>>,
        repeat: i32,
    ) -> Result<Self, WaveformError> {
        ensure!(!timings.is_empty(), WaveformError::EmptyWaveform);
        if let Some(amps) = &amplitudes {
            ensure!(
                amps.len() == timings.len(),
                WaveformError::ArrayLengthMismatch {
                    timings: timings.len(),
                    amplitudes: amps.len(),
                }
            );
        }
        let repeat = Repeat::from_raw(repeat, timings.len())?;
        if let Some(index) = timings
            .iter()
            .enumerate()
            .skip(1)
            .find_map(|(i, t)| (*t == 0).then_some(i))
        {
            return Err(WaveformError::ZeroDurationSegment { index });
        }
        if let Repeat::From(start) = repeat
            && timings.iter().skip(start).all(|t| *t == 0)
        {
            return Err(WaveformError::ZeroDurationSegment { index: start });
        }

        let default_intensity = amplitudes.is_none();
        Ok(Self {
            timings,
            amplitudes,
            repeat,
            default_intensity,
        })
    }

    /// Pre-baked templates whose invariants are checked by unit tests.
    pub(crate) fn from_template(timings: &[u64], amplitudes: &[u8]) -> Self {
        Self {
            timings: timings.to_vec(),
            amplitudes: Some(amplitudes.to_vec()),
            repeat: Repeat::Once,
            default_intensity: false,
        }
    }

    pub fn timings(&self) -> &[u64] {
        &self.timings
    }

    /// Per-segment amplitudes, `None` for an amplitude-agnostic waveform.
    pub fn amplitudes(&self) -> Option<&[u8]> {
        self.amplitudes.as_deref()
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// Raw repeat index, `-1` when the waveform plays once.
    pub fn repeat_index(&self) -> i32 {
        self.repeat.raw()
    }

    /// Number of segments (always at least one).
    pub fn len(&self) -> usize {
        self.timings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }

    pub fn is_looping(&self) -> bool {
        matches!(self.repeat, Repeat::From(_))
    }

    /// True when "on" segments play at device default intensity, either
    /// because no amplitudes were given or because the device cannot vary
    /// intensity.
    pub fn is_amplitude_agnostic(&self) -> bool {
        self.default_intensity
    }

    /// Degrade explicit amplitudes for a device without amplitude control.
    ///
    /// Timings, amplitudes and repeat are kept; zero-amplitude segments stay
    /// off and every other segment plays at default intensity.
    #[must_use]
    pub fn normalized_for(mut self, has_amplitude_control: bool) -> Self {
        if !has_amplitude_control {
            self.default_intensity = true;
        }
        self
    }

    /// Output level of the segment at `index`.
    pub fn segment(&self, index: usize) -> Option<Segment> {
        let millis = *self.timings.get(index)?;
        let level = match &self.amplitudes {
            Some(amps) => match amps.get(index).copied().and_then(Amplitude::level) {
                None => SegmentLevel::Off,
                Some(_) if self.default_intensity => SegmentLevel::On(Amplitude::Default),
                Some(amplitude) => SegmentLevel::On(amplitude),
            },
            None if index.is_multiple_of(2) => SegmentLevel::Off,
            None => SegmentLevel::On(Amplitude::Default),
        };
        Some(Segment {
            index,
            duration: Duration::from_millis(millis),
            level,
        })
    }

    /// Segments in playback order for a single pass.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.len()).filter_map(|i| self.segment(i))
    }

    /// Length of one pass, `None` for a looping waveform.
    pub fn total_duration(&self) -> Option<Duration> {
        if self.is_looping() {
            return None;
        }
        let millis = self
            .timings
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(*t));
        Some(Duration::from_millis(millis))
    }
}

#[derive(Serialize)]
struct DescriptorRef<'a> {
    timings: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    amplitudes: Option<&'a [u8]>,
    repeat: i32,
    default_intensity: bool,
}

#[derive(Deserialize)]
struct DescriptorRepr {
    timings: Vec<u64>,
    #[serde(default)]
    amplitudes: Option<Vec<u8>>,
    #[serde(default = "repeat_once")]
    repeat: i32,
    #[serde(default)]
    default_intensity: bool,
}

impl Serialize for WaveformDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        DescriptorRef {
            timings: &self.timings,
            amplitudes: self.amplitudes.as_deref(),
            repeat: self.repeat.raw(),
            default_intensity: self.default_intensity,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WaveformDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = DescriptorRepr::deserialize(deserializer)?;
        let descriptor = WaveformDescriptor::new(repr.timings, repr.amplitudes, repr.repeat)
            .map_err(serde::de::Error::custom)?;
        Ok(descriptor.normalized_for(!repr.default_intensity))
    }
}

/// Untyped waveform options, as supplied by a scripting or config layer.
///
/// `amplitudes` is optional and `repeat` defaults to `-1`.
///
/// # Examples
///
/// ```
/// use hapticore_effects::WaveformRequest;
///
/// let req: WaveformRequest =
///     serde_json::from_str(r#"{ "timings": [0, 100, 50, 100] }"#).unwrap();
/// assert_eq!(req.repeat, -1);
/// assert!(req.amplitudes.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveformRequest {
    pub timings: Vec<u64>,
    #[serde(default)]
    pub amplitudes: Option<Vec<u8>>,
    #[serde(default = "repeat_once")]
    pub repeat: i32,
}

fn repeat_once() -> i32 {
    REPEAT_ONCE
}

impl WaveformRequest {
    pub fn new(timings: Vec<u64>, amplitudes: Option<Vec<u8>>, repeat: i32) -> Self {
        Self {
            timings,
            amplitudes,
            repeat,
        }
    }
}

/// Validates waveform input and normalizes it for the running device.
#[derive(Debug, Clone, Copy)]
pub struct WaveformValidator {
    has_amplitude_control: bool,
}

impl WaveformValidator {
    pub fn new(has_amplitude_control: bool) -> Self {
        Self {
            has_amplitude_control,
        }
    }

    /// Validate and normalize.
    ///
    /// See [`WaveformDescriptor::new`] for the error conditions. Missing
    /// amplitude control is never an error.
    pub fn validate(
        &self,
        timings: &[u64],
        amplitudes: Option<&[u8]>,
        repeat: i32,
    ) -> Result<WaveformDescriptor, WaveformError> {
        let descriptor =
            WaveformDescriptor::new(timings.to_vec(), amplitudes.map(<[u8]>::to_vec), repeat)?;
        Ok(descriptor.normalized_for(self.has_amplitude_control))
    }

    pub fn validate_request(
        &self,
        request: &WaveformRequest,
    ) -> Result<WaveformDescriptor, WaveformError> {
        self.validate(
            &request.timings,
            request.amplitudes.as_deref(),
            request.repeat,
        )
    }

    /// Re-normalize a descriptor built elsewhere (catalog templates).
    pub fn normalize(&self, descriptor: WaveformDescriptor) -> WaveformDescriptor {
        descriptor.normalized_for(self.has_amplitude_control)
    }

    pub fn has_amplitude_control(&self) -> bool {
        self.has_amplitude_control
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch() {
        let result = WaveformDescriptor::new(vec![0, 100, 50, 100], Some(vec![0, 180]), -1);
        assert_eq!(
            result,
            Err(WaveformError::ArrayLengthMismatch {
                timings: 4,
                amplitudes: 2
            })
        );
    }

    #[test]
    fn test_empty_waveform() {
        assert_eq!(
            WaveformDescriptor::new(vec![], Some(vec![]), -1),
            Err(WaveformError::EmptyWaveform)
        );
        assert_eq!(
            WaveformDescriptor::new(vec![], None, -1),
            Err(WaveformError::EmptyWaveform)
        );
    }

    #[test]
    fn test_invalid_repeat_index() {
        assert_eq!(
            WaveformDescriptor::new(vec![0, 400, 200], Some(vec![0, 200, 0]), 5),
            Err(WaveformError::InvalidRepeatIndex { repeat: 5, len: 3 })
        );
        assert_eq!(
            WaveformDescriptor::new(vec![0, 400, 200], None, 3),
            Err(WaveformError::InvalidRepeatIndex { repeat: 3, len: 3 })
        );
        assert_eq!(
            WaveformDescriptor::new(vec![0, 400, 200], None, -2),
            Err(WaveformError::InvalidRepeatIndex { repeat: -2, len: 3 })
        );
    }

    #[test]
    fn test_zero_duration_only_leading() {
        assert_eq!(
            WaveformDescriptor::new(vec![0, 10], None, -1).map(|d| d.len()),
            Ok(2)
        );
        assert_eq!(
            WaveformDescriptor::new(vec![0, 10, 0, 10], None, -1),
            Err(WaveformError::ZeroDurationSegment { index: 2 })
        );
        assert_eq!(
            WaveformDescriptor::new(vec![0], None, 0),
            Err(WaveformError::ZeroDurationSegment { index: 0 })
        );
    }

    #[test]
    fn test_agnostic_segments_alternate_off_on() -> Result<(), WaveformError> {
        let wf = WaveformDescriptor::new(vec![0, 100, 50, 100], None, -1)?;
        assert!(wf.is_amplitude_agnostic());
        let levels: Vec<SegmentLevel> = wf.segments().map(|s| s.level).collect();
        assert_eq!(
            levels,
            vec![
                SegmentLevel::Off,
                SegmentLevel::On(Amplitude::Default),
                SegmentLevel::Off,
                SegmentLevel::On(Amplitude::Default),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_explicit_amplitudes_and_zero_off() -> Result<(), WaveformError> {
        let wf = WaveformDescriptor::new(vec![0, 80, 40], Some(vec![0, 180, 0]), -1)?;
        assert!(!wf.is_amplitude_agnostic());
        assert_eq!(wf.segment(0).map(|s| s.level), Some(SegmentLevel::Off));
        assert_eq!(
            wf.segment(1).map(|s| s.level),
            Some(SegmentLevel::On(Amplitude::level(180).unwrap_or_default()))
        );
        assert_eq!(wf.segment(2).map(|s| s.level), Some(SegmentLevel::Off));
        assert_eq!(wf.segment(3), None);
        Ok(())
    }

    #[test]
    fn test_normalization_without_amplitude_control() -> Result<(), WaveformError> {
        let validator = WaveformValidator::new(false);
        let wf = validator.validate(&[0, 80, 40, 80], Some(&[0, 180, 0, 220]), -1)?;
        assert!(wf.is_amplitude_agnostic());
        assert_eq!(wf.amplitudes(), Some(&[0u8, 180, 0, 220][..]));
        let levels: Vec<SegmentLevel> = wf.segments().map(|s| s.level).collect();
        assert_eq!(
            levels,
            vec![
                SegmentLevel::Off,
                SegmentLevel::On(Amplitude::Default),
                SegmentLevel::Off,
                SegmentLevel::On(Amplitude::Default),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_total_duration() -> Result<(), WaveformError> {
        let once = WaveformDescriptor::new(vec![0, 60, 30, 60, 30, 120], None, -1)?;
        assert_eq!(once.total_duration(), Some(Duration::from_millis(300)));
        let looping = WaveformDescriptor::new(vec![0, 400, 200], None, 1)?;
        assert_eq!(looping.total_duration(), None);
        assert_eq!(looping.repeat_index(), 1);
        Ok(())
    }

    #[test]
    fn test_request_defaults() -> Result<(), serde_json::Error> {
        let req: WaveformRequest = serde_json::from_str(
            r#"{ "timings": [0, 80, 40, 80], "amplitudes": [0, 180, 0, 220] }"#,
        )?;
        assert_eq!(req.repeat, REPEAT_ONCE);
        let wf = WaveformValidator::new(true).validate_request(&req);
        assert_eq!(wf.map(|d| d.len()), Ok(4));
        Ok(())
    }

    #[test]
    fn test_deserialize_rejects_invalid_shapes() {
        let invalid = [
            r#"{"timings":[],"amplitudes":[1,2,3],"repeat":9}"#,
            r#"{"timings":[0,100],"amplitudes":[0]}"#,
            r#"{"timings":[0,100,50],"repeat":3}"#,
            r#"{"timings":[0,0],"repeat":0}"#,
            r#"{"timings":[0,100,0,50]}"#,
            r#"{"timings":[0,100],"repeat":{"From":0}}"#,
        ];
        for json in invalid {
            let parsed = serde_json::from_str::<WaveformDescriptor>(json);
            assert!(matches!(parsed, Err(_)), "accepted {json}: {parsed:?}");
        }
    }

    #[test]
    fn test_serialized_form_keeps_normalization() -> Result<(), Box<dyn std::error::Error>> {
        let wf = WaveformDescriptor::new(vec![0, 100, 50], Some(vec![0, 200, 0]), 1)?
            .normalized_for(false);
        let json = serde_json::to_value(&wf)?;
        assert_eq!(json["repeat"], 1);
        assert_eq!(json["default_intensity"], true);

        let back: WaveformDescriptor = serde_json::from_value(json)?;
        assert_eq!(back, wf);
        assert_eq!(
            back.segment(1).map(|s| s.level),
            Some(SegmentLevel::On(Amplitude::Default))
        );
        Ok(())
    }
}
