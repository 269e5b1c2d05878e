//! Logical effects and their mapping to device primitives
//!
//! Every [`EffectId`] resolves either to a native primitive, when the device
//! reports support for it, or to a pre-baked waveform approximating the same
//! pattern. Notification effects have no native primitive and always resolve
//! to a waveform.

use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use hapticore_errors::CatalogError;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::waveform::{WaveformDescriptor, WaveformValidator};

/// Device-native pre-canned vibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveId {
    Click,
    DoubleClick,
    Tick,
    HeavyClick,
}

impl PrimitiveId {
    pub const ALL: [PrimitiveId; 4] = [
        PrimitiveId::Click,
        PrimitiveId::DoubleClick,
        PrimitiveId::Tick,
        PrimitiveId::HeavyClick,
    ];

    /// Platform integer id of the primitive.
    pub fn raw(self) -> i32 {
        match self {
            PrimitiveId::Click => EFFECT_CLICK,
            PrimitiveId::DoubleClick => EFFECT_DOUBLE_CLICK,
            PrimitiveId::Tick => EFFECT_TICK,
            PrimitiveId::HeavyClick => EFFECT_HEAVY_CLICK,
        }
    }

    /// Approximate playback length, used to close the session once the
    /// primitive has finished.
    pub fn nominal_duration(self) -> Duration {
        let millis = match self {
            PrimitiveId::Tick => 10,
            PrimitiveId::Click => 20,
            PrimitiveId::HeavyClick => 30,
            PrimitiveId::DoubleClick => 130,
        };
        Duration::from_millis(millis)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveId::Click => "click",
            PrimitiveId::DoubleClick => "double_click",
            PrimitiveId::Tick => "tick",
            PrimitiveId::HeavyClick => "heavy_click",
        };
        f.write_str(name)
    }
}

/// Set of primitives the device plays natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PrimitiveSupport(u8);

impl PrimitiveSupport {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        PrimitiveId::ALL.into_iter().collect()
    }

    #[must_use]
    pub fn with(self, primitive: PrimitiveId) -> Self {
        Self(self.0 | primitive.bit())
    }

    pub fn contains(self, primitive: PrimitiveId) -> bool {
        self.0 & primitive.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = PrimitiveId> {
        PrimitiveId::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl FromIterator<PrimitiveId> for PrimitiveSupport {
    fn from_iter<I: IntoIterator<Item = PrimitiveId>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

/// Logical haptic effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectId {
    Click,
    DoubleClick,
    HeavyClick,
    Tick,
    NotificationSuccess,
    NotificationWarning,
    NotificationError,
}

impl EffectId {
    pub const ALL: [EffectId; 7] = [
        EffectId::Click,
        EffectId::DoubleClick,
        EffectId::HeavyClick,
        EffectId::Tick,
        EffectId::NotificationSuccess,
        EffectId::NotificationWarning,
        EffectId::NotificationError,
    ];

    /// Parse one of the `EFFECT_*` constants.
    pub fn from_raw(raw: i32) -> Result<Self, CatalogError> {
        match raw {
            EFFECT_CLICK => Ok(EffectId::Click),
            EFFECT_DOUBLE_CLICK => Ok(EffectId::DoubleClick),
            EFFECT_TICK => Ok(EffectId::Tick),
            EFFECT_HEAVY_CLICK => Ok(EffectId::HeavyClick),
            EFFECT_NOTIFICATION_SUCCESS => Ok(EffectId::NotificationSuccess),
            EFFECT_NOTIFICATION_WARNING => Ok(EffectId::NotificationWarning),
            EFFECT_NOTIFICATION_ERROR => Ok(EffectId::NotificationError),
            other => Err(CatalogError::UnknownEffectId(other)),
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            EffectId::Click => EFFECT_CLICK,
            EffectId::DoubleClick => EFFECT_DOUBLE_CLICK,
            EffectId::Tick => EFFECT_TICK,
            EffectId::HeavyClick => EFFECT_HEAVY_CLICK,
            EffectId::NotificationSuccess => EFFECT_NOTIFICATION_SUCCESS,
            EffectId::NotificationWarning => EFFECT_NOTIFICATION_WARNING,
            EffectId::NotificationError => EFFECT_NOTIFICATION_ERROR,
        }
    }

    /// Native primitive backing this effect, if any.
    pub fn primitive(self) -> Option<PrimitiveId> {
        match self {
            EffectId::Click => Some(PrimitiveId::Click),
            EffectId::DoubleClick => Some(PrimitiveId::DoubleClick),
            EffectId::Tick => Some(PrimitiveId::Tick),
            EffectId::HeavyClick => Some(PrimitiveId::HeavyClick),
            EffectId::NotificationSuccess
            | EffectId::NotificationWarning
            | EffectId::NotificationError => None,
        }
    }

    /// Waveform approximating the effect on devices without the primitive.
    pub fn fallback_waveform(self) -> WaveformDescriptor {
        let (timings, amplitudes): (&[u64], &[u8]) = match self {
            EffectId::Tick => (&[0, 10], &[0, 100]),
            EffectId::Click => (&[0, 20], &[0, 180]),
            EffectId::HeavyClick => (&[0, 30], &[0, 255]),
            EffectId::DoubleClick => (&[0, 20, 80, 20], &[0, 180, 0, 180]),
            EffectId::NotificationSuccess => (&[0, 40, 60, 20], &[0, 180, 0, 100]),
            EffectId::NotificationWarning => (&[0, 60, 50, 60], &[0, 160, 0, 160]),
            EffectId::NotificationError => {
                (&[0, 50, 40, 50, 40, 50], &[0, 220, 0, 220, 0, 220])
            }
        };
        WaveformDescriptor::from_template(timings, amplitudes)
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EffectId::Click => "click",
            EffectId::DoubleClick => "double_click",
            EffectId::HeavyClick => "heavy_click",
            EffectId::Tick => "tick",
            EffectId::NotificationSuccess => "notification_success",
            EffectId::NotificationWarning => "notification_warning",
            EffectId::NotificationError => "notification_error",
        };
        f.write_str(name)
    }
}

/// Named impact tiers accepted by [`EffectCatalog::resolve_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
}

impl ImpactStyle {
    pub fn effect(self) -> EffectId {
        match self {
            ImpactStyle::Light => EffectId::Tick,
            ImpactStyle::Medium => EffectId::Click,
            ImpactStyle::Heavy => EffectId::HeavyClick,
        }
    }
}

impl FromStr for ImpactStyle {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [ImpactStyle::Light, ImpactStyle::Medium, ImpactStyle::Heavy]
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::unknown_name(s))
    }
}

impl ImpactStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ImpactStyle::Light => "light",
            ImpactStyle::Medium => "medium",
            ImpactStyle::Heavy => "heavy",
        }
    }
}

/// Notification categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn effect(self) -> EffectId {
        match self {
            NotificationKind::Success => EffectId::NotificationSuccess,
            NotificationKind::Warning => EffectId::NotificationWarning,
            NotificationKind::Error => EffectId::NotificationError,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            NotificationKind::Success,
            NotificationKind::Warning,
            NotificationKind::Error,
        ]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| CatalogError::unknown_name(s))
    }
}

/// Resolved, device-ready form of a logical effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveCommand {
    /// Play the native primitive
    Primitive {
        effect: EffectId,
        primitive: PrimitiveId,
    },
    /// Play a validated fallback waveform
    Waveform {
        effect: EffectId,
        waveform: WaveformDescriptor,
    },
}

impl PrimitiveCommand {
    pub fn effect(&self) -> EffectId {
        match self {
            PrimitiveCommand::Primitive { effect, .. } | PrimitiveCommand::Waveform { effect, .. } => {
                *effect
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PrimitiveCommand::Waveform { .. })
    }
}

/// Capability-gated mapping from logical effects to device commands.
///
/// # Examples
///
/// ```
/// use hapticore_effects::{EffectCatalog, EffectId, PrimitiveCommand, PrimitiveSupport};
///
/// let catalog = EffectCatalog::new(PrimitiveSupport::all(), true);
/// let cmd = catalog.resolve_name("Heavy").unwrap();
/// assert_eq!(cmd.effect(), EffectId::HeavyClick);
/// assert!(!cmd.is_fallback());
///
/// assert!(catalog.resolve_name("bogus").is_err());
///
/// // Without native primitives every effect plays a waveform
/// let legacy = EffectCatalog::new(PrimitiveSupport::none(), false);
/// assert!(matches!(legacy.resolve(EffectId::Click), PrimitiveCommand::Waveform { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct EffectCatalog {
    support: PrimitiveSupport,
    validator: WaveformValidator,
    force_fallback: bool,
}

impl EffectCatalog {
    pub fn new(support: PrimitiveSupport, has_amplitude_control: bool) -> Self {
        Self {
            support,
            validator: WaveformValidator::new(has_amplitude_control),
            force_fallback: false,
        }
    }

    /// Always resolve to waveform fallbacks, ignoring native primitives.
    #[must_use]
    pub fn with_forced_fallback(mut self, force: bool) -> Self {
        self.force_fallback = force;
        self
    }

    pub fn resolve(&self, effect: EffectId) -> PrimitiveCommand {
        match effect.primitive() {
            Some(primitive) if !self.force_fallback && self.support.contains(primitive) => {
                PrimitiveCommand::Primitive { effect, primitive }
            }
            _ => PrimitiveCommand::Waveform {
                effect,
                waveform: self.fallback(effect),
            },
        }
    }

    /// Resolve an impact tier name (`light`, `medium`, `heavy`).
    pub fn resolve_name(&self, name: &str) -> Result<PrimitiveCommand, CatalogError> {
        let style: ImpactStyle = name.parse()?;
        Ok(self.resolve(style.effect()))
    }

    /// Resolve a notification category (`success`, `warning`, `error`).
    pub fn resolve_notification(&self, category: &str) -> Result<PrimitiveCommand, CatalogError> {
        let kind: NotificationKind = category.parse()?;
        Ok(self.resolve(kind.effect()))
    }

    /// Resolve one of the `EFFECT_*` integer constants.
    pub fn resolve_raw(&self, raw: i32) -> Result<PrimitiveCommand, CatalogError> {
        Ok(self.resolve(EffectId::from_raw(raw)?))
    }

    /// Fallback waveform normalized for the device.
    pub fn fallback(&self, effect: EffectId) -> WaveformDescriptor {
        self.validator.normalize(effect.fallback_waveform())
    }

    pub fn support(&self) -> PrimitiveSupport {
        self.support
    }

    pub fn is_fallback_forced(&self) -> bool {
        self.force_fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hapticore_errors::WaveformError;

    #[test]
    fn test_fallback_templates_are_valid() -> Result<(), WaveformError> {
        for effect in EffectId::ALL {
            let template = effect.fallback_waveform();
            let amplitudes = template.amplitudes().map(<[u8]>::to_vec);
            let validated =
                WaveformDescriptor::new(template.timings().to_vec(), amplitudes, -1)?;
            assert_eq!(validated, template, "{effect} template");
            assert!(!template.is_looping());
        }
        Ok(())
    }

    #[test]
    fn test_notification_error_has_three_pulses() {
        let wf = EffectId::NotificationError.fallback_waveform();
        assert_eq!(wf.len(), 6);
        let pulses = wf
            .segments()
            .filter(|s| matches!(s.level, crate::SegmentLevel::On(_)))
            .count();
        assert_eq!(pulses, 3);
    }

    #[test]
    fn test_impact_names_distinct_and_stable() -> Result<(), CatalogError> {
        let catalog = EffectCatalog::new(PrimitiveSupport::all(), true);
        let light = catalog.resolve_name("light")?;
        let medium = catalog.resolve_name("medium")?;
        let heavy = catalog.resolve_name("heavy")?;
        assert_ne!(light, medium);
        assert_ne!(medium, heavy);
        assert_ne!(light, heavy);
        assert_eq!(catalog.resolve_name("LIGHT")?, light);
        assert_eq!(light.effect(), EffectId::Tick);
        assert_eq!(medium.effect(), EffectId::Click);
        assert_eq!(heavy.effect(), EffectId::HeavyClick);
        Ok(())
    }

    #[test]
    fn test_unknown_name() {
        let catalog = EffectCatalog::new(PrimitiveSupport::all(), true);
        assert_eq!(
            catalog.resolve_name("bogus"),
            Err(CatalogError::UnknownEffectName("bogus".to_string()))
        );
        assert_eq!(
            catalog.resolve_notification("fatal"),
            Err(CatalogError::UnknownEffectName("fatal".to_string()))
        );
    }

    #[test]
    fn test_partial_support_falls_back_per_primitive() {
        let support = PrimitiveSupport::none().with(PrimitiveId::Click);
        let catalog = EffectCatalog::new(support, true);
        assert!(!catalog.resolve(EffectId::Click).is_fallback());
        assert!(catalog.resolve(EffectId::Tick).is_fallback());
    }

    #[test]
    fn test_forced_fallback() {
        let catalog =
            EffectCatalog::new(PrimitiveSupport::all(), true).with_forced_fallback(true);
        for effect in EffectId::ALL {
            assert!(catalog.resolve(effect).is_fallback(), "{effect}");
        }
    }

    #[test]
    fn test_notifications_never_native() {
        let catalog = EffectCatalog::new(PrimitiveSupport::all(), true);
        for kind in ["success", "warning", "error"] {
            assert!(matches!(
                catalog.resolve_notification(kind),
                Ok(PrimitiveCommand::Waveform { .. })
            ));
        }
    }

    #[test]
    fn test_fallback_normalized_without_amplitude_control() {
        let catalog = EffectCatalog::new(PrimitiveSupport::none(), false);
        assert!(catalog.fallback(EffectId::Click).is_amplitude_agnostic());
    }

    #[test]
    fn test_raw_ids() {
        for effect in EffectId::ALL {
            assert_eq!(EffectId::from_raw(effect.raw()), Ok(effect));
        }
        assert_eq!(EffectId::from_raw(3), Err(CatalogError::UnknownEffectId(3)));
    }

    #[test]
    fn test_primitive_support_set() {
        let support: PrimitiveSupport = [PrimitiveId::Tick, PrimitiveId::HeavyClick]
            .into_iter()
            .collect();
        assert!(support.contains(PrimitiveId::Tick));
        assert!(!support.contains(PrimitiveId::Click));
        assert_eq!(support.iter().count(), 2);
        assert!(PrimitiveSupport::none().is_empty());
    }
}
