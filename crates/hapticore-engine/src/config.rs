//! Haptics configuration
//!
//! Loaded from YAML or JSON, chosen by file extension. Every field has a
//! default so a partial file, or none at all, is valid.

use std::path::Path;
use std::time::Duration;

use hapticore_errors::{HapticsError, HapticsResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const SCHEMA_VERSION: &str = "hapticore.config/1";

/// Upper bound for the primitive playback override.
pub const MAX_PRIMITIVE_DURATION_MS: u64 = 5_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticsConfig {
    /// Configuration schema version
    pub schema_version: String,
    pub catalog: CatalogConfig,
    pub scheduler: SchedulerSettings,
    pub feedback: FeedbackConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Play fallback waveforms even when the device has native primitives
    pub force_waveform_fallback: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// How long a primitive keeps the session busy; nominal per-primitive
    /// duration when unset
    pub primitive_duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Honor the system "haptic feedback" accessibility toggle
    pub respect_accessibility: bool,
}

/// Structured logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Enable JSON formatting
    pub json_format: bool,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            catalog: CatalogConfig::default(),
            scheduler: SchedulerSettings::default(),
            feedback: FeedbackConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            respect_accessibility: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl SchedulerSettings {
    pub fn primitive_duration(&self) -> Option<Duration> {
        self.primitive_duration_ms.map(Duration::from_millis)
    }
}

impl HapticsConfig {
    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`HapticsError::Config`] for malformed YAML or invalid values.
    pub fn from_yaml_str(text: &str) -> HapticsResult<Self> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|e| HapticsError::config(format!("invalid YAML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`HapticsError::Config`] for malformed JSON or invalid values.
    pub fn from_json_str(text: &str) -> HapticsResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| HapticsError::config(format!("invalid JSON config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`HapticsError::Io`] when the file cannot be read and
    /// [`HapticsError::Config`] for an unknown extension or invalid content.
    pub fn load(path: impl AsRef<Path>) -> HapticsResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading haptics config");
        let text = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let config = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => {
                return Err(HapticsError::config(format!(
                    "unsupported config format: {}",
                    path.display()
                )));
            }
        };

        info!(path = %path.display(), "haptics config loaded");
        Ok(config)
    }

    /// Write as YAML or JSON, by extension.
    ///
    /// # Errors
    ///
    /// Returns [`HapticsError::Config`] on serialization failure or unknown
    /// extension and [`HapticsError::Io`] when the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> HapticsResult<()> {
        let path = path.as_ref();
        let text = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => serde_yaml::to_string(self)
                .map_err(|e| HapticsError::config(format!("failed to serialize config: {e}")))?,
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| HapticsError::config(format!("failed to serialize config: {e}")))?,
            _ => {
                return Err(HapticsError::config(format!(
                    "unsupported config format: {}",
                    path.display()
                )));
            }
        };
        std::fs::write(path, text)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`HapticsError::Config`] naming the first invalid value.
    pub fn validate(&self) -> HapticsResult<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(HapticsError::config(format!(
                "unsupported config schema version: {}",
                self.schema_version
            )));
        }

        if let Some(ms) = self.scheduler.primitive_duration_ms
            && (ms == 0 || ms > MAX_PRIMITIVE_DURATION_MS)
        {
            return Err(HapticsError::config(format!(
                "invalid primitive duration: {ms} ms"
            )));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(HapticsError::config(format!(
                "invalid log level: {}",
                self.logging.level
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = HapticsConfig::default();
        assert!(matches!(config.validate(), Ok(())));
        assert!(config.feedback.respect_accessibility);
        assert_eq!(config.scheduler.primitive_duration(), None);
    }

    #[test]
    fn test_rejects_zero_primitive_duration() {
        let mut config = HapticsConfig::default();
        config.scheduler.primitive_duration_ms = Some(0);
        assert!(matches!(config.validate(), Err(HapticsError::Config(_))));
    }

    #[test]
    fn test_rejects_unknown_schema() {
        let config = HapticsConfig {
            schema_version: "hapticore.config/9".to_string(),
            ..HapticsConfig::default()
        };
        assert!(matches!(config.validate(), Err(HapticsError::Config(_))));
    }

    #[test]
    fn test_level_case_insensitive() {
        let mut config = HapticsConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(matches!(config.validate(), Ok(())));
        config.logging.level = "loud".to_string();
        assert!(matches!(config.validate(), Err(HapticsError::Config(_))));
    }
}
