//! Configuration loading tests.

use std::time::Duration;

use hapticore_engine::HapticsConfig;
use hapticore_engine::config::SCHEMA_VERSION;
use hapticore_errors::HapticsError;
use hapticore_test_helpers::prelude::*;

#[test]
fn partial_yaml_keeps_defaults() -> TestResult {
    let config = HapticsConfig::from_yaml_str(
        r#"
catalog:
  force_waveform_fallback: true
scheduler:
  primitive_duration_ms: 40
"#,
    )?;

    assert_eq!(config.schema_version, SCHEMA_VERSION);
    assert!(config.catalog.force_waveform_fallback);
    assert_eq!(
        config.scheduler.primitive_duration(),
        Some(Duration::from_millis(40))
    );
    assert!(config.feedback.respect_accessibility);
    assert_eq!(config.logging.level, "info");
    Ok(())
}

#[test]
fn json_document() -> TestResult {
    let config = HapticsConfig::from_json_str(
        r#"{"feedback":{"respect_accessibility":false},"logging":{"level":"debug","json_format":true}}"#,
    )?;

    assert!(!config.feedback.respect_accessibility);
    assert!(config.logging.json_format);
    assert_eq!(config.logging.level, "debug");
    Ok(())
}

#[test]
fn malformed_and_invalid_documents_are_config_errors() {
    assert!(matches!(
        HapticsConfig::from_yaml_str("catalog: [not, a, map]"),
        Err(HapticsError::Config(_))
    ));
    assert!(matches!(
        HapticsConfig::from_json_str("{"),
        Err(HapticsError::Config(_))
    ));
    assert!(matches!(
        HapticsConfig::from_yaml_str("scheduler:\n  primitive_duration_ms: 60000\n"),
        Err(HapticsError::Config(_))
    ));
}

#[test]
fn save_and_load_by_extension() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut config = HapticsConfig::default();
    config.catalog.force_waveform_fallback = true;
    config.logging.level = "warn".to_string();

    for name in ["haptics.yaml", "haptics.json"] {
        let path = dir.path().join(name);
        config.save(&path)?;
        assert_eq!(HapticsConfig::load(&path)?, config);
    }
    Ok(())
}

#[test]
fn load_errors() -> TestResult {
    let dir = tempfile::tempdir()?;

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(HapticsConfig::load(&missing), Err(HapticsError::Io(_))));

    let toml = dir.path().join("haptics.toml");
    std::fs::write(&toml, "level = 1")?;
    assert!(matches!(HapticsConfig::load(&toml), Err(HapticsError::Config(_))));
    Ok(())
}
