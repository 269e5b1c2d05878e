//! Effect, one-shot and waveform playback

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use hapticore_effects::{EffectId, WaveformRequest};
use tracing::debug;

use crate::commands::{App, settle};
use crate::error::CliError;
use crate::output;

/// Effect by integer constant or by name, with `-` and `_` interchangeable.
pub fn parse_effect(input: &str) -> Result<EffectId, CliError> {
    if let Ok(raw) = input.parse::<i32>() {
        return EffectId::from_raw(raw).map_err(|e| CliError::Haptics(e.into()));
    }
    let wanted = input.trim().to_ascii_lowercase().replace('-', "_");
    EffectId::ALL
        .into_iter()
        .find(|effect| effect.to_string() == wanted)
        .ok_or_else(|| CliError::InvalidArgument(format!("unknown effect: {input}")))
}

pub async fn impact(app: &App, style: &str) -> Result<()> {
    let session = app.haptics.impact(style).map_err(CliError::from)?;
    let outcome = settle(&app.haptics, session, None).await;
    output::print_session(&format!("impact {style}"), session, outcome, app.json);
    Ok(())
}

pub async fn effect(app: &App, input: &str) -> Result<()> {
    let effect = parse_effect(input)?;
    let session = app.haptics.effect(effect).map_err(CliError::from)?;
    let outcome = settle(&app.haptics, session, None).await;
    output::print_session(&format!("effect {effect}"), session, outcome, app.json);
    Ok(())
}

pub async fn notify(app: &App, category: &str) -> Result<()> {
    let session = app.haptics.notification(category).map_err(CliError::from)?;
    let outcome = settle(&app.haptics, session, None).await;
    output::print_session(&format!("notify {category}"), session, outcome, app.json);
    Ok(())
}

pub async fn one_shot(app: &App, duration_ms: u32, amplitude: i32) -> Result<()> {
    let session = app
        .haptics
        .one_shot(duration_ms, amplitude)
        .map_err(CliError::from)?;
    let outcome = settle(&app.haptics, session, None).await;
    output::print_session(
        &format!("one-shot {duration_ms}ms"),
        session,
        outcome,
        app.json,
    );
    Ok(())
}

/// Read a waveform request from inline JSON or a file.
pub fn load_request(inline: Option<&str>, file: Option<&Path>) -> Result<WaveformRequest, CliError> {
    let text = match (inline, file) {
        (Some(text), None) => text.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        _ => {
            return Err(CliError::InvalidArgument(
                "provide either an inline JSON request or --file".to_string(),
            ));
        }
    };
    Ok(serde_json::from_str(&text)?)
}

pub async fn waveform(
    app: &App,
    request: &WaveformRequest,
    cancel_after: Option<Duration>,
) -> Result<()> {
    let descriptor = app
        .haptics
        .validator()
        .validate_request(request)
        .map_err(|e| CliError::Haptics(e.into()))?;
    if descriptor.is_looping() && cancel_after.is_none() {
        return Err(CliError::InvalidArgument(
            "a looping waveform needs --cancel-after".to_string(),
        )
        .into());
    }

    let session = app
        .haptics
        .scheduler()
        .dispatch_waveform(descriptor)
        .map_err(CliError::from)?;
    debug!(%session, segments = request.timings.len(), "waveform dispatched");
    let outcome = settle(&app.haptics, session, cancel_after).await;
    output::print_session("waveform", session, outcome, app.json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_by_name_or_id() {
        assert!(matches!(parse_effect("heavy-click"), Ok(EffectId::HeavyClick)));
        assert!(matches!(
            parse_effect("Notification_Error"),
            Ok(EffectId::NotificationError)
        ));
        assert!(matches!(parse_effect("2"), Ok(EffectId::Tick)));
        assert!(matches!(parse_effect("42"), Err(CliError::Haptics(_))));
        assert!(matches!(
            parse_effect("rumble"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn request_source_is_exclusive() {
        assert!(matches!(
            load_request(None, None),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            load_request(Some("{not json"), None),
            Err(CliError::JsonError(_))
        ));
        let request = load_request(Some(r#"{"timings":[0,50]}"#), None);
        assert!(matches!(request, Ok(ref r) if r.repeat == -1 && r.amplitudes.is_none()));
    }
}
