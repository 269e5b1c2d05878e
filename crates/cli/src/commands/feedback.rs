//! View feedback through the router

use anyhow::Result;
use hapticore_effects::FeedbackKind;
use hapticore_engine::ViewHandle;

use crate::commands::App;
use crate::error::CliError;
use crate::output;

/// Feedback kind by integer constant or by name, with `-` and `_`
/// interchangeable.
pub fn parse_kind(input: &str) -> Result<FeedbackKind, CliError> {
    if let Ok(raw) = input.parse::<i32>() {
        return FeedbackKind::from_raw(raw).map_err(|e| CliError::Haptics(e.into()));
    }
    let wanted = input.trim().to_ascii_lowercase().replace('-', "_");
    FeedbackKind::ALL
        .into_iter()
        .find(|kind| kind.as_str() == wanted)
        .ok_or_else(|| CliError::InvalidArgument(format!("unknown feedback kind: {input}")))
}

/// Perform each kind in order on one view.
pub fn execute(app: &App, kinds: &[String], view: u64, accessibility_off: bool) -> Result<()> {
    let parsed = kinds
        .iter()
        .map(|k| parse_kind(k))
        .collect::<Result<Vec<_>, _>>()?;

    app.accessibility.set_enabled(!accessibility_off);
    let handle = ViewHandle::new(view);
    let results: Vec<(String, bool)> = parsed
        .into_iter()
        .map(|kind| {
            let performed = app.haptics.perform_haptic_feedback(handle, kind);
            (kind.to_string(), performed)
        })
        .collect();

    output::print_feedback(&results, view, app.json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_by_name_or_id() {
        assert!(matches!(parse_kind("long-press"), Ok(FeedbackKind::LongPress)));
        assert!(matches!(parse_kind("NO_HAPTICS"), Ok(FeedbackKind::NoHaptics)));
        assert!(matches!(parse_kind("-1"), Ok(FeedbackKind::NoHaptics)));
        assert!(matches!(parse_kind("3"), Ok(FeedbackKind::KeyboardTap)));
        assert!(matches!(parse_kind("999"), Err(CliError::Haptics(_))));
        assert!(matches!(parse_kind("wiggle"), Err(CliError::InvalidArgument(_))));
    }
}
