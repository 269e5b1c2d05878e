//! Capability report

use anyhow::Result;

use crate::commands::App;
use crate::error::CliError;
use crate::output;

/// Print the capability; with `require`, a missing vibrator is an error.
pub fn execute(app: &App, require: bool) -> Result<()> {
    let capability = if require {
        app.haptics.require_vibrator().map_err(CliError::from)?
    } else {
        app.haptics.capability()
    };
    output::print_capability(&capability, app.json);
    Ok(())
}
