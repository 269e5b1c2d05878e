//! Walk through every logical effect

use std::time::Duration;

use anyhow::Result;
use hapticore_effects::{AMPLITUDE_MEDIUM, WaveformRequest};
use hapticore_engine::Haptics;
use hapticore_errors::HapticsResult;
use hapticore_scheduler::SessionHandle;
use tokio::time::sleep;

use crate::commands::{App, settle};
use crate::error::CliError;
use crate::output;

const GAP: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy)]
enum Step {
    Impact(&'static str),
    Selection,
    DoubleClick,
    Notify(&'static str),
    OneShot,
    Ramp,
}

const STEPS: [Step; 10] = [
    Step::Impact("light"),
    Step::Impact("medium"),
    Step::Impact("heavy"),
    Step::Selection,
    Step::DoubleClick,
    Step::Notify("success"),
    Step::Notify("warning"),
    Step::Notify("error"),
    Step::OneShot,
    Step::Ramp,
];

impl Step {
    fn label(self) -> String {
        match self {
            Step::Impact(style) => format!("impact {style}"),
            Step::Selection => "selection".to_string(),
            Step::DoubleClick => "double click".to_string(),
            Step::Notify(category) => format!("notify {category}"),
            Step::OneShot => "one-shot".to_string(),
            Step::Ramp => "ramp".to_string(),
        }
    }

    fn play(self, haptics: &Haptics) -> HapticsResult<SessionHandle> {
        match self {
            Step::Impact(style) => haptics.impact(style),
            Step::Selection => haptics.selection(),
            Step::DoubleClick => haptics.double_click(),
            Step::Notify(category) => haptics.notification(category),
            Step::OneShot => haptics.one_shot(80, AMPLITUDE_MEDIUM),
            Step::Ramp => haptics.waveform(&WaveformRequest::new(
                vec![0, 60, 40, 60, 40, 60],
                Some(vec![0, 64, 0, 128, 0, 255]),
                -1,
            )),
        }
    }
}

pub async fn execute(app: &App) -> Result<()> {
    for step in STEPS {
        let session = step.play(&app.haptics).map_err(CliError::from)?;
        let outcome = settle(&app.haptics, session, None).await;
        if !app.json {
            output::print_session(&step.label(), session, outcome, false);
        }
        sleep(GAP).await;
    }

    output::print_stats(&app.haptics.stats(), app.json);
    Ok(())
}
