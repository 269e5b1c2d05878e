//! Output formatting for human and JSON modes

use anyhow::Error;
use colored::*;
use hapticore_scheduler::{Capability, SessionHandle, StatsSnapshot};
use serde::Serialize;
use serde_json::json;

use crate::error::CliError;

/// How a played session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Played to the end
    Completed,
    /// Stopped by `--cancel-after`
    Cancelled,
    /// Nothing played, no vibrator present
    Skipped,
}

impl Outcome {
    fn label(self) -> ColoredString {
        match self {
            Outcome::Completed => "completed".green(),
            Outcome::Cancelled => "cancelled".yellow(),
            Outcome::Skipped => "skipped (no vibrator)".dimmed(),
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format output as JSON: {e}"),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    print_json(&json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    }));
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::InvalidArgument(_)) => "invalid_argument",
        Some(CliError::Haptics(e)) => e.category().as_str(),
        Some(CliError::IoError(_)) => "io",
        Some(CliError::JsonError(_)) => "json",
        None => "unknown",
    }
}

pub fn print_capability(capability: &Capability, json: bool) {
    let primitives: Vec<String> = capability
        .primitives
        .iter()
        .map(|p| p.to_string())
        .collect();

    if json {
        print_json(&json!({
            "success": true,
            "capability": capability,
            "primitives": primitives,
        }));
        return;
    }

    let yes_no = |value: bool| if value { "yes".green() } else { "no".red() };
    println!("{}", "Vibrator capabilities".bold());
    println!("  Vibrator:          {}", yes_no(capability.has_vibrator));
    println!(
        "  Amplitude control: {}",
        yes_no(capability.has_amplitude_control)
    );
    println!("  API level:         {}", capability.api_level);
    if primitives.is_empty() {
        println!("  Primitives:        {}", "none".dimmed());
    } else {
        println!("  Primitives:        {}", primitives.join(", "));
    }
}

pub fn print_session(label: &str, session: SessionHandle, outcome: Outcome, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "command": label,
            "session": session.id(),
            "outcome": outcome,
        }));
    } else {
        println!("{} {} {}", label.cyan(), session, outcome.label());
    }
}

pub fn print_feedback(results: &[(String, bool)], view: u64, json: bool) {
    if json {
        let performed: Vec<_> = results
            .iter()
            .map(|(kind, played)| json!({ "kind": kind, "performed": played }))
            .collect();
        print_json(&json!({
            "success": true,
            "view": view,
            "feedback": performed,
        }));
        return;
    }

    for (kind, played) in results {
        let status = if *played {
            "performed".green()
        } else {
            "skipped".yellow()
        };
        println!("{} {} {}", format!("view#{view}").dimmed(), kind.cyan(), status);
    }
}

pub fn print_stats(stats: &StatsSnapshot, json: bool) {
    if json {
        print_json(&json!({ "success": true, "stats": stats }));
        return;
    }

    println!("{}", "Scheduler".bold());
    println!("  Dispatched:    {}", stats.dispatched);
    println!("  Superseded:    {}", stats.superseded);
    println!("  Cancelled:     {}", stats.cancelled);
    println!("  Completed:     {}", stats.completed);
    println!("  Driver errors: {}", stats.driver_errors);
}
