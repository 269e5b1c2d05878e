//! hapticctl - haptics playground CLI
//!
//! Plays impacts, effects, notifications, one-shots and custom waveforms
//! through the hapticore engine on a simulated vibrator that logs every
//! actuation.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hapticore_effects::AMPLITUDE_DEFAULT;
use hapticore_engine::{Haptics, HapticsConfig, LoggingConfig, StaticAccessibility, init_logging};
use hapticore_scheduler::LogVibrator;

use crate::commands::App;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "hapticctl")]
#[command(about = "Haptics CLI - play and inspect vibration effects")]
#[command(version)]
#[command(long_about = "
hapticctl drives the hapticore engine against a simulated vibrator.
Every actuation is logged; raise verbosity with -v to see them.

Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// YAML or JSON configuration file
    #[arg(long, global = true, env = "HAPTICCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Simulate a device without a vibrator
    #[arg(long, global = true)]
    no_vibrator: bool,

    /// Simulate a vibrator without amplitude control
    #[arg(long, global = true)]
    no_amplitude_control: bool,

    /// Platform API level reported by the simulated device
    #[arg(long, global = true, default_value_t = 34)]
    api_level: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show vibrator capabilities
    Caps {
        /// Fail when the device has no vibrator
        #[arg(long)]
        require: bool,
    },

    /// Play an impact tier: light, medium or heavy
    Impact { style: String },

    /// Play an effect by name (click, double-click, tick, heavy-click, ...) or id
    Effect { effect: String },

    /// Play a notification: success, warning or error
    Notify { category: String },

    /// Vibrate once
    OneShot {
        /// Duration in milliseconds
        duration_ms: u32,
        /// Amplitude 1-255, or -1 for the device default
        #[arg(short, long, default_value_t = AMPLITUDE_DEFAULT, allow_negative_numbers = true)]
        amplitude: i32,
    },

    /// Play a custom waveform from a JSON request
    Waveform {
        /// Inline request, e.g. '{"timings":[0,100,50,100],"repeat":-1}'
        request: Option<String>,
        /// Read the request from a file
        #[arg(long, conflicts_with = "request")]
        file: Option<PathBuf>,
        /// Cancel playback after this many milliseconds
        #[arg(long)]
        cancel_after: Option<u64>,
    },

    /// Perform view feedback kinds in order
    Feedback {
        /// Kinds by name (long-press, confirm, no-haptics, ...) or id
        #[arg(required = true, allow_negative_numbers = true)]
        kinds: Vec<String>,
        /// View identifier
        #[arg(long, default_value_t = 1)]
        view: u64,
        /// Simulate the system haptic feedback setting turned off
        #[arg(long)]
        accessibility_off: bool,
    },

    /// Play every effect in turn
    Demo,
}

fn log_level(verbose: u8, config: &LoggingConfig, from_file: bool) -> String {
    match verbose {
        0 if from_file => config.level.clone(),
        0 => "warn".to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn load_config(cli: &Cli) -> Result<HapticsConfig, CliError> {
    match &cli.config {
        Some(path) => Ok(HapticsConfig::load(path)?),
        None => Ok(HapticsConfig::default()),
    }
}

fn build_app(cli: &Cli, config: HapticsConfig) -> Result<App, CliError> {
    let driver = if cli.no_vibrator {
        LogVibrator::absent()
    } else {
        LogVibrator::new()
    }
    .with_amplitude_control(!cli.no_amplitude_control)
    .with_api_level(cli.api_level);

    let accessibility = Arc::new(StaticAccessibility::enabled());
    let haptics = Haptics::builder(Arc::new(driver))
        .config(config)
        .accessibility(accessibility.clone())
        .build()?;

    Ok(App {
        haptics,
        accessibility,
        json: cli.json,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    let logging = LoggingConfig {
        level: log_level(cli.verbose, &config.logging, cli.config.is_some()),
        json_format: config.logging.json_format,
    };
    init_logging(&logging).map_err(CliError::from)?;

    let app = build_app(cli, config)?;
    let result = execute_command(&app, &cli.command).await;
    app.haptics.shutdown();
    result
}

async fn execute_command(app: &App, command: &Commands) -> Result<()> {
    match command {
        Commands::Caps { require } => commands::caps::execute(app, *require),
        Commands::Impact { style } => commands::play::impact(app, style).await,
        Commands::Effect { effect } => commands::play::effect(app, effect).await,
        Commands::Notify { category } => commands::play::notify(app, category).await,
        Commands::OneShot {
            duration_ms,
            amplitude,
        } => commands::play::one_shot(app, *duration_ms, *amplitude).await,
        Commands::Waveform {
            request,
            file,
            cancel_after,
        } => {
            let request = commands::play::load_request(request.as_deref(), file.as_deref())?;
            commands::play::waveform(app, &request, cancel_after.map(Duration::from_millis)).await
        }
        Commands::Feedback {
            kinds,
            view,
            accessibility_off,
        } => commands::feedback::execute(app, kinds, *view, *accessibility_off),
        Commands::Demo => commands::demo::execute(app).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["hapticctl", "caps"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.api_level, 34);
        assert!(!cli.no_vibrator);
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::Caps { require: false }));
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from([
            "hapticctl",
            "impact",
            "heavy",
            "--json",
            "-vv",
            "--no-amplitude-control",
            "--api-level",
            "30",
        ])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_amplitude_control);
        assert_eq!(cli.api_level, 30);
        match &cli.command {
            Commands::Impact { style } => assert_eq!(style, "heavy"),
            _ => return Err("expected Impact command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_one_shot_amplitude() -> TestResult {
        let cli = Cli::try_parse_from(["hapticctl", "one-shot", "80"])?;
        assert!(matches!(
            cli.command,
            Commands::OneShot {
                duration_ms: 80,
                amplitude: AMPLITUDE_DEFAULT
            }
        ));

        let cli = Cli::try_parse_from(["hapticctl", "one-shot", "80", "-a", "200"])?;
        assert!(matches!(
            cli.command,
            Commands::OneShot {
                amplitude: 200,
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn parse_waveform_sources_conflict() {
        let result = Cli::try_parse_from([
            "hapticctl",
            "waveform",
            r#"{"timings":[0,10]}"#,
            "--file",
            "w.json",
        ]);
        assert!(matches!(result, Err(ref e) if e.kind() == clap::error::ErrorKind::ArgumentConflict));
    }

    #[test]
    fn parse_feedback_kinds() -> TestResult {
        let cli = Cli::try_parse_from([
            "hapticctl",
            "feedback",
            "no-haptics",
            "-1",
            "long-press",
            "--view",
            "9",
        ])?;
        match &cli.command {
            Commands::Feedback {
                kinds,
                view,
                accessibility_off,
            } => {
                assert_eq!(kinds, &["no-haptics", "-1", "long-press"]);
                assert_eq!(*view, 9);
                assert!(!accessibility_off);
            }
            _ => return Err("expected Feedback command".into()),
        }
        Ok(())
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let config = LoggingConfig::default();
        assert_eq!(log_level(0, &config, false), "warn");
        assert_eq!(log_level(0, &config, true), "info");
        assert_eq!(log_level(1, &config, false), "info");
        assert_eq!(log_level(3, &config, false), "trace");
    }
}
