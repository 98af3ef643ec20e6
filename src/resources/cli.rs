use std::path::PathBuf;

use bevy::prelude::*;

use crate::features::text_reveal::BuildMethod;

/// Command-line arguments parsed at startup.
/// Override the persisted reveal settings for a single run.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct CliArgs {
    /// Usage: `cargo run -- --method fade`
    pub build_method: Option<BuildMethod>,
    /// Speed multiplier added to the base speed.
    /// Usage: `cargo run -- --speed 1.5`
    pub speed: Option<f32>,
    /// Read settings from this file instead of the config directory.
    /// Usage: `cargo run -- --settings ./settings.json`
    pub settings_path: Option<PathBuf>,
}

impl CliArgs {
    /// Parse the process arguments.
    pub fn parse() -> Self {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse an argument list (program name already stripped).
    /// Supports:
    /// - `--method <instant|typewriter|fade>`
    /// - `--speed <f32>`
    /// - `--settings <path>`
    pub fn parse_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut cli = CliArgs::default();

        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1);
            match (args[i].as_str(), value) {
                ("--method", Some(value)) => {
                    match value.parse::<BuildMethod>() {
                        Ok(method) => cli.build_method = Some(method),
                        Err(e) => warn!("CLI: {}", e),
                    }
                    i += 2;
                }
                ("--speed", Some(value)) => {
                    match value.parse::<f32>() {
                        Ok(speed) if speed.is_finite() => cli.speed = Some(speed),
                        _ => warn!("CLI: --speed expects a number, got '{}'", value),
                    }
                    i += 2;
                }
                ("--settings", Some(value)) => {
                    cli.settings_path = Some(PathBuf::from(value));
                    i += 2;
                }
                (flag @ ("--method" | "--speed" | "--settings"), None) => {
                    warn!("CLI: {} requires an argument", flag);
                    i += 1;
                }
                (arg, _) => {
                    if arg.starts_with('-') {
                        warn!("CLI: Unknown argument '{}'", arg);
                    }
                    i += 1;
                }
            }
        }

        cli
    }
}
