//! Broadcast-wave batch splitter - command line front end.
//!
//! Scans an input directory for `.wav` files, copies the small ones into
//! the output directory and splits the large ones into timecode-continuous
//! segments.
//!
//! Usage:
//!   bwsplit -i <input dir> -o <output dir>
//!
//! Both flags are optional; directories default to the `[paths]` section
//! of `bwsplit.toml` (or `inputFiles` / `outputFiles` without one).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bwsplit_core::config::Settings;
use bwsplit_core::logging::{init_tracing, LogLevel};
use bwsplit_core::orchestrator::run_batch;

/// Config file looked up in the working directory.
const CONFIG_FILE: &str = "bwsplit.toml";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let settings = match Settings::load_from(Path::new(CONFIG_FILE)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(LogLevel::from_config(&settings.logging.level));

    let input_dir = PathBuf::from(
        flag_value(&args, "-i").unwrap_or_else(|| settings.paths.input_folder.clone()),
    );
    let output_dir = PathBuf::from(
        flag_value(&args, "-o").unwrap_or_else(|| settings.paths.output_folder.clone()),
    );

    tracing::info!("Using input directory: {}", input_dir.display());
    tracing::info!("Using output directory: {}", output_dir.display());

    match run_batch(&settings, &input_dir, &output_dir) {
        Ok(report) => {
            report.log_summary();
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Value of a CLI flag: every token after the flag up to the next
/// `-`-prefixed token, joined with spaces.
///
/// Paths containing spaces arrive pre-split by the shell; joining the
/// tokens reconstructs the full path. A flag with no value tokens counts
/// as absent so the configured default applies.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let index = args.iter().position(|a| a == flag)?;
    let parts: Vec<&str> = args[index + 1..]
        .iter()
        .take_while(|a| !a.starts_with('-'))
        .map(String::as_str)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn single_token_value() {
        let argv = args(&["-i", "in", "-o", "out"]);
        assert_eq!(flag_value(&argv, "-i").as_deref(), Some("in"));
        assert_eq!(flag_value(&argv, "-o").as_deref(), Some("out"));
    }

    #[test]
    fn multi_token_path_is_rejoined() {
        let argv = args(&["-i", "My", "Field", "Recordings", "-o", "out"]);
        assert_eq!(
            flag_value(&argv, "-i").as_deref(),
            Some("My Field Recordings")
        );
        assert_eq!(flag_value(&argv, "-o").as_deref(), Some("out"));
    }

    #[test]
    fn missing_flag_yields_none() {
        let argv = args(&["-o", "out"]);
        assert_eq!(flag_value(&argv, "-i"), None);
    }

    #[test]
    fn flag_without_value_yields_none() {
        assert_eq!(flag_value(&args(&["-i"]), "-i"), None);
        assert_eq!(flag_value(&args(&["-i", "-o", "out"]), "-i"), None);
    }

    #[test]
    fn trailing_multi_token_value() {
        let argv = args(&["-o", "out", "with", "spaces"]);
        assert_eq!(flag_value(&argv, "-o").as_deref(), Some("out with spaces"));
    }
}
