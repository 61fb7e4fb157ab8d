use crate::error::{CliError, Result as CliResult};

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, Output};
use log::{Record, debug};
use vs_config::LogLevel;

/// Initialize the `vs` logger.
///
/// Diagnostics never go to stdout, which carries only command output: they
/// land on stderr, or in `log_file` with the source location appended.
/// `colored` applies to stderr only.
#[track_caller]
pub fn initialize(level: LogLevel, log_file: Option<PathBuf>, colored: bool) -> CliResult<()> {
    let (sink, colors, with_source): (Output, _, _) = match &log_file {
        Some(path) => (open_log_file(path)?.into(), None, true),
        None => (std::io::stderr().into(), colored.then(level_colors), false),
    };

    Dispatch::new()
        .level(level.into())
        .format(move |out, message, record| {
            let source = with_source.then(|| source_of(record));
            let line = match &colors {
                Some(colors) => format_line(colors.color(record.level()), message, source),
                None => format_line(record.level(), message, source),
            };
            out.finish(format_args!("{line}"))
        })
        .chain(sink)
        .apply()
        .map_err(|e| CliError::logging(format!("Failed to initialize logger: {e}")))?;

    match log_file {
        Some(path) => debug!("Logging at {} to {}", level.filter(), path.display()),
        None => debug!("Logging at {} to stderr", level.filter()),
    }

    Ok(())
}

#[track_caller]
fn open_log_file(path: &Path) -> CliResult<std::fs::File> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            CliError::logging(format!(
                "Failed to open log file {}: {e}",
                path.display()
            ))
        })
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

fn source_of(record: &Record<'_>) -> String {
    format!(
        "{}:{}",
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0)
    )
}

pub(crate) fn format_line(
    level: impl Display,
    message: impl Display,
    source: Option<String>,
) -> String {
    let date = humantime::format_rfc3339_millis(SystemTime::now());
    match source {
        Some(source) => format!("[{date} - {level}] {message} [{source}]"),
        None => format!("[{date} - {level}] {message}"),
    }
}
