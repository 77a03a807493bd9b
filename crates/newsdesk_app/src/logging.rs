//! Logger setup for the newsdesk binary.
//!
//! Articles are printed to the terminal, so logs go to a file unless the
//! configuration asks for terminal output.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Append to the configured log file.
    #[default]
    File,
    /// Write to the terminal; warnings and errors go to stderr.
    Terminal,
    Both,
}

impl LogDestination {
    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }

    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }
}

/// Installs the global logger. A second call keeps the first logger.
///
/// If the log file cannot be opened the run continues, with terminal output
/// only when that was also requested.
pub fn initialize(destination: LogDestination, level: LevelFilter, log_file: &Path) {
    let format = record_format();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            format.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match open_log_file(log_file) {
            Ok(file) => loggers.push(WriteLogger::new(level, format, file)),
            Err(err) => eprintln!("Warning: cannot open log file {}: {err}", log_file.display()),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

// Record targets are printed for errors only.
fn record_format() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

/// Opens `path` for appending, so earlier sessions stay readable.
fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn log_file_is_appended_to() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("newsdesk.log");

        writeln!(open_log_file(&path).unwrap(), "first session").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second session").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "first session\nsecond session\n");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_log_file(&dir.path().join("absent").join("newsdesk.log")).is_err());
    }

    #[test]
    fn destination_flags() {
        assert!(LogDestination::File.to_file() && !LogDestination::File.to_terminal());
        assert!(LogDestination::Terminal.to_terminal() && !LogDestination::Terminal.to_file());
        assert!(LogDestination::Both.to_file() && LogDestination::Both.to_terminal());
    }
}
