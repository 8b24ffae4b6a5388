//! Logger bootstrap for the `ccenter` binary.
//!
//! Library code only talks to the `log` facade and emits `key=value` events.
//! The binary picks a sink: stderr for one-shot subcommands, a rotating file
//! for the terminal UI, where stderr output would tear the alternate screen.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;

use crate::error::{DashboardError, Result};

const LOG_FILE_BASENAME: &str = "ccenter";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Default level when neither `--log-level` nor `CCENTER_LOG` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Rotating files under this directory.
    Directory(PathBuf),
}

/// Start the global logger. Keep the returned handle alive for the lifetime
/// of the process; dropping it flushes and stops file logging.
///
/// # Errors
/// Unsupported level names, an uncreatable log directory, or a logger that
/// was already started.
pub fn init_logging(level: &str, target: &LogTarget) -> Result<LoggerHandle> {
    let level = normalize_level(level)?;
    let logger = Logger::try_with_str(level)
        .map_err(|err| DashboardError::Logging(format!("invalid log level `{level}`: {err}")))?;

    let logger = match target {
        LogTarget::Stderr => logger.log_to_stderr().format_for_stderr(flexi_logger::default_format),
        LogTarget::Directory(dir) => {
            ensure_dir(dir)?;
            logger
                .log_to_file(FileSpec::default().directory(dir.as_path()).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
    };

    let handle = logger
        .start()
        .map_err(|err| DashboardError::Logging(format!("failed to start logger: {err}")))?;

    info!(
        "event=app_start status=ok level={} target={:?} version={}",
        level,
        target,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|err| {
        DashboardError::Logging(format!("failed to create log directory `{}`: {err}", dir.display()))
    })
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok("off"),
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(DashboardError::Logging(format!(
            "unsupported log level `{other}`; expected off|trace|debug|info|warn|error"
        ))),
    }
}
