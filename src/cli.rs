use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Parser;

use crate::cmd::Commands;
use crate::error::DashboardError;
use crate::logging::DEFAULT_LOG_LEVEL;

/// Read-only business dashboard for projects, tasks, assets and services.
/// Records come from a JSON snapshot (--data) or the built-in sample.
#[derive(Parser)]
#[command(name = "ccenter", version, about = "Solo-operator command center dashboard")]
pub struct Cli {
    /// Path to the JSON snapshot. Defaults to ~/.command_center/dashboard.json
    /// when present, otherwise the built-in sample data.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Current time for deadline metrics: YYYY-MM-DD or RFC 3339.
    #[arg(long, global = true, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    /// Log level: off | error | warn | info | debug | trace.
    #[arg(long, global = true, env = "CCENTER_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Parse `--now`. A bare date means midnight UTC of that day.
pub fn parse_now(s: &str) -> Result<DateTime<Utc>, DashboardError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| DashboardError::InvalidDate(s.to_string()))
}
