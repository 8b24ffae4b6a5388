//! # ccenter - Command Center dashboard CLI
//!
//! A read-only business dashboard for a solo service provider: client
//! projects, the day's tasks, a reusable asset library and the service lines
//! on offer, with headline metrics derived on every run.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive dashboard over the built-in sample data
//! ccenter ui
//!
//! # Headline metrics with a pinned clock
//! ccenter stats --now 2025-11-15
//!
//! # Write the sample out as a starting snapshot
//! mkdir -p ~/.command_center && ccenter sample > ~/.command_center/dashboard.json
//!
//! # Any section, as text or JSON
//! ccenter view clients --json
//! ```
//!
//! Records are read from `~/.command_center/dashboard.json` (or `--data`) and
//! never written back.

use chrono::Utc;
use clap::Parser;

use command_center::cli::Cli;
use command_center::cmd::*;
use command_center::dataset::{default_log_dir, default_snapshot_path};
use command_center::logging::{init_logging, LogTarget};
use command_center::Result;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // The TUI owns the terminal, so its logs go to a file.
    let target = match cli.command {
        Commands::Ui => LogTarget::Directory(default_log_dir()),
        _ => LogTarget::Stderr,
    };
    let _logger = init_logging(&cli.log_level, &target)?;

    // Commands that need no records.
    match &cli.command {
        Commands::Sample => return cmd_sample(),
        Commands::Completions { shell } => {
            cmd_completions(*shell);
            return Ok(());
        }
        Commands::Classify { kind, value } => {
            cmd_classify(*kind, value);
            return Ok(());
        }
        _ => {}
    }

    let data = load_dataset(cli.data.as_deref()).map_err(|e| {
        log::error!(
            "event=snapshot_load_failed path={} error={}",
            cli.data.clone().unwrap_or_else(default_snapshot_path).display(),
            e
        );
        e
    })?;
    let now = cli.now.unwrap_or_else(Utc::now);

    match cli.command {
        Commands::Ui => cmd_ui(data, now)?,
        Commands::Stats { json } => cmd_stats(&data, now, json)?,
        Commands::Projects { active } => cmd_projects(&data, now, active),
        Commands::Tasks { all, project } => cmd_tasks(&data, now, all, project),
        Commands::Clients { name } => cmd_clients(&data, name),
        Commands::Assets { kind, tag } => cmd_assets(&data, kind, tag),
        Commands::Services => cmd_services(&data),
        Commands::View { view, json } => cmd_view(&data, now, view, json)?,
        Commands::Sample | Commands::Completions { .. } | Commands::Classify { .. } => {
            unreachable!("record-free commands handled above")
        }
    }
    Ok(())
}
