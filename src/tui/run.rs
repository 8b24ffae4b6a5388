//! Terminal UI entry point and setup.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::tui::app::App;

/// Initialise and run the dashboard terminal user interface.
///
/// The terminal is restored before any error from setup or from the event
/// loop is returned.
pub fn run_tui(data: Dataset, now: DateTime<Utc>) -> Result<()> {
    enable_raw_mode()?;
    let mut terminal = enter_screen(io::stdout(), disable_raw_mode)?;

    let mut app = App::new(data, now);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("event=tui_exit last_view={}", app.current_view());
    result?;
    Ok(())
}

/// Switch `out` to the alternate screen and wrap it in a terminal. Raw mode
/// is already on; `undo_raw_mode` runs if either step fails.
fn enter_screen<W: Write>(
    mut out: W,
    undo_raw_mode: impl FnOnce() -> io::Result<()>,
) -> io::Result<Terminal<CrosstermBackend<W>>> {
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
        .and_then(|()| Terminal::new(CrosstermBackend::new(out)))
        .map_err(|err| {
            if let Err(undo) = undo_raw_mode() {
                log::warn!("event=raw_mode_restore_failed error={undo}");
            }
            err
        })
}
