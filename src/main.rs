use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

mod controller;
mod error;
mod store;
mod task;
mod ui;

use controller::Controller;
use store::TaskStore;

const DB_PATH: &str = "tasks.db";

fn main() -> anyhow::Result<()> {
    let store = TaskStore::open(DB_PATH)
        .with_context(|| format!("failed to open database at {DB_PATH}"))?;
    let mut controller = Controller::new(store)?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run_app(&mut terminal, &mut controller);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result.context("terminal event loop failed")
}
