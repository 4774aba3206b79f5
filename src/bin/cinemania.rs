//! Cinemania TUI Application
//!
//! A terminal user interface for browsing movies on The Movie Database.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event;
use tracing::{error, info};

use cinemania::tui::{
    handle_event, install_panic_hook, process_state, render, restore_terminal, setup_terminal,
    AppState, Fetcher,
};
use cinemania::{logging, Config, TmdbClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config and logging fail before the terminal switches modes, so their
    // errors print normally.
    let config = Config::from_env()?;
    let log_path = logging::init(&config)?;
    info!(base_url = %config.base_url, log = ?log_path, "starting cinemania");

    let client = TmdbClient::new(&config)?;
    let fetcher = Fetcher::new(Arc::new(client));

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &fetcher);
    restore_terminal(&mut terminal)?;

    if let Err(ref e) = result {
        error!(error = %e, "event loop failed");
    }
    info!("exiting");
    result
}

fn run(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    fetcher: &Fetcher,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = AppState::new();

    loop {
        terminal.draw(|f| render(f, &mut state))?;

        process_state(&mut state, fetcher);

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            handle_event(event, &mut state);
        }
    }

    Ok(())
}
