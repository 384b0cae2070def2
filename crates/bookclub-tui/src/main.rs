//! bookclub-tui - terminal admin for the book club catalog.

use bookclub_core::storage::config::Config;
use bookclub_core::utils::logging::init_file_logger;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::backend::CrosstermBackend;
use std::io::{self, stdout};

mod action;
mod app;
mod components;
mod error;
mod event;
mod layout;
mod service;

use app::App;
use error::TuiResult;
use service::{ConnectionStatus, init_service};

const LOG_FILE: &str = "tui.log";

#[tokio::main]
async fn main() -> TuiResult<()> {
    let config = Config::load(None)?;
    let verbose = std::env::args().any(|arg| arg == "--verbose" || arg == "-v");
    if let Ok(dir) = Config::config_dir() {
        // Logging is best effort; the UI works without it.
        let _ = init_file_logger(&dir.join(LOG_FILE), verbose);
    }

    let (service, status) = match init_service(&config) {
        Ok(service) => {
            let status = if service.is_authenticated() {
                ConnectionStatus::Authenticated
            } else {
                ConnectionStatus::Anonymous
            };
            log::debug!("connecting to {}", service.base_url());
            (Some(service), status)
        }
        Err(e) => {
            log::warn!("no API connection: {}", e);
            (None, ConnectionStatus::Error(e.to_string()))
        }
    };

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    // Set panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut app = App::new(&config, service, status);
    let result = app.run_async(&mut terminal).await;

    restore_terminal()?;

    if let Err(ref err) = result {
        eprintln!("Application error: {:?}", err);
    }

    Ok(result?)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
