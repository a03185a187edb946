//! M2G - Terminal Mantra to Ghanam Converter
//!
//! A terminal client for converting vedic mantras to the ghanam recitation
//! style. The transformation runs on an external HTTP service; this program
//! drives the conversion workflow and renders it in the terminal.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::App;
use infrastructure::{DEFAULT_ENDPOINT, HttpTransformService};
use presentation::{InputHandler, render_ui};

/// Entry point for the m2g terminal converter.
///
/// Takes the transform endpoint as an optional first argument, sets up the
/// terminal interface, and runs the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let service = Arc::new(HttpTransformService::new(endpoint));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(service);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Each tick applies the outstanding conversion's resolution if one has
/// arrived, redraws the frame, then waits briefly for input. Continues
/// running until the user presses Esc.
///
/// # Arguments
///
/// * `terminal` - Terminal interface for rendering
/// * `app` - Mutable reference to application state
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.poll_conversion();

        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Esc => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                },
                Event::Paste(text) => InputHandler::handle_paste(app, &text),
                _ => {}
            }
        }
    }
}
