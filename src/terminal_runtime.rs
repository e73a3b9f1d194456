use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::surface::Canvas;

/// Canvas drawn straight to stdout.
pub type AppCanvas = Canvas<CrosstermBackend<io::Stdout>>;

/// Keeps the terminal in game mode for as long as it is alive.
///
/// Game mode is raw input, a hidden cursor and the alternate screen. Dropping
/// the session puts the user's shell screen back.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        // Raw mode is already on, so a failed screen switch must undo it.
        execute!(io::stdout(), EnterAlternateScreen, Hide).inspect_err(|_| {
            let _ = disable_raw_mode();
        })?;

        Ok(Self { _private: () })
    }

    /// Opens a ratatui terminal on stdout and wraps it as the game surface.
    pub fn canvas(&self) -> io::Result<AppCanvas> {
        let backend = CrosstermBackend::new(io::stdout());
        Canvas::new(Terminal::new(backend)?)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        leave_game_mode();
    }
}

/// Leaves game mode before a panic message is printed, so it stays readable.
pub fn install_panic_hook() {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        leave_game_mode();
        previous(info);
    }));
}

fn leave_game_mode() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
}
