//! Terminal user interface.
//!
//! Owns the raw-mode terminal lifecycle and the fixed-tick event loop: every
//! tick drives the session controller, consumes the commit handoff, redraws,
//! and translates keyboard/mouse input into orchestrator events.

use crate::app::App;
use crate::chess::Move;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::{
    io,
    time::{Duration, Instant},
};

pub mod input;
pub mod widgets;

/// How long the destination square of a fresh commit stays flashed.
const EFFECT_DURATION: Duration = Duration::from_millis(400);

/// Main entry point for the terminal user interface.
///
/// Runs until the session controller asks to quit, then restores the
/// terminal. The loop never blocks for more than one 100 ms input poll.
pub fn run(app: &mut App) -> io::Result<()> {
    let mut terminal = init_terminal()?;
    let mut effect: Option<(Move, Instant)> = None;

    loop {
        if app.should_quit {
            break;
        }

        app.update();

        // Consume the commit handoff exactly once per move.
        if let Some(record) = app.take_commit_record() {
            if record.animate {
                effect = Some((record.mv, Instant::now()));
            }
        }
        if let Some((_, since)) = effect {
            if since.elapsed() >= EFFECT_DURATION {
                effect = None;
            }
        }

        let flashed = effect.map(|(mv, _)| mv);
        terminal.draw(|f| widgets::render(app, flashed, f))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        input::handle_key_press(app, key.code);
                    }
                }
                Event::Mouse(mouse) => {
                    let terminal_size = terminal.size()?;
                    let terminal_rect = Rect::new(0, 0, terminal_size.width, terminal_size.height);
                    input::handle_mouse_event(app, mouse.kind, mouse.column, mouse.row, terminal_rect);
                }
                _ => {}
            }
        }
    }

    restore_terminal(&mut terminal)
}

/// Initializes the terminal for raw mode operation.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    execute!(
        handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        crossterm::cursor::Hide
    )?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Restores the terminal to normal operation mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    terminal.show_cursor()?;
    disable_raw_mode()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    execute!(
        handle,
        LeaveAlternateScreen,
        DisableMouseCapture,
        crossterm::cursor::Show
    )?;
    Ok(())
}
