//! Input handling: translates keyboard and mouse events into orchestrator
//! events. The key bindings follow the original game: `z` undoes, `r`
//! restarts, `q` (or Escape) quits.

use crate::app::App;
use crate::tui::widgets;
use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Rect;

pub fn handle_key_press(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') | KeyCode::Esc => app.on_quit(),
        KeyCode::Char('z') => app.on_undo(),
        KeyCode::Char('r') => app.on_restart(),
        _ => {}
    }
}

/// Maps a left click to a board square and feeds it to the selection
/// accumulator. Clicks that land outside the playable grid (borders, side
/// panel) still reach the accumulator so they clear any held selection.
pub fn handle_mouse_event(app: &mut App, kind: MouseEventKind, col: u16, row: u16, terminal_size: Rect) {
    if let MouseEventKind::Down(MouseButton::Left) = kind {
        app.on_square_clicked(widgets::square_at(terminal_size, col, row));
    }
}
