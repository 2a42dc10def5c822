//! Widget rendering for the chess session: the board with its highlights,
//! the game info panel and the paired move log.

use crate::app::{App, PlayerKind};
use crate::chess::{Move, Piece, Side, Square, BOARD_SIZE};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn split_main(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_SIZE as u16 * 2 + 2),
            Constraint::Min(24),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

fn board_rect(area: Rect) -> Rect {
    let (board_col, _) = split_main(area);
    Rect {
        height: board_col.height.min(BOARD_SIZE as u16 + 2),
        ..board_col
    }
}

/// Maps a terminal cell to the board square drawn there. Positions outside
/// the playable grid come back as off-board coordinates; the selection
/// accumulator treats those as a clear.
pub(crate) fn square_at(terminal: Rect, col: u16, row: u16) -> Square {
    let board = board_rect(terminal);
    // Skip the block border.
    let (x0, y0) = (board.x + 1, board.y + 1);
    if col < x0 || row < y0 {
        return (BOARD_SIZE, BOARD_SIZE);
    }
    ((row - y0) as usize, ((col - x0) / 2) as usize)
}

pub fn render(app: &App, flashed: Option<Move>, frame: &mut Frame) {
    let area = frame.size();
    let (_, side_col) = split_main(area);
    draw_board(frame, app, flashed, board_rect(area));

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(3)])
        .split(side_col);
    draw_info(frame, app, side[0]);
    draw_move_log(frame, app, side[1]);
}

fn piece_symbol(piece: Piece) -> char {
    let ch = piece.kind.letter();
    match piece.side {
        Side::White => ch,
        Side::Black => ch.to_ascii_lowercase(),
    }
}

fn draw_board(frame: &mut Frame, app: &App, flashed: Option<Move>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Board");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selected = app.selection();
    let last_to = app.game_state().last_move().map(|m| m.to);
    let targets: Vec<Square> = match selected {
        Some(from) => app
            .legal_moves()
            .iter()
            .filter(|m| m.from == from)
            .map(|m| m.to)
            .collect(),
        None => Vec::new(),
    };

    let mut board_lines = Vec::new();
    for r in 0..BOARD_SIZE {
        let mut line_spans = Vec::new();
        for c in 0..BOARD_SIZE {
            let sq = (r, c);
            let piece = app.game_state().piece_at(sq);

            let (symbol, fg) = match piece {
                Some(p) => (
                    piece_symbol(p),
                    match p.side {
                        Side::White => Color::White,
                        Side::Black => Color::Blue,
                    },
                ),
                None => ('·', Color::DarkGray),
            };

            // Later rules override earlier ones.
            let mut bg = if (r + c) % 2 == 0 { Color::DarkGray } else { Color::Black };
            if last_to == Some(sq) {
                bg = Color::Green;
            }
            if targets.contains(&sq) {
                bg = Color::Yellow;
            }
            if flashed.map(|m| m.to) == Some(sq) {
                bg = Color::LightYellow;
            }
            if selected == Some(sq) {
                bg = Color::LightBlue;
            }

            let mut style = Style::default().fg(fg).bg(bg);
            if piece.map(|p| p.side) == Some(Side::White) {
                style = style.add_modifier(Modifier::BOLD);
            }
            line_spans.push(Span::styled(format!("{symbol} "), style));
        }
        board_lines.push(Line::from(line_spans));
    }

    frame.render_widget(Paragraph::new(board_lines), inner);
}

fn kind_label(kind: PlayerKind) -> &'static str {
    match kind {
        PlayerKind::Human => "Human",
        PlayerKind::Search => "AI",
    }
}

fn draw_info(frame: &mut Frame, app: &App, area: Rect) {
    let side_to_move = app.side_to_move();
    let mut text = vec![
        Line::from(format!(
            "Turn: {} ({})",
            side_to_move,
            kind_label(app.player_kind(side_to_move))
        )),
        Line::from(format!(
            "White: {}   Black: {}",
            kind_label(app.player_kind(Side::White)),
            kind_label(app.player_kind(Side::Black))
        )),
        Line::from(""),
    ];

    if let Some(outcome) = app.outcome() {
        text.push(Line::styled(
            outcome.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        text.push(Line::from("Press 'r' for a new game"));
    } else if app.is_thinking() {
        text.push(Line::from("AI is thinking..."));
    } else {
        text.push(Line::from("Click two squares to move"));
    }
    text.push(Line::from(""));
    text.push(Line::from("z: undo   r: restart   q: quit"));

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Game"));
    frame.render_widget(paragraph, area);
}

fn draw_move_log(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .game_state()
        .move_log()
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let mut text = format!("{}. {}", i + 1, pair[0]);
            if let Some(reply) = pair.get(1) {
                text.push(' ');
                text.push_str(&reply.to_string());
            }
            ListItem::new(text)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Move Log"));
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicks_map_to_board_squares() {
        let terminal = Rect::new(0, 0, 80, 24);
        // Top-left playable cell sits just inside the border.
        assert_eq!(square_at(terminal, 1, 1), (0, 0));
        // Each cell is two characters wide.
        assert_eq!(square_at(terminal, 2, 1), (0, 0));
        assert_eq!(square_at(terminal, 3, 1), (0, 1));
        assert_eq!(square_at(terminal, 1, 8), (7, 0));
    }

    #[test]
    fn clicks_outside_the_grid_land_off_board() {
        let terminal = Rect::new(0, 0, 80, 24);
        // On the border itself.
        let sq = square_at(terminal, 0, 0);
        assert!(!crate::chess::on_board(sq));
        // In the side panel.
        let sq = square_at(terminal, 40, 5);
        assert!(!crate::chess::on_board(sq));
        // Below the board.
        let sq = square_at(terminal, 1, 20);
        assert!(!crate::chess::on_board(sq));
    }
}
