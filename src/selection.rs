//! Two-click move selection.

use crate::chess::{on_board, Square};

/// Accumulates board clicks into a candidate move.
///
/// Holds at most one square between ticks: the second distinct on-board click
/// immediately produces a candidate and empties the accumulator. Legality is
/// decided elsewhere; this type only tracks the gesture.
#[derive(Debug, Default)]
pub struct Selection {
    held: Option<Square>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one click. Re-clicking the held square or clicking outside the
    /// playable grid clears the accumulator; otherwise the square is kept,
    /// and a second kept square yields the `(from, to)` candidate.
    pub fn on_square_clicked(&mut self, square: Square) -> Option<(Square, Square)> {
        if !on_board(square) || self.held == Some(square) {
            self.held = None;
            return None;
        }
        match self.held.take() {
            Some(from) => Some((from, square)),
            None => {
                self.held = Some(square);
                None
            }
        }
    }

    /// The square currently highlighted for the player, if any.
    pub fn selected(&self) -> Option<Square> {
        self.held
    }

    pub fn clear(&mut self) {
        self.held = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_clicks_make_a_candidate() {
        let mut sel = Selection::new();
        assert_eq!(sel.on_square_clicked((6, 4)), None);
        assert_eq!(sel.selected(), Some((6, 4)));
        assert_eq!(sel.on_square_clicked((4, 4)), Some(((6, 4), (4, 4))));
        assert_eq!(sel.selected(), None, "accumulator empties after emitting");
    }

    #[test]
    fn reclicking_the_held_square_clears() {
        let mut sel = Selection::new();
        sel.on_square_clicked((3, 3));
        assert_eq!(sel.on_square_clicked((3, 3)), None);
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn off_board_click_clears() {
        let mut sel = Selection::new();
        sel.on_square_clicked((2, 2));
        assert_eq!(sel.on_square_clicked((2, 8)), None, "side panel column");
        assert_eq!(sel.selected(), None);
        assert_eq!(sel.on_square_clicked((8, 0)), None);
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn gesture_restarts_cleanly_after_a_clear() {
        let mut sel = Selection::new();
        sel.on_square_clicked((0, 0));
        sel.on_square_clicked((9, 9));
        assert_eq!(sel.on_square_clicked((1, 1)), None);
        assert_eq!(sel.on_square_clicked((2, 2)), Some(((1, 1), (2, 2))));
    }

    #[test]
    fn never_holds_more_than_one_square() {
        let mut sel = Selection::new();
        for click in [(0usize, 0usize), (1, 1), (2, 2), (3, 3), (3, 3), (9, 9), (4, 4)] {
            sel.on_square_clicked(click);
            // `held` is an Option, so the invariant is structural; the
            // observable part is that a selection is at most one square.
            assert!(sel.selected().map_or(true, |sq| on_board(sq)));
        }
    }
}
