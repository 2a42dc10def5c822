//! Chess rules engine: the authoritative board state, legal move generation,
//! and exact move undo.
//!
//! This module is the single source of truth for the position. The session
//! controller never keeps a second copy of the board; it only asks for the
//! legal-move set and routes every mutation through [`GameState::apply_move`],
//! [`GameState::undo_last_move`] or [`GameState::reset`].

mod types;

pub use types::{
    on_board, square_from_name, Move, MoveFlag, Outcome, Piece, PieceKind, Side, Square, BOARD_SIZE,
};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const ROOK_DIRS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

fn in_bounds((r, c): (i32, i32)) -> bool {
    (0..BOARD_SIZE as i32).contains(&r) && (0..BOARD_SIZE as i32).contains(&c)
}

type Board = [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE];

/// Which castlings are still available to each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CastlingRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl CastlingRights {
    fn all() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }
}

/// The full game position plus the move log needed to take moves back.
///
/// Castling rights and the en-passant target square are snapshotted before
/// every applied move so that [`GameState::undo_last_move`] restores the
/// position exactly.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    side_to_move: Side,
    move_log: Vec<Move>,
    castling: CastlingRights,
    en_passant: Option<Square>,
    rights_log: Vec<(CastlingRights, Option<Square>)>,
}

impl GameState {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        use PieceKind::*;
        let mut board: Board = [[None; BOARD_SIZE]; BOARD_SIZE];
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for (c, &kind) in back.iter().enumerate() {
            board[0][c] = Some(Piece { side: Side::Black, kind });
            board[7][c] = Some(Piece { side: Side::White, kind });
        }
        for c in 0..BOARD_SIZE {
            board[1][c] = Some(Piece { side: Side::Black, kind: Pawn });
            board[6][c] = Some(Piece { side: Side::White, kind: Pawn });
        }
        GameState {
            board,
            side_to_move: Side::White,
            move_log: Vec::new(),
            castling: CastlingRights::all(),
            en_passant: None,
            rights_log: Vec::new(),
        }
    }

    /// An arbitrary position with an empty move log. Castling rights are
    /// granted only where king and rook still sit on their home squares; no
    /// en-passant capture is available.
    pub fn from_position(board: Board, side_to_move: Side) -> Self {
        let at = |sq: Square, side: Side, kind: PieceKind| board[sq.0][sq.1] == Some(Piece { side, kind });
        let castling = CastlingRights {
            white_kingside: at((7, 4), Side::White, PieceKind::King) && at((7, 7), Side::White, PieceKind::Rook),
            white_queenside: at((7, 4), Side::White, PieceKind::King) && at((7, 0), Side::White, PieceKind::Rook),
            black_kingside: at((0, 4), Side::Black, PieceKind::King) && at((0, 7), Side::Black, PieceKind::Rook),
            black_queenside: at((0, 4), Side::Black, PieceKind::King) && at((0, 0), Side::Black, PieceKind::Rook),
        };
        GameState {
            board,
            side_to_move,
            move_log: Vec::new(),
            castling,
            en_passant: None,
            rights_log: Vec::new(),
        }
    }

    /// Reinitializes to the standard starting position.
    pub fn reset(&mut self) {
        *self = GameState::new();
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.0][sq.1]
    }

    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.move_log.last()
    }

    /// Applies a move produced by [`GameState::legal_moves`]. Moves from any
    /// other source are unsupported and corrupt the position.
    pub fn apply_move(&mut self, mv: &Move) {
        self.rights_log.push((self.castling, self.en_passant));
        let side = mv.piece.side;

        self.board[mv.from.0][mv.from.1] = None;
        self.board[mv.to.0][mv.to.1] = match mv.flag {
            // Promotion is always to a queen, as in the original game.
            MoveFlag::Promotion => Some(Piece { side, kind: PieceKind::Queen }),
            _ => Some(mv.piece),
        };
        match mv.flag {
            MoveFlag::EnPassant => {
                // The captured pawn sits beside the mover, not on the target.
                self.board[mv.from.0][mv.to.1] = None;
            }
            MoveFlag::Castle => {
                let row = mv.from.0;
                if mv.to.1 > mv.from.1 {
                    self.board[row][5] = self.board[row][7].take();
                } else {
                    self.board[row][3] = self.board[row][0].take();
                }
            }
            _ => {}
        }

        // A double pawn push opens an en-passant target behind the pawn.
        self.en_passant = if mv.piece.kind == PieceKind::Pawn && mv.from.0.abs_diff(mv.to.0) == 2 {
            Some(((mv.from.0 + mv.to.0) / 2, mv.from.1))
        } else {
            None
        };
        self.update_castling_rights(mv);

        self.side_to_move = side.opponent();
        self.move_log.push(*mv);
    }

    /// Takes back the most recent move, restoring the position exactly.
    /// Returns the popped move, or `None` when no move has been made.
    pub fn undo_last_move(&mut self) -> Option<Move> {
        let mv = self.move_log.pop()?;
        let (castling, en_passant) = self.rights_log.pop().expect("rights log out of sync with move log");
        self.castling = castling;
        self.en_passant = en_passant;

        self.board[mv.from.0][mv.from.1] = Some(mv.piece);
        self.board[mv.to.0][mv.to.1] = None;
        match mv.flag {
            MoveFlag::EnPassant => {
                self.board[mv.from.0][mv.to.1] = mv.captured;
            }
            MoveFlag::Castle => {
                let row = mv.from.0;
                if mv.to.1 > mv.from.1 {
                    self.board[row][7] = self.board[row][5].take();
                } else {
                    self.board[row][0] = self.board[row][3].take();
                }
            }
            _ => {
                self.board[mv.to.0][mv.to.1] = mv.captured;
            }
        }

        self.side_to_move = mv.piece.side;
        Some(mv)
    }

    fn update_castling_rights(&mut self, mv: &Move) {
        match (mv.piece.side, mv.piece.kind) {
            (Side::White, PieceKind::King) => {
                self.castling.white_kingside = false;
                self.castling.white_queenside = false;
            }
            (Side::Black, PieceKind::King) => {
                self.castling.black_kingside = false;
                self.castling.black_queenside = false;
            }
            _ => {}
        }
        // A rook leaving its home corner, or being captured on it, drops the
        // corresponding right for good.
        for sq in [mv.from, mv.to] {
            match sq {
                (7, 0) => self.castling.white_queenside = false,
                (7, 7) => self.castling.white_kingside = false,
                (0, 0) => self.castling.black_queenside = false,
                (0, 7) => self.castling.black_kingside = false,
                _ => {}
            }
        }
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut probe = self.clone();
        self.pseudo_moves()
            .into_iter()
            .filter(|mv| {
                probe.apply_move(mv);
                let safe = !probe.in_check(mv.piece.side);
                probe.undo_last_move();
                safe
            })
            .collect()
    }

    /// Terminal result, if the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.legal_moves().is_empty() {
            return None;
        }
        if self.in_check(self.side_to_move) {
            Some(Outcome::Checkmate { winner: self.side_to_move.opponent() })
        } else {
            Some(Outcome::Stalemate)
        }
    }

    pub fn in_check(&self, side: Side) -> bool {
        self.is_attacked(self.king_square(side), side.opponent())
    }

    fn king_square(&self, side: Side) -> Square {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if self.board[r][c] == Some(Piece { side, kind: PieceKind::King }) {
                    return (r, c);
                }
            }
        }
        panic!("no {side} king on the board");
    }

    fn is_attacked(&self, sq: Square, by: Side) -> bool {
        let (r, c) = (sq.0 as i32, sq.1 as i32);

        // Pawns capture toward their own advance direction.
        let pawn_row = r - by.pawn_dir();
        for dc in [-1, 1] {
            if in_bounds((pawn_row, c + dc))
                && self.board[pawn_row as usize][(c + dc) as usize]
                    == Some(Piece { side: by, kind: PieceKind::Pawn })
            {
                return true;
            }
        }

        for (offsets, kind) in [(&KNIGHT_OFFSETS, PieceKind::Knight), (&KING_OFFSETS, PieceKind::King)] {
            for &(dr, dc) in offsets {
                if in_bounds((r + dr, c + dc))
                    && self.board[(r + dr) as usize][(c + dc) as usize] == Some(Piece { side: by, kind })
                {
                    return true;
                }
            }
        }

        for &dir in &ROOK_DIRS {
            if let Some(p) = self.first_piece_along(sq, dir) {
                if p.side == by && matches!(p.kind, PieceKind::Rook | PieceKind::Queen) {
                    return true;
                }
            }
        }
        for &dir in &BISHOP_DIRS {
            if let Some(p) = self.first_piece_along(sq, dir) {
                if p.side == by && matches!(p.kind, PieceKind::Bishop | PieceKind::Queen) {
                    return true;
                }
            }
        }
        false
    }

    fn first_piece_along(&self, from: Square, (dr, dc): (i32, i32)) -> Option<Piece> {
        let (mut r, mut c) = (from.0 as i32 + dr, from.1 as i32 + dc);
        while in_bounds((r, c)) {
            if let Some(p) = self.board[r as usize][c as usize] {
                return Some(p);
            }
            r += dr;
            c += dc;
        }
        None
    }

    /// Moves that obey piece movement but may leave the own king attacked;
    /// [`GameState::legal_moves`] filters those out.
    fn pseudo_moves(&self) -> Vec<Move> {
        let side = self.side_to_move;
        let mut out = Vec::new();
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let piece = match self.board[r][c] {
                    Some(p) if p.side == side => p,
                    _ => continue,
                };
                match piece.kind {
                    PieceKind::Pawn => self.pawn_moves((r, c), piece, &mut out),
                    PieceKind::Knight => self.leaper_moves((r, c), piece, &KNIGHT_OFFSETS, &mut out),
                    PieceKind::Bishop => self.slider_moves((r, c), piece, &BISHOP_DIRS, &mut out),
                    PieceKind::Rook => self.slider_moves((r, c), piece, &ROOK_DIRS, &mut out),
                    PieceKind::Queen => {
                        self.slider_moves((r, c), piece, &ROOK_DIRS, &mut out);
                        self.slider_moves((r, c), piece, &BISHOP_DIRS, &mut out);
                    }
                    PieceKind::King => self.leaper_moves((r, c), piece, &KING_OFFSETS, &mut out),
                }
            }
        }
        self.castle_moves(&mut out);
        out
    }

    fn pawn_moves(&self, from: Square, piece: Piece, out: &mut Vec<Move>) {
        let dir = piece.side.pawn_dir();
        let (r, c) = from;
        // Pawns never sit on the last rank, so one step ahead is on the board.
        let next = (r as i32 + dir) as usize;
        let promo_row = piece.side.opponent().back_rank();
        let advance = |to: Square, captured: Option<Piece>| Move {
            from,
            to,
            piece,
            captured,
            flag: if to.0 == promo_row { MoveFlag::Promotion } else { MoveFlag::Normal },
        };

        if self.board[next][c].is_none() {
            out.push(advance((next, c), None));
            let start_row = (piece.side.back_rank() as i32 + dir) as usize;
            if r == start_row {
                let jump = (r as i32 + 2 * dir) as usize;
                if self.board[jump][c].is_none() {
                    out.push(Move { from, to: (jump, c), piece, captured: None, flag: MoveFlag::Normal });
                }
            }
        }

        for dc in [-1i32, 1] {
            let nc = c as i32 + dc;
            if !(0..BOARD_SIZE as i32).contains(&nc) {
                continue;
            }
            let to = (next, nc as usize);
            if let Some(victim) = self.board[to.0][to.1] {
                if victim.side != piece.side {
                    out.push(advance(to, Some(victim)));
                }
            } else if self.en_passant == Some(to) {
                // The pawn being captured stands beside ours.
                let victim = self.board[r][to.1];
                out.push(Move { from, to, piece, captured: victim, flag: MoveFlag::EnPassant });
            }
        }
    }

    fn leaper_moves(&self, from: Square, piece: Piece, offsets: &[(i32, i32)], out: &mut Vec<Move>) {
        for &(dr, dc) in offsets {
            let to = (from.0 as i32 + dr, from.1 as i32 + dc);
            if !in_bounds(to) {
                continue;
            }
            let to = (to.0 as usize, to.1 as usize);
            match self.board[to.0][to.1] {
                Some(p) if p.side == piece.side => {}
                occupant => out.push(Move { from, to, piece, captured: occupant, flag: MoveFlag::Normal }),
            }
        }
    }

    fn slider_moves(&self, from: Square, piece: Piece, dirs: &[(i32, i32)], out: &mut Vec<Move>) {
        for &(dr, dc) in dirs {
            let (mut r, mut c) = (from.0 as i32 + dr, from.1 as i32 + dc);
            while in_bounds((r, c)) {
                let to = (r as usize, c as usize);
                match self.board[to.0][to.1] {
                    None => out.push(Move { from, to, piece, captured: None, flag: MoveFlag::Normal }),
                    Some(p) => {
                        if p.side != piece.side {
                            out.push(Move { from, to, piece, captured: Some(p), flag: MoveFlag::Normal });
                        }
                        break;
                    }
                }
                r += dr;
                c += dc;
            }
        }
    }

    fn castle_moves(&self, out: &mut Vec<Move>) {
        let side = self.side_to_move;
        let row = side.back_rank();
        let king = Piece { side, kind: PieceKind::King };
        if self.board[row][4] != Some(king) || self.in_check(side) {
            return;
        }
        let (kingside, queenside) = match side {
            Side::White => (self.castling.white_kingside, self.castling.white_queenside),
            Side::Black => (self.castling.black_kingside, self.castling.black_queenside),
        };
        let enemy = side.opponent();
        // The king may not pass through an attacked square; the landing
        // square is covered by the generic legality filter.
        if kingside
            && self.board[row][5].is_none()
            && self.board[row][6].is_none()
            && !self.is_attacked((row, 5), enemy)
        {
            out.push(Move { from: (row, 4), to: (row, 6), piece: king, captured: None, flag: MoveFlag::Castle });
        }
        if queenside
            && self.board[row][1].is_none()
            && self.board[row][2].is_none()
            && self.board[row][3].is_none()
            && !self.is_attacked((row, 3), enemy)
        {
            out.push(Move { from: (row, 4), to: (row, 2), piece: king, captured: None, flag: MoveFlag::Castle });
        }
    }

    /// Material balance in centipawns from White's point of view.
    fn material(&self) -> i32 {
        let mut total = 0;
        for row in &self.board {
            for cell in row {
                if let Some(p) = cell {
                    total += p.kind.value() * p.side.signum();
                }
            }
        }
        total
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

impl negamax::GameState for GameState {
    type Move = Move;

    fn get_possible_moves(&self) -> Vec<Move> {
        self.legal_moves()
    }

    fn make_move(&mut self, mv: &Move) {
        self.apply_move(mv);
    }

    fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }

    fn get_winner(&self) -> Option<i32> {
        match self.outcome() {
            Some(Outcome::Checkmate { winner }) => Some(winner.signum()),
            _ => None,
        }
    }

    fn get_current_player(&self) -> i32 {
        self.side_to_move.signum()
    }

    fn evaluate(&self) -> i32 {
        self.material() * self.side_to_move.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        square_from_name(name).expect("bad square name in test")
    }

    /// Applies the legal move between the two named squares, panicking if the
    /// rules engine does not know it.
    fn play(gs: &mut GameState, from: &str, to: &str) {
        let (from, to) = (sq(from), sq(to));
        let mv = gs
            .legal_moves()
            .iter()
            .find(|m| m.matches(from, to))
            .copied()
            .unwrap_or_else(|| panic!("move {from:?}->{to:?} is not legal here"));
        gs.apply_move(&mv);
    }

    fn empty_board() -> Board {
        [[None; BOARD_SIZE]; BOARD_SIZE]
    }

    fn place(board: &mut Board, name: &str, side: Side, kind: PieceKind) {
        let (r, c) = sq(name);
        board[r][c] = Some(Piece { side, kind });
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let gs = GameState::new();
        assert_eq!(gs.legal_moves().len(), 20);
        assert_eq!(gs.side_to_move(), Side::White);
        assert_eq!(gs.outcome(), None);
        assert!(!gs.in_check(Side::White));
    }

    #[test]
    fn apply_and_undo_round_trip() {
        let mut gs = GameState::new();
        play(&mut gs, "e2", "e4");
        assert_eq!(gs.side_to_move(), Side::Black);
        assert_eq!(gs.legal_moves().len(), 20);
        assert_eq!(gs.move_log().len(), 1);

        let undone = gs.undo_last_move().unwrap();
        assert_eq!(undone.to_string(), "e2e4");
        assert_eq!(gs.side_to_move(), Side::White);
        assert_eq!(gs.move_log().len(), 0);
        assert_eq!(
            gs.piece_at(sq("e2")),
            Some(Piece { side: Side::White, kind: PieceKind::Pawn })
        );
        assert_eq!(gs.piece_at(sq("e4")), None);
        assert_eq!(gs.legal_moves().len(), 20);

        assert_eq!(gs.undo_last_move(), None);
    }

    #[test]
    fn fools_mate_is_checkmate_for_black() {
        let mut gs = GameState::new();
        play(&mut gs, "f2", "f3");
        play(&mut gs, "e7", "e5");
        play(&mut gs, "g2", "g4");
        play(&mut gs, "d8", "h4");

        assert!(gs.in_check(Side::White));
        assert!(gs.legal_moves().is_empty());
        assert_eq!(gs.outcome(), Some(Outcome::Checkmate { winner: Side::Black }));
    }

    #[test]
    fn cornered_king_is_stalemated() {
        // Black king a8, White queen c7 and king c6: Black is not in check
        // but has no move.
        let mut board = empty_board();
        place(&mut board, "a8", Side::Black, PieceKind::King);
        place(&mut board, "c7", Side::White, PieceKind::Queen);
        place(&mut board, "c6", Side::White, PieceKind::King);
        let gs = GameState::from_position(board, Side::Black);

        assert!(!gs.in_check(Side::Black));
        assert_eq!(gs.outcome(), Some(Outcome::Stalemate));
    }

    #[test]
    fn en_passant_capture_and_undo() {
        let mut gs = GameState::new();
        play(&mut gs, "e2", "e4");
        play(&mut gs, "a7", "a6");
        play(&mut gs, "e4", "e5");
        play(&mut gs, "d7", "d5");

        let ep = gs
            .legal_moves()
            .iter()
            .find(|m| m.flag == MoveFlag::EnPassant)
            .copied()
            .expect("en passant should be available");
        assert_eq!(ep.from, sq("e5"));
        assert_eq!(ep.to, sq("d6"));

        gs.apply_move(&ep);
        assert_eq!(gs.piece_at(sq("d5")), None, "captured pawn removed");
        assert_eq!(
            gs.piece_at(sq("d6")),
            Some(Piece { side: Side::White, kind: PieceKind::Pawn })
        );

        gs.undo_last_move();
        assert_eq!(
            gs.piece_at(sq("d5")),
            Some(Piece { side: Side::Black, kind: PieceKind::Pawn })
        );
        assert_eq!(gs.piece_at(sq("d6")), None);

        // The chance expires after any other move.
        play(&mut gs, "b2", "b3");
        play(&mut gs, "a6", "a5");
        assert!(gs.legal_moves().iter().all(|m| m.flag != MoveFlag::EnPassant));
    }

    #[test]
    fn kingside_castle_moves_both_pieces() {
        let mut board = empty_board();
        place(&mut board, "e1", Side::White, PieceKind::King);
        place(&mut board, "h1", Side::White, PieceKind::Rook);
        place(&mut board, "e8", Side::Black, PieceKind::King);
        let mut gs = GameState::from_position(board, Side::White);

        let castle = gs
            .legal_moves()
            .iter()
            .find(|m| m.flag == MoveFlag::Castle)
            .copied()
            .expect("kingside castle should be available");
        assert_eq!(castle.to_string(), "O-O");

        gs.apply_move(&castle);
        assert_eq!(gs.piece_at(sq("g1")), Some(Piece { side: Side::White, kind: PieceKind::King }));
        assert_eq!(gs.piece_at(sq("f1")), Some(Piece { side: Side::White, kind: PieceKind::Rook }));
        assert_eq!(gs.piece_at(sq("e1")), None);
        assert_eq!(gs.piece_at(sq("h1")), None);

        gs.undo_last_move();
        assert_eq!(gs.piece_at(sq("e1")), Some(Piece { side: Side::White, kind: PieceKind::King }));
        assert_eq!(gs.piece_at(sq("h1")), Some(Piece { side: Side::White, kind: PieceKind::Rook }));
    }

    #[test]
    fn castling_through_an_attacked_square_is_forbidden() {
        let mut board = empty_board();
        place(&mut board, "e1", Side::White, PieceKind::King);
        place(&mut board, "h1", Side::White, PieceKind::Rook);
        place(&mut board, "e8", Side::Black, PieceKind::King);
        place(&mut board, "f8", Side::Black, PieceKind::Rook);
        let gs = GameState::from_position(board, Side::White);

        assert!(gs.legal_moves().iter().all(|m| m.flag != MoveFlag::Castle));
    }

    #[test]
    fn castling_rights_die_with_the_king_move() {
        let mut board = empty_board();
        place(&mut board, "e1", Side::White, PieceKind::King);
        place(&mut board, "h1", Side::White, PieceKind::Rook);
        place(&mut board, "e8", Side::Black, PieceKind::King);
        let mut gs = GameState::from_position(board, Side::White);

        play(&mut gs, "e1", "e2");
        play(&mut gs, "e8", "d8");
        play(&mut gs, "e2", "e1");
        play(&mut gs, "d8", "e8");
        assert!(gs.legal_moves().iter().all(|m| m.flag != MoveFlag::Castle));
    }

    #[test]
    fn pawn_promotes_to_queen() {
        let mut board = empty_board();
        place(&mut board, "a7", Side::White, PieceKind::Pawn);
        place(&mut board, "e1", Side::White, PieceKind::King);
        place(&mut board, "e8", Side::Black, PieceKind::King);
        let mut gs = GameState::from_position(board, Side::White);

        let promo = gs
            .legal_moves()
            .iter()
            .find(|m| m.flag == MoveFlag::Promotion)
            .copied()
            .expect("promotion should be available");
        gs.apply_move(&promo);
        assert_eq!(gs.piece_at(sq("a8")), Some(Piece { side: Side::White, kind: PieceKind::Queen }));

        gs.undo_last_move();
        assert_eq!(gs.piece_at(sq("a7")), Some(Piece { side: Side::White, kind: PieceKind::Pawn }));
        assert_eq!(gs.piece_at(sq("a8")), None);
    }

    #[test]
    fn pinned_piece_may_not_move() {
        let mut board = empty_board();
        place(&mut board, "e1", Side::White, PieceKind::King);
        place(&mut board, "e2", Side::White, PieceKind::Knight);
        place(&mut board, "e8", Side::Black, PieceKind::Rook);
        place(&mut board, "a8", Side::Black, PieceKind::King);
        let gs = GameState::from_position(board, Side::White);

        assert!(gs.legal_moves().iter().all(|m| m.from != sq("e2")));
    }

    #[test]
    fn material_evaluation_follows_the_side_to_move() {
        use negamax::GameState as _;
        let mut board = empty_board();
        place(&mut board, "e1", Side::White, PieceKind::King);
        place(&mut board, "e8", Side::Black, PieceKind::King);
        place(&mut board, "d4", Side::White, PieceKind::Rook);

        let white_to_move = GameState::from_position(board, Side::White);
        assert_eq!(white_to_move.evaluate(), 500);
        let black_to_move = GameState::from_position(board, Side::Black);
        assert_eq!(black_to_move.evaluate(), -500);
    }
}
