use std::fmt;

/// One of the two competing colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Numeric id used by the search library: White = 1, Black = -1.
    pub fn signum(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Direction this side's pawns advance along the row axis.
    pub(crate) fn pawn_dir(self) -> i32 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Row this side's major pieces start on.
    pub(crate) fn back_rank(self) -> usize {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material value in centipawns. The king carries none; losing it is
    /// handled as checkmate, not as material.
    pub(crate) fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    /// Upper-case letter used on the board display and in move text.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

/// Board coordinate as (row, col); row 0 is Black's back rank, col 0 the
/// queenside a-file. Values outside the board denote off-board locations,
/// e.g. a click on a side panel.
pub type Square = (usize, usize);

pub const BOARD_SIZE: usize = 8;

pub fn on_board(sq: Square) -> bool {
    sq.0 < BOARD_SIZE && sq.1 < BOARD_SIZE
}

/// Parses algebraic square names like "e2". Returns `None` for anything that
/// is not a board square.
pub fn square_from_name(name: &str) -> Option<Square> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let col = (bytes[0] as i32) - ('a' as i32);
    let rank = (bytes[1] as i32) - ('0' as i32);
    if !(0..BOARD_SIZE as i32).contains(&col) || !(1..=BOARD_SIZE as i32).contains(&rank) {
        return None;
    }
    Some(((BOARD_SIZE as i32 - rank) as usize, col as usize))
}

fn square_name(sq: Square) -> String {
    let file = (b'a' + sq.1 as u8) as char;
    let rank = BOARD_SIZE - sq.0;
    format!("{file}{rank}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Normal,
    EnPassant,
    Promotion,
    Castle,
}

/// A fully-specified move. Equality is structural: two moves are the same
/// only if they agree on squares, pieces and special flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub flag: MoveFlag,
}

impl Move {
    /// Whether this move matches a two-click gesture. Candidates carry no
    /// piece or flag information, so the match is by squares alone.
    pub fn matches(&self, from: Square, to: Square) -> bool {
        self.from == from && self.to == to
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flag {
            MoveFlag::Castle => {
                if self.to.1 > self.from.1 {
                    write!(f, "O-O")
                } else {
                    write!(f, "O-O-O")
                }
            }
            MoveFlag::Promotion => {
                write!(f, "{}{}=Q", square_name(self.from), square_name(self.to))
            }
            _ => write!(f, "{}{}", square_name(self.from), square_name(self.to)),
        }
    }
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Side },
    Stalemate,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            Outcome::Stalemate => write!(f, "Draw by stalemate"),
        }
    }
}
