use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::piece::{Color, PieceType};
use crate::position::BOARD_SIZE;
use crate::{moves, GameStatus, Move, Piece, Position};

const SIZE: usize = BOARD_SIZE as usize;

/// An 8x8 checkers board. Boards are plain values: every transition returns
/// a new board and leaves the one it was derived from untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; SIZE]; SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting layout: red fills rows 0-2, black rows 5-7.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; SIZE]; SIZE],
        }
    }

    fn setup_initial_position(&mut self) {
        for pos in Position::all_playable() {
            let piece = match pos.row {
                0..=2 => Some(Piece::regular(Color::Red)),
                5..=7 => Some(Piece::regular(Color::Black)),
                _ => None,
            };
            self.set(pos, piece);
        }
    }

    /// The piece on `pos`, or `None` for an empty or off-board square.
    pub fn get_piece(&self, pos: Position) -> Option<Piece> {
        self.squares
            .get(pos.row as usize)?
            .get(pos.col as usize)
            .copied()
            .flatten()
    }

    // Light squares never hold a piece; off-board writes are dropped
    fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if !pos.is_playable() && piece.is_some() {
            return;
        }
        if let Some(square) = self
            .squares
            .get_mut(pos.row as usize)
            .and_then(|row| row.get_mut(pos.col as usize))
        {
            *square = piece;
        }
    }

    /// Returns a copy of this board with `pos` holding `piece`. Placing a
    /// piece on a light square leaves the board unchanged.
    pub fn with_piece(&self, pos: Position, piece: Option<Piece>) -> Self {
        let mut board = *self;
        board.set(pos, piece);
        board
    }

    /// Every occupied square in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all_playable().filter_map(move |pos| self.get_piece(pos).map(|piece| (pos, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn count_pieces(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.pieces_of(color).filter(|(_, piece)| piece.is_king()).count()
    }

    /// Legal moves for the piece on `pos`, which must belong to `color`.
    /// Any other query (empty square, opponent piece) yields no moves.
    pub fn legal_moves(&self, pos: Position, color: Color) -> Vec<Move> {
        moves::generate_moves(self, pos, color)
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        self.pieces_of(color).any(|(pos, _)| !self.legal_moves(pos, color).is_empty())
    }

    /// Plays `mv` and returns the resulting board.
    ///
    /// The mover lands on `to`, every captured square is cleared and a regular
    /// piece finishing on its promotion row is crowned. A move from an empty
    /// square, or to a square off the board, returns an unchanged copy.
    pub fn apply_move(&self, mv: &Move) -> Self {
        let mut board = *self;
        let piece = match self.get_piece(mv.from) {
            Some(piece) if mv.to.is_on_board() => piece,
            _ => return board,
        };

        board.set(mv.from, None);
        for &captured in &mv.captures {
            board.set(captured, None);
        }

        let final_piece = if piece.piece_type == PieceType::Regular && mv.to.row == piece.color.promotion_row() {
            piece.promoted()
        } else {
            piece
        };
        board.set(mv.to, Some(final_piece));

        board
    }

    pub fn game_status(&self) -> GameStatus {
        // A side with no pieces, or no move, has lost
        for color in [Color::Red, Color::Black] {
            if self.count_pieces(color) == 0 {
                return GameStatus::won_by(color.opponent());
            }
        }
        for color in [Color::Red, Color::Black] {
            if !self.has_legal_move(color) {
                return GameStatus::won_by(color.opponent());
            }
        }

        GameStatus::Active
    }
}

pub fn legal_moves(board: &Board, pos: Position, color: Color) -> Vec<Move> {
    board.legal_moves(pos, color)
}

pub fn apply_move(board: &Board, mv: &Move) -> Board {
    board.apply_move(mv)
}

pub fn game_status(board: &Board) -> GameStatus {
    board.game_status()
}

pub fn count_pieces(board: &Board, color: Color) -> usize {
    board.count_pieces(color)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),
    #[error("row {row} has {found} squares, expected 8")]
    RowWidth { row: usize, found: usize },
    #[error("unknown symbol '{symbol}' at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("piece on light square at row {row}, column {col}")]
    LightSquare { row: usize, col: usize },
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses a diagram of 8 rows, row 0 first. `r`/`R` are red regulars and
    /// kings, `b`/`B` black ones, `.` an empty dark square and `-` or `_` a
    /// light square. Whitespace inside a row is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != SIZE {
            return Err(BoardParseError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != SIZE {
                return Err(BoardParseError::RowWidth { row, found: cells.len() });
            }
            for (col, &symbol) in cells.iter().enumerate() {
                let piece = match symbol {
                    '.' | '-' | '_' => None,
                    other => Some(Piece::from_symbol(other).ok_or(BoardParseError::UnknownSymbol {
                        symbol: other,
                        row,
                        col,
                    })?),
                };
                let pos = Position { row: row as u8, col: col as u8 };
                if piece.is_some() && !pos.is_playable() {
                    return Err(BoardParseError::LightSquare { row, col });
                }
                board.set(pos, piece);
            }
        }

        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            let line: String = (0..BOARD_SIZE)
                .map(|col| {
                    let pos = Position { row, col };
                    match self.get_piece(pos) {
                        Some(piece) => piece.symbol(),
                        None if pos.is_playable() => '.',
                        None => '-',
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
