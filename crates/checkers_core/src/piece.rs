use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// First player. Starts on rows 0-2 and moves toward row 7.
    Red,
    /// Second player. Starts on rows 5-7 and moves toward row 0.
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Row on which a regular piece of this color is crowned.
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::Red => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Regular,
    King,
}

// Diagonal step directions as (row delta, col delta)
const KING_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const RED_DIRECTIONS: [(i8, i8); 2] = [(1, -1), (1, 1)];
const BLACK_DIRECTIONS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    pub fn regular(color: Color) -> Self {
        Self::new(PieceType::Regular, color)
    }

    pub fn king(color: Color) -> Self {
        Self::new(PieceType::King, color)
    }

    pub fn is_king(&self) -> bool {
        self.piece_type == PieceType::King
    }

    /// Returns the crowned version of this piece. Kings stay kings.
    pub fn promoted(self) -> Self {
        Self::new(PieceType::King, self.color)
    }

    /// Directions this piece may step or jump in, in generation order.
    pub fn directions(&self) -> &'static [(i8, i8)] {
        match (self.piece_type, self.color) {
            (PieceType::King, _) => &KING_DIRECTIONS,
            (PieceType::Regular, Color::Red) => &RED_DIRECTIONS,
            (PieceType::Regular, Color::Black) => &BLACK_DIRECTIONS,
        }
    }

    /// Single character used by the board diagram format.
    pub fn symbol(&self) -> char {
        match (self.piece_type, self.color) {
            (PieceType::Regular, Color::Red) => 'r',
            (PieceType::King, Color::Red) => 'R',
            (PieceType::Regular, Color::Black) => 'b',
            (PieceType::King, Color::Black) => 'B',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'r' => Some(Self::regular(Color::Red)),
            'R' => Some(Self::king(Color::Red)),
            'b' => Some(Self::regular(Color::Black)),
            'B' => Some(Self::king(Color::Black)),
            _ => None,
        }
    }
}
