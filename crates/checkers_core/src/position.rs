use std::fmt;

pub const BOARD_SIZE: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u8,  // 0-7, red starts on rows 0-2
    pub col: u8,  // 0-7
}

impl Position {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Fields are public, so a hand-built position may lie off the board.
    pub fn is_on_board(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Dark squares are the only ones pieces ever stand on.
    pub fn is_playable(&self) -> bool {
        (u16::from(self.row) + u16::from(self.col)) % 2 == 1
    }

    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Option<Self> {
        if !self.is_on_board() {
            return None;
        }
        let row = i16::from(self.row) + i16::from(row_delta);
        let col = i16::from(self.col) + i16::from(col_delta);
        Self::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?)
    }

    /// Standard checkers numbering of playable squares, 1-32 starting at row 0.
    pub fn square_number(&self) -> Option<u8> {
        if !self.is_on_board() || !self.is_playable() {
            return None;
        }
        Some(self.row * 4 + self.col / 2 + 1)
    }

    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }

    pub fn all_playable() -> impl Iterator<Item = Position> {
        Self::all().filter(Position::is_playable)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.square_number() {
            Some(number) => write!(f, "{}", number),
            None => write!(f, "({},{})", self.row, self.col),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert!(Position::new(7, 7).is_some());
        assert!(Position::new(8, 0).is_none());
        assert!(Position::new(0, 8).is_none());
    }

    #[test]
    fn offset_stays_on_board() {
        let corner = Position::new(0, 1).unwrap();
        assert_eq!(corner.offset(-1, 1), None);
        assert_eq!(corner.offset(1, -1), Position::new(1, 0));
        assert_eq!(Position::new(7, 6).unwrap().offset(1, 1), None);
    }

    #[test]
    fn square_numbers_cover_every_playable_square() {
        let numbers: Vec<u8> = Position::all_playable()
            .filter_map(|pos| pos.square_number())
            .collect();
        assert_eq!(numbers, (1..=32).collect::<Vec<_>>());
    }

    #[test]
    fn off_board_positions_are_inert() {
        let far = Position { row: 255, col: 255 };
        assert!(!far.is_on_board());
        assert!(!far.is_playable());
        assert_eq!(far.square_number(), None);
        assert_eq!(far.offset(1, 1), None);
        assert_eq!(Position { row: 8, col: 1 }.offset(-1, 0), None);
        assert_eq!(Position::all().count(), 64);
    }

    #[test]
    fn light_squares_have_no_number() {
        assert_eq!(Position::new(0, 0).unwrap().square_number(), None);
        assert_eq!(Position::new(3, 3).unwrap().to_string(), "(3,3)");
    }
}
