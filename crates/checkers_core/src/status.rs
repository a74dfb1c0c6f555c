use std::fmt;

use crate::Color;

/// Outcome classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Active,
    RedWon,
    BlackWon,
    /// Declared outcome only: no repetition or move-count rule produces it.
    Draw,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        *self != GameStatus::Active
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::RedWon => Some(Color::Red),
            GameStatus::BlackWon => Some(Color::Black),
            GameStatus::Active | GameStatus::Draw => None,
        }
    }

    pub fn won_by(color: Color) -> Self {
        match color {
            Color::Red => GameStatus::RedWon,
            Color::Black => GameStatus::BlackWon,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "in progress"),
            GameStatus::RedWon => write!(f, "Red wins!"),
            GameStatus::BlackWon => write!(f, "Black wins!"),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}
