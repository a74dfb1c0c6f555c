use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use checkers_core::{Board, Color, Move};
use thiserror::Error;

use crate::search::search_best_move;

/// Pause before the automated side starts searching, so its reply is visible.
pub const AI_THINK_DELAY: Duration = Duration::from_millis(500);
const MIN_DEPTH: u8 = 1;
const MAX_DEPTH: u8 = 8; // Full-width search, deeper gets slow quickly

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
}

impl Difficulty {
    /// Search depth in plies.
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}', expected 'easy' or 'medium'")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
}

impl SearchConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth: depth.clamp(MIN_DEPTH, MAX_DEPTH),
        }
    }
}

impl From<Difficulty> for SearchConfig {
    fn from(difficulty: Difficulty) -> Self {
        Self::with_depth(difficulty.depth())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Difficulty::default().into()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckersAI {
    config: SearchConfig,
}

impl CheckersAI {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            config: difficulty.into(),
        }
    }

    pub fn with_depth(depth: u8) -> Self {
        Self {
            config: SearchConfig::with_depth(depth),
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config = difficulty.into();
    }

    /// Picks a move for `color`, or `None` when it has no legal move.
    pub fn get_move(&self, board: &Board, color: Color) -> Option<Move> {
        search_best_move(board, color, self.config).map(|result| result.best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_depths() {
        assert_eq!(SearchConfig::from(Difficulty::Easy).depth, 2);
        assert_eq!(SearchConfig::from(Difficulty::Medium).depth, 4);
    }

    #[test]
    fn custom_depth_is_clamped() {
        assert_eq!(SearchConfig::with_depth(0).depth, MIN_DEPTH);
        assert_eq!(SearchConfig::with_depth(40).depth, MAX_DEPTH);
        assert_eq!(CheckersAI::with_depth(3).config().depth, 3);
    }

    #[test]
    fn parse_difficulty() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" Medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        let err = "hard".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.to_string(), "unknown difficulty 'hard', expected 'easy' or 'medium'");
    }

    #[test]
    fn set_difficulty_changes_depth() {
        let mut ai = CheckersAI::default();
        assert_eq!(ai.config().depth, 2);
        ai.set_difficulty(Difficulty::Medium);
        assert_eq!(ai.config().depth, 4);
    }

    #[test]
    fn opening_move_is_found() {
        let ai = CheckersAI::new(Difficulty::Easy);
        let mv = ai.get_move(&Board::new(), Color::Black).unwrap();
        assert_eq!(mv.from.row, 5);
        assert_eq!(mv.to.row, 4);
    }
}
