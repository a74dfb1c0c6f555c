// Core checkers rules modules
pub mod board;
pub mod piece;
pub mod position;
pub mod moves;
pub mod status;

// Re-export main types for convenience
pub use board::{Board, BoardParseError, apply_move, count_pieces, game_status, legal_moves};
pub use piece::{Piece, Color, PieceType};
pub use position::Position;
pub use moves::Move;
pub use status::GameStatus;
