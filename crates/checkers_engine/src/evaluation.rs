use checkers_core::{Board, Color};

// Material weights: every piece counts one point, a king half a point more
const PIECE_VALUE: f64 = 1.0;
const KING_BONUS: f64 = 0.5;

/// Scores `board` from `ai_color`'s point of view.
/// Positive scores favor `ai_color`, negative scores its opponent.
///
/// Purely material: no mobility, center or back-row terms.
pub fn evaluate_board(board: &Board, ai_color: Color) -> f64 {
    material(board, ai_color) - material(board, ai_color.opponent())
}

fn material(board: &Board, color: Color) -> f64 {
    let pieces = board.count_pieces(color) as f64;
    let kings = board.count_kings(color) as f64;
    pieces * PIECE_VALUE + kings * KING_BONUS
}
