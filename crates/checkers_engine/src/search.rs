// Fixed-depth minimax over the rules in checkers_core
use std::time::Instant;

use checkers_core::{Board, Color, Move};

use crate::ai::{Difficulty, SearchConfig};
use crate::evaluation::evaluate_board;

// Score of a side that cannot move, far outside any material evaluation
pub const WIN_SCORE: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: f64,
    pub depth: u8,
    pub nodes: u64,
}

/// Every legal move for `color`, in row-major order of the moving pieces.
///
/// Capturing is compulsory across the whole side: if any piece can capture,
/// only capture moves are returned.
pub fn get_all_moves(board: &Board, color: Color) -> Vec<Move> {
    let moves: Vec<Move> = board
        .pieces_of(color)
        .flat_map(|(pos, _)| board.legal_moves(pos, color))
        .collect();

    if moves.iter().any(Move::is_capture) {
        moves.into_iter().filter(Move::is_capture).collect()
    } else {
        moves
    }
}

/// Best move for `color` at the depth `difficulty` maps to.
pub fn get_best_move(board: &Board, color: Color, difficulty: Difficulty) -> Option<Move> {
    search_best_move(board, color, difficulty.into()).map(|result| result.best_move)
}

/// Scores every root move with minimax and keeps the first one with the
/// strictly highest score. Returns `None` when `color` has no legal move.
pub fn search_best_move(board: &Board, color: Color, config: SearchConfig) -> Option<SearchResult> {
    let depth = config.depth.max(1);
    let start_time = Instant::now();

    let moves = get_all_moves(board, color);
    if moves.is_empty() {
        log::debug!("{} has no legal move, nothing to search", color);
        return None;
    }
    log::debug!("Searching {} root moves for {} at depth {}", moves.len(), color, depth);

    let mut nodes = 0;
    let mut best: Option<(Move, f64)> = None;
    for mv in moves {
        let child = board.apply_move(&mv);
        let score = minimax_counted(&child, depth - 1, false, color, &mut nodes);
        log::debug!("  {} scores {:.1}", mv, score);

        let improves = match &best {
            Some((_, best_score)) => score > *best_score,
            None => true,
        };
        if improves {
            best = Some((mv, score));
        }
    }

    let (best_move, score) = best?;
    log::info!(
        "{} plays {} (score {:.1}, depth {}, {} nodes in {:?})",
        color,
        best_move,
        score,
        depth,
        nodes,
        start_time.elapsed()
    );

    Some(SearchResult {
        best_move,
        score,
        depth,
        nodes,
    })
}

/// Minimax value of `board` for `ai_color`.
///
/// `maximizing` says whose turn it is: `ai_color` when true, its opponent
/// otherwise. A side with no legal move has lost, whatever depth remains.
pub fn minimax(board: &Board, depth: u8, maximizing: bool, ai_color: Color) -> f64 {
    let mut nodes = 0;
    minimax_counted(board, depth, maximizing, ai_color, &mut nodes)
}

fn minimax_counted(board: &Board, depth: u8, maximizing: bool, ai_color: Color, nodes: &mut u64) -> f64 {
    *nodes += 1;

    if depth == 0 {
        return evaluate_board(board, ai_color);
    }

    let to_move = if maximizing { ai_color } else { ai_color.opponent() };
    let moves = get_all_moves(board, to_move);
    if moves.is_empty() {
        return if maximizing { -WIN_SCORE } else { WIN_SCORE };
    }

    let scores = moves
        .iter()
        .map(|mv| minimax_counted(&board.apply_move(mv), depth - 1, !maximizing, ai_color, nodes));

    if maximizing {
        scores.fold(f64::NEG_INFINITY, f64::max)
    } else {
        scores.fold(f64::INFINITY, f64::min)
    }
}
