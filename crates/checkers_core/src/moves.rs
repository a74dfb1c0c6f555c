use std::fmt;

use crate::{Board, Color, Piece, Position};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// Jumped pieces in the order they are taken. Empty for a simple move.
    pub captures: Vec<Position>,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            captures: Vec::new(),
        }
    }

    pub fn capture(from: Position, to: Position, captures: Vec<Position>) -> Self {
        Self { from, to, captures }
    }

    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, separator, self.to)
    }
}

/// Generates the moves available to the piece standing on `from`.
///
/// Captures are mandatory for the piece: when any capture chain exists only
/// the chains are returned, otherwise the simple one-step moves.
pub(crate) fn generate_moves(board: &Board, from: Position, color: Color) -> Vec<Move> {
    let piece = match board.get_piece(from) {
        Some(p) if p.color == color && from.is_playable() => p,
        _ => return Vec::new(),
    };

    let captures = generate_captures(board, from, piece);
    if !captures.is_empty() {
        return captures;
    }

    generate_simple_moves(board, from, piece)
}

fn generate_simple_moves(board: &Board, from: Position, piece: Piece) -> Vec<Move> {
    piece
        .directions()
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|to| to.is_playable() && board.get_piece(*to).is_none())
        .map(|to| Move::new(from, to))
        .collect()
}

/// All complete capture chains for `piece` starting at `from`.
fn generate_captures(board: &Board, from: Position, piece: Piece) -> Vec<Move> {
    let mut chains = Vec::new();
    extend_chain(board, from, piece, from, &[], &mut chains);
    if !chains.is_empty() {
        log::trace!("{} capture chain(s) for {:?} on {}", chains.len(), piece, from);
    }
    chains
}

// Each branch gets its own copy of the captured list so sibling branches never
// see each other's jumps. `piece` keeps the rank it had when the chain started.
fn extend_chain(
    board: &Board,
    origin: Position,
    piece: Piece,
    current: Position,
    captured: &[Position],
    chains: &mut Vec<Move>,
) {
    for &(dr, dc) in piece.directions() {
        let (over, landing) = match (current.offset(dr, dc), current.offset(2 * dr, 2 * dc)) {
            (Some(over), Some(landing)) => (over, landing),
            _ => continue,
        };

        if !landing.is_playable() || captured.contains(&over) {
            continue;
        }

        let jumps_opponent = matches!(board.get_piece(over), Some(p) if p.color != piece.color);
        // The mover has left its origin square, so the chain may pass back over it
        let landing_free = landing == origin || board.get_piece(landing).is_none();
        if !jumps_opponent || !landing_free {
            continue;
        }

        let mut next = captured.to_vec();
        next.push(over);

        let before = chains.len();
        extend_chain(board, origin, piece, landing, &next, chains);
        if chains.len() == before {
            // No continuation from here, the chain ends on this square
            chains.push(Move::capture(origin, landing, next));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceType;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn simple_move_display_uses_square_numbers() {
        let mv = Move::new(pos(2, 1), pos(3, 2));
        assert_eq!(mv.to_string(), "9-14");
    }

    #[test]
    fn capture_display_uses_x() {
        let mv = Move::capture(pos(2, 1), pos(4, 3), vec![pos(3, 2)]);
        assert_eq!(mv.to_string(), "9x18");
        assert!(mv.is_capture());
    }

    #[test]
    fn regular_piece_has_two_forward_moves() {
        let board = Board::empty().with_piece(pos(2, 3), Some(Piece::regular(Color::Red)));
        let moves = generate_moves(&board, pos(2, 3), Color::Red);
        assert_eq!(moves, vec![Move::new(pos(2, 3), pos(3, 2)), Move::new(pos(2, 3), pos(3, 4))]);
    }

    #[test]
    fn edge_piece_has_one_move() {
        let board = Board::empty().with_piece(pos(5, 0), Some(Piece::regular(Color::Black)));
        let moves = generate_moves(&board, pos(5, 0), Color::Black);
        assert_eq!(moves, vec![Move::new(pos(5, 0), pos(4, 1))]);
    }

    #[test]
    fn king_moves_backwards_too() {
        let board = Board::empty().with_piece(pos(4, 3), Some(Piece::king(Color::Red)));
        let moves = generate_moves(&board, pos(4, 3), Color::Red);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().any(|m| m.to == pos(3, 2)));
        assert!(moves.iter().any(|m| m.to == pos(5, 4)));
    }

    #[test]
    fn wrong_color_yields_nothing() {
        let board = Board::new();
        assert!(generate_moves(&board, pos(2, 1), Color::Black).is_empty());
        assert!(generate_moves(&board, pos(3, 0), Color::Red).is_empty());
    }

    #[test]
    fn captures_replace_simple_moves() {
        let board = Board::empty()
            .with_piece(pos(2, 1), Some(Piece::regular(Color::Red)))
            .with_piece(pos(3, 2), Some(Piece::regular(Color::Black)));

        let moves = generate_moves(&board, pos(2, 1), Color::Red);
        assert_eq!(moves, vec![Move::capture(pos(2, 1), pos(4, 3), vec![pos(3, 2)])]);
    }

    #[test]
    fn cannot_jump_own_piece_or_onto_occupied_square() {
        let board = Board::empty()
            .with_piece(pos(2, 1), Some(Piece::regular(Color::Red)))
            .with_piece(pos(3, 2), Some(Piece::regular(Color::Red)))
            .with_piece(pos(3, 0), Some(Piece::regular(Color::Black)));

        // (3,0) sits on the edge, there is no landing square beyond it
        let moves = generate_moves(&board, pos(2, 1), Color::Red);
        assert!(moves.is_empty());
    }

    #[test]
    fn double_jump_is_taken_as_one_move() {
        let board = Board::empty()
            .with_piece(pos(0, 1), Some(Piece::regular(Color::Red)))
            .with_piece(pos(1, 2), Some(Piece::regular(Color::Black)))
            .with_piece(pos(3, 4), Some(Piece::regular(Color::Black)));

        let moves = generate_moves(&board, pos(0, 1), Color::Red);
        assert_eq!(
            moves,
            vec![Move::capture(pos(0, 1), pos(4, 5), vec![pos(1, 2), pos(3, 4)])]
        );
    }

    #[test]
    fn branching_chains_are_kept_separate() {
        // After the first jump to (2,3) the chain can go left or right
        let board = Board::empty()
            .with_piece(pos(0, 1), Some(Piece::regular(Color::Red)))
            .with_piece(pos(1, 2), Some(Piece::regular(Color::Black)))
            .with_piece(pos(3, 2), Some(Piece::regular(Color::Black)))
            .with_piece(pos(3, 4), Some(Piece::regular(Color::Black)));

        let moves = generate_moves(&board, pos(0, 1), Color::Red);
        assert_eq!(moves.len(), 2);
        for mv in &moves {
            assert_eq!(mv.captures.len(), 2);
            assert_eq!(mv.captures[0], pos(1, 2));
        }
        assert!(moves.iter().any(|m| m.to == pos(4, 1) && m.captures[1] == pos(3, 2)));
        assert!(moves.iter().any(|m| m.to == pos(4, 5) && m.captures[1] == pos(3, 4)));
    }

    #[test]
    fn regular_piece_is_not_crowned_mid_chain() {
        // Landing on row 7 does not let the piece continue backwards over (6,5)
        let board = Board::empty()
            .with_piece(pos(5, 2), Some(Piece::regular(Color::Red)))
            .with_piece(pos(6, 3), Some(Piece::regular(Color::Black)))
            .with_piece(pos(6, 5), Some(Piece::regular(Color::Black)));

        let moves = generate_moves(&board, pos(5, 2), Color::Red);
        assert_eq!(moves, vec![Move::capture(pos(5, 2), pos(7, 4), vec![pos(6, 3)])]);
    }

    #[test]
    fn king_chain_can_circle_back_to_its_origin() {
        let board = Board::empty()
            .with_piece(pos(2, 3), Some(Piece::new(PieceType::King, Color::Red)))
            .with_piece(pos(3, 2), Some(Piece::regular(Color::Black)))
            .with_piece(pos(3, 4), Some(Piece::regular(Color::Black)))
            .with_piece(pos(5, 2), Some(Piece::regular(Color::Black)))
            .with_piece(pos(5, 4), Some(Piece::regular(Color::Black)));

        let moves = generate_moves(&board, pos(2, 3), Color::Red);
        assert_eq!(moves.len(), 2);
        for mv in &moves {
            assert_eq!(mv.to, pos(2, 3));
            assert_eq!(mv.captures.len(), 4);
            let mut unique = mv.captures.clone();
            unique.sort_by_key(|p| (p.row, p.col));
            unique.dedup();
            assert_eq!(unique.len(), 4);
        }
    }
}
