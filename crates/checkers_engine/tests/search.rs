use checkers_core::{Board, Color, GameStatus, Move, Position};
use checkers_engine::{
    evaluate_board, get_all_moves, get_best_move, search_best_move, AiConfig, Difficulty,
    GameSession, SearchConfig,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col).unwrap()
}

// Red to move. Advancing (2,5) to (3,4) walks into black's jump from (4,5);
// (2,5) to (3,6) is safe because red's piece on (2,7) covers the landing square.
fn trap_position() -> Board {
    "
    -.-.-.-.
    .-.-.-.-
    -.-.-r-r
    .-.-.-.-
    -.-.-b-.
    .-.-.-.-
    -.-.-.-.
    .-.-.-.-
    "
    .parse()
    .unwrap()
}

#[test]
fn single_legal_move_is_returned_at_every_difficulty() {
    let board: Board = "
        -.-.-.-.
        .-.-.-.-
        -.-.-.-.
        r-.-.-.-
        -.-.-.-.
        .-.-.-.-
        -.-.-.-.
        .-.-.-b-
    "
    .parse()
    .unwrap();

    let expected = Move::new(pos(3, 0), pos(4, 1));
    assert_eq!(get_all_moves(&board, Color::Red), vec![expected.clone()]);
    for difficulty in [Difficulty::Easy, Difficulty::Medium] {
        assert_eq!(get_best_move(&board, Color::Red, difficulty), Some(expected.clone()));
    }
}

#[test]
fn deeper_search_avoids_the_capture_trap() {
    let board = trap_position();
    let trap = Move::new(pos(2, 5), pos(3, 4));
    let safe = Move::new(pos(2, 5), pos(3, 6));

    let shallow = search_best_move(&board, Color::Red, SearchConfig::with_depth(1)).unwrap();
    let deep = get_best_move(&board, Color::Red, Difficulty::Easy).unwrap();
    assert_eq!(shallow.best_move, trap);
    assert_eq!(deep, safe);

    // Material after black's best reply to each choice
    let after_reply = |mv: &Move| {
        let child = board.apply_move(mv);
        get_all_moves(&child, Color::Black)
            .iter()
            .map(|reply| evaluate_board(&child.apply_move(reply), Color::Red))
            .fold(f64::INFINITY, f64::min)
    };
    assert!(after_reply(&deep) > after_reply(&shallow.best_move));
}

#[test]
fn mandatory_capture_from_the_opening_scenario() {
    let board = Board::new().with_piece(pos(3, 2), Some(checkers_core::Piece::regular(Color::Black)));
    let moves = get_all_moves(&board, Color::Red);
    assert!(!moves.is_empty());
    assert!(moves.iter().all(Move::is_capture));
    assert_eq!(
        get_best_move(&board, Color::Red, Difficulty::Easy),
        Some(Move::capture(pos(2, 1), pos(4, 3), vec![pos(3, 2)]))
    );
}

#[test]
fn search_is_deterministic() {
    let board = Board::new();
    let first = search_best_move(&board, Color::Black, Difficulty::Medium.into()).unwrap();
    let second = search_best_move(&board, Color::Black, Difficulty::Medium.into()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn search_never_mutates_the_input_board() {
    let board = trap_position();
    let copy = board;
    let _ = get_best_move(&board, Color::Red, Difficulty::Medium);
    assert_eq!(board, copy);
}

#[test]
fn best_move_is_always_one_of_the_legal_moves() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::new();
    let mut to_move = Color::Red;

    for _ in 0..30 {
        if board.game_status() != GameStatus::Active {
            break;
        }
        let moves = get_all_moves(&board, to_move);
        let best = get_best_move(&board, to_move, Difficulty::Easy).unwrap();
        assert!(moves.contains(&best));

        let mv = moves.choose(&mut rng).unwrap();
        board = board.apply_move(mv);
        to_move = to_move.opponent();
    }
}

#[test]
fn session_against_ai_plays_legal_moves() {
    let mut session = GameSession::with_ai(AiConfig {
        enabled: true,
        difficulty: Difficulty::Easy,
    });

    for _ in 0..20 {
        if session.status().is_over() {
            break;
        }
        // Red plays its first legal move through clicks
        let red_move = get_all_moves(session.board(), Color::Red)[0].clone();
        session.handle_click(red_move.from);
        session.handle_click(red_move.to);
        assert_eq!(session.current_player(), Color::Black);

        if session.status().is_over() {
            break;
        }
        let before = *session.board();
        let ai_move = session.play_ai_turn().unwrap();
        assert!(get_all_moves(&before, Color::Black).contains(&ai_move));
        assert_eq!(session.current_player(), Color::Red);
    }

    let lost_red = 12 - session.board().count_pieces(Color::Red);
    let lost_black = 12 - session.board().count_pieces(Color::Black);
    assert_eq!(session.captured_red(), lost_red);
    assert_eq!(session.captured_black(), lost_black);
}
