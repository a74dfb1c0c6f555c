pub mod evaluation;
pub mod search;
pub mod ai;
pub mod session;

pub use evaluation::evaluate_board;
pub use search::{get_all_moves, get_best_move, minimax, search_best_move, SearchResult};
pub use ai::{CheckersAI, Difficulty, ParseDifficultyError, SearchConfig, AI_THINK_DELAY};
pub use session::{AiConfig, AiRequest, ClickOutcome, GameSession, AI_COLOR};
