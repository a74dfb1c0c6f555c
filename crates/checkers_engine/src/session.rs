//! Turn-by-turn game state driven by a front end.
//!
//! [`GameSession`] owns the current board and everything a player sees around
//! it: whose turn it is, the selected piece and its legal moves, how many
//! pieces each side has lost and the move history. Front ends feed it clicks
//! and, when the automated side is on move, hand its search off wherever they
//! like through [`GameSession::begin_ai_turn`] / [`GameSession::finish_ai_turn`].

use checkers_core::{Board, Color, GameStatus, Move, Position};

use crate::ai::{CheckersAI, Difficulty};

/// The automated side always plays black.
pub const AI_COLOR: Color = Color::Black;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AiConfig {
    pub enabled: bool,
    pub difficulty: Difficulty,
}

/// Result of a click on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Game over, AI on move or thinking, or nothing actionable was clicked.
    Ignored,
    Selected(Position),
    Deselected,
    Moved(Move),
}

/// Snapshot handed to whoever runs the automated side's search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiRequest {
    pub board: Board,
    pub color: Color,
    pub difficulty: Difficulty,
}

impl AiRequest {
    pub fn run(&self) -> Option<Move> {
        CheckersAI::new(self.difficulty).get_move(&self.board, self.color)
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current_player: Color,
    selected: Option<Position>,
    valid_moves: Vec<Move>,
    captured_red: usize,
    captured_black: usize,
    status: GameStatus,
    move_history: Vec<Move>,
    ai: AiConfig,
    ai_thinking: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_ai(AiConfig::default())
    }

    pub fn with_ai(ai: AiConfig) -> Self {
        Self {
            board: Board::new(),
            current_player: Color::Red,
            selected: None,
            valid_moves: Vec::new(),
            captured_red: 0,
            captured_black: 0,
            status: GameStatus::Active,
            move_history: Vec::new(),
            ai,
            ai_thinking: false,
        }
    }

    /// Starts a game from an arbitrary position, e.g. a parsed diagram.
    pub fn from_position(board: Board, to_move: Color, ai: AiConfig) -> Self {
        Self {
            board,
            current_player: to_move,
            status: board.game_status(),
            ..Self::with_ai(ai)
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn valid_moves(&self) -> &[Move] {
        &self.valid_moves
    }

    /// Red pieces taken off the board so far.
    pub fn captured_red(&self) -> usize {
        self.captured_red
    }

    /// Black pieces taken off the board so far.
    pub fn captured_black(&self) -> usize {
        self.captured_black
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn ai_config(&self) -> AiConfig {
        self.ai
    }

    pub fn is_ai_thinking(&self) -> bool {
        self.ai_thinking
    }

    pub fn status_message(&self) -> String {
        match self.status {
            GameStatus::Active => format!("{}'s turn", self.current_player),
            status => status.to_string(),
        }
    }

    /// Resets the board, tallies and history. The AI settings are kept.
    pub fn new_game(&mut self) {
        *self = Self::with_ai(self.ai);
        log::info!("New game, AI {}", if self.ai.enabled { "on" } else { "off" });
    }

    pub fn toggle_ai(&mut self) {
        self.ai.enabled = !self.ai.enabled;
        self.new_game();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.ai.difficulty != difficulty {
            log::info!("AI difficulty set to {}", difficulty);
        }
        self.ai.difficulty = difficulty;
    }

    fn is_ai_turn(&self) -> bool {
        self.ai.enabled && self.current_player == AI_COLOR
    }

    pub fn handle_click(&mut self, pos: Position) -> ClickOutcome {
        if self.status.is_over() || self.is_ai_turn() || self.ai_thinking {
            return ClickOutcome::Ignored;
        }

        if self.selected == Some(pos) {
            self.clear_selection();
            return ClickOutcome::Deselected;
        }

        if self.selected.is_some() {
            // Chains sharing a destination are told apart only by generation order;
            // a click plays the first of them
            if let Some(mv) = self.valid_moves.iter().find(|m| m.to == pos).cloned() {
                self.commit_move(mv.clone());
                return ClickOutcome::Moved(mv);
            }
        }

        if self.owns_piece_at(pos) {
            self.valid_moves = self.board.legal_moves(pos, self.current_player);
            self.selected = Some(pos);
            return ClickOutcome::Selected(pos);
        }

        if self.selected.is_some() {
            self.clear_selection();
            return ClickOutcome::Deselected;
        }

        ClickOutcome::Ignored
    }

    fn owns_piece_at(&self, pos: Position) -> bool {
        matches!(self.board.get_piece(pos), Some(piece) if piece.color == self.current_player)
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
    }

    /// Plays `mv` for the side on move and passes the turn.
    pub fn commit_move(&mut self, mv: Move) {
        let mover = self.current_player;
        self.board = self.board.apply_move(&mv);

        match mover {
            Color::Red => self.captured_black += mv.captures.len(),
            Color::Black => self.captured_red += mv.captures.len(),
        }

        log::info!("{} played {}", mover, mv);
        self.move_history.push(mv);
        self.current_player = mover.opponent();
        self.clear_selection();

        self.status = self.board.game_status();
        if let Some(winner) = self.status.winner() {
            log::info!("Game over after {} moves, {} wins", self.move_history.len(), winner);
        }
    }

    /// Whether the automated side should start searching now.
    pub fn ai_to_move(&self) -> bool {
        self.is_ai_turn() && !self.status.is_over() && !self.ai_thinking
    }

    /// Marks the AI as busy and returns what it has to search. `None` when it
    /// is not the AI's turn or a search is already running.
    pub fn begin_ai_turn(&mut self) -> Option<AiRequest> {
        if !self.ai_to_move() {
            return None;
        }
        self.ai_thinking = true;
        Some(AiRequest {
            board: self.board,
            color: AI_COLOR,
            difficulty: self.ai.difficulty,
        })
    }

    /// Commits the searched move, if any, and clears the busy flag.
    pub fn finish_ai_turn(&mut self, mv: Option<Move>) {
        if !self.ai_thinking {
            log::warn!("AI result arrived with no search pending, dropping it");
            return;
        }
        self.ai_thinking = false;
        match mv {
            Some(mv) if self.is_ai_turn() => self.commit_move(mv),
            Some(mv) => log::warn!("Discarding AI move {}, it is no longer black's turn", mv),
            None => log::debug!("AI found no move"),
        }
    }

    /// Runs the automated side's search on the calling thread.
    pub fn play_ai_turn(&mut self) -> Option<Move> {
        let request = self.begin_ai_turn()?;
        let mv = request.run();
        self.finish_ai_turn(mv.clone());
        mv
    }
}
