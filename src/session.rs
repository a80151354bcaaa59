use tracing::{debug, warn};

use crate::board::Board;
use crate::config::{SelectorKind, SessionConfig};
use crate::error::{GameError, ScoreError};
use crate::game::GameBoard;
use crate::input::InputResolver;
use crate::moves::MoveTable;
use crate::score::{ScoreRecord, ScoreStore};
use crate::types::{Color, GameState, Square};

/// Picks a move for an automated player from the current table.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, moves: &MoveTable, board: &Board, side: Color) -> Option<Square>;
}

/// Captures as many discs as possible; the first move found wins ties.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyMoveSelector;

impl MoveSelector for GreedyMoveSelector {
    fn select_move(&self, moves: &MoveTable, _board: &Board, _side: Color) -> Option<Square> {
        moves.largest_capture()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, moves: &MoveTable, _board: &Board, _side: Color) -> Option<Square> {
        moves.squares().next()
    }
}

impl SelectorKind {
    pub fn selector(self) -> Box<dyn MoveSelector> {
        match self {
            SelectorKind::Greedy => Box::new(GreedyMoveSelector),
            SelectorKind::FirstLegal => Box::new(FirstLegalMoveSelector),
        }
    }
}

/// A human playing one side against an automated selector.
pub struct Session {
    game: GameBoard,
    human: Color,
    resolver: InputResolver,
    selector: Box<dyn MoveSelector>,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_selector(config, config.selector.selector())
    }

    pub fn with_selector(config: &SessionConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            game: GameBoard::new(),
            human: config.human_side,
            resolver: InputResolver::new(config.square_width),
            selector,
        }
    }

    pub fn game(&self) -> &GameBoard {
        &self.game
    }

    pub fn human_side(&self) -> Color {
        self.human
    }

    pub fn is_human_turn(&self) -> bool {
        !self.game.is_game_over() && self.game.current_side() == self.human
    }

    /// Plays `square` for the human.
    pub fn place(&mut self, square: Square) -> Result<GameState, GameError> {
        self.ensure_turn(self.human)?;
        self.game.apply_move(square)
    }

    /// Handles a click: plays the human move, then lets the computer answer
    /// until the human is to move again or the game ends.
    ///
    /// A rejected click leaves the game untouched. If a computer reply fails,
    /// the human move and any earlier replies stay on the board and the error
    /// is returned; [`Session::game`] shows the position reached.
    pub fn click(&mut self, x: f64, y: f64) -> Result<GameState, GameError> {
        self.ensure_turn(self.human)?;
        let square = self
            .resolver
            .resolve(x, y, self.game.board(), self.game.legal_moves())
            .inspect_err(|err| {
                if err.is_invalid_square() {
                    warn!(x, y, %err, "click rejected");
                }
            })?;

        let mut state = self.game.apply_move(square)?;
        while !state.is_game_over && state.current_side != self.human {
            state = self.computer_move()?;
        }
        Ok(state)
    }

    /// Plays one move for the computer.
    pub fn computer_move(&mut self) -> Result<GameState, GameError> {
        let side = self.human.opposite();
        self.ensure_turn(side)?;

        let moves = self.game.legal_moves();
        let square = self
            .selector
            .select_move(moves, self.game.board(), side)
            .ok_or(GameError::NoMoveSelected)?;
        if !moves.contains(square) {
            return Err(GameError::IllegalMove(square));
        }

        debug!(%side, %square, "computer selected move");
        self.game.apply_move(square)
    }

    /// The record to store for a finished game.
    pub fn score_record(&self, name: impl Into<String>) -> Result<ScoreRecord, GameError> {
        let outcome = self.game.outcome().ok_or(GameError::GameInProgress)?;
        Ok(ScoreRecord::from_outcome(name, &outcome))
    }

    /// Stores the record for a finished game in `store`.
    pub fn save_score(
        &self,
        name: impl Into<String>,
        store: &mut dyn ScoreStore,
    ) -> Result<ScoreRecord, ScoreError> {
        let record = self.score_record(name)?;
        store.save(record.clone())?;
        Ok(record)
    }

    pub fn restart(&mut self) {
        self.game.initialize();
    }

    fn ensure_turn(&self, side: Color) -> Result<(), GameError> {
        if self.game.is_game_over() {
            return Err(GameError::GameOver);
        }
        if self.game.current_side() != side {
            return Err(GameError::NotYourTurn(side));
        }
        Ok(())
    }

    #[cfg(test)]
    fn set_game_for_test(&mut self, game: GameBoard) {
        self.game = game;
    }
}
