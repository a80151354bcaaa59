//! Turn engine: legal-move bookkeeping, the pass rule and end-of-game
//! detection on top of [`Board`].

use std::fmt;

use tracing::{debug, info};

use crate::board::Board;
use crate::error::GameError;
use crate::moves::MoveTable;
use crate::types::{Color, GameState, Outcome, Square};

/// Where the game stands between decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove(Color),
    GameOver,
}

/// Result of [`GameBoard::resolve_turn_availability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAvailability {
    /// The side to move has at least one legal move.
    Ready(Color),
    /// `passed` had no legal move; `to_move` now has the turn.
    Passed { passed: Color, to_move: Color },
    /// Neither side can move, or the board is full.
    GameOver,
}

/// Authoritative game state: grid, side to move and the legal-move table.
#[derive(Debug, Clone)]
pub struct GameBoard {
    board: Board,
    side: Color,
    moves: MoveTable,
    /// Side the current `moves` were computed for.
    moves_for: Option<Color>,
    phase: Phase,
    passed: Option<Color>,
    last_move: Option<Square>,
    flipped: Vec<Square>,
}

impl GameBoard {
    /// A new game in the starting position with Black to move.
    pub fn new() -> Self {
        let mut game = Self::from_position(Board::new(), Color::Black);
        game.enumerate_legal_moves();
        game
    }

    /// Starts from an arbitrary position. No move table is computed yet;
    /// call [`GameBoard::enumerate_legal_moves`] or
    /// [`GameBoard::resolve_turn_availability`] before moving.
    pub fn from_position(board: Board, side: Color) -> Self {
        Self {
            board,
            side,
            moves: MoveTable::new(),
            moves_for: None,
            phase: Phase::AwaitingMove(side),
            passed: None,
            last_move: None,
            flipped: Vec::new(),
        }
    }

    /// Resets to the starting position.
    pub fn initialize(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_side(&self) -> Color {
        self.side
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// The table for the side to move, as last enumerated.
    pub fn legal_moves(&self) -> &MoveTable {
        &self.moves
    }

    /// Rebuilds the legal-move table for the side to move.
    pub fn enumerate_legal_moves(&mut self) -> &MoveTable {
        self.board.collect_moves(self.side, &mut self.moves);
        self.moves_for = Some(self.side);
        &self.moves
    }

    pub fn has_any_legal_move(&self) -> bool {
        !self.moves.is_empty()
    }

    /// Decides whether the side to move can act, must pass, or whether the
    /// game has ended.
    ///
    /// A pass switches the side to move and leaves the board untouched. The
    /// table is enumerated first if it is missing or belongs to the other
    /// side.
    pub fn resolve_turn_availability(&mut self) -> TurnAvailability {
        if self.phase == Phase::GameOver {
            return TurnAvailability::GameOver;
        }
        if self.moves_for != Some(self.side) {
            self.enumerate_legal_moves();
        }
        if self.board.is_full() {
            return self.finish();
        }
        if self.has_any_legal_move() {
            self.phase = Phase::AwaitingMove(self.side);
            return TurnAvailability::Ready(self.side);
        }

        let passed = self.side;
        self.side = passed.opposite();
        self.enumerate_legal_moves();
        if !self.has_any_legal_move() {
            return self.finish();
        }

        info!(side = %passed, "no legal move, passing");
        self.passed = Some(passed);
        self.phase = Phase::AwaitingMove(self.side);
        TurnAvailability::Passed {
            passed,
            to_move: self.side,
        }
    }

    /// Plays `square` for the side to move and advances the turn.
    ///
    /// The square must be a key of the current table. On error nothing
    /// changes.
    pub fn apply_move(&mut self, square: Square) -> Result<GameState, GameError> {
        let side = match self.phase {
            Phase::GameOver => return Err(GameError::GameOver),
            Phase::AwaitingMove(side) => side,
        };
        if self.moves_for != Some(side) {
            return Err(GameError::StaleMoveTable(side));
        }
        let Some(flips) = self.moves.get(square) else {
            return Err(self.reject(square));
        };

        self.board.place(square, flips, side);
        self.flipped = flips.iter().copied().collect();
        self.last_move = Some(square);
        self.passed = None;
        debug!(%side, %square, flipped = self.flipped.len(), "move applied");

        if self.board.is_full() {
            self.finish();
        } else {
            self.side = side.opposite();
            self.enumerate_legal_moves();
            self.resolve_turn_availability();
        }

        Ok(self.state())
    }

    /// Classifies a square that is not in the table.
    fn reject(&self, square: Square) -> GameError {
        if self.board.cell(square).is_empty() {
            GameError::IllegalMove(square)
        } else {
            GameError::Occupied(square)
        }
    }

    fn finish(&mut self) -> TurnAvailability {
        self.phase = Phase::GameOver;
        self.moves.clear();
        let outcome = self.compute_outcome();
        info!(
            black = outcome.black_count,
            white = outcome.white_count,
            winner = ?outcome.winner,
            "game over"
        );
        TurnAvailability::GameOver
    }

    pub fn is_board_full(&self) -> bool {
        self.board.is_full()
    }

    pub fn disc_count(&self, color: Color) -> u32 {
        self.board.count(color)
    }

    /// Tally of the current position, whether or not the game has ended.
    pub fn compute_outcome(&self) -> Outcome {
        Outcome::from_counts(
            self.board.count(Color::Black),
            self.board.count(Color::White),
        )
    }

    /// The final result, once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_game_over().then(|| self.compute_outcome())
    }

    pub fn state(&self) -> GameState {
        GameState {
            cells: self.board.to_codes(),
            current_side: self.side,
            black_count: self.board.count(Color::Black),
            white_count: self.board.count(Color::White),
            is_game_over: self.is_game_over(),
            passed: self.passed,
            last_move: self.last_move,
            flipped: self.flipped.clone(),
        }
    }
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        match self.outcome() {
            Some(outcome) => write!(f, "{outcome}"),
            None => write!(
                f,
                "It is {}'s turn. There are {} discs on the board.",
                self.side,
                self.board.disc_count()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, NUM_SQUARES, Winner};

    fn sq(col: i32, row: i32) -> Square {
        Square::new(col, row).unwrap()
    }

    /// Black at (1,0), (0,0) empty, White everywhere else.
    fn black_must_pass() -> Board {
        let mut board = Board::empty();
        for square in Square::all() {
            board.set(square, Color::White.into());
        }
        board.set(sq(0, 0), Cell::Empty);
        board.set(sq(1, 0), Color::Black.into());
        board
    }

    fn filled(black: usize) -> Board {
        let mut board = Board::empty();
        for (i, square) in Square::all().enumerate() {
            let color = if i < black { Color::Black } else { Color::White };
            board.set(square, color.into());
        }
        board
    }

    #[test]
    fn new_game_starts_with_black_and_four_moves() {
        let game = GameBoard::new();

        assert_eq!(game.current_side(), Color::Black);
        assert_eq!(game.phase(), Phase::AwaitingMove(Color::Black));
        assert_eq!(game.board().discs().count(), 4);
        assert_eq!(game.disc_count(Color::Black), 2);
        assert_eq!(game.disc_count(Color::White), 2);
        assert_eq!(game.legal_moves().len(), 4);
        assert!(game.legal_moves().iter().all(|mv| mv.flips.len() == 1));
    }

    #[test]
    fn apply_move_adds_one_disc_and_flips_recorded_set() {
        let mut game = GameBoard::new();
        let flips = game.legal_moves().get(sq(2, 3)).unwrap().clone();

        let state = game.apply_move(sq(2, 3)).unwrap();

        assert_eq!(state.black_count + state.white_count, 5);
        assert_eq!(state.black_count, 4);
        assert_eq!(state.flipped, flips.into_iter().collect::<Vec<_>>());
        assert_eq!(state.last_move, Some(sq(2, 3)));
        assert_eq!(state.current_side, Color::White);
        assert_eq!(state.passed, None);
        assert!(!game.legal_moves().is_empty());
    }

    #[test]
    fn illegal_squares_are_rejected_without_changes() {
        let mut game = GameBoard::new();
        let before = game.state();

        assert_eq!(
            game.apply_move(sq(0, 0)),
            Err(GameError::IllegalMove(sq(0, 0)))
        );
        assert_eq!(
            game.apply_move(sq(3, 3)),
            Err(GameError::Occupied(sq(3, 3)))
        );
        assert_eq!(game.state(), before);
    }

    #[test]
    fn apply_move_requires_a_fresh_table() {
        let mut game = GameBoard::from_position(Board::new(), Color::Black);

        assert_eq!(
            game.apply_move(sq(2, 3)),
            Err(GameError::StaleMoveTable(Color::Black))
        );

        game.enumerate_legal_moves();
        assert!(game.apply_move(sq(2, 3)).is_ok());
    }

    #[test]
    fn enumeration_is_idempotent() {
        let mut game = GameBoard::new();
        game.apply_move(sq(3, 2)).unwrap();

        let first = game.enumerate_legal_moves().clone();
        let second = game.enumerate_legal_moves().clone();

        assert_eq!(first, second);
    }

    #[test]
    fn side_without_moves_passes_without_touching_the_board() {
        let mut game = GameBoard::from_position(black_must_pass(), Color::Black);
        let discs_before = game.board().disc_count();

        let availability = game.resolve_turn_availability();

        assert_eq!(
            availability,
            TurnAvailability::Passed {
                passed: Color::Black,
                to_move: Color::White,
            }
        );
        assert_eq!(game.current_side(), Color::White);
        assert_eq!(game.board().disc_count(), discs_before);
        assert_eq!(game.disc_count(Color::Black), 1);
        assert_eq!(game.state().passed, Some(Color::Black));
        assert!(game.legal_moves().contains(sq(0, 0)));
    }

    #[test]
    fn last_move_filling_the_board_ends_the_game() {
        let mut game = GameBoard::from_position(black_must_pass(), Color::Black);
        game.resolve_turn_availability();

        let state = game.apply_move(sq(0, 0)).unwrap();

        assert!(state.is_game_over);
        assert_eq!(state.white_count, NUM_SQUARES as u32);
        assert_eq!(state.flipped, vec![sq(1, 0)]);
        assert_eq!(game.outcome().unwrap().winner, Winner::WhiteWins);
        assert_eq!(game.apply_move(sq(0, 0)), Err(GameError::GameOver));
    }

    #[test]
    fn neither_side_moving_ends_the_game() {
        let board: Board = "
            X - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - O
        "
        .parse()
        .unwrap();
        let mut game = GameBoard::from_position(board, Color::Black);

        assert_eq!(game.resolve_turn_availability(), TurnAvailability::GameOver);
        assert!(game.is_game_over());
        assert!(!game.is_board_full());
        assert_eq!(game.outcome().unwrap().winner, Winner::Tie);
    }

    #[test]
    fn full_board_is_game_over() {
        let mut game = GameBoard::from_position(filled(37), Color::White);

        assert!(game.is_board_full());
        assert_eq!(game.resolve_turn_availability(), TurnAvailability::GameOver);

        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.winner, Winner::BlackWins);
        assert_eq!((outcome.black_count, outcome.white_count), (37, 27));
    }

    #[test]
    fn even_full_board_is_a_tie() {
        let mut game = GameBoard::from_position(filled(32), Color::Black);
        game.resolve_turn_availability();

        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.winner, Winner::Tie);
        assert_eq!((outcome.black_count, outcome.white_count), (32, 32));
    }

    #[test]
    fn capturing_the_last_opponent_disc_ends_the_game() {
        // Black playing (2,0) captures White's only disc.
        let board: Board = "
            X O - - - - - -
            X - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
        "
        .parse()
        .unwrap();
        let mut game = GameBoard::from_position(board, Color::Black);
        game.enumerate_legal_moves();

        let state = game.apply_move(sq(2, 0)).unwrap();

        assert!(state.is_game_over);
        assert_eq!(state.black_count, 4);
        assert_eq!(state.white_count, 0);
    }

    #[test]
    fn pass_back_keeps_the_same_side_to_move() {
        // After Black plays (0,2) White is left with no move while Black
        // still has (3,0).
        let board: Board = "
            X O O - - - - -
            O - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
            - - - - - - - -
        "
        .parse()
        .unwrap();
        let mut game = GameBoard::from_position(board, Color::Black);
        game.enumerate_legal_moves();

        let state = game.apply_move(sq(0, 2)).unwrap();

        assert!(!state.is_game_over);
        assert_eq!(state.passed, Some(Color::White));
        assert_eq!(state.current_side, Color::Black);
        assert!(game.legal_moves().contains(sq(3, 0)));
    }

    #[test]
    fn initialize_resets_a_finished_game() {
        let mut game = GameBoard::from_position(filled(10), Color::Black);
        game.resolve_turn_availability();
        assert!(game.is_game_over());

        game.initialize();

        assert_eq!(game.phase(), Phase::AwaitingMove(Color::Black));
        assert_eq!(game.board(), &Board::new());
    }
}
