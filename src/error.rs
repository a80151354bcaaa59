use thiserror::Error;

use crate::types::{Color, Square};

/// Errors raised by the rules engine and the session around it.
///
/// Every error leaves the game untouched. Passing, ties and the end of the
/// game are reported through [`crate::game::TurnAvailability`] and
/// [`crate::types::Outcome`], never through this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The coordinates are outside the 8x8 grid.
    #[error("square ({col}, {row}) is off the board")]
    OutOfBounds { col: i32, row: i32 },

    /// A pointer position that is not a finite number maps to no square.
    #[error("pointer position is not a finite number")]
    NonFinitePointer,

    /// The square already holds a disc.
    #[error("square {0} is already occupied")]
    Occupied(Square),

    /// The square is empty but placing there would capture nothing.
    #[error("illegal move: {0}")]
    IllegalMove(Square),

    /// No move table has been computed for the side to move.
    #[error("move table is stale for {0}")]
    StaleMoveTable(Color),

    #[error("game is already over")]
    GameOver,

    #[error("game is still in progress")]
    GameInProgress,

    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),

    /// An automated selector returned nothing although moves were available.
    #[error("no move was selected")]
    NoMoveSelected,

    #[error("invalid square notation: {0:?}")]
    InvalidNotation(String),
}

impl GameError {
    /// Whether the error rejects the chosen square itself, as opposed to the
    /// timing of the request.
    pub fn is_invalid_square(&self) -> bool {
        matches!(
            self,
            Self::OutOfBounds { .. }
                | Self::NonFinitePointer
                | Self::Occupied(_)
                | Self::IllegalMove(_)
        )
    }
}

/// Errors from reading or writing the high score sheet.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed score entry on line {line}: {content:?}")]
    Parse { line: usize, content: String },

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Errors from loading a [`crate::config::SessionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("square width must be a positive number, got {0}")]
    SquareWidth(f64),
}
