//! Othello rules engine.
//!
//! [`GameBoard`] owns the grid, the side to move and the legal-move table,
//! and is the only place moves are validated and captures applied.
//! [`Session`] puts a human and an automated [`MoveSelector`] around it, and
//! [`wasm`] exposes that session to a browser front end.

use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod moves;
pub mod score;
pub mod session;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::SessionConfig;
pub use error::GameError;
pub use game::{GameBoard, Phase, TurnAvailability};
pub use moves::MoveTable;
pub use session::{MoveSelector, Session};
pub use types::{Cell, Color, GameState, Outcome, Square, Winner};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
