//! Maps pointer coordinates to board squares.

use crate::board::Board;
use crate::error::GameError;
use crate::moves::MoveTable;
use crate::types::{BOARD_SIZE, Square};

/// Converts clicks on a rendered board into squares.
///
/// Coordinates are measured from the centre of the board with `y` growing
/// upwards, so row 0 is the bottom edge as drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputResolver {
    square_width: f64,
}

impl InputResolver {
    pub fn new(square_width: f64) -> Self {
        Self { square_width }
    }

    /// The square under `(x, y)`.
    ///
    /// Clicks far off the board report saturated coordinates in
    /// [`GameError::OutOfBounds`].
    pub fn square_at(&self, x: f64, y: f64) -> Result<Square, GameError> {
        let half = (BOARD_SIZE / 2) as f64;
        let col = half + (x / self.square_width).floor();
        let row = half + (y / self.square_width).floor();
        if !(col.is_finite() && row.is_finite()) {
            return Err(GameError::NonFinitePointer);
        }
        Square::new(col as i32, row as i32)
    }

    /// Resolves a click and checks it against the current move table.
    pub fn resolve(
        &self,
        x: f64,
        y: f64,
        board: &Board,
        moves: &MoveTable,
    ) -> Result<Square, GameError> {
        let square = self.square_at(x, y)?;
        if !board.cell(square).is_empty() {
            Err(GameError::Occupied(square))
        } else if !moves.contains(square) {
            Err(GameError::IllegalMove(square))
        } else {
            Ok(square)
        }
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new(50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn sq(col: i32, row: i32) -> Square {
        Square::new(col, row).unwrap()
    }

    #[test]
    fn square_at_uses_the_board_centre_as_origin() {
        let resolver = InputResolver::new(50.0);

        assert_eq!(resolver.square_at(0.0, 0.0), Ok(sq(4, 4)));
        assert_eq!(resolver.square_at(-1.0, -1.0), Ok(sq(3, 3)));
        assert_eq!(resolver.square_at(-200.0, -200.0), Ok(sq(0, 0)));
        assert_eq!(resolver.square_at(199.9, 199.9), Ok(sq(7, 7)));
    }

    #[test]
    fn square_at_rejects_clicks_outside_the_grid() {
        let resolver = InputResolver::default();

        assert_eq!(
            resolver.square_at(200.0, 0.0),
            Err(GameError::OutOfBounds { col: 8, row: 4 })
        );
        assert_eq!(
            resolver.square_at(0.0, -201.0),
            Err(GameError::OutOfBounds { col: 4, row: -1 })
        );
    }

    #[test]
    fn square_at_rejects_far_away_clicks_without_overflow() {
        let resolver = InputResolver::default();

        assert_eq!(
            resolver.square_at(1.0e12, 0.0),
            Err(GameError::OutOfBounds { col: i32::MAX, row: 4 })
        );
        assert_eq!(
            resolver.square_at(0.0, -1.0e300),
            Err(GameError::OutOfBounds { col: 4, row: i32::MIN })
        );
    }

    #[test]
    fn square_at_rejects_non_finite_clicks() {
        let resolver = InputResolver::default();

        assert_eq!(
            resolver.square_at(f64::NAN, f64::NAN),
            Err(GameError::NonFinitePointer)
        );
        assert_eq!(
            resolver.square_at(0.0, f64::INFINITY),
            Err(GameError::NonFinitePointer)
        );
        assert_eq!(
            resolver.square_at(f64::NEG_INFINITY, 0.0),
            Err(GameError::NonFinitePointer)
        );
    }

    #[test]
    fn resolve_rejects_non_finite_clicks_before_checking_the_board() {
        let resolver = InputResolver::default();
        let board = Board::new();
        let moves = board.legal_moves(Color::Black);

        assert_eq!(
            resolver.resolve(f64::NAN, -25.0, &board, &moves),
            Err(GameError::NonFinitePointer)
        );
    }

    #[test]
    fn resolve_checks_occupancy_then_legality() {
        let resolver = InputResolver::default();
        let board = Board::new();
        let moves = board.legal_moves(Color::Black);

        // (3,3) holds a white disc.
        assert_eq!(
            resolver.resolve(-25.0, -25.0, &board, &moves),
            Err(GameError::Occupied(sq(3, 3)))
        );
        // (0,0) is empty but captures nothing.
        assert_eq!(
            resolver.resolve(-175.0, -175.0, &board, &moves),
            Err(GameError::IllegalMove(sq(0, 0)))
        );
        // (2,3) is a legal opening move.
        assert_eq!(
            resolver.resolve(-75.0, -25.0, &board, &moves),
            Ok(sq(2, 3))
        );
    }
}
