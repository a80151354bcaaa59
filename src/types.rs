use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Number of squares on one edge of the board.
pub const BOARD_SIZE: usize = 8;
/// Number of squares on the board.
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Unit steps `(column, row)` scanned from every disc, in scan order.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
];

/// One of the two sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Moves first.
    #[default]
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self {
        self.opposite()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

/// State of one square of the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Numeric code handed to renderers: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Black => 'X',
            Cell::White => 'O',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '-' | '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Black),
            'O' | 'o' => Some(Cell::White),
            _ => None,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

/// A `(column, row)` coordinate on the grid. Always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Square {
    col: u8,
    row: u8,
}

impl Square {
    /// Validates raw coordinates.
    pub fn new(col: i32, row: i32) -> Result<Self, GameError> {
        if in_bounds(col, row) {
            Ok(Self {
                col: col as u8,
                row: row as u8,
            })
        } else {
            Err(GameError::OutOfBounds { col, row })
        }
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Row-major index, matching [`GameState::cells`].
    pub fn index(self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }

    /// The neighbouring square one step along `direction`, if on the board.
    pub fn step(self, (dc, dr): (i32, i32)) -> Option<Self> {
        Self::new(self.col as i32 + dc, self.row as i32 + dr).ok()
    }

    /// Every square, column by column.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8)
            .flat_map(|col| (0..BOARD_SIZE as u8).map(move |row| Square { col, row }))
    }
}

fn in_bounds(col: i32, row: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&col) && (0..BOARD_SIZE as i32).contains(&row)
}

/// `A1`..`H8`: column letter, then 1-based row.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Square {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidNotation(s.to_string());
        let mut chars = s.chars();
        let col = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        let row = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(invalid)?;
        if chars.next().is_some() || !col.is_ascii_uppercase() {
            return Err(invalid());
        }

        Square::new(col as i32 - 'A' as i32, row as i32 - 1).map_err(|_| invalid())
    }
}

/// Three-way result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    BlackWins,
    WhiteWins,
    Tie,
}

/// Final tally of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Winner,
    pub black_count: u32,
    pub white_count: u32,
}

impl Outcome {
    pub fn from_counts(black_count: u32, white_count: u32) -> Self {
        let winner = match black_count.cmp(&white_count) {
            std::cmp::Ordering::Greater => Winner::BlackWins,
            std::cmp::Ordering::Less => Winner::WhiteWins,
            std::cmp::Ordering::Equal => Winner::Tie,
        };
        Self {
            winner,
            black_count,
            white_count,
        }
    }

    /// Disc count of the winning side; either count on a tie.
    pub fn winning_count(&self) -> u32 {
        self.black_count.max(self.white_count)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Black had {} discs. White had {} discs.",
            self.black_count, self.white_count
        )?;
        match self.winner {
            Winner::BlackWins => f.write_str("Black wins!"),
            Winner::WhiteWins => f.write_str("White wins!"),
            Winner::Tie => f.write_str("It's a tie!"),
        }
    }
}

/// Snapshot handed to renderers and the web front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cell codes, see [`Cell::code`].
    pub cells: Vec<u8>,
    pub current_side: Color,
    pub black_count: u32,
    pub white_count: u32,
    pub is_game_over: bool,
    /// Contract:
    /// - `Some(side)` when `side` had to pass after the last move.
    /// - `None` otherwise.
    pub passed: Option<Color>,
    pub last_move: Option<Square>,
    /// Squares recoloured by `last_move`; empty before the first move.
    pub flipped: Vec<Square>,
}
