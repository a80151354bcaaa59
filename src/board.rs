use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::moves::MoveTable;
use crate::types::{BOARD_SIZE, Cell, Color, DIRECTIONS, NUM_SQUARES, Square};

/// Othello grid indexed by `(column, row)`.
///
/// The grid is the only record of disc presence and colour; [`Board::discs`]
/// is derived from it on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

/// A capture found by [`Board::scan_direction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Empty square closing the run.
    pub square: Square,
    /// Opponent discs outflanked along the scanned line, nearest first.
    pub flips: Vec<Square>,
}

impl Board {
    /// Creates the starting position:
    /// (3,3)=white, (4,3)=black, (3,4)=black, (4,4)=white.
    pub fn new() -> Self {
        let mut board = Self::empty();
        let half = BOARD_SIZE / 2;
        for i in 0..2 {
            board.cells[half - i][half - 1 + i] = Cell::Black;
            board.cells[half - 1 + i][half - 1 + i] = Cell::White;
        }
        board
    }

    /// A board without any discs.
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn cell(&self, square: Square) -> Cell {
        self.cells[square.col()][square.row()]
    }

    /// Looks up raw coordinates, rejecting anything off the grid.
    pub fn cell_at(&self, col: i32, row: i32) -> Result<Cell, GameError> {
        Square::new(col, row).map(|square| self.cell(square))
    }

    pub fn set(&mut self, square: Square, cell: Cell) {
        self.cells[square.col()][square.row()] = cell;
    }

    /// Walks from `origin` along `direction`, looking for a run of
    /// `side`'s opponent discs closed by an empty square.
    ///
    /// Returns `None` when the line leaves the board, meets one of `side`'s
    /// own discs, or reaches an empty square before any opponent disc.
    /// Only reads the grid.
    pub fn scan_direction(
        &self,
        origin: Square,
        direction: (i32, i32),
        side: Color,
    ) -> Option<Capture> {
        let opponent = Cell::from(side.opposite());
        let mut flips = Vec::new();
        let mut current = origin;

        loop {
            current = current.step(direction)?;
            match self.cell(current) {
                cell if cell == opponent => flips.push(current),
                Cell::Empty if !flips.is_empty() => {
                    return Some(Capture {
                        square: current,
                        flips,
                    });
                }
                _ => return None,
            }
        }
    }

    /// Builds the legal-move table for `side` by scanning all 8 directions
    /// from each of its discs, column by column.
    pub fn legal_moves(&self, side: Color) -> MoveTable {
        let mut table = MoveTable::new();
        self.collect_moves(side, &mut table);
        table
    }

    /// Like [`Board::legal_moves`], but refills an existing table.
    pub(crate) fn collect_moves(&self, side: Color, table: &mut MoveTable) {
        table.clear();
        let own = Cell::from(side);
        for origin in Square::all().filter(|&sq| self.cell(sq) == own) {
            for direction in DIRECTIONS {
                if let Some(capture) = self.scan_direction(origin, direction, side) {
                    table.record(capture.square, capture.flips);
                }
            }
        }
    }

    /// Places a disc of `side` on `square` and recolours `flips`.
    ///
    /// Callers pass the flip set recorded for `square` in a table built from
    /// this exact position; nothing beyond it is flipped.
    pub(crate) fn place<'a>(
        &mut self,
        square: Square,
        flips: impl IntoIterator<Item = &'a Square>,
        side: Color,
    ) {
        let own = Cell::from(side);
        self.set(square, own);
        for &flip in flips {
            self.set(flip, own);
        }
    }

    pub fn count(&self, color: Color) -> u32 {
        let target = Cell::from(color);
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == target)
            .count() as u32
    }

    /// Number of discs of either colour.
    pub fn disc_count(&self) -> u32 {
        self.count(Color::Black) + self.count(Color::White)
    }

    pub fn empty_count(&self) -> u32 {
        NUM_SQUARES as u32 - self.disc_count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Every disc on the board with its colour, column by column.
    pub fn discs(&self) -> impl Iterator<Item = (Square, Color)> + '_ {
        Square::all().filter_map(|sq| self.cell(sq).color().map(|color| (sq, color)))
    }

    /// Row-major cell codes, see [`Cell::code`].
    pub fn to_codes(&self) -> Vec<u8> {
        let mut codes = vec![0u8; NUM_SQUARES];
        for sq in Square::all() {
            codes[sq.index()] = self.cell(sq).code();
        }
        codes
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints rows top to bottom with `A`..`H` column labels.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  A B C D E F G H")?;
        for row in 0..BOARD_SIZE {
            write!(f, "\n{}", row + 1)?;
            for col in 0..BOARD_SIZE {
                write!(f, " {}", self.cells[col][row].symbol())?;
            }
        }
        Ok(())
    }
}

/// Parses 64 cell symbols (`-`, `X`, `O`) row by row, ignoring whitespace.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidNotation(s.to_string());
        let mut board = Self::empty();
        let mut symbols = s.chars().filter(|c| !c.is_whitespace());

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let symbol = symbols.next().ok_or_else(invalid)?;
                board.cells[col][row] = Cell::from_symbol(symbol).ok_or_else(invalid)?;
            }
        }

        match symbols.next() {
            None => Ok(board),
            Some(_) => Err(invalid()),
        }
    }
}
