//! The legal-move table: empty squares mapped to the discs they capture.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::Square;

/// One legal placement and every opponent disc it would flip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalMove {
    pub square: Square,
    pub flips: BTreeSet<Square>,
}

/// Legal moves for one side, kept in the order they were first found.
///
/// Contract:
/// - every key is an empty square of the board it was built from.
/// - every flip set is non-empty.
///
/// Only [`crate::board::Board::legal_moves`] builds tables, so both hold by
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoveTable {
    moves: Vec<LegalMove>,
}

impl MoveTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `flips` into the entry for `square`, creating it if needed.
    /// An empty run captures nothing and is not recorded.
    pub(crate) fn record(&mut self, square: Square, flips: impl IntoIterator<Item = Square>) {
        let mut flips = flips.into_iter().peekable();
        if flips.peek().is_none() {
            return;
        }

        match self.moves.iter_mut().find(|mv| mv.square == square) {
            Some(existing) => existing.flips.extend(flips),
            None => self.moves.push(LegalMove {
                square,
                flips: flips.collect(),
            }),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.moves.clear();
    }

    /// The flips recorded for `square`, if it is a legal move.
    pub fn get(&self, square: Square) -> Option<&BTreeSet<Square>> {
        self.moves
            .iter()
            .find(|mv| mv.square == square)
            .map(|mv| &mv.flips)
    }

    pub fn contains(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LegalMove> {
        self.moves.iter()
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.moves.iter().map(|mv| mv.square)
    }

    /// The move with the strictly largest flip set; the first one found wins
    /// ties.
    pub fn largest_capture(&self) -> Option<Square> {
        let mut best: Option<&LegalMove> = None;
        for mv in &self.moves {
            if best.is_none_or(|b| mv.flips.len() > b.flips.len()) {
                best = Some(mv);
            }
        }
        best.map(|mv| mv.square)
    }
}

impl<'a> IntoIterator for &'a MoveTable {
    type Item = &'a LegalMove;
    type IntoIter = std::slice::Iter<'a, LegalMove>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
