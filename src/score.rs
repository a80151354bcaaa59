//! High score bookkeeping for finished games.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ScoreError;
use crate::types::Outcome;

/// One `(name, score)` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Records the winning side's disc count under `name`.
    pub fn from_outcome(name: impl Into<String>, outcome: &Outcome) -> Self {
        Self::new(name, outcome.winning_count())
    }
}

/// Ordered list of scores; the first entry is the high score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    records: Vec<ScoreRecord>,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new high score goes to the top; anything else is appended.
    pub fn add(&mut self, record: ScoreRecord) {
        match self.records.first() {
            Some(best) if record.score > best.score => self.records.insert(0, record),
            _ => self.records.push(record),
        }
    }

    pub fn high_score(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One `name score` line per record.
impl fmt::Display for ScoreSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{} {}", record.name, record.score)?;
        }
        Ok(())
    }
}

/// Parses the [`Display`](fmt::Display) form. The score is the last field
/// of a line, so names may contain spaces. Blank lines are skipped.
impl FromStr for ScoreSheet {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut records = Vec::new();
        for (idx, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parse_error = || ScoreError::Parse {
                line: idx + 1,
                content: line.to_string(),
            };
            let (name, score) = line.rsplit_once(char::is_whitespace).ok_or_else(parse_error)?;
            let score = score.parse().map_err(|_| parse_error())?;
            records.push(ScoreRecord::new(name.trim_end(), score));
        }
        Ok(Self { records })
    }
}

/// Sink for finished-game records.
pub trait ScoreStore {
    fn save(&mut self, record: ScoreRecord) -> Result<(), ScoreError>;
}

/// Keeps the sheet in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    sheet: ScoreSheet,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(&self) -> &ScoreSheet {
        &self.sheet
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save(&mut self, record: ScoreRecord) -> Result<(), ScoreError> {
        self.sheet.add(record);
        Ok(())
    }
}

/// Stores the sheet as a text file, rewriting it on every save.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the sheet; a missing file is an empty sheet.
    pub fn load(&self) -> Result<ScoreSheet, ScoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => text.parse(),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no score file yet");
                Ok(ScoreSheet::new())
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl ScoreStore for FileScoreStore {
    fn save(&mut self, record: ScoreRecord) -> Result<(), ScoreError> {
        let mut sheet = self.load()?;
        info!(name = %record.name, score = record.score, "saving score");
        sheet.add(record);
        fs::write(&self.path, sheet.to_string())?;
        Ok(())
    }
}
