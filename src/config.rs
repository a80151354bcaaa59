use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::score::FileScoreStore;
use crate::types::Color;

/// Which automated player answers the human.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    /// Largest capture, first found on ties.
    #[default]
    Greedy,
    FirstLegal,
}

/// Settings for a human-versus-computer [`crate::session::Session`].
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Colour played by the human; the computer plays the other one.
    pub human_side: Color,
    pub selector: SelectorKind,
    /// Edge length of one square in pointer units, see
    /// [`crate::input::InputResolver`].
    pub square_width: f64,
    /// Text file finished games are recorded in, see [`Self::score_store`].
    pub score_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            human_side: Color::Black,
            selector: SelectorKind::Greedy,
            square_width: 50.0,
            score_file: PathBuf::from("scores.txt"),
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(self.square_width.is_finite() && self.square_width > 0.0) {
            return Err(ConfigError::SquareWidth(self.square_width));
        }
        Ok(self)
    }

    /// Store backed by [`Self::score_file`].
    pub fn score_store(&self) -> FileScoreStore {
        FileScoreStore::new(&self.score_file)
    }
}
