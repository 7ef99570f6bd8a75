use thiserror::Error;

use crate::models::Position;

#[derive(Error, Debug)]
pub enum MatchError {
    /// Required input is absent (e.g. no goalkeeper in a lineup). Raised before kickoff.
    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Invalid lineup size: expected {expected}, found {found}")]
    InvalidLineupSize { expected: usize, found: usize },

    /// No bench candidate shares a position family with the departing player.
    /// Never fatal: the substitution is skipped.
    #[error("No eligible bench replacement for {player} ({position:?})")]
    PositionalGap { player: String, position: Position },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl MatchError {
    /// Errors the simulation absorbs (logs and skips) instead of aborting a match.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MatchError::PositionalGap { .. })
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
