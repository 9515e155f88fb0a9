// Error types shared across the board, search, driver and config layers

use std::path::PathBuf;

/// Errors raised by a game state when it is asked to do something its rules forbid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("illegal action {action} for player {player}")]
    IllegalAction { action: String, player: usize },
}

/// Errors that end a search iteration
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The driver raised the cancel flag; the in-flight iteration is discarded
    #[error("search cancelled")]
    Cancelled,

    #[error("game state rejected a transition: {0}")]
    Game(#[from] GameError),
}

/// Errors raised while running a turn through the driver
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("search worker panicked or was aborted: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("agent failed: {0}")]
    Search(#[from] SearchError),
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
