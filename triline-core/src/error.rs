//! Error types for the engine

/// Error types for board construction, move application and configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Incorrect board size: {0} (must be at least 1)")]
    InvalidSize(usize),

    #[error("Invalid move: ({row}, {col}) is out of bounds or already taken")]
    InvalidMove { row: usize, col: usize },

    #[error("Failed to parse board: {0}")]
    Parse(String),

    #[error("Strategy produced no move on a board with free cells")]
    NoMove,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
