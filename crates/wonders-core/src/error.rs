use thiserror::Error;

use crate::grid::CellKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cell index out of range: {0}")]
    IndexOutOfRange(usize),

    #[error("Column out of range: {0}")]
    ColumnOutOfRange(usize),

    #[error("Player slot out of range: {0}")]
    PlayerOutOfRange(usize),

    #[error("Cell {index} is a {actual} cell, expected {expected}")]
    WrongCellKind {
        index: usize,
        expected: CellKind,
        actual: CellKind,
    },

    #[error("Invalid score: {0:?}")]
    InvalidScore(String),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Main queue closed")]
    QueueClosed,

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParseError(e.message().to_string())
    }
}
