use std::path::PathBuf;

/// Errors returned when a move is rejected. None of them mutate the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is outside the board (0..{cols})")]
    InvalidColumn { column: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,

    #[error("no {0} pieces left")]
    PieceUnavailable(&'static str),
}

/// Errors that can occur when creating a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions must be positive (got {rows}x{cols})")]
    ZeroDimension { rows: usize, cols: usize },
}

/// Errors in player-typed lines. All are recoverable by re-prompting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("expected two tokens, got {0:?}")]
    MalformedLine(String),

    #[error("username must be a single non-empty word")]
    InvalidUsername,

    #[error("symbol {0:?} must be one character other than 'B' or 'T'")]
    InvalidSymbol(String),

    #[error("symbol '{0}' is already taken")]
    DuplicateSymbol(char),

    #[error("unknown piece selector {0:?}")]
    InvalidPieceSelector(String),

    #[error("invalid column {0:?}")]
    InvalidColumn(String),
}

/// Problems with a game config file or with settings handed to a session.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not a valid game config: {source}", path.display())]
    Syntax {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{field} = {value}: {reason}")]
    OutOfRange {
        field: &'static str,
        value: usize,
        reason: &'static str,
    },
}

/// Errors that prevent a game session from starting.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("both players chose the symbol '{0}'")]
    DuplicateSymbol(char),

    #[error("cannot deal pieces: {0}")]
    Allotment(#[from] ConfigError),
}
