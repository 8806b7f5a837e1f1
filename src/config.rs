//! Game settings read from a TOML file. Every table and key is optional;
//! anything left out keeps the classic 6x7 game with the original piece
//! allotment and 1-based column input.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;

fn at_least_one(field: &'static str, value: usize, reason: &'static str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::OutOfRange { field, value, reason });
    }
    Ok(())
}

/// Board size used when `<rows> <columns>` are not given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig { rows: 6, cols: 7 }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least_one("board.rows", self.rows, "a board needs at least one row")?;
        at_least_one("board.cols", self.cols, "a board needs at least one column")
    }
}

/// How many special pieces each player is dealt: one Teleport per
/// `teleport_divisor` board cells and one Bomb per `bomb_divisor` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllotmentConfig {
    pub teleport_divisor: usize,
    pub bomb_divisor: usize,
}

impl Default for AllotmentConfig {
    fn default() -> Self {
        AllotmentConfig {
            teleport_divisor: 10,
            bomb_divisor: 20,
        }
    }
}

impl AllotmentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least_one(
            "pieces.teleport_divisor",
            self.teleport_divisor,
            "a player gets one teleport per this many cells, so it must be at least 1",
        )?;
        at_least_one(
            "pieces.bomb_divisor",
            self.bomb_divisor,
            "a player gets one bomb per this many cells, so it must be at least 1",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Columns typed by players start at 1 instead of 0.
    pub one_based_columns: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            one_based_columns: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub pieces: AllotmentConfig,
    pub input: InputConfig,
}

impl GameConfig {
    /// Read and check a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = toml::from_str(&text).map_err(|source| ConfigError::Syntax {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Like [`GameConfig::from_file`], but a missing file means the classic game.
    pub fn from_file_or_classic(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(path = %path.display(), "no config file, playing the classic 6x7 game");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;
        self.pieces.validate()
    }

    /// The classic settings as TOML, for `--print-config`.
    pub fn classic_toml() -> String {
        toml::to_string_pretty(&GameConfig::default()).expect("classic config serializes")
    }
}
