//! # Special Connect Four
//!
//! Connect Four on a board of any size, with two special pieces: a Bomb that
//! clears the 3x3 block around where it lands and a Teleport that trades
//! places with the cell mirrored across the board's vertical center line.
//! Gravity is reapplied after every effect, and wins are detected on the
//! settled board.
//!
//! ## Modules
//!
//! - [`game`] — Board engine, piece effects, players and game session
//! - [`input`] — Parsing of player setup and turn lines
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod input;
