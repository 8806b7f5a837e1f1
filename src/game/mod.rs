//! Board engine: grid of typed pieces, gravity drops, Bomb and Teleport
//! effects, resettlement and win detection, plus the two-player session that
//! drives it.

mod board;
mod effect;
mod piece;
mod placement;
mod player;
mod state;

pub use board::{Board, Cell, Position, Relocation, CONNECT};
pub use effect::{mirror, resolve_effect, Effect};
pub use piece::{Piece, PieceKind, Symbol, BOMB_SELECTOR, TELEPORT_SELECTOR};
pub use placement::{GameStatus, MoveResult};
pub use player::{Hand, Player};
pub use state::{GameOutcome, GameSession};
