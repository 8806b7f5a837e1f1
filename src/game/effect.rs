//! Special-piece effects, resolved right after a piece lands and before the
//! board is settled again.

use serde::Serialize;
use tracing::debug;

use super::board::{Board, Position};
use super::piece::{Piece, PieceKind};

/// What a landed piece did to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Effect {
    /// Normal pieces have no effect.
    None,
    /// A Bomb emptied these cells (its own cell included), in scan order.
    Detonated { cleared: Vec<Position> },
    /// A Teleport traded places with its mirror cell. `displaced` is the piece
    /// that was sitting there, now at `from`.
    Teleported {
        from: Position,
        to: Position,
        displaced: Option<Piece>,
    },
    /// A Teleport landed on its own mirror cell (center column) and stayed.
    Anchored { at: Position },
}

impl Effect {
    /// Where the dropped piece sits once the effect has resolved, before
    /// gravity. `None` when the piece removed itself.
    pub fn dropped_piece_at(&self, landing: Position) -> Option<Position> {
        match self {
            Effect::None => Some(landing),
            Effect::Detonated { .. } => None,
            Effect::Teleported { to, .. } => Some(*to),
            Effect::Anchored { at } => Some(*at),
        }
    }

    /// Whether the effect may have left gaps under occupied cells.
    pub fn disturbs_gravity(&self) -> bool {
        matches!(self, Effect::Detonated { .. } | Effect::Teleported { .. })
    }
}

/// Reflect a cell across the vertical center line of a board `cols` wide.
pub fn mirror(pos: Position, cols: usize) -> Position {
    Position::new(pos.row, cols - 1 - pos.col)
}

/// Apply the effect of `piece`, which has just landed at `landing`.
pub fn resolve_effect(piece: Piece, landing: Position, board: &mut Board) -> Effect {
    let effect = match piece.kind {
        PieceKind::Normal => Effect::None,
        PieceKind::Bomb => detonate(landing, board),
        PieceKind::Teleport => teleport(landing, board),
    };
    debug!(kind = piece.kind.name(), ?landing, ?effect, "effect resolved");
    effect
}

/// Clear the in-bounds 3x3 block around `center`. Special pieces caught in
/// the blast are removed without triggering.
fn detonate(center: Position, board: &mut Board) -> Effect {
    let mut cleared = Vec::new();
    for dr in -1..=1isize {
        for dc in -1..=1isize {
            let row = center.row as isize + dr;
            let col = center.col as isize + dc;
            if !board.contains(row, col) {
                continue;
            }
            let pos = Position::new(row as usize, col as usize);
            if board.clear(pos).is_some() {
                cleared.push(pos);
            }
        }
    }
    Effect::Detonated { cleared }
}

/// Swap the Teleport with whatever is at its mirror cell. An empty mirror
/// cell means the Teleport simply moves there.
fn teleport(landing: Position, board: &mut Board) -> Effect {
    let target = mirror(landing, board.cols());
    if target == landing {
        return Effect::Anchored { at: landing };
    }
    let displaced = board.at(target).piece();
    board.swap(landing, target);
    Effect::Teleported {
        from: landing,
        to: target,
        displaced,
    }
}
