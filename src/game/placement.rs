use serde::Serialize;
use tracing::debug;

use super::board::{Board, Position, Relocation};
use super::effect::{resolve_effect, Effect};
use super::piece::{Piece, PieceKind, Symbol};
use crate::error::MoveError;

/// State of the board after a settled move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    InProgress,
    Won(Symbol),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Everything one `place` call changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub piece: Piece,
    /// Cell the piece first fell into.
    pub landing: Position,
    pub effect: Effect,
    /// Gravity moves made after the effect.
    pub settled: Vec<Relocation>,
    /// Final cell of the dropped piece, `None` if it left the board.
    pub resting: Option<Position>,
    pub status: GameStatus,
}

impl MoveResult {
    pub fn cleared(&self) -> &[Position] {
        match &self.effect {
            Effect::Detonated { cleared } => cleared,
            _ => &[],
        }
    }

    /// Teleport swap (both directions when a piece was displaced) followed by
    /// the gravity moves.
    pub fn relocations(&self) -> Vec<Relocation> {
        let mut moves = Vec::new();
        if let Effect::Teleported { from, to, displaced } = &self.effect {
            moves.push(Relocation { from: *from, to: *to });
            if displaced.is_some() {
                moves.push(Relocation { from: *to, to: *from });
            }
        }
        moves.extend(self.settled.iter().copied());
        moves
    }
}

impl Board {
    /// Drop a piece, resolve its effect, settle the board and report the
    /// outcome. Fails before touching the board if the column is invalid.
    pub fn place(
        &mut self,
        column: usize,
        kind: PieceKind,
        owner: Symbol,
    ) -> Result<MoveResult, MoveError> {
        let piece = Piece::new(kind, owner);
        let landing = self.drop_piece(column, piece)?;
        debug!(kind = kind.name(), %owner, row = landing.row, col = landing.col, "piece landed");

        let effect = resolve_effect(piece, landing, self);
        let settled = if effect.disturbs_gravity() {
            self.settle()
        } else {
            Vec::new()
        };
        debug_assert!(self.is_settled(), "board left unsettled after {effect:?}");
        if !settled.is_empty() {
            debug!(moves = settled.len(), "board settled");
        }

        let resting = effect.dropped_piece_at(landing).map(|pos| {
            settled
                .iter()
                .find(|m| m.from == pos)
                .map_or(pos, |m| m.to)
        });

        Ok(MoveResult {
            piece,
            landing,
            effect,
            settled,
            resting,
            status: self.status(),
        })
    }

    /// Win takes precedence over a full board. Two owners completing a line
    /// in the same move is a draw.
    pub fn status(&self) -> GameStatus {
        match self.winning_owners().as_slice() {
            [] if self.is_full() => GameStatus::Draw,
            [] => GameStatus::InProgress,
            [winner] => GameStatus::Won(*winner),
            _ => GameStatus::Draw,
        }
    }
}
