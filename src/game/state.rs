use tracing::info;

use super::placement::{GameStatus, MoveResult};
use super::{Board, Hand, PieceKind, Player, Symbol};
use crate::config::AllotmentConfig;
use crate::error::{MoveError, SetupError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Symbol),
    Draw,
}

/// One game: the board, both players with their hands, and whose turn it is.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    players: [Player; 2],
    current: usize,
    outcome: Option<GameOutcome>,
}

impl GameSession {
    /// Start a game on `board`, dealing both hands. `first` moves first.
    pub fn new(
        board: Board,
        mut first: Player,
        mut second: Player,
        allotment: &AllotmentConfig,
    ) -> Result<Self, SetupError> {
        if first.symbol() == second.symbol() {
            return Err(SetupError::DuplicateSymbol(second.symbol().as_char()));
        }
        allotment.validate()?;
        let total = board.rows() * board.cols();
        *first.hand_mut() = Hand::allot(total, true, allotment);
        *second.hand_mut() = Hand::allot(total, false, allotment);

        Ok(GameSession {
            board,
            players: [first, second],
            current: 0,
            outcome: None,
        })
    }

    /// Get current player
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, symbol: Symbol) -> Option<&Player> {
        self.players.iter().find(|p| p.symbol() == symbol)
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Columns that can still take a piece.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..self.board.cols())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Pass the turn if the current player has no pieces left. Returns the
    /// skipped player's symbol.
    pub fn skip_exhausted(&mut self) -> Option<Symbol> {
        if self.is_terminal() || !self.current_player().hand().is_empty() {
            return None;
        }
        let skipped = self.current_player().symbol();
        info!(%skipped, "player out of pieces, turn passes");
        self.current = 1 - self.current;
        Some(skipped)
    }

    /// Play one of the current player's pieces. Nothing changes on error.
    pub fn play(&mut self, kind: PieceKind, column: usize) -> Result<MoveResult, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let player = &self.players[self.current];
        if player.hand().count(kind) == 0 {
            return Err(MoveError::PieceUnavailable(kind.name()));
        }

        let result = self.board.place(column, kind, player.symbol())?;
        self.players[self.current].hand_mut().take(kind);

        let exhausted = self.players.iter().all(|p| p.hand().is_empty());
        self.outcome = match result.status {
            GameStatus::Won(symbol) => Some(GameOutcome::Winner(symbol)),
            GameStatus::Draw => Some(GameOutcome::Draw),
            GameStatus::InProgress if exhausted => Some(GameOutcome::Draw),
            GameStatus::InProgress => None,
        };

        match self.outcome {
            Some(outcome) => info!(?outcome, "game over"),
            None => self.current = 1 - self.current,
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::game::{Cell, Piece};

    fn sym(c: char) -> Symbol {
        Symbol::parse(&c.to_string()).unwrap()
    }

    fn session(rows: usize, cols: usize) -> GameSession {
        GameSession::new(
            Board::new(rows, cols).unwrap(),
            Player::new("ana", sym('O')).unwrap(),
            Player::new("ben", sym('X')).unwrap(),
            &AllotmentConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_initial_session() {
        let game = session(6, 7);
        assert_eq!(game.current_player().username(), "ana");
        assert!(!game.is_terminal());
        assert_eq!(game.legal_columns().len(), 7);
        assert_eq!(
            *game.players()[1].hand(),
            Hand { normal: 21, bomb: 2, teleport: 4 }
        );
    }

    #[test]
    fn test_duplicate_symbols_rejected() {
        let result = GameSession::new(
            Board::new(6, 7).unwrap(),
            Player::new("ana", sym('O')).unwrap(),
            Player::new("ben", sym('O')).unwrap(),
            &AllotmentConfig::default(),
        );
        assert!(matches!(result, Err(SetupError::DuplicateSymbol('O'))));
    }

    #[test]
    fn test_zero_divisor_rejected_before_dealing() {
        let allotment = AllotmentConfig {
            teleport_divisor: 10,
            bomb_divisor: 0,
        };
        let result = GameSession::new(
            Board::new(6, 7).unwrap(),
            Player::new("ana", sym('O')).unwrap(),
            Player::new("ben", sym('X')).unwrap(),
            &allotment,
        );
        assert!(matches!(
            result,
            Err(SetupError::Allotment(ConfigError::OutOfRange {
                field: "pieces.bomb_divisor",
                ..
            }))
        ));
    }

    #[test]
    fn test_play_alternates_and_consumes() {
        let mut game = session(6, 7);
        game.play(PieceKind::Normal, 3).unwrap();
        assert_eq!(game.current_player().symbol(), sym('X'));
        assert_eq!(game.players()[0].hand().normal, 20);
        assert_eq!(game.board().get(5, 3), Cell::Occupied(Piece::normal(sym('O'))));
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut game = session(6, 7);
        assert_eq!(
            game.play(PieceKind::Normal, 9),
            Err(MoveError::InvalidColumn { column: 9, cols: 7 })
        );
        assert_eq!(game.current_player().symbol(), sym('O'));
        assert_eq!(game.players()[0].hand().normal, 21);
    }

    #[test]
    fn test_piece_unavailable() {
        // 3x3 board deals no bombs.
        let mut game = session(3, 3);
        assert_eq!(
            game.play(PieceKind::Bomb, 0),
            Err(MoveError::PieceUnavailable("bomb"))
        );
        assert!(game.board().get(2, 0).is_empty());
    }

    #[test]
    fn test_horizontal_win_end_to_end() {
        let mut game = session(6, 7);
        for col in 0..3 {
            game.play(PieceKind::Normal, col).unwrap(); // O
            game.play(PieceKind::Normal, 6).unwrap(); // X elsewhere
        }
        let result = game.play(PieceKind::Normal, 3).unwrap();
        assert_eq!(result.status, GameStatus::Won(sym('O')));
        assert_eq!(game.outcome(), Some(GameOutcome::Winner(sym('O'))));
        assert!(game.legal_columns().is_empty());
        assert_eq!(game.play(PieceKind::Normal, 4), Err(MoveError::GameOver));
    }

    #[test]
    fn test_exhausted_hands_end_in_draw() {
        let mut game = session(6, 7);
        for player in game.players.iter_mut() {
            *player.hand_mut() = Hand { normal: 1, bomb: 0, teleport: 0 };
        }
        game.play(PieceKind::Normal, 0).unwrap();
        assert!(!game.is_terminal());
        game.play(PieceKind::Normal, 1).unwrap();
        assert!(!game.board().is_full());
        assert_eq!(game.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_full_board_is_draw() {
        // 1x3 board: O gets 2 pieces, X gets 1, no specials.
        let mut game = session(1, 3);
        game.play(PieceKind::Normal, 0).unwrap();
        game.play(PieceKind::Normal, 1).unwrap();
        let result = game.play(PieceKind::Normal, 2).unwrap();
        assert_eq!(result.status, GameStatus::Draw);
        assert_eq!(game.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_skip_exhausted_player() {
        let mut game = session(6, 7);
        *game.players[1].hand_mut() = Hand { normal: 1, bomb: 0, teleport: 0 };

        game.play(PieceKind::Normal, 0).unwrap();
        game.play(PieceKind::Normal, 1).unwrap();
        assert_eq!(game.skip_exhausted(), None);
        game.play(PieceKind::Normal, 2).unwrap();

        assert_eq!(game.current_player().symbol(), sym('X'));
        assert_eq!(game.skip_exhausted(), Some(sym('X')));
        assert_eq!(game.current_player().symbol(), sym('O'));
        assert!(!game.is_terminal());
    }
}
