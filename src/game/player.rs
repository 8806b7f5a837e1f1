use serde::Serialize;

use super::piece::{PieceKind, Symbol};
use crate::config::AllotmentConfig;
use crate::error::InputError;

/// Pieces a player still holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Hand {
    pub normal: usize,
    pub bomb: usize,
    pub teleport: usize,
}

impl Hand {
    /// Starting hand on a board of `total` cells. The first player takes the
    /// extra normal piece when `total` is odd. `allotment` must have passed
    /// [`AllotmentConfig::validate`].
    pub fn allot(total: usize, first: bool, allotment: &AllotmentConfig) -> Self {
        let normal = if first { total.div_ceil(2) } else { total / 2 };
        Hand {
            normal,
            bomb: total / allotment.bomb_divisor,
            teleport: total / allotment.teleport_divisor,
        }
    }

    pub fn count(&self, kind: PieceKind) -> usize {
        match kind {
            PieceKind::Normal => self.normal,
            PieceKind::Bomb => self.bomb,
            PieceKind::Teleport => self.teleport,
        }
    }

    fn slot(&mut self, kind: PieceKind) -> &mut usize {
        match kind {
            PieceKind::Normal => &mut self.normal,
            PieceKind::Bomb => &mut self.bomb,
            PieceKind::Teleport => &mut self.teleport,
        }
    }

    /// Remove one piece of `kind`. Returns false if there is none.
    pub fn take(&mut self, kind: PieceKind) -> bool {
        let slot = self.slot(kind);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub fn total(&self) -> usize {
        self.normal + self.bomb + self.teleport
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    username: String,
    symbol: Symbol,
    hand: Hand,
}

impl Player {
    /// Create a player with an empty hand. Usernames are a single word.
    pub fn new(username: &str, symbol: Symbol) -> Result<Self, InputError> {
        if username.is_empty() || username.chars().any(char::is_whitespace) {
            return Err(InputError::InvalidUsername);
        }
        Ok(Player {
            username: username.to_string(),
            symbol,
            hand: Hand::default(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Summary line such as `ana's pieces -> B: 2, O: 21, T: 4`, sorted by
    /// selector and omitting kinds that ran out.
    pub fn describe_hand(&self) -> String {
        let mut counts: Vec<(char, usize)> = PieceKind::ALL
            .iter()
            .map(|&kind| (kind.glyph(self.symbol), self.hand.count(kind)))
            .filter(|&(_, n)| n > 0)
            .collect();
        counts.sort();
        let parts: Vec<String> = counts.iter().map(|(c, n)| format!("{c}: {n}")).collect();
        format!("{}'s pieces -> {}", self.username, parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(c: char) -> Symbol {
        Symbol::parse(&c.to_string()).unwrap()
    }

    #[test]
    fn test_username_validation() {
        assert!(Player::new("ana", sym('O')).is_ok());
        assert_eq!(Player::new("", sym('O')), Err(InputError::InvalidUsername));
        assert_eq!(
            Player::new("ana maria", sym('O')),
            Err(InputError::InvalidUsername)
        );
    }

    #[test]
    fn test_allotment_default_board() {
        let allotment = AllotmentConfig::default();
        let first = Hand::allot(42, true, &allotment);
        let second = Hand::allot(42, false, &allotment);
        assert_eq!(first, Hand { normal: 21, bomb: 2, teleport: 4 });
        assert_eq!(second, first);
    }

    #[test]
    fn test_allotment_odd_board_favours_first() {
        let allotment = AllotmentConfig::default();
        assert_eq!(Hand::allot(35, true, &allotment).normal, 18);
        assert_eq!(Hand::allot(35, false, &allotment).normal, 17);
        assert_eq!(Hand::allot(9, true, &allotment).bomb, 0);
    }

    #[test]
    fn test_take_until_empty() {
        let mut hand = Hand { normal: 1, bomb: 1, teleport: 0 };
        assert!(!hand.take(PieceKind::Teleport));
        assert!(hand.take(PieceKind::Bomb));
        assert!(!hand.take(PieceKind::Bomb));
        assert!(hand.take(PieceKind::Normal));
        assert!(hand.is_empty());
    }

    #[test]
    fn test_describe_hand() {
        let mut player = Player::new("ana", sym('O')).unwrap();
        *player.hand_mut() = Hand { normal: 21, bomb: 2, teleport: 0 };
        assert_eq!(player.describe_hand(), "ana's pieces -> B: 2, O: 21");
    }
}
