use std::fmt;

use serde::Serialize;

use crate::error::InputError;

/// Selector token reserved for Bomb pieces.
pub const BOMB_SELECTOR: char = 'B';
/// Selector token reserved for Teleport pieces.
pub const TELEPORT_SELECTOR: char = 'T';

/// A player's glyph on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Symbol(char);

impl Symbol {
    /// Validate a symbol token: exactly one non-whitespace character that is
    /// not one of the special piece selectors.
    pub fn parse(token: &str) -> Result<Symbol, InputError> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None)
                if !c.is_whitespace() && c != BOMB_SELECTOR && c != TELEPORT_SELECTOR =>
            {
                Ok(Symbol(c))
            }
            _ => Err(InputError::InvalidSymbol(token.to_string())),
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    Normal,
    Bomb,
    Teleport,
}

impl PieceKind {
    pub const ALL: [PieceKind; 3] = [PieceKind::Normal, PieceKind::Bomb, PieceKind::Teleport];

    /// Character shown on the board for a piece of this kind.
    pub fn glyph(self, owner: Symbol) -> char {
        match self {
            PieceKind::Normal => owner.as_char(),
            PieceKind::Bomb => BOMB_SELECTOR,
            PieceKind::Teleport => TELEPORT_SELECTOR,
        }
    }

    /// Resolve a selector token typed by `owner`.
    pub fn from_selector(token: &str, owner: Symbol) -> Result<PieceKind, InputError> {
        let mut chars = token.chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) if c == owner.as_char() => Some(PieceKind::Normal),
            (Some(BOMB_SELECTOR), None) => Some(PieceKind::Bomb),
            (Some(TELEPORT_SELECTOR), None) => Some(PieceKind::Teleport),
            _ => None,
        };
        kind.ok_or_else(|| InputError::InvalidPieceSelector(token.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Normal => "normal",
            PieceKind::Bomb => "bomb",
            PieceKind::Teleport => "teleport",
        }
    }
}

/// A piece on the board. Pieces carry no identity beyond their cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Symbol,
}

impl Piece {
    pub fn new(kind: PieceKind, owner: Symbol) -> Self {
        Piece { kind, owner }
    }

    pub fn normal(owner: Symbol) -> Self {
        Piece::new(PieceKind::Normal, owner)
    }

    pub fn glyph(self) -> char {
        self.kind.glyph(self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(c: char) -> Symbol {
        Symbol::parse(&c.to_string()).unwrap()
    }

    #[test]
    fn test_symbol_parse() {
        assert_eq!(sym('O').as_char(), 'O');
        assert!(Symbol::parse("").is_err());
        assert!(Symbol::parse("OX").is_err());
        assert!(Symbol::parse(" ").is_err());
        assert_eq!(
            Symbol::parse("B"),
            Err(InputError::InvalidSymbol("B".to_string()))
        );
        assert!(Symbol::parse("T").is_err());
    }

    #[test]
    fn test_selector_dispatch() {
        let o = sym('O');
        assert_eq!(PieceKind::from_selector("O", o), Ok(PieceKind::Normal));
        assert_eq!(PieceKind::from_selector("B", o), Ok(PieceKind::Bomb));
        assert_eq!(PieceKind::from_selector("T", o), Ok(PieceKind::Teleport));
        assert_eq!(
            PieceKind::from_selector("X", o),
            Err(InputError::InvalidPieceSelector("X".to_string()))
        );
        assert!(PieceKind::from_selector("OO", o).is_err());
    }

    #[test]
    fn test_glyph() {
        let x = sym('X');
        assert_eq!(Piece::normal(x).glyph(), 'X');
        assert_eq!(Piece::new(PieceKind::Bomb, x).glyph(), 'B');
        assert_eq!(Piece::new(PieceKind::Teleport, x).glyph(), 'T');
    }
}
