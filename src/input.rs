//! Parsing of the two line formats players type: `<username> <symbol>` at
//! setup and `<selector> <column>` on each turn.

use crate::error::InputError;
use crate::game::{PieceKind, Symbol};

/// A parsed turn: which kind of piece to drop and the 0-indexed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnCommand {
    pub kind: PieceKind,
    pub column: usize,
}

fn two_tokens(line: &str) -> Result<(&str, &str), InputError> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(a), Some(b), None) => Ok((a, b)),
        _ => Err(InputError::MalformedLine(line.trim().to_string())),
    }
}

/// Parse `<username> <symbol>`.
pub fn parse_player_line(line: &str) -> Result<(String, Symbol), InputError> {
    let (username, symbol) = two_tokens(line)?;
    Ok((username.to_string(), Symbol::parse(symbol)?))
}

/// Parse `<selector> <column>` for the player owning `owner`. The selector
/// is the owner's symbol for a normal piece, `B` for a Bomb or `T` for a
/// Teleport. Range checks against the board happen when the move is played.
pub fn parse_turn(line: &str, owner: Symbol, one_based: bool) -> Result<TurnCommand, InputError> {
    let (selector, column) = two_tokens(line)?;
    let kind = PieceKind::from_selector(selector, owner)?;
    let invalid = || InputError::InvalidColumn(column.to_string());
    let typed: usize = column.parse().map_err(|_| invalid())?;
    let column = if one_based {
        typed.checked_sub(1).ok_or_else(invalid)?
    } else {
        typed
    };
    Ok(TurnCommand { kind, column })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(c: char) -> Symbol {
        Symbol::parse(&c.to_string()).unwrap()
    }

    #[test]
    fn test_parse_player_line() {
        let (name, symbol) = parse_player_line("ana O").unwrap();
        assert_eq!(name, "ana");
        assert_eq!(symbol, sym('O'));
        assert_eq!(
            parse_player_line("ana"),
            Err(InputError::MalformedLine("ana".to_string()))
        );
        assert!(parse_player_line("ana maria O").is_err());
        assert_eq!(
            parse_player_line("ana OO"),
            Err(InputError::InvalidSymbol("OO".to_string()))
        );
        assert!(parse_player_line("ana B").is_err());
    }

    #[test]
    fn test_parse_turn_one_based() {
        let o = sym('O');
        assert_eq!(
            parse_turn("O 1", o, true),
            Ok(TurnCommand { kind: PieceKind::Normal, column: 0 })
        );
        assert_eq!(
            parse_turn("  B 4 ", o, true),
            Ok(TurnCommand { kind: PieceKind::Bomb, column: 3 })
        );
        assert_eq!(
            parse_turn("O 0", o, true),
            Err(InputError::InvalidColumn("0".to_string()))
        );
    }

    #[test]
    fn test_parse_turn_zero_based() {
        let x = sym('X');
        assert_eq!(
            parse_turn("T 0", x, false),
            Ok(TurnCommand { kind: PieceKind::Teleport, column: 0 })
        );
    }

    #[test]
    fn test_parse_turn_errors() {
        let o = sym('O');
        assert_eq!(
            parse_turn("X 2", o, true),
            Err(InputError::InvalidPieceSelector("X".to_string()))
        );
        assert_eq!(
            parse_turn("O two", o, true),
            Err(InputError::InvalidColumn("two".to_string()))
        );
        assert_eq!(
            parse_turn("O -1", o, true),
            Err(InputError::InvalidColumn("-1".to_string()))
        );
        assert!(matches!(
            parse_turn("", o, true),
            Err(InputError::MalformedLine(_))
        ));
    }
}
