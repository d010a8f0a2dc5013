//! Text formats exchanged with the external move-search engine
//!
//! Wire board (two lines):
//!
//! ```text
//! b
//! A1b,A2b,A3b,...,I9w
//! ```
//!
//! Line one is the side to move, line two every occupied cell as
//! `<label><owner>` sorted by row then column.
//!
//! Move text: `(b, C3, C4, C5) i → NE`, i.e. the mover, the moving marbles,
//! `i` (inline) or `s` (broadside) and the direction.

use crate::board::{Board, Coord, Direction, Player};
use crate::error::{AbaloneError, Result};
use crate::rules::MoveKind;

const ARROW: &str = "→";

/// `<letter><digits><b|w>`
fn is_wire_token(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && matches!(bytes[bytes.len() - 1], b'b' | b'w')
        && bytes[1..bytes.len() - 1].iter().all(u8::is_ascii_digit)
}

/// Serialize the board and the side to move
pub fn to_wire_string(board: &Board, to_move: Player) -> Result<String> {
    let mut tokens = Vec::with_capacity(board.piece_count() as usize);
    for (coord, owner) in board.occupied() {
        let token = format!("{}{}", coord, owner.tag());
        if !is_wire_token(&token) {
            return Err(AbaloneError::MalformedWireToken { token });
        }
        tokens.push(token);
    }
    Ok(format!("{}\n{}", to_move.tag(), tokens.join(",")))
}

/// Parse a wire board back into a board and the side to move
pub fn parse_wire_board(text: &str) -> Result<(Board, Player)> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or("").trim();
    let to_move = match header {
        "b" | "B" => Player::Black,
        "w" | "W" => Player::White,
        _ => {
            return Err(AbaloneError::MalformedWireToken {
                token: header.to_string(),
            })
        }
    };

    let mut board = Board::new();
    let body = lines.next().unwrap_or("").trim();
    for token in body.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !is_wire_token(token) {
            return Err(AbaloneError::MalformedWireToken {
                token: token.to_string(),
            });
        }
        let (label, owner) = token.split_at(token.len() - 1);
        let owner = if owner == "b" { Player::Black } else { Player::White };
        let coord = Coord::from_label(label).ok_or_else(|| invalid_label(label))?;
        if board.get(coord)?.is_some() {
            return Err(AbaloneError::MalformedWireToken {
                token: token.to_string(),
            });
        }
        board.place(coord, owner)?;
    }
    Ok((board, to_move))
}

fn invalid_label(label: &str) -> AbaloneError {
    let mut chars = label.chars();
    let row = chars
        .next()
        .map(|l| (l.to_ascii_uppercase() as i16 - 'A' as i16 + 1) as i8)
        .unwrap_or(0);
    let col = chars.as_str().parse().unwrap_or(0);
    AbaloneError::InvalidCoordinate { col, row }
}

/// A move as described by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineMove {
    pub player: Player,
    pub tiles: Vec<Coord>,
    pub kind: MoveKind,
    pub direction: Direction,
}

/// Render a move in the text form [`parse_move_text`] accepts.
/// Tiles are written in row-major order.
pub fn format_move_text(player: Player, tiles: &[Coord], kind: MoveKind, direction: Direction) -> String {
    let mut sorted = tiles.to_vec();
    sorted.sort();
    let mut text = format!("({}", player.tag());
    for tile in sorted {
        text.push_str(", ");
        text.push_str(&tile.label());
    }
    text.push_str(&format!(") {} {} {}", kind.tag(), ARROW, direction));
    text
}

/// Parse `(<player>, <tile>[, <tile>...]) <moveType> → <direction>`
pub fn parse_move_text(text: &str) -> Result<EngineMove> {
    MoveTextParser::new(text).parse()
}

/// Recursive-descent reader over the move-text grammar
struct MoveTextParser<'a> {
    text: &'a str,
    rest: &'a str,
}

impl<'a> MoveTextParser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, rest: text }
    }

    fn fail(&self, reason: impl Into<String>) -> AbaloneError {
        AbaloneError::move_text(self.text, reason)
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.fail(format!("expected {token:?}")))
        }
    }

    /// Run of letters, digits or hyphens
    fn word(&mut self) -> Result<&'a str> {
        self.skip_ws();
        let end = self
            .rest
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '-'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(self.fail("expected a word"));
        }
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(word)
    }

    fn parse(mut self) -> Result<EngineMove> {
        self.expect("(")?;
        let player_word = self.word()?;
        let player = Player::from_tag(player_word)
            .ok_or_else(|| self.fail(format!("unknown player {player_word:?}")))?;

        let mut tiles = Vec::new();
        while self.eat(",") {
            let label = self.word()?;
            let tile = Coord::from_label(label)
                .ok_or_else(|| self.fail(format!("{label:?} is not a board cell")))?;
            tiles.push(tile);
        }
        if tiles.is_empty() {
            return Err(self.fail("no tiles listed"));
        }
        self.expect(")")?;

        let kind_word = self.word()?;
        let kind = match kind_word.to_ascii_lowercase().as_str() {
            "i" | "inline" => MoveKind::Inline,
            "s" | "broadside" | "sidestep" | "side-step" => MoveKind::Broadside,
            other => return Err(self.fail(format!("unknown move type {other:?}"))),
        };

        if !self.eat(ARROW) && !self.eat("->") {
            return Err(self.fail("expected an arrow"));
        }

        let dir_word = self.word()?;
        let direction = Direction::from_name(dir_word)
            .ok_or_else(|| self.fail(format!("unknown direction {dir_word:?}")))?;

        self.skip_ws();
        if !self.rest.is_empty() {
            return Err(self.fail(format!("trailing input {:?}", self.rest)));
        }

        Ok(EngineMove {
            player,
            tiles,
            kind,
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layout;

    fn c(col: i8, row: i8) -> Coord {
        Coord::new(col, row)
    }

    #[test]
    fn test_wire_string_format() {
        let mut board = Board::new();
        board.place(c(5, 5), Player::White).unwrap();
        board.place(c(1, 1), Player::Black).unwrap();
        board.place(c(9, 9), Player::Black).unwrap();
        let wire = to_wire_string(&board, Player::White).unwrap();
        assert_eq!(wire, "w\nA1b,E5w,I9b");
    }

    #[test]
    fn test_wire_string_sorted_row_then_column() {
        let board = Board::with_layout(Layout::Standard, Player::Black);
        let wire = to_wire_string(&board, Player::Black).unwrap();
        let mut lines = wire.lines();
        assert_eq!(lines.next(), Some("b"));
        let tokens: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(tokens.len(), 28);
        assert_eq!(tokens[0], "A1b");
        assert_eq!(tokens[27], "I9w");
        assert!(tokens.iter().all(|t| is_wire_token(t)));
    }

    #[test]
    fn test_empty_board_wire() {
        assert_eq!(to_wire_string(&Board::new(), Player::Black).unwrap(), "b\n");
    }

    #[test]
    fn test_wire_round_trip() {
        for layout in Layout::BUILT_IN {
            let board = Board::with_layout(layout, Player::White);
            let wire = to_wire_string(&board, Player::White).unwrap();
            let (parsed, to_move) = parse_wire_board(&wire).unwrap();
            assert_eq!(parsed, board);
            assert_eq!(to_move, Player::White);
        }
    }

    #[test]
    fn test_wire_rejects_bad_tokens() {
        for text in ["b\nA1x", "b\n1Ab", "b\nA1", "b\nAb", "x\nA1b", "b\nA1b,,E5q"] {
            assert!(
                matches!(parse_wire_board(text), Err(AbaloneError::MalformedWireToken { .. })),
                "{text:?}"
            );
        }
        assert!(matches!(
            parse_wire_board("b\nA9b"),
            Err(AbaloneError::InvalidCoordinate { col: 9, row: 1 })
        ));
    }

    #[test]
    fn test_wire_rejects_repeated_cell() {
        for text in ["b\nA1b,A1w", "w\nA1b,E5w,A1b"] {
            match parse_wire_board(text) {
                Err(AbaloneError::MalformedWireToken { token }) => assert!(token.starts_with("A1"), "{text:?}"),
                other => panic!("{text:?}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_token_pattern() {
        assert!(is_wire_token("A1b"));
        assert!(is_wire_token("I9w"));
        assert!(!is_wire_token("A1"));
        assert!(!is_wire_token("11b"));
        assert!(!is_wire_token("Ab"));
        assert!(!is_wire_token("A1B"));
    }

    #[test]
    fn test_parse_move_text() {
        let mv = parse_move_text("(b, C3, C4, C5) i → E").unwrap();
        assert_eq!(mv.player, Player::Black);
        assert_eq!(mv.tiles, vec![c(3, 3), c(4, 3), c(5, 3)]);
        assert_eq!(mv.kind, MoveKind::Inline);
        assert_eq!(mv.direction, Direction::E);
    }

    #[test]
    fn test_parse_move_text_variants() {
        let mv = parse_move_text("  (White,e5,F6)   broadside -> sw ").unwrap();
        assert_eq!(mv.player, Player::White);
        assert_eq!(mv.tiles, vec![c(5, 5), c(6, 6)]);
        assert_eq!(mv.kind, MoveKind::Broadside);
        assert_eq!(mv.direction, Direction::SW);
    }

    #[test]
    fn test_parse_move_text_failures() {
        for text in [
            "",
            "b, C3) i → E",
            "(b) i → E",
            "(x, C3) i → E",
            "(b, C3) q → E",
            "(b, C3) i E",
            "(b, C3) i → N",
            "(b, C3) i → E extra",
            "(b, Z9) i → E",
            "(b, 2m) i → NW",
        ] {
            assert!(
                matches!(parse_move_text(text), Err(AbaloneError::UnparsableMoveText { .. })),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_format_then_parse() {
        let text = format_move_text(Player::White, &[c(6, 6), c(5, 5)], MoveKind::Broadside, Direction::NW);
        assert_eq!(text, "(w, E5, F6) s → NW");
        let mv = parse_move_text(&text).unwrap();
        assert_eq!(mv.tiles, vec![c(5, 5), c(6, 6)]);
        assert_eq!(mv.kind, MoveKind::Broadside);
    }
}
