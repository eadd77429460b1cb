//! Standard Algebraic Notation encoding and decoding.
//!
//! Encoding needs the position *before* the move so that the disambiguation
//! segment can be computed. Decoding produces a [`ParsedMove`] descriptor only;
//! choosing the concrete piece that moves is the engine's job.

use lazy_static::lazy_static;
use regex::Regex;

use crate::chess_errors::NotationError;
use crate::game_state::chess_move::ChessMove;
use crate::game_state::chess_rules::CastlingRules;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_filter::legal_moves;
use crate::utils::algebraic::{algebraic_to_position, file_to_col, rank_to_row};

lazy_static! {
    static ref COORDINATE_PATTERN: Regex =
        Regex::new(r"^([a-h][1-8])-?([a-h][1-8])(?:=?([QRBNqrbn]))?$")
            .expect("coordinate move pattern is valid");
    static ref SAN_PATTERN: Regex =
        Regex::new(r"^([KQRBN])?([a-h])?([1-8])?(x)?([a-h][1-8])(?:=?([QRBNqrbn]))?$")
            .expect("SAN move pattern is valid");
}

const EN_PASSANT_SUFFIX: &str = "e.p.";

/// A partially resolved move: what kind of piece goes where, plus any origin
/// hints the text carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedMove {
    /// `None` for coordinate notation, where any piece on the origin square
    /// qualifies.
    pub piece_kind: Option<PieceKind>,
    pub to: Position,
    pub from_col: Option<u8>,
    pub from_row: Option<u8>,
    /// Whether the text carried an `x`. Informational only: resolution goes
    /// by the board, so `Nxf3` onto an empty square still plays `Nf3`.
    pub is_capture: bool,
    pub is_castling: bool,
    pub promotion: Option<PieceKind>,
}

impl ParsedMove {
    /// Whether `piece` fits the kind and origin hints of this descriptor.
    pub fn matches_origin(&self, piece: &Piece) -> bool {
        self.piece_kind.is_none_or(|kind| kind == piece.kind)
            && self.from_col.is_none_or(|col| col == piece.position.col())
            && self.from_row.is_none_or(|row| row == piece.position.row())
    }
}

/// Parses SAN (`Nf3`, `exd5`, `e8=Q`, `O-O`, `Rad1`) or coordinate notation
/// (`e2e4`, `e2-e4`, `e7e8q`). Trailing `+`, `#`, `!`, `?` and an ` e.p.`
/// suffix are ignored.
pub fn parse_algebraic(text: &str, side_to_move: Color) -> Result<ParsedMove, NotationError> {
    let cleaned = clean_notation(text);
    if cleaned.is_empty() {
        return Err(NotationError::Empty);
    }

    if let Some(castle) = parse_castling(cleaned, side_to_move) {
        return Ok(castle);
    }

    if let Some(caps) = COORDINATE_PATTERN.captures(cleaned) {
        let from = algebraic_to_position(&caps[1])?;
        let to = algebraic_to_position(&caps[2])?;
        return Ok(ParsedMove {
            piece_kind: None,
            to,
            from_col: Some(from.col()),
            from_row: Some(from.row()),
            is_capture: false,
            is_castling: false,
            promotion: parse_promotion_letter(caps.get(3).map(|m| m.as_str())),
        });
    }

    let caps = SAN_PATTERN
        .captures(cleaned)
        .ok_or_else(|| NotationError::Unrecognized(text.to_owned()))?;

    let piece_kind = caps
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .and_then(PieceKind::from_letter)
        .unwrap_or(PieceKind::Pawn);
    let from_col = caps
        .get(2)
        .and_then(|m| m.as_str().chars().next())
        .and_then(file_to_col);
    let from_row = caps
        .get(3)
        .and_then(|m| m.as_str().chars().next())
        .and_then(rank_to_row);
    let promotion = parse_promotion_letter(caps.get(6).map(|m| m.as_str()));
    if promotion.is_some() && piece_kind != PieceKind::Pawn {
        return Err(NotationError::Unrecognized(text.to_owned()));
    }

    Ok(ParsedMove {
        piece_kind: Some(piece_kind),
        to: algebraic_to_position(&caps[5])?,
        from_col,
        from_row,
        is_capture: caps.get(4).is_some(),
        is_castling: false,
        promotion,
    })
}

/// SAN for `mv`, which must be legal in `before` (the position the move is
/// played from).
pub fn move_to_san(mv: &ChessMove, before: &GameState, castling: CastlingRules) -> String {
    if mv.is_castling {
        let san = if mv.to.col() > mv.from.col() { "O-O" } else { "O-O-O" };
        return san.to_owned();
    }

    let mut san = String::with_capacity(10);
    match mv.piece.kind.san_letter() {
        None => {
            if mv.is_capture() {
                san.push(mv.from.file_char());
                san.push('x');
            }
        }
        Some(letter) => {
            san.push(letter);
            san.push_str(&disambiguation(mv, before, castling));
            if mv.is_capture() {
                san.push('x');
            }
        }
    }

    san.push(mv.to.file_char());
    san.push(mv.to.rank_char());

    if let Some(letter) = mv.promotion.and_then(PieceKind::san_letter) {
        san.push('=');
        san.push(letter);
    }
    if mv.is_en_passant {
        san.push(' ');
        san.push_str(EN_PASSANT_SUFFIX);
    }

    san
}

/// Minimal origin hint: file if that separates the movers, else rank, else both.
fn disambiguation(mv: &ChessMove, before: &GameState, castling: CastlingRules) -> String {
    let rivals: Vec<Position> = before
        .board
        .pieces_of(mv.piece.color)
        .filter(|p| p.kind == mv.piece.kind && p.position != mv.from)
        .filter(|p| legal_moves(p, before, castling).contains(&mv.to))
        .map(|p| p.position)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|p| p.col() != mv.from.col()) {
        return mv.from.file_char().to_string();
    }
    if rivals.iter().all(|p| p.row() != mv.from.row()) {
        return mv.from.rank_char().to_string();
    }
    mv.from.to_string()
}

fn clean_notation(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(stripped) = cleaned.strip_suffix(EN_PASSANT_SUFFIX) {
        cleaned = stripped.trim_end();
    }
    cleaned.trim_end_matches(['+', '#', '!', '?'])
}

fn parse_castling(cleaned: &str, side_to_move: Color) -> Option<ParsedMove> {
    let to_col = match cleaned {
        "O-O" | "0-0" => 6,
        "O-O-O" | "0-0-0" => 2,
        _ => return None,
    };
    let row = match side_to_move {
        Color::White => 7,
        Color::Black => 0,
    };

    Some(ParsedMove {
        piece_kind: Some(PieceKind::King),
        to: Position::new_unchecked(row, to_col),
        from_col: Some(4),
        from_row: Some(row),
        is_capture: false,
        is_castling: true,
        promotion: None,
    })
}

fn parse_promotion_letter(letter: Option<&str>) -> Option<PieceKind> {
    letter
        .and_then(|s| s.chars().next())
        .and_then(PieceKind::from_letter)
        .filter(|kind| kind.is_promotion_target())
}

#[cfg(test)]
mod tests {
    use super::{parse_algebraic, ParsedMove};
    use crate::chess_errors::NotationError;
    use crate::game_state::chess_rules::CastlingRules;
    use crate::game_state::chess_types::{Color, PieceKind, Position};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::apply_move;

    fn sq(name: &str) -> Position {
        name.parse().expect("test square should parse")
    }

    fn san_after(fen: &str, from: &str, to: &str) -> String {
        let state = GameState::from_fen(fen).expect("test FEN should parse");
        let next = apply_move(&state, sq(from), sq(to), PieceKind::Queen, CastlingRules::Standard)
            .expect("move should apply");
        next.last_move()
            .map(|mv| mv.notation().to_owned())
            .expect("move should be recorded")
    }

    #[test]
    fn parses_piece_moves_and_captures() {
        let knight = parse_algebraic("Nf3", Color::White).expect("Nf3 parses");
        assert_eq!(knight.piece_kind, Some(PieceKind::Knight));
        assert_eq!(knight.to, sq("f3"));
        assert!(!knight.is_capture);

        let pawn = parse_algebraic("exd5", Color::White).expect("exd5 parses");
        assert_eq!(pawn.piece_kind, Some(PieceKind::Pawn));
        assert_eq!(pawn.from_col, Some(4));
        assert!(pawn.is_capture);

        let rook = parse_algebraic("R1a3+", Color::White).expect("R1a3+ parses");
        assert_eq!(rook.from_row, Some(7));
        assert_eq!(rook.from_col, None);
    }

    #[test]
    fn parses_promotion_castling_and_suffixes() {
        let promo = parse_algebraic("e8=N#", Color::White).expect("e8=N parses");
        assert_eq!(promo.promotion, Some(PieceKind::Knight));

        let short = parse_algebraic("O-O", Color::Black).expect("O-O parses");
        assert!(short.is_castling);
        assert_eq!(short.to, sq("g8"));

        let long = parse_algebraic("0-0-0", Color::White).expect("0-0-0 parses");
        assert_eq!(long.to, sq("c1"));

        let ep = parse_algebraic("exf6 e.p.", Color::White).expect("e.p. suffix is ignored");
        assert_eq!(ep.to, sq("f6"));
    }

    #[test]
    fn parses_coordinate_notation() {
        let parsed = parse_algebraic("e7e8q", Color::White).expect("coordinate parses");
        assert_eq!(
            parsed,
            ParsedMove {
                piece_kind: None,
                to: sq("e8"),
                from_col: Some(4),
                from_row: Some(1),
                is_capture: false,
                is_castling: false,
                promotion: Some(PieceKind::Queen),
            }
        );
        assert!(parse_algebraic("g1-f3", Color::White).is_ok());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_algebraic("   ", Color::White), Err(NotationError::Empty));
        assert!(matches!(
            parse_algebraic("Zz9", Color::White),
            Err(NotationError::Unrecognized(_))
        ));
        assert!(parse_algebraic("Ne8=Q", Color::White).is_err());
        assert!(parse_algebraic("e9", Color::White).is_err());
    }

    #[test]
    fn formats_basic_moves() {
        let start = crate::game_state::chess_rules::STARTING_POSITION_FEN;
        assert_eq!(san_after(start, "g1", "f3"), "Nf3");
        assert_eq!(san_after(start, "e2", "e4"), "e4");
        assert_eq!(
            san_after("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1", "e4", "d5"),
            "exd5"
        );
        assert_eq!(
            san_after("4k3/8/8/4Pp2/8/8/8/4K3 w - f6 0 3", "e5", "f6"),
            "exf6 e.p."
        );
        assert_eq!(san_after("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7", "a8"), "a8=Q");
        assert_eq!(san_after("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1", "g1"), "O-O");
        assert_eq!(san_after("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1", "c1"), "O-O-O");
    }

    #[test]
    fn disambiguates_by_file_then_rank_then_square() {
        assert_eq!(san_after("7k/8/8/8/8/8/8/1N1K1N2 w - - 0 1", "b1", "d2"), "Nbd2");
        assert_eq!(san_after("7k/8/8/R7/8/8/8/R3K3 w - - 0 1", "a1", "a3"), "R1a3");
        assert_eq!(san_after("8/7k/8/8/8/Q7/8/Q1Q1K3 w - - 0 1", "a1", "b2"), "Qa1b2");
    }
}
