//! FEN-to-GameState parser.
//!
//! Builds a complete `GameState` from a six-field Forsyth-Edwards Notation
//! string. Castling rights become `has_moved` flags on the king and corner
//! rooks, and the check/checkmate/stalemate flags are recomputed for the side
//! to move.

use crate::chess_errors::FenError;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::CastlingRules;
use crate::game_state::history::History;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_filter::has_no_legal_moves;
use crate::moves::pawn_moves::pawn_start_row;
use crate::utils::algebraic::algebraic_to_position;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CastlingRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl CastlingRights {
    fn any(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside || self.white_queenside,
            Color::Black => self.black_kingside || self.black_queenside,
        }
    }

    fn covers_rook(self, color: Color, col: u8) -> bool {
        match (color, col) {
            (Color::White, 7) => self.white_kingside,
            (Color::White, 0) => self.white_queenside,
            (Color::Black, 7) => self.black_kingside,
            (Color::Black, 0) => self.black_queenside,
            _ => false,
        }
    }
}

#[inline]
pub fn parse_fen(fen: &str) -> Result<GameState, FenError> {
    parse_fen_with_rules(fen, CastlingRules::default())
}

/// As [`parse_fen`], computing mate and stalemate under `castling`.
pub fn parse_fen_with_rules(fen: &str, castling: CastlingRules) -> Result<GameState, FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side-to-move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    let halfmove_part = parts.next().ok_or(FenError::MissingField("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or(FenError::MissingField("fullmove number"))?;

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let rights = parse_castling_rights(castling_part)?;
    let mut board = parse_board(board_part)?;
    check_king_count(&board)?;
    apply_moved_flags(&mut board, rights);

    let current_turn = parse_side_to_move(side_part)?;
    let waiting = current_turn.opposite();
    if is_king_in_check(&board, waiting) {
        return Err(FenError::OpponentInCheck {
            color: color_name(waiting),
        });
    }
    let en_passant_target = parse_en_passant_square(en_passant_part, current_turn)?;
    let halfmove_clock = parse_counter("halfmove clock", halfmove_part)?;
    let fullmove_number = parse_counter("fullmove number", fullmove_part)?;

    let is_check = is_king_in_check(&board, current_turn);
    let no_moves = has_no_legal_moves(&board, current_turn, en_passant_target, castling);

    Ok(GameState {
        board,
        current_turn,
        move_history: History::new(),
        captured_pieces: History::new(),
        is_check,
        is_checkmate: is_check && no_moves,
        is_stalemate: !is_check && no_moves,
        en_passant_target,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_board(board_part: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    for (row, rank_str) in (0u8..).zip(&ranks) {
        let mut col = 0u8;
        let fen_rank = 8 - usize::from(row);

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::InvalidEmptyCount(ch));
                }
                col += empty_count as u8;
                if col > 8 {
                    return Err(FenError::RankWidth { rank: fen_rank });
                }
                continue;
            }

            let position =
                Position::new(row, col).ok_or(FenError::RankWidth { rank: fen_rank })?;
            let piece = Piece::from_fen_char(ch, position).ok_or(FenError::InvalidPiece(ch))?;
            board.place(piece);
            col += 1;
        }

        if col != 8 {
            return Err(FenError::RankWidth { rank: fen_rank });
        }
    }

    Ok(board)
}

fn check_king_count(board: &Board) -> Result<(), FenError> {
    for color in [Color::White, Color::Black] {
        let count = board.count(color, PieceKind::King);
        if count != 1 {
            return Err(FenError::KingCount {
                color: color_name(color),
                count,
            });
        }
    }
    Ok(())
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

/// FEN does not record history, so "has moved" is inferred: pawns off their
/// start rank, kings without any right, and corner rooks without the matching
/// right are treated as moved.
fn apply_moved_flags(board: &mut Board, rights: CastlingRights) {
    let pieces: Vec<Piece> = board.pieces().collect();
    for mut piece in pieces {
        let row = piece.position.row();
        let col = piece.position.col();
        let home_row = match piece.color {
            Color::White => 7,
            Color::Black => 0,
        };

        piece.has_moved = match piece.kind {
            PieceKind::Pawn => row != pawn_start_row(piece.color),
            PieceKind::King => !(row == home_row && col == 4 && rights.any(piece.color)),
            PieceKind::Rook => !(row == home_row && rights.covers_rook(piece.color, col)),
            _ => false,
        };
        board.place(piece);
    }
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::default();
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => return Err(FenError::InvalidCastling(ch)),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(
    en_passant_part: &str,
    side_to_move: Color,
) -> Result<Option<Position>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_position(en_passant_part)
        .map_err(|_| FenError::InvalidEnPassant(en_passant_part.to_owned()))?;
    // The skipped square lies behind the opponent's double push: rank 6 when
    // White is to move, rank 3 when Black is.
    let expected_row = match side_to_move {
        Color::White => 2,
        Color::Black => 5,
    };
    if square.row() != expected_row {
        return Err(FenError::InvalidEnPassant(en_passant_part.to_owned()));
    }
    Ok(Some(square))
}

fn parse_counter(field: &'static str, value: &str) -> Result<u32, FenError> {
    value.parse::<u32>().map_err(|_| FenError::InvalidCounter {
        field,
        value: value.to_owned(),
    })
}
