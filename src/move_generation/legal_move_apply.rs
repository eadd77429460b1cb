//! Move application.
//!
//! `apply_to_board` performs the raw piece displacement (captures, en
//! passant, castling rook, promotion) and is shared by the legality filter and
//! the commit path. `apply_move` builds the complete successor `GameState`.

use crate::chess_errors::EngineError;
use crate::game_state::board::Board;
use crate::game_state::chess_move::ChessMove;
use crate::game_state::chess_rules::CastlingRules;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_filter::has_no_legal_moves;
use crate::moves::king_moves::is_castling_hop;
use crate::moves::pawn_moves::{en_passant_victim, promotion_row};
use crate::utils::san::move_to_san;

/// Board after a move plus what the move turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub board: Board,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castling: bool,
    pub promotion: Option<PieceKind>,
}

/// Moves the piece on `from` to `to` without any legality checking. Returns
/// `None` when `from` is empty.
pub fn apply_to_board(
    board: &Board,
    from: Position,
    to: Position,
    en_passant: Option<Position>,
    castling: CastlingRules,
    promotion: PieceKind,
) -> Option<AppliedMove> {
    let piece = board.piece_at(from)?;
    let mut next = *board;
    let mut captured = next.piece_at(to);

    let victim = (en_passant == Some(to) && from.col() != to.col())
        .then(|| en_passant_victim(&piece, board, to))
        .flatten();
    let is_en_passant = victim.is_some();
    if let Some(victim) = victim {
        captured = next.remove(victim);
    }

    next.relocate(from, to);

    let is_castling = is_castling_hop(piece.kind, from, to);
    if is_castling && castling.moves_rook() {
        let (rook_from, rook_to) = castling_rook_squares(from, to);
        next.relocate(rook_from, rook_to);
    }

    let promotion = (piece.kind == PieceKind::Pawn && to.row() == promotion_row(piece.color))
        .then_some(promotion);
    if let Some(kind) = promotion {
        if let Some(mut promoted) = next.piece_at(to) {
            promoted.kind = kind;
            next.place(promoted);
        }
    }

    Some(AppliedMove {
        board: next,
        piece,
        captured,
        is_en_passant,
        is_castling,
        promotion,
    })
}

/// Rook origin and destination for a king hop from `king_from` to `king_to`.
pub fn castling_rook_squares(king_from: Position, king_to: Position) -> (Position, Position) {
    let row = king_from.row();
    let rook_col = if king_to.col() > king_from.col() { 7 } else { 0 };
    let landing_col = (king_from.col() + king_to.col()) / 2;
    (
        Position::new_unchecked(row, rook_col),
        Position::new_unchecked(row, landing_col),
    )
}

/// Commits an already-validated move and returns the successor state, with
/// the SAN-stamped move appended to history and every derived flag
/// recomputed for the new side to move.
#[inline]
pub fn apply_move(
    state: &GameState,
    from: Position,
    to: Position,
    promotion: PieceKind,
    castling: CastlingRules,
) -> Result<GameState, EngineError> {
    apply_move_with_record(state, from, to, promotion, castling).map(|(next, _)| next)
}

/// As [`apply_move`], also returning the committed move record.
pub fn apply_move_with_record(
    state: &GameState,
    from: Position,
    to: Position,
    promotion: PieceKind,
    castling: CastlingRules,
) -> Result<(GameState, ChessMove), EngineError> {
    let applied = apply_to_board(
        &state.board,
        from,
        to,
        state.en_passant_target,
        castling,
        promotion,
    )
    .ok_or(EngineError::NoPieceOrWrongTurn { square: from })?;
    let piece = applied.piece;

    let en_passant_target = (piece.kind == PieceKind::Pawn
        && from.row().abs_diff(to.row()) == 2)
        .then(|| Position::new_unchecked((from.row() + to.row()) / 2, from.col()));

    let mut record = ChessMove {
        from,
        to,
        piece,
        captured: applied.captured,
        is_en_passant: applied.is_en_passant,
        is_castling: applied.is_castling,
        promotion: applied.promotion,
        san: None,
    };
    record.san = Some(move_to_san(&record, state, castling));

    let next_turn = state.current_turn.opposite();
    let is_check = is_king_in_check(&applied.board, next_turn);
    let no_moves = has_no_legal_moves(&applied.board, next_turn, en_passant_target, castling);

    let captured_pieces = match record.captured {
        Some(victim) => state.captured_pieces.push(victim),
        None => state.captured_pieces.clone(),
    };
    let halfmove_clock = if piece.kind == PieceKind::Pawn || record.captured.is_some() {
        0
    } else {
        state.halfmove_clock.saturating_add(1)
    };
    let fullmove_number = if state.current_turn == Color::Black {
        state.fullmove_number.saturating_add(1)
    } else {
        state.fullmove_number
    };

    let next = GameState {
        board: applied.board,
        current_turn: next_turn,
        move_history: state.move_history.push(record.clone()),
        captured_pieces,
        is_check,
        is_checkmate: is_check && no_moves,
        is_stalemate: !is_check && no_moves,
        en_passant_target,
        halfmove_clock,
        fullmove_number,
    };
    Ok((next, record))
}
