//! Pseudo-legal to legal filtering.
//!
//! Each candidate destination is played on a scratch copy of the board
//! (including the en-passant victim and any castling rook) and kept only if
//! the mover's king is not attacked afterwards.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::CastlingRules;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_to_board;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::moves::king_moves::is_castling_hop;
use crate::moves::piece_moves::pseudo_legal_moves;

/// Legal destinations of `piece` in `state`. `piece` must be the piece the
/// board holds at `piece.position`.
#[inline]
pub fn legal_moves(piece: &Piece, state: &GameState, castling: CastlingRules) -> Vec<Position> {
    legal_moves_on_board(piece, &state.board, state.en_passant_target, castling)
}

pub fn legal_moves_on_board(
    piece: &Piece,
    board: &Board,
    en_passant: Option<Position>,
    castling: CastlingRules,
) -> Vec<Position> {
    pseudo_legal_moves(piece, board, en_passant)
        .into_iter()
        .filter(|&to| is_legal_destination(piece, board, to, en_passant, castling))
        .collect()
}

/// Whether moving `piece` to the pseudo-legal square `to` keeps its king safe.
pub fn is_legal_destination(
    piece: &Piece,
    board: &Board,
    to: Position,
    en_passant: Option<Position>,
    castling: CastlingRules,
) -> bool {
    let from = piece.position;
    if castling.checks_transit() && is_castling_hop(piece.kind, from, to) {
        let enemy = piece.color.opposite();
        let transit = Position::new_unchecked(from.row(), (from.col() + to.col()) / 2);
        if is_square_attacked(board, from, enemy) || is_square_attacked(board, transit, enemy) {
            return false;
        }
    }

    // Promotion kind never changes whether the king is exposed.
    apply_to_board(board, from, to, en_passant, castling, PieceKind::Queen)
        .is_some_and(|applied| !is_king_in_check(&applied.board, piece.color))
}

/// Every legal `(piece, destination)` pair for `color`, pieces in board scan
/// order.
pub fn all_legal_moves(
    board: &Board,
    color: Color,
    en_passant: Option<Position>,
    castling: CastlingRules,
) -> Vec<(Piece, Position)> {
    board
        .pieces_of(color)
        .flat_map(|piece| {
            legal_moves_on_board(&piece, board, en_passant, castling)
                .into_iter()
                .map(move |to| (piece, to))
        })
        .collect()
}

/// True when `color` has no legal move at all. Stops at the first one found.
pub fn has_no_legal_moves(
    board: &Board,
    color: Color,
    en_passant: Option<Position>,
    castling: CastlingRules,
) -> bool {
    !board.pieces_of(color).any(|piece| {
        pseudo_legal_moves(&piece, board, en_passant)
            .into_iter()
            .any(|to| is_legal_destination(&piece, board, to, en_passant, castling))
    })
}
