//! Dispatch from piece kind to its pseudo-legal generator.
//!
//! Pseudo-legal destinations obey each piece's movement pattern and board
//! occupancy but ignore whether the mover's own king ends up attacked.
//! Callers must not rely on the order of the returned squares.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, PieceKind, Position};
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::king_moves::{king_moves, king_steps};
use crate::moves::knight_moves::knight_moves;
use crate::moves::pawn_moves::{pawn_attacks, pawn_moves};
use crate::moves::queen_moves::queen_moves;
use crate::moves::rook_moves::rook_moves;

pub fn pseudo_legal_moves(
    piece: &Piece,
    board: &Board,
    en_passant: Option<Position>,
) -> Vec<Position> {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(piece, board, en_passant),
        PieceKind::Knight => knight_moves(piece, board),
        PieceKind::Bishop => bishop_moves(piece, board),
        PieceKind::Rook => rook_moves(piece, board),
        PieceKind::Queen => queen_moves(piece, board),
        PieceKind::King => king_moves(piece, board),
    }
}

/// Squares `piece` attacks. Differs from [`pseudo_legal_moves`] only for
/// pawns (diagonals whether or not occupied, never pushes) and kings (no
/// castling hops).
pub fn attacked_squares(piece: &Piece, board: &Board) -> Vec<Position> {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece).collect(),
        PieceKind::King => king_steps(piece, board),
        _ => pseudo_legal_moves(piece, board, None),
    }
}
