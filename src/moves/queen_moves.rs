use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Position};
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::rook_moves::rook_moves;

/// Queen = rook rays followed by bishop rays.
#[inline]
pub fn queen_moves(piece: &Piece, board: &Board) -> Vec<Position> {
    let mut out = rook_moves(piece, board);
    out.extend(bishop_moves(piece, board));
    out
}
