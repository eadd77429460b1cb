use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Position};
use crate::moves::sliding_moves::trace_rays;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[inline]
pub fn bishop_moves(piece: &Piece, board: &Board) -> Vec<Position> {
    trace_rays(piece, board, &BISHOP_DIRECTIONS)
}
