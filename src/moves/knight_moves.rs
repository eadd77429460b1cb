use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Position};
use crate::moves::sliding_moves::step_targets;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[inline]
pub fn knight_moves(piece: &Piece, board: &Board) -> Vec<Position> {
    step_targets(piece, board, &KNIGHT_OFFSETS)
}
