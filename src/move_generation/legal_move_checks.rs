//! Attack and check detection.
//!
//! Built on the same per-piece generators as move generation; en passant
//! never matters here because it cannot capture a king or guard a square.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, Position};
use crate::moves::piece_moves::attacked_squares;

/// True when any `color.opposite()` piece attacks `color`'s king. A board
/// without that king is never in check.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = board.king_position(color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

pub fn is_square_attacked(board: &Board, square: Position, attacker_color: Color) -> bool {
    board
        .pieces_of(attacker_color)
        .any(|piece| attacked_squares(&piece, board).contains(&square))
}

pub fn attackers_to_square(board: &Board, square: Position, attacker_color: Color) -> Vec<Piece> {
    board
        .pieces_of(attacker_color)
        .filter(|piece| attacked_squares(piece, board).contains(&square))
        .collect()
}
