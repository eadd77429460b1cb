//! Shared ray and step walkers for the piece generators.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Position};

/// Walks each `(d_row, d_col)` ray from `piece` until the board edge or the
/// first occupied square, which is included only when it holds an enemy.
pub(crate) fn trace_rays(piece: &Piece, board: &Board, directions: &[(i8, i8)]) -> Vec<Position> {
    let mut out = Vec::with_capacity(14);

    for &(d_row, d_col) in directions {
        let mut cursor = piece.position.offset(d_row, d_col);
        while let Some(target) = cursor {
            match board.piece_at(target) {
                None => out.push(target),
                Some(blocker) => {
                    if blocker.color != piece.color {
                        out.push(target);
                    }
                    break;
                }
            }
            cursor = target.offset(d_row, d_col);
        }
    }

    out
}

/// Single hops by each offset, keeping in-bounds squares without a friendly piece.
pub(crate) fn step_targets(piece: &Piece, board: &Board, offsets: &[(i8, i8)]) -> Vec<Position> {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| piece.position.offset(d_row, d_col))
        .filter(|&target| !matches!(board.piece_at(target), Some(p) if p.color == piece.color))
        .collect()
}
