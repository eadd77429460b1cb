//! King steps and castling hops.
//!
//! Castling here is purely positional: the king and the matching rook must
//! both be unmoved and every square strictly between them empty. Whether the
//! king passes through an attacked square is the legality filter's concern.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, PieceKind, Position};
use crate::moves::sliding_moves::step_targets;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Rook columns for the kingside and queenside castles.
const CASTLING_ROOK_COLS: [u8; 2] = [7, 0];

pub fn king_moves(piece: &Piece, board: &Board) -> Vec<Position> {
    let mut out = king_steps(piece, board);
    out.extend(castling_destinations(piece, board));
    out
}

#[inline]
pub fn king_steps(piece: &Piece, board: &Board) -> Vec<Position> {
    step_targets(piece, board, &KING_OFFSETS)
}

pub fn castling_destinations(king: &Piece, board: &Board) -> Vec<Position> {
    let mut out = Vec::new();
    if king.has_moved {
        return out;
    }

    let row = king.position.row();
    let king_col = king.position.col();

    for rook_col in CASTLING_ROOK_COLS {
        let rook_square = Position::new_unchecked(row, rook_col);
        let Some(rook) = board.piece_at(rook_square) else {
            continue;
        };
        if rook.kind != PieceKind::Rook || rook.color != king.color || rook.has_moved {
            continue;
        }

        let (low, high) = if rook_col > king_col {
            (king_col + 1, rook_col)
        } else {
            (rook_col + 1, king_col)
        };
        let path_clear = (low..high).all(|col| board.is_empty(Position::new_unchecked(row, col)));
        if !path_clear {
            continue;
        }

        let step = if rook_col > king_col { 2 } else { -2 };
        if let Some(destination) = king.position.offset(0, step) {
            out.push(destination);
        }
    }

    out
}

/// True when a king move from `from` to `to` is a castling hop.
#[inline]
pub fn is_castling_hop(kind: PieceKind, from: Position, to: Position) -> bool {
    kind == PieceKind::King && from.row() == to.row() && from.col().abs_diff(to.col()) == 2
}
