use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Position};
use crate::moves::sliding_moves::trace_rays;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[inline]
pub fn rook_moves(piece: &Piece, board: &Board) -> Vec<Position> {
    trace_rays(piece, board, &ROOK_DIRECTIONS)
}

#[cfg(test)]
mod tests {
    use super::rook_moves;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Position};

    fn sq(name: &str) -> Position {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn rook_on_empty_board_reaches_fourteen_squares() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::White, sq("d4"));
        board.place(rook);
        assert_eq!(rook_moves(&rook, &board).len(), 14);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::White, sq("a1"));
        board.place(rook);
        board.place(Piece::new(PieceKind::Pawn, Color::Black, sq("a4")));
        board.place(Piece::new(PieceKind::Pawn, Color::White, sq("c1")));

        let moves = rook_moves(&rook, &board);

        assert!(moves.contains(&sq("a4")));
        assert!(!moves.contains(&sq("a5")));
        assert!(moves.contains(&sq("b1")));
        assert!(!moves.contains(&sq("c1")));
        assert_eq!(moves.len(), 4);
    }
}
