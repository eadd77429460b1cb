//! Pawn pushes, captures and en-passant destinations.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Position};

/// Row delta of a single pawn step (white moves toward row 0).
#[inline]
pub const fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// The farthest row for `color`, where pawns promote.
#[inline]
pub const fn promotion_row(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

pub fn pawn_moves(piece: &Piece, board: &Board, en_passant: Option<Position>) -> Vec<Position> {
    let mut out = Vec::with_capacity(4);
    let direction = pawn_direction(piece.color);

    if let Some(one_step) = piece.position.offset(direction, 0) {
        if board.is_empty(one_step) {
            out.push(one_step);

            if piece.position.row() == pawn_start_row(piece.color) {
                if let Some(two_step) = one_step.offset(direction, 0) {
                    if board.is_empty(two_step) {
                        out.push(two_step);
                    }
                }
            }
        }
    }

    for target in pawn_attacks(piece) {
        if board.is_enemy(target, piece.color)
            || (en_passant == Some(target) && en_passant_victim(piece, board, target).is_some())
        {
            out.push(target);
        }
    }

    out
}

/// Square of the pawn an en-passant capture onto `target` removes: one rank
/// behind `target` from the mover's side, holding an enemy pawn, with
/// `target` itself empty.
pub fn en_passant_victim(piece: &Piece, board: &Board, target: Position) -> Option<Position> {
    if piece.kind != PieceKind::Pawn || !board.is_empty(target) {
        return None;
    }
    let victim = target.offset(-pawn_direction(piece.color), 0)?;
    board
        .piece_at(victim)
        .filter(|p| p.kind == PieceKind::Pawn && p.color != piece.color)
        .map(|_| victim)
}

/// The two diagonal squares a pawn attacks, regardless of occupancy.
pub fn pawn_attacks(piece: &Piece) -> impl Iterator<Item = Position> {
    let direction = pawn_direction(piece.color);
    let from = piece.position;
    [-1i8, 1i8]
        .into_iter()
        .filter_map(move |d_col| from.offset(direction, d_col))
}

#[cfg(test)]
mod tests {
    use super::pawn_moves;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Position};

    fn sq(name: &str) -> Position {
        name.parse().expect("test square should parse")
    }

    fn sorted(mut squares: Vec<Position>) -> Vec<String> {
        squares.sort();
        squares.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn pawn_on_start_rank_can_push_one_or_two() {
        let mut board = Board::empty();
        let pawn = Piece::new(PieceKind::Pawn, Color::White, sq("e2"));
        board.place(pawn);
        assert_eq!(sorted(pawn_moves(&pawn, &board, None)), vec!["e4", "e3"]);

        let black = Piece::new(PieceKind::Pawn, Color::Black, sq("d7"));
        board.place(black);
        assert_eq!(sorted(pawn_moves(&black, &board, None)), vec!["d6", "d5"]);
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let mut board = Board::empty();
        let pawn = Piece::new(PieceKind::Pawn, Color::White, sq("e2"));
        board.place(pawn);
        board.place(Piece::new(PieceKind::Knight, Color::Black, sq("e3")));
        assert!(pawn_moves(&pawn, &board, None).is_empty());

        board.remove(sq("e3"));
        board.place(Piece::new(PieceKind::Knight, Color::Black, sq("e4")));
        assert_eq!(sorted(pawn_moves(&pawn, &board, None)), vec!["e3"]);
    }

    #[test]
    fn diagonal_only_onto_enemy_or_en_passant_square() {
        let mut board = Board::empty();
        let pawn = Piece::new(PieceKind::Pawn, Color::White, sq("e5"));
        board.place(pawn);
        board.place(Piece::new(PieceKind::Pawn, Color::Black, sq("f5")));
        board.place(Piece::new(PieceKind::Pawn, Color::White, sq("d6")));
        assert_eq!(sorted(pawn_moves(&pawn, &board, None)), vec!["e6"]);

        let with_ep = pawn_moves(&pawn, &board, Some(sq("f6")));
        assert_eq!(sorted(with_ep), vec!["e6", "f6"]);
    }

    #[test]
    fn en_passant_needs_an_enemy_pawn_behind_the_target() {
        let mut board = Board::empty();
        let pawn = Piece::new(PieceKind::Pawn, Color::White, sq("d2"));
        board.place(pawn);
        board.place(Piece::new(PieceKind::Pawn, Color::White, sq("e2")));
        assert_eq!(sorted(pawn_moves(&pawn, &board, Some(sq("e3")))), vec!["d4", "d3"]);

        let attacker = Piece::new(PieceKind::Pawn, Color::White, sq("e5"));
        board.place(attacker);
        board.place(Piece::new(PieceKind::Knight, Color::Black, sq("d5")));
        assert_eq!(sorted(pawn_moves(&attacker, &board, Some(sq("d6")))), vec!["e6"]);
    }
}
