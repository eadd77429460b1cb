//! GameState-to-FEN encoder.
//!
//! Castling availability is not stored separately; it is read back from the
//! `has_moved` flags of the kings and corner rooks.

use crate::game_state::board::Board;
use crate::game_state::{chess_types::*, game_state::GameState};

/// King home square, rook corner and FEN letter for each castling right, in
/// FEN order.
const CASTLING_RIGHTS: [(Color, (u8, u8), (u8, u8), char); 4] = [
    (Color::White, (7, 4), (7, 7), 'K'),
    (Color::White, (7, 4), (7, 0), 'Q'),
    (Color::Black, (0, 4), (0, 7), 'k'),
    (Color::Black, (0, 4), (0, 0), 'q'),
];

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(&game_state.board);
    let side_to_move = match game_state.current_turn {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(&game_state.board);
    let en_passant = game_state
        .en_passant_target
        .map_or_else(|| "-".to_owned(), |square| square.to_string());

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

pub fn generate_board_field(board: &Board) -> String {
    let mut out = String::with_capacity(64);

    for row in 0..8u8 {
        let mut empty_count = 0u8;

        for col in 0..8u8 {
            match board.piece_at(Position::new_unchecked(row, col)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row < 7 {
            out.push('/');
        }
    }

    out
}

pub fn generate_castling_field(board: &Board) -> String {
    let out: String = CASTLING_RIGHTS
        .iter()
        .filter(|(color, king_sq, rook_sq, _)| {
            is_unmoved(board, *color, PieceKind::King, *king_sq)
                && is_unmoved(board, *color, PieceKind::Rook, *rook_sq)
        })
        .map(|(_, _, _, letter)| *letter)
        .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

fn is_unmoved(board: &Board, color: Color, kind: PieceKind, (row, col): (u8, u8)) -> bool {
    matches!(
        board.piece_at(Position::new_unchecked(row, col)),
        Some(piece) if piece.color == color && piece.kind == kind && !piece.has_moved
    )
}
