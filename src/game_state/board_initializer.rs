//! Standard starting arrangement.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::history::History;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub fn initial_board() -> Board {
    let mut board = Board::empty();

    place_back_rank(&mut board, 0, Color::Black);
    place_pawns(&mut board, 1, Color::Black);
    place_pawns(&mut board, 6, Color::White);
    place_back_rank(&mut board, 7, Color::White);

    board
}

pub fn initial_game_state() -> GameState {
    GameState {
        board: initial_board(),
        current_turn: Color::White,
        move_history: History::new(),
        captured_pieces: History::new(),
        is_check: false,
        is_checkmate: false,
        is_stalemate: false,
        en_passant_target: None,
        halfmove_clock: 0,
        fullmove_number: 1,
    }
}

fn place_back_rank(board: &mut Board, row: u8, color: Color) {
    for (col, kind) in (0u8..).zip(BACK_RANK) {
        board.place(Piece::new(kind, color, Position::new_unchecked(row, col)));
    }
}

fn place_pawns(board: &mut Board, row: u8, color: Color) {
    for col in 0..8 {
        board.place(Piece::new(
            PieceKind::Pawn,
            color,
            Position::new_unchecked(row, col),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::{initial_board, initial_game_state};
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, GameStatus, PieceKind};
    use crate::utils::fen_generator::generate_fen;

    #[test]
    fn initial_state_matches_starting_fen() {
        let state = initial_game_state();
        assert_eq!(generate_fen(&state), STARTING_POSITION_FEN);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert!(state.move_history.is_empty());
        assert!(state.captured_pieces.is_empty());
    }

    #[test]
    fn each_side_has_sixteen_unmoved_pieces_and_one_king() {
        let board = initial_board();
        for color in [Color::White, Color::Black] {
            assert_eq!(board.pieces_of(color).count(), 16);
            assert_eq!(board.count(color, PieceKind::King), 1);
            assert_eq!(board.count(color, PieceKind::Pawn), 8);
            assert!(board.pieces_of(color).all(|p| !p.has_moved));
        }
        assert!(board
            .pieces()
            .all(|p| board.piece_at(p.position) == Some(p)));
    }
}
