//! Full match snapshot.
//!
//! `GameState` is an immutable value from the engine's point of view: every
//! committed move builds a complete successor and the old value is dropped
//! (or kept by whoever still holds a snapshot). Move and capture lists are
//! persistent, so successors share their history with predecessors.

use serde::{Deserialize, Serialize};

use crate::chess_errors::FenError;
use crate::game_state::board::Board;
use crate::game_state::board_initializer::initial_game_state;
use crate::game_state::chess_move::ChessMove;
use crate::game_state::chess_types::*;
use crate::game_state::history::History;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_turn: Color,
    pub move_history: History<ChessMove>,
    pub captured_pieces: History<Piece>,

    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,

    pub en_passant_target: Option<Position>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        initial_game_state()
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    pub fn status(&self) -> GameStatus {
        if self.is_checkmate {
            GameStatus::Checkmate
        } else if self.is_stalemate {
            GameStatus::Stalemate
        } else if self.is_check {
            GameStatus::Check
        } else {
            GameStatus::InProgress
        }
    }

    #[inline]
    pub fn last_move(&self) -> Option<&ChessMove> {
        self.move_history.last()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}
