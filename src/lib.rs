//! Crate root module declarations for the chess arbiter rules engine.
//!
//! This file exposes all top-level subsystems (game state model, per-piece
//! move generators, legality filtering, notation codecs and the game engine
//! orchestrator) so binaries, benches and embedding applications can import
//! stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod board_initializer;
    pub mod chess_move;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod history;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod piece_moves;
    pub mod queen_moves;
    pub mod rook_moves;
    mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_filter;
    pub mod perft;
}

pub mod engine {
    pub mod engine_config;
    #[cfg(test)]
    mod engine_properties;
    pub mod game_engine;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
}

pub use chess_errors::{ConfigError, EngineError, FenError, NotationError, PgnError, ReplayError};
pub use engine::engine_config::EngineConfig;
pub use engine::game_engine::GameEngine;
pub use game_state::chess_rules::CastlingRules;
pub use game_state::chess_types::{Color, GameStatus, Piece, PieceKind, Position};
pub use game_state::game_state::GameState;
