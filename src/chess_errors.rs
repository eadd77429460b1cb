//! Errors used throughout the rules engine.
//!
//! Every failure is recoverable: a rejected operation leaves the engine's
//! current `GameState` untouched. The `Display` text of each variant is the
//! message surfaced to presentation and automation layers.

use thiserror::Error;

use crate::game_state::chess_types::{PieceKind, Position};

/// Rejections from the engine's move operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The source square is empty or holds a piece of the side not to move.
    #[error("No piece of current player at the source position {square}")]
    NoPieceOrWrongTurn { square: Position },

    /// The destination is not among the legal moves of the selected piece,
    /// which includes moves that would leave the mover's king in check.
    #[error("Invalid move for the selected piece: {from} to {to}")]
    IllegalDestination { from: Position, to: Position },

    #[error("Notation '{text}' could not be parsed")]
    UnparsableNotation { text: String },

    /// The notation parsed but no piece of the requested kind (and
    /// disambiguation) can legally reach the destination.
    #[error("No valid piece found to make the move '{text}'")]
    NoMatchingPiece { text: String },

    #[error("Pawns cannot promote to {kind:?}")]
    InvalidPromotion { kind: PieceKind },
}

/// SAN, coordinate and square parsing failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty notation")]
    Empty,

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("unrecognized move notation '{0}'")]
    Unrecognized(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),

    #[error("FEN has extra trailing fields")]
    TrailingFields,

    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not sum to 8 files")]
    RankWidth { rank: usize },

    #[error("invalid empty-square count '{0}'")]
    InvalidEmptyCount(char),

    #[error("invalid piece character '{0}' in board layout")]
    InvalidPiece(char),

    #[error("invalid side-to-move field '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling rights character '{0}'")]
    InvalidCastling(char),

    #[error("invalid en-passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid {field} '{value}'")]
    InvalidCounter { field: &'static str, value: String },

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: &'static str, count: usize },

    /// The side that just moved would have left its own king attacked.
    #[error("the {color} king is in check but it is not {color}'s turn")]
    OpponentInCheck { color: &'static str },
}

/// Failure while replaying a notation sequence; `ply` is 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid move at position {ply}: {text}")]
pub struct ReplayError {
    pub ply: usize,
    pub text: String,
    #[source]
    pub source: EngineError,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    #[error("invalid PGN header line: {0}")]
    InvalidHeader(String),

    #[error("PGN SetUp=1 is present but FEN header is missing")]
    MissingSetupFen,

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown engine option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for engine option '{name}'")]
    InvalidValue { name: String, value: String },
}
