use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;

/// A committed (or candidate) move. `piece` is a snapshot of the mover taken
/// before the move, so its `position` equals `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessMove {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castling: bool,
    pub promotion: Option<PieceKind>,
    pub san: Option<String>,
}

impl ChessMove {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// SAN as stamped by the engine, or an empty string for candidates.
    #[inline]
    pub fn notation(&self) -> &str {
        self.san.as_deref().unwrap_or_default()
    }
}
