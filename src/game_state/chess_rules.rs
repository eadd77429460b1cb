//! Canonical chess-rule constants and rule variants.
//!
//! This module stores static rule-related literals such as the standard
//! starting position FEN, along with the castling rule variant selected when
//! an engine is configured.

use serde::{Deserialize, Serialize};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// How a king's two-square castling hop is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastlingRules {
    /// Full castling: the rook jumps over the king, and the king may not castle
    /// out of, through, or into check.
    #[default]
    Standard,
    /// Only the king is displaced. The rook stays on its corner and the
    /// transit square is not tested for attacks.
    KingOnly,
}

impl CastlingRules {
    #[inline]
    pub const fn moves_rook(self) -> bool {
        matches!(self, CastlingRules::Standard)
    }

    #[inline]
    pub const fn checks_transit(self) -> bool {
        matches!(self, CastlingRules::Standard)
    }
}
