//! Perft: exhaustive legal move-tree counting used to validate generation.

use crate::chess_errors::EngineError;
use crate::game_state::chess_rules::CastlingRules;
use crate::game_state::chess_types::{Piece, PieceKind, Position, PROMOTION_KINDS};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::attackers_to_square;
use crate::move_generation::legal_move_filter::all_legal_moves;
use crate::moves::pawn_moves::promotion_row;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub double_checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.double_checks += rhs.double_checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, leaf: &GameState) {
        self.nodes += 1;
        let Some(mv) = leaf.last_move() else {
            return;
        };

        self.captures += u64::from(mv.is_capture());
        self.en_passant += u64::from(mv.is_en_passant);
        self.castles += u64::from(mv.is_castling);
        self.promotions += u64::from(mv.promotion.is_some());
        self.checks += u64::from(leaf.is_check);
        self.checkmates += u64::from(leaf.is_checkmate);

        if leaf.is_check {
            let defender = leaf.current_turn;
            let checkers = leaf
                .board
                .king_position(defender)
                .map(|king| attackers_to_square(&leaf.board, king, defender.opposite()).len())
                .unwrap_or_default();
            self.double_checks += u64::from(checkers > 1);
        }
    }
}

/// Counts leaf positions `depth` plies below `state`. Promotions expand into
/// one child per promotion kind.
pub fn perft(
    state: &GameState,
    depth: u8,
    castling: CastlingRules,
) -> Result<PerftCounts, EngineError> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    let moves = all_legal_moves(
        &state.board,
        state.current_turn,
        state.en_passant_target,
        castling,
    );

    for (piece, to) in moves {
        for &promotion in promotion_choices(&piece, to) {
            let child = apply_move(state, piece.position, to, promotion, castling)?;
            if depth == 1 {
                total.record_leaf(&child);
            } else {
                total.merge(perft(&child, depth - 1, castling)?);
            }
        }
    }

    Ok(total)
}

/// Node count per root move, in generation order.
pub fn perft_divide(
    state: &GameState,
    depth: u8,
    castling: CastlingRules,
) -> Result<Vec<(String, u64)>, EngineError> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }

    let moves = all_legal_moves(
        &state.board,
        state.current_turn,
        state.en_passant_target,
        castling,
    );
    for (piece, to) in moves {
        for &promotion in promotion_choices(&piece, to) {
            let child = apply_move(state, piece.position, to, promotion, castling)?;
            let label = child
                .last_move()
                .map(|mv| mv.notation().to_owned())
                .unwrap_or_default();
            out.push((label, perft(&child, depth - 1, castling)?.nodes));
        }
    }

    Ok(out)
}

fn promotion_choices(piece: &Piece, to: Position) -> &'static [PieceKind] {
    if piece.kind == PieceKind::Pawn && to.row() == promotion_row(piece.color) {
        &PROMOTION_KINDS
    } else {
        &[PieceKind::Queen]
    }
}
