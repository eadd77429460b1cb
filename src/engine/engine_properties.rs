//! Randomised whole-engine properties over fixed-seed playouts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chess_errors::EngineError;
use crate::engine::engine_config::EngineConfig;
use crate::engine::game_engine::GameEngine;
use crate::game_state::chess_rules::CastlingRules;
use crate::game_state::chess_types::{Color, GameStatus, PieceKind, Position, PROMOTION_KINDS};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::pawn_moves::promotion_row;

const PLAYOUTS: u64 = 12;
const MAX_PLIES: usize = 120;

fn all_moves(engine: &GameEngine) -> Vec<(Position, Position)> {
    engine
        .board()
        .pieces_of(engine.current_turn())
        .flat_map(|piece| {
            engine
                .get_valid_moves(piece.position)
                .into_iter()
                .map(move |to| (piece.position, to))
        })
        .collect()
}

fn promotion_for(engine: &GameEngine, from: Position, to: Position, rng: &mut StdRng) -> Option<PieceKind> {
    let piece = engine.board().piece_at(from)?;
    (piece.kind == PieceKind::Pawn && to.row() == promotion_row(piece.color))
        .then(|| PROMOTION_KINDS[rng.random_range(0..PROMOTION_KINDS.len())])
}

/// Plays one random game, checking per-ply invariants, and returns the final
/// engine.
fn random_playout(seed: u64, config: EngineConfig) -> GameEngine {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = GameEngine::with_config(config);

    for _ in 0..MAX_PLIES {
        let moves = all_moves(&engine);
        if moves.is_empty() {
            assert!(
                matches!(engine.status(), GameStatus::Checkmate | GameStatus::Stalemate),
                "no legal moves but status is {:?}",
                engine.status()
            );
            break;
        }
        assert!(!engine.status().is_terminal());

        let (from, to) = moves[rng.random_range(0..moves.len())];
        let promotion = promotion_for(&engine, from, to, &mut rng);
        let mover = engine.current_turn();
        let before = engine.clone();

        let committed = engine
            .make_move_with_promotion(from, to, promotion)
            .expect("every listed move must be accepted");

        // Check safety and turn alternation.
        assert!(!is_king_in_check(engine.board(), mover));
        assert_eq!(engine.current_turn(), mover.opposite());
        assert_eq!(engine.is_check(), is_king_in_check(engine.board(), engine.current_turn()));

        // Re-parsing the stamped SAN from the pre-move state picks the same move.
        let mut replayed = before;
        let via_notation = replayed
            .make_move_by_notation(committed.notation())
            .expect("engine-generated SAN must parse and resolve");
        assert_eq!((via_notation.from, via_notation.to), (from, to));
        assert_eq!(replayed.fen(), engine.fen());
    }

    engine
}

#[test]
fn random_playouts_hold_invariants_under_standard_castling() {
    for seed in 0..PLAYOUTS {
        random_playout(seed, EngineConfig::default());
    }
}

#[test]
fn random_playouts_hold_invariants_under_king_only_castling() {
    let config = EngineConfig {
        castling: CastlingRules::KingOnly,
        ..EngineConfig::default()
    };
    for seed in 100..100 + PLAYOUTS / 2 {
        random_playout(seed, config);
    }
}

fn every_square() -> impl Iterator<Item = Position> {
    (0..8u8).flat_map(|row| (0..8u8).map(move |col| Position::new_unchecked(row, col)))
}

#[test]
fn unlisted_destinations_are_rejected() {
    for seed in 200..203 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut engine = GameEngine::new();

        for _ in 0..40 {
            for piece in engine.board().pieces_of(engine.current_turn()) {
                let listed = engine.get_valid_moves(piece.position);
                for to in every_square().filter(|to| !listed.contains(to)) {
                    let mut attempt = engine.clone();
                    assert_eq!(
                        attempt.make_move(piece.position, to),
                        Err(EngineError::IllegalDestination {
                            from: piece.position,
                            to
                        })
                    );
                    assert_eq!(*attempt.state(), *engine.state());
                }
            }

            let moves = all_moves(&engine);
            if moves.is_empty() {
                break;
            }
            let (from, to) = moves[rng.random_range(0..moves.len())];
            engine.make_move(from, to).expect("listed move is legal");
        }
    }
}

#[test]
fn identical_inputs_give_identical_states() {
    let first = random_playout(7, EngineConfig::default());
    let notations: Vec<String> = first
        .move_history()
        .iter()
        .map(|mv| mv.notation().to_owned())
        .collect();

    let mut second = GameEngine::new();
    second.replay(&notations).expect("recorded SAN must replay");
    assert_eq!(*second.state(), *first.state());
}

#[test]
fn snapshots_survive_json_round_trip() {
    let engine = random_playout(3, EngineConfig::default());
    let snapshot = engine.state();

    let json = serde_json::to_string(&*snapshot).expect("state serializes");
    let restored: GameState = serde_json::from_str(&json).expect("state deserializes");

    assert_eq!(restored, *snapshot);
    assert_eq!(restored.get_fen(), engine.fen());
}

#[test]
fn history_and_captures_only_grow() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut engine = GameEngine::new();
    let mut captures = 0;

    for ply in 1..=60 {
        let moves = all_moves(&engine);
        if moves.is_empty() {
            break;
        }
        let (from, to) = moves[rng.random_range(0..moves.len())];
        let mv = engine.make_move(from, to).expect("listed move is legal");
        captures += usize::from(mv.is_capture());

        assert_eq!(engine.move_history().len(), ply);
        assert_eq!(engine.captured_pieces().len(), captures);
        if let Some(victim) = mv.captured {
            assert_ne!(victim.color, mv.piece.color);
            assert_ne!(victim.kind, PieceKind::King);
        }
        let kings = [Color::White, Color::Black]
            .map(|color| engine.board().count(color, PieceKind::King));
        assert_eq!(kings, [1, 1]);
    }
}
