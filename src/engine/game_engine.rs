//! Game orchestration: the single owner of the authoritative `GameState`.
//!
//! Every accepted move builds a complete successor state and swaps it in;
//! a rejected move returns an error and leaves the held state untouched.
//! Snapshots handed out by [`GameEngine::state`] therefore never change
//! underneath their holders.

use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::chess_errors::{EngineError, FenError, ReplayError};
use crate::engine::engine_config::EngineConfig;
use crate::game_state::board::Board;
use crate::game_state::chess_move::ChessMove;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::history::History;
use crate::move_generation::legal_move_apply::apply_move_with_record;
use crate::move_generation::legal_move_filter::legal_moves;
use crate::moves::king_moves::is_castling_hop;
use crate::moves::pawn_moves::promotion_row;
use crate::utils::fen_parser::parse_fen_with_rules;
use crate::utils::pgn::write_pgn;
use crate::utils::san::{parse_algebraic, ParsedMove};

#[derive(Debug, Clone)]
pub struct GameEngine {
    state: Arc<GameState>,
    start: Arc<GameState>,
    config: EngineConfig,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let start = Arc::new(GameState::new_game());
        Self {
            state: Arc::clone(&start),
            start,
            config: config.sanitized(),
        }
    }

    /// Starts a game from an arbitrary position.
    pub fn from_fen(fen: &str, config: EngineConfig) -> Result<Self, FenError> {
        let start = Arc::new(parse_fen_with_rules(fen, config.castling)?);
        info!("[ENGINE] Loaded position {}", fen);
        Ok(Self {
            state: Arc::clone(&start),
            start,
            config: config.sanitized(),
        })
    }

    #[inline]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Shared handle to the current snapshot.
    #[inline]
    pub fn state(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    /// The position this game started from.
    #[inline]
    pub fn starting_state(&self) -> &GameState {
        &self.start
    }

    /// Legal destinations for the piece on `position`. Empty when the square
    /// is empty or holds a piece of the side not to move.
    pub fn get_valid_moves(&self, position: Position) -> Vec<Position> {
        match self.own_piece_at(position) {
            Some(piece) => legal_moves(&piece, &self.state, self.config.castling),
            None => Vec::new(),
        }
    }

    /// Plays `from` to `to`; a pawn reaching the last rank becomes the
    /// configured default promotion piece.
    #[inline]
    pub fn make_move(&mut self, from: Position, to: Position) -> Result<ChessMove, EngineError> {
        self.make_move_with_promotion(from, to, None)
    }

    pub fn make_move_with_promotion(
        &mut self,
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    ) -> Result<ChessMove, EngineError> {
        let result = self.commit(from, to, promotion);
        if let Err(err) = &result {
            debug!("[ENGINE] Rejected {} to {}: {}", from, to, err);
        }
        result
    }

    /// Plays a move given in SAN or coordinate notation. Candidate pieces are
    /// tried in board scan order and the first that can legally reach the
    /// destination moves.
    pub fn make_move_by_notation(&mut self, text: &str) -> Result<ChessMove, EngineError> {
        let parsed = parse_algebraic(text, self.state.current_turn).map_err(|err| {
            debug!("[ENGINE] Unparsable notation '{}': {}", text, err);
            EngineError::UnparsableNotation {
                text: text.to_owned(),
            }
        })?;

        let from = self.resolve_origin(&parsed).ok_or_else(|| {
            debug!("[ENGINE] No piece can play '{}'", text);
            EngineError::NoMatchingPiece {
                text: text.to_owned(),
            }
        })?;

        self.make_move_with_promotion(from, parsed.to, parsed.promotion)
    }

    /// Applies `notations` in order, stopping at the first rejected move.
    /// Moves before the failure stay applied. Returns the number of moves
    /// played.
    pub fn replay<I, S>(&mut self, notations: I) -> Result<usize, ReplayError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut played = 0;
        for (index, text) in notations.into_iter().enumerate() {
            let text = text.as_ref();
            self.make_move_by_notation(text)
                .map_err(|source| ReplayError {
                    ply: index + 1,
                    text: text.to_owned(),
                    source,
                })?;
            played += 1;
        }

        info!(
            "[ENGINE] Replayed {} moves, status {:?}",
            played,
            self.state.status()
        );
        Ok(played)
    }

    /// Back to the standard starting position.
    pub fn reset_game(&mut self) {
        let start = Arc::new(GameState::new_game());
        self.state = Arc::clone(&start);
        self.start = start;
        info!("[ENGINE] Game reset");
    }

    #[inline]
    pub fn current_turn(&self) -> Color {
        self.state.current_turn
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.state.is_check
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.state.is_checkmate
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.state.is_stalemate
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    #[inline]
    pub fn move_history(&self) -> &History<ChessMove> {
        &self.state.move_history
    }

    #[inline]
    pub fn captured_pieces(&self) -> &History<Piece> {
        &self.state.captured_pieces
    }

    #[inline]
    pub fn fen(&self) -> String {
        self.state.get_fen()
    }

    /// PGN export of the game so far.
    pub fn to_pgn(&self) -> String {
        write_pgn(&self.start, &self.state)
    }

    fn own_piece_at(&self, position: Position) -> Option<Piece> {
        self.state
            .board
            .piece_at(position)
            .filter(|piece| piece.color == self.state.current_turn)
    }

    fn commit(
        &mut self,
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    ) -> Result<ChessMove, EngineError> {
        let piece = self
            .own_piece_at(from)
            .ok_or(EngineError::NoPieceOrWrongTurn { square: from })?;

        if !legal_moves(&piece, &self.state, self.config.castling).contains(&to) {
            return Err(EngineError::IllegalDestination { from, to });
        }

        let kind = promotion.unwrap_or(self.config.default_promotion);
        let promotes = piece.kind == PieceKind::Pawn && to.row() == promotion_row(piece.color);
        if promotes && !kind.is_promotion_target() {
            return Err(EngineError::InvalidPromotion { kind });
        }

        let (next, record) =
            apply_move_with_record(&self.state, from, to, kind, self.config.castling)?;
        debug!(
            "[ENGINE] Ply {}: {} -> {}",
            next.move_history.len(),
            record.notation(),
            next.get_fen()
        );
        self.state = Arc::new(next);
        Ok(record)
    }

    fn resolve_origin(&self, parsed: &ParsedMove) -> Option<Position> {
        self.state
            .board
            .pieces_of(self.state.current_turn)
            .filter(|piece| parsed.matches_origin(piece))
            .filter(|piece| !parsed.is_castling || is_castling_hop(piece.kind, piece.position, parsed.to))
            .find(|piece| {
                let reachable = legal_moves(piece, &self.state, self.config.castling).contains(&parsed.to);
                trace!(
                    "[ENGINE] Candidate {:?} on {} reaches {}: {}",
                    piece.kind,
                    piece.position,
                    parsed.to,
                    reachable
                );
                reachable
            })
            .map(|piece| piece.position)
    }
}

#[cfg(test)]
mod tests {
    use super::GameEngine;
    use crate::chess_errors::EngineError;
    use crate::engine::engine_config::EngineConfig;
    use crate::game_state::chess_rules::{CastlingRules, STARTING_POSITION_FEN};
    use crate::game_state::chess_types::{Color, GameStatus, PieceKind, Position};

    fn sq(name: &str) -> Position {
        name.parse().expect("test square should parse")
    }

    fn play(engine: &mut GameEngine, moves: &[&str]) {
        for text in moves {
            engine
                .make_move_by_notation(text)
                .unwrap_or_else(|err| panic!("{text} should be legal: {err}"));
        }
    }

    fn sorted(mut squares: Vec<Position>) -> Vec<String> {
        squares.sort();
        squares.into_iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn valid_moves_at_start() {
        let engine = GameEngine::new();
        assert_eq!(sorted(engine.get_valid_moves(sq("e2"))), vec!["e4", "e3"]);
        assert_eq!(sorted(engine.get_valid_moves(sq("g1"))), vec!["f3", "h3"]);
        assert!(engine.get_valid_moves(sq("e7")).is_empty());
        assert!(engine.get_valid_moves(sq("e4")).is_empty());

        let total: usize = engine
            .board()
            .pieces_of(Color::White)
            .map(|p| engine.get_valid_moves(p.position).len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut engine = GameEngine::new();
        play(&mut engine, &["f3", "e5", "g4", "Qh4#"]);

        assert!(engine.is_checkmate());
        assert!(engine.is_check());
        assert!(!engine.is_stalemate());
        assert_eq!(engine.status(), GameStatus::Checkmate);
        assert!(engine
            .board()
            .pieces_of(Color::White)
            .all(|p| engine.get_valid_moves(p.position).is_empty()));

        let sans: Vec<String> = engine
            .move_history()
            .iter()
            .map(|mv| mv.notation().to_owned())
            .collect();
        assert_eq!(sans, vec!["f3", "e5", "g4", "Qh4"]);
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let mut engine = GameEngine::new();
        play(&mut engine, &["e4", "d5", "e5", "f5"]);
        assert_eq!(engine.state().en_passant_target, Some(sq("f6")));
        assert!(engine.get_valid_moves(sq("e5")).contains(&sq("f6")));

        let mv = engine.make_move(sq("e5"), sq("f6")).expect("exf6 is legal");

        assert!(mv.is_en_passant);
        assert_eq!(mv.notation(), "exf6 e.p.");
        assert!(engine.board().is_empty(sq("f5")));
        assert_eq!(engine.board().piece_at(sq("f6")).map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(engine.captured_pieces().len(), 1);
        assert_eq!(
            engine.captured_pieces().last().map(|p| p.color),
            Some(Color::Black)
        );
    }

    #[test]
    fn en_passant_expires_after_one_ply() {
        let mut engine = GameEngine::new();
        play(&mut engine, &["e4", "a6", "e5", "f5", "a3", "a5"]);
        assert!(!engine.get_valid_moves(sq("e5")).contains(&sq("f6")));
    }

    #[test]
    fn rejected_moves_leave_state_untouched() {
        let mut engine = GameEngine::new();
        let before = engine.state();

        assert_eq!(
            engine.make_move(sq("e7"), sq("e5")),
            Err(EngineError::NoPieceOrWrongTurn { square: sq("e7") })
        );
        assert_eq!(
            engine.make_move(sq("e2"), sq("e5")),
            Err(EngineError::IllegalDestination {
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert_eq!(
            engine.make_move_by_notation("hello"),
            Err(EngineError::UnparsableNotation {
                text: "hello".to_owned()
            })
        );
        assert_eq!(
            engine.make_move_by_notation("Nf6"),
            Err(EngineError::NoMatchingPiece {
                text: "Nf6".to_owned()
            })
        );
        assert_eq!(
            engine.make_move_with_promotion(sq("e2"), sq("e4"), Some(PieceKind::King)),
            Err(EngineError::InvalidPromotion {
                kind: PieceKind::King
            })
        );

        assert_eq!(*engine.state(), *before);
        assert_eq!(engine.fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn error_messages_are_human_readable() {
        let mut engine = GameEngine::new();
        let err = engine
            .make_move(sq("e2"), sq("e5"))
            .expect_err("e2e5 is illegal");
        assert_eq!(err.to_string(), "Invalid move for the selected piece: e2 to e5");
    }

    #[test]
    fn promotion_defaults_to_queen_and_honours_choice() {
        let fen = "8/P6k/8/8/8/8/8/4K3 w - - 0 1";

        let mut engine = GameEngine::from_fen(fen, EngineConfig::default()).expect("FEN loads");
        let mv = engine.make_move(sq("a7"), sq("a8")).expect("a8 is legal");
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert_eq!(mv.notation(), "a8=Q");

        let mut engine = GameEngine::from_fen(fen, EngineConfig::default()).expect("FEN loads");
        engine
            .make_move_with_promotion(sq("a7"), sq("a8"), Some(PieceKind::Knight))
            .expect("a8=N is legal");
        assert_eq!(engine.board().piece_at(sq("a8")).map(|p| p.kind), Some(PieceKind::Knight));

        let mut engine = GameEngine::from_fen(fen, EngineConfig::default()).expect("FEN loads");
        engine.make_move_by_notation("a8=R").expect("a8=R is legal");
        assert_eq!(engine.board().piece_at(sq("a8")).map(|p| p.kind), Some(PieceKind::Rook));
    }

    #[test]
    fn promotion_choice_only_matters_on_the_last_rank() {
        let mut engine = GameEngine::new();
        let mv = engine
            .make_move_with_promotion(sq("e2"), sq("e4"), Some(PieceKind::King))
            .expect("e4 ignores the promotion choice");
        assert_eq!(mv.promotion, None);

        let fen = "8/P6k/8/8/8/8/8/4K3 w - - 0 1";
        let mut engine = GameEngine::from_fen(fen, EngineConfig::default()).expect("FEN loads");
        assert_eq!(
            engine.make_move_with_promotion(sq("a7"), sq("a8"), Some(PieceKind::King)),
            Err(EngineError::InvalidPromotion {
                kind: PieceKind::King
            })
        );
        assert_eq!(engine.fen(), fen);
    }

    #[test]
    fn unusable_default_promotion_falls_back_to_queen() {
        let config = EngineConfig {
            default_promotion: PieceKind::Pawn,
            ..EngineConfig::default()
        };
        let mut engine = GameEngine::with_config(config);
        assert_eq!(engine.config().default_promotion, PieceKind::Queen);
        engine.make_move(sq("e2"), sq("e4")).expect("e4 is legal");

        let fen = "8/P6k/8/8/8/8/8/4K3 w - - 0 1";
        let mut engine = GameEngine::from_fen(fen, config).expect("FEN loads");
        let mv = engine.make_move(sq("a7"), sq("a8")).expect("a8 is legal");
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn standard_castling_moves_king_and_rook() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut engine = GameEngine::from_fen(fen, EngineConfig::default()).expect("FEN loads");

        let mv = engine.make_move_by_notation("O-O").expect("O-O is legal");
        assert!(mv.is_castling);
        assert_eq!(mv.notation(), "O-O");
        assert_eq!(engine.fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");

        engine.make_move_by_notation("O-O-O").expect("O-O-O is legal");
        assert_eq!(engine.fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2");
    }

    #[test]
    fn king_only_castling_leaves_rook_in_place() {
        let config = EngineConfig {
            castling: CastlingRules::KingOnly,
            ..EngineConfig::default()
        };
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut engine = GameEngine::from_fen(fen, config).expect("FEN loads");

        engine.make_move(sq("e1"), sq("g1")).expect("hop is legal");
        assert_eq!(engine.fen(), "r3k2r/8/8/8/8/8/8/R5KR b kq - 1 1");
        assert_eq!(engine.move_history().last().map(|m| m.notation()), Some("O-O"));
    }

    #[test]
    fn check_and_stalemate_are_reported() {
        let mut engine = GameEngine::new();
        play(&mut engine, &["e4", "f5", "Qh5+"]);
        assert!(engine.is_check());
        assert_eq!(engine.status(), GameStatus::Check);

        let mut engine =
            GameEngine::from_fen("7k/8/5QK1/8/8/8/8/8 w - - 0 1", EngineConfig::default())
                .expect("FEN loads");
        engine.make_move_by_notation("Qf7").expect("Qf7 is legal");
        assert!(engine.is_stalemate());
        assert!(!engine.is_check());
        assert_eq!(engine.status(), GameStatus::Stalemate);
    }

    #[test]
    fn clocks_follow_pawn_moves_and_captures() {
        let mut engine = GameEngine::new();
        play(&mut engine, &["Nf3", "Nf6", "Ng1", "Ng8"]);
        let state = engine.state();
        assert_eq!(state.halfmove_clock, 4);
        assert_eq!(state.fullmove_number, 3);

        play(&mut engine, &["e4"]);
        assert_eq!(engine.state().halfmove_clock, 0);
    }

    #[test]
    fn reset_restores_the_initial_position() {
        let mut engine = GameEngine::new();
        play(&mut engine, &["d4", "d5", "c4"]);

        engine.reset_game();
        let first = engine.state();
        engine.reset_game();

        assert_eq!(*engine.state(), *first);
        assert_eq!(engine.fen(), STARTING_POSITION_FEN);
        assert!(engine.move_history().is_empty());
        assert!(engine.captured_pieces().is_empty());
        assert_eq!(engine.current_turn(), Color::White);
    }

    #[test]
    fn snapshots_are_not_affected_by_later_moves() {
        let mut engine = GameEngine::new();
        let snapshot = engine.state();
        play(&mut engine, &["e4"]);

        assert_eq!(snapshot.get_fen(), STARTING_POSITION_FEN);
        assert_eq!(engine.move_history().len(), 1);
    }

    #[test]
    fn replay_stops_at_first_bad_move() {
        let mut engine = GameEngine::new();
        let err = engine
            .replay(["e4", "e5", "Ke3", "Nf3"])
            .expect_err("Ke3 is illegal");

        assert_eq!(err.ply, 3);
        assert_eq!(err.text, "Ke3");
        assert_eq!(err.to_string(), "Invalid move at position 3: Ke3");
        assert_eq!(engine.move_history().len(), 2);

        let mut engine = GameEngine::new();
        assert_eq!(engine.replay(["e2e4", "e7-e5", "Ng1f3"]), Ok(3));
    }

    #[test]
    fn capture_mark_does_not_change_resolution() {
        let mut marked = GameEngine::new();
        let mv = marked.make_move_by_notation("Nxf3").expect("Nxf3 resolves to Nf3");
        assert_eq!((mv.from, mv.to), (sq("g1"), sq("f3")));
        assert_eq!(mv.captured, None);
        assert_eq!(mv.notation(), "Nf3");

        let mut plain = GameEngine::new();
        plain.make_move_by_notation("Nf3").expect("Nf3 is legal");
        assert_eq!(marked.fen(), plain.fen());
    }

    #[test]
    fn disambiguated_notation_picks_the_named_piece() {
        let mut engine =
            GameEngine::from_fen("7k/8/8/8/8/8/8/1N1K1N2 w - - 0 1", EngineConfig::default())
                .expect("FEN loads");
        let mv = engine.make_move_by_notation("Nfd2").expect("Nfd2 is legal");
        assert_eq!(mv.from, sq("f1"));
        assert_eq!(mv.notation(), "Nfd2");

        let mut engine =
            GameEngine::from_fen("7k/8/8/8/8/8/8/1N1K1N2 w - - 0 1", EngineConfig::default())
                .expect("FEN loads");
        let mv = engine.make_move_by_notation("Nd2").expect("Nd2 resolves in scan order");
        assert_eq!(mv.from, sq("b1"));
    }
}
