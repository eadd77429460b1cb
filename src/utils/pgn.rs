//! PGN read/write utilities for game history interchange.
//!
//! Writing uses the SAN already stamped on each committed move. Reading
//! feeds the movetext through a [`GameEngine`], so every move is validated
//! exactly as if a caller had submitted it.

use std::collections::BTreeMap;

use crate::chess_errors::PgnError;
use crate::engine::engine_config::EngineConfig;
use crate::engine::game_engine::GameEngine;
use crate::game_state::chess_move::ChessMove;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;

const EN_PASSANT_MARK: &str = "e.p.";

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub initial_state: GameState,
    pub moves: Vec<ChessMove>,
    pub final_state: GameState,
    pub result: String,
}

/// PGN for the game that led from `initial_state` to `current_state`, with
/// the seven-tag roster dated today.
pub fn write_pgn(initial_state: &GameState, current_state: &GameState) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Casual Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert(
        "Date".to_owned(),
        chrono::Local::now().format("%Y.%m.%d").to_string(),
    );
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), game_result(current_state).to_owned());

    let initial_fen = initial_state.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    write_pgn_with_headers(initial_state, current_state, &headers)
}

pub fn write_pgn_with_headers(
    initial_state: &GameState,
    current_state: &GameState,
    headers: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut movetext_parts = Vec::<String>::with_capacity(current_state.move_history.len() + 1);
    let mut fullmove = initial_state.fullmove_number.max(1);
    let mut turn = initial_state.current_turn;

    for (ply, mv) in current_state.move_history.iter().enumerate() {
        let san = pgn_san(mv);
        match turn {
            Color::White => movetext_parts.push(format!("{fullmove}. {san}")),
            Color::Black => {
                if ply == 0 {
                    movetext_parts.push(format!("{fullmove}... {san}"));
                } else {
                    movetext_parts.push(san.to_owned());
                }
                fullmove += 1;
            }
        }
        turn = turn.opposite();
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

/// Replays PGN movetext from the standard start, or from the `FEN` tag when
/// `SetUp` is `1`.
pub fn read_pgn(pgn: &str, config: EngineConfig) -> Result<PgnGame, PgnError> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let mut engine = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers.get("FEN").ok_or(PgnError::MissingSetupFen)?;
        GameEngine::from_fen(fen, config)?
    } else {
        GameEngine::with_config(config)
    };
    let initial_state = engine.starting_state().clone();

    let mut result = "*".to_owned();
    let mut notations = Vec::<String>::new();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        let Some(token) = strip_move_number(token) else {
            continue;
        };
        if token == EN_PASSANT_MARK || token.starts_with('$') {
            continue;
        }
        if is_result_token(token) {
            result = token.to_owned();
            break;
        }
        notations.push(token.to_owned());
    }

    engine.replay(&notations)?;

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        initial_state,
        moves: engine.move_history().to_vec(),
        final_state: (*engine.state()).clone(),
        result,
    })
}

/// `1-0` / `0-1` after mate, `1/2-1/2` after stalemate, otherwise `*`.
pub fn game_result(state: &GameState) -> &'static str {
    if state.is_checkmate {
        match state.current_turn {
            Color::White => "0-1",
            Color::Black => "1-0",
        }
    } else if state.is_stalemate {
        "1/2-1/2"
    } else {
        "*"
    }
}

fn pgn_san(mv: &ChessMove) -> &str {
    let san = mv.notation();
    san.strip_suffix(EN_PASSANT_MARK)
        .map(str::trim_end)
        .unwrap_or(san)
}

fn parse_header_line(line: &str) -> Result<(String, String), PgnError> {
    let invalid = || PgnError::InvalidHeader(line.to_owned());

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value_raw = value_raw.trim();

    let value = value_raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?
        .replace("\\\"", "\"");
    Ok((key.trim().to_owned(), value))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// Drops a leading move number (`12.`, `12...`, or the `12.` of `12.e4`).
/// `None` when nothing is left.
fn strip_move_number(token: &str) -> Option<&str> {
    let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let rest = &token[digits..];
    let stripped = if digits > 0 && rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    };
    (!stripped.is_empty()).then_some(stripped)
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
