//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and board
//! positions, reused by the FEN, SAN and PGN components.

use crate::chess_errors::NotationError;
use crate::game_state::chess_types::Position;

/// Convert algebraic notation (for example: "e4") to a board position.
#[inline]
pub fn algebraic_to_position(square: &str) -> Result<Position, NotationError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(NotationError::InvalidSquare(square.to_owned()));
    }

    let col = file_to_col(bytes[0] as char)
        .ok_or_else(|| NotationError::InvalidSquare(square.to_owned()))?;
    let row = rank_to_row(bytes[1] as char)
        .ok_or_else(|| NotationError::InvalidSquare(square.to_owned()))?;

    Position::new(row, col).ok_or_else(|| NotationError::InvalidSquare(square.to_owned()))
}

/// Convert a board position to algebraic notation (for example: "e4").
#[inline]
pub fn position_to_algebraic(position: Position) -> String {
    format!("{}{}", position.file_char(), position.rank_char())
}

/// `'a'..='h'` to column index.
#[inline]
pub fn file_to_col(file: char) -> Option<u8> {
    ('a'..='h').contains(&file).then(|| file as u8 - b'a')
}

/// `'1'..='8'` to row index (rank 8 is row 0).
#[inline]
pub fn rank_to_row(rank: char) -> Option<u8> {
    ('1'..='8').contains(&rank).then(|| b'8' - rank as u8)
}
