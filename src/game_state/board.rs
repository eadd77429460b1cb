//! 8x8 mailbox board.
//!
//! `Board` is a plain `Copy` value (64 optional pieces), so producing a
//! successor position is a single array copy followed by a handful of slot
//! writes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;
use crate::utils::render_game_state::render_board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self.squares[position.row() as usize][position.col() as usize]
    }

    #[inline]
    pub fn is_empty(&self, position: Position) -> bool {
        self.piece_at(position).is_none()
    }

    /// True when `position` holds a piece of the other color.
    #[inline]
    pub fn is_enemy(&self, position: Position, color: Color) -> bool {
        matches!(self.piece_at(position), Some(p) if p.color != color)
    }

    /// Puts `piece` on the square named by its own `position`, replacing
    /// whatever was there.
    #[inline]
    pub fn place(&mut self, piece: Piece) {
        let pos = piece.position;
        self.squares[pos.row() as usize][pos.col() as usize] = Some(piece);
    }

    #[inline]
    pub fn remove(&mut self, position: Position) -> Option<Piece> {
        self.squares[position.row() as usize][position.col() as usize].take()
    }

    /// Moves the piece on `from` to `to`, marks it as moved and returns the
    /// piece previously standing on `to`.
    pub fn relocate(&mut self, from: Position, to: Position) -> Option<Piece> {
        let mut piece = self.remove(from)?;
        let displaced = self.remove(to);
        piece.position = to;
        piece.has_moved = true;
        self.place(piece);
        displaced
    }

    /// Every piece in board scan order (row 0 to 7, column 0 to 7).
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().filter_map(|slot| *slot)
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.position)
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.pieces_of(color).filter(|p| p.kind == kind).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}
