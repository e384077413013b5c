//! Board state and every rules algorithm that reads or mutates it.

use std::fmt;

pub mod attacks;
pub mod make_move;
pub mod movegen;
pub mod position;
pub mod snapshot;
pub mod types;

pub use movegen::MoveMap;
pub use position::{Castling, Configuration, Position};
pub use snapshot::Snapshot;
pub use types::{Color, Piece, PieceKind, Square};

use crate::error::Result;

/// Owns one [`Position`]. Copying a `Board` forks an independent probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Board {
    position: Position,
}

impl Board {
    /// Board at the standard starting layout.
    pub fn new() -> Self {
        Self { position: Position::starting() }
    }

    pub fn from_position(position: Position) -> Self {
        Self { position }
    }

    /// Builds a board from the JSON shape of [`Configuration`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Configuration = serde_json::from_str(json)?;
        Ok(Self::from(config))
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn configuration(&self) -> Configuration {
        Configuration::from(&self.position)
    }

    pub fn piece(&self, sq: Square) -> Option<Piece> {
        self.position.piece(sq)
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.position.piece(sq).is_none()
    }

    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.position.put(sq, Some(piece));
    }

    pub fn remove_piece(&mut self, sq: Square) {
        self.position.put(sq, None);
    }

    /// Label-and-glyph form of [`Board::set_piece`]; rejects anything not canonical.
    pub fn set_piece_str(&mut self, square: &str, piece: &str) -> Result<()> {
        let sq: Square = square.parse()?;
        let piece: Piece = piece.parse()?;
        self.set_piece(sq, piece);
        Ok(())
    }

    pub fn remove_piece_str(&mut self, square: &str) -> Result<()> {
        let sq: Square = square.parse()?;
        self.remove_piece(sq);
        Ok(())
    }

    pub fn is_empty_str(&self, square: &str) -> Result<bool> {
        let sq: Square = square.parse()?;
        Ok(self.is_empty(sq))
    }

    pub fn playing_color(&self) -> Color {
        self.position.turn
    }

    pub fn non_playing_color(&self) -> Color {
        !self.position.turn
    }

    pub fn is_finished(&self) -> bool {
        self.position.is_finished
    }

    pub fn is_check_mate(&self) -> bool {
        self.position.check_mate
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.position.pieces()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.position.pieces().filter(move |(_, p)| p.color == color)
    }

    pub(crate) fn piece_at(&self, sq: Square) -> Piece {
        match self.position.piece(sq) {
            Some(p) => p,
            None => panic!("board invariant violated: no piece at {sq}"),
        }
    }

    pub(crate) fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }
}

impl From<Configuration> for Board {
    fn from(config: Configuration) -> Self {
        Self::from_position(Position::from(config))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   +------------------------+")?;
        for rank in (0..8u8).rev() {
            write!(f, " {} |", rank + 1)?;
            for file in 0..8u8 {
                let glyph = Square::new(file, rank)
                    .and_then(|sq| self.piece(sq))
                    .map_or('.', Piece::to_char);
                write!(f, " {} ", glyph)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "   +------------------------+")?;
        write!(f, "     A  B  C  D  E  F  G  H")
    }
}
