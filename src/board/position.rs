use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{Color, Piece, PieceKind, Square};

/// Castling rights. Each flag only ever goes from `true` to `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Castling {
    pub white_short: bool,
    pub black_short: bool,
    pub white_long: bool,
    pub black_long: bool,
}

impl Castling {
    pub const ALL: Castling = Castling { white_short: true, black_short: true, white_long: true, black_long: true };
    pub const NONE: Castling = Castling { white_short: false, black_short: false, white_long: false, black_long: false };

    pub fn short(&self, color: Color) -> bool {
        match color { Color::White => self.white_short, Color::Black => self.black_short }
    }

    pub fn long(&self, color: Color) -> bool {
        match color { Color::White => self.white_long, Color::Black => self.black_long }
    }
}

/// The complete game state, kept flat so a probe copy is a plain memcpy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) squares: [Option<Piece>; 64],
    pub turn: Color,
    pub castling: Castling,
    pub en_passant: Option<Square>,
    pub half_move: u32,
    pub full_move: u32,
    pub is_finished: bool,
    pub check_mate: bool,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            turn: Color::White,
            castling: Castling::NONE,
            en_passant: None,
            half_move: 0,
            full_move: 1,
            is_finished: false,
            check_mate: false,
        }
    }

    pub fn starting() -> Self {
        let mut pos = Self::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            pos.squares[file as usize] = Some(Piece::new(Color::White, *kind));
            pos.squares[8 + file as usize] = Some(Piece::new(Color::White, PieceKind::Pawn));
            pos.squares[48 + file as usize] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            pos.squares[56 + file as usize] = Some(Piece::new(Color::Black, *kind));
        }
        pos.castling = Castling::ALL;
        pos
    }

    pub fn piece(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    pub(crate) fn put(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
    }

    /// Occupied squares in index order (A1, B1, .., H8).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece(sq).map(|p| (sq, p)))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

fn first_move() -> u32 {
    1
}

/// Structured position input and history snapshot, in the JSON shape the snapshot exports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub pieces: BTreeMap<Square, Piece>,
    #[serde(default)]
    pub turn: Color,
    #[serde(default)]
    pub castling: Castling,
    #[serde(default)]
    pub en_passant: Option<Square>,
    #[serde(default)]
    pub half_move: u32,
    #[serde(default = "first_move")]
    pub full_move: u32,
    #[serde(default)]
    pub is_finished: bool,
    #[serde(default)]
    pub check_mate: bool,
}

impl From<Configuration> for Position {
    fn from(c: Configuration) -> Self {
        let mut pos = Position::empty();
        for (sq, piece) in c.pieces {
            pos.put(sq, Some(piece));
        }
        pos.turn = c.turn;
        pos.castling = c.castling;
        pos.en_passant = c.en_passant;
        pos.half_move = c.half_move;
        pos.full_move = c.full_move;
        pos.is_finished = c.is_finished;
        pos.check_mate = c.check_mate;
        pos
    }
}

impl From<&Position> for Configuration {
    fn from(p: &Position) -> Self {
        Self {
            pieces: p.pieces().collect(),
            turn: p.turn,
            castling: p.castling,
            en_passant: p.en_passant,
            half_move: p.half_move,
            full_move: p.full_move,
            is_finished: p.is_finished,
            check_mate: p.check_mate,
        }
    }
}
