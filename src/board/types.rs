use std::fmt;
use std::ops::Not;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::EngineError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Rank step a pawn of this color advances by.
    pub const fn forward(self) -> i8 {
        match self { Color::White => 1, Color::Black => -1 }
    }

    /// Zero-based rank pawns start from.
    pub const fn pawn_rank(self) -> u8 {
        match self { Color::White => 1, Color::Black => 6 }
    }

    /// Zero-based rank pawns promote on.
    pub const fn promotion_rank(self) -> u8 {
        match self { Color::White => 7, Color::Black => 0 }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self { Color::White => Color::Black, Color::Black => Color::White }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material value in pawns; the king counts so that total on-board value means something.
    pub const fn value(self) -> u8 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 10,
        }
    }

    const fn glyph(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A piece: kind plus color. Glyph form is `PNBRQK` for white, `pnbrqk` for black.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Self { color, kind })
    }

    pub fn to_char(self) -> char {
        match self.color {
            Color::White => self.kind.glyph().to_ascii_uppercase(),
            Color::Black => self.kind.glyph(),
        }
    }

    pub const fn value(self) -> u8 {
        self.kind.value()
    }

    pub fn is(self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }
}

impl FromStr for Piece {
    type Err = EngineError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_char(c).ok_or_else(|| EngineError::InvalidPiece(s.to_string())),
            _ => Err(EngineError::InvalidPiece(s.to_string())),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Serialize for Piece {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Orthogonal ray directions as (file, rank) steps.
pub const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];
/// Diagonal ray directions as (file, rank) steps.
pub const DIAGONALS: [(i8, i8); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, 2), (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1),
];

/// A board coordinate. Index is `rank * 8 + file`, so `A1 == 0` and `H8 == 63`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);

    pub const fn new(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 { Some(Square(rank * 8 + file)) } else { None }
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    pub const fn index(self) -> usize { self.0 as usize }
    pub const fn file(self) -> u8 { self.0 % 8 }
    pub const fn rank(self) -> u8 { self.0 / 8 }

    /// The square `(df, dr)` away, or `None` off-board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Square::new(file as u8, rank as u8)
        } else {
            None
        }
    }

    pub fn up(self) -> Option<Square> { self.offset(0, 1) }
    pub fn down(self) -> Option<Square> { self.offset(0, -1) }
    pub fn left(self) -> Option<Square> { self.offset(-1, 0) }
    pub fn right(self) -> Option<Square> { self.offset(1, 0) }
    pub fn up_left(self) -> Option<Square> { self.offset(-1, 1) }
    pub fn up_right(self) -> Option<Square> { self.offset(1, 1) }
    pub fn down_left(self) -> Option<Square> { self.offset(-1, -1) }
    pub fn down_right(self) -> Option<Square> { self.offset(1, -1) }

    /// One step toward the opponent's side for `color`.
    pub fn front(self, color: Color) -> Option<Square> { self.offset(0, color.forward()) }
    pub fn back(self, color: Color) -> Option<Square> { self.offset(0, -color.forward()) }
    pub fn front_left(self, color: Color) -> Option<Square> { self.offset(-1, color.forward()) }
    pub fn front_right(self, color: Color) -> Option<Square> { self.offset(1, color.forward()) }

    pub fn knight_targets(self) -> impl Iterator<Item = Square> {
        KNIGHT_OFFSETS.into_iter().filter_map(move |(df, dr)| self.offset(df, dr))
    }
}

impl FromStr for Square {
    type Err = EngineError;

    /// Accepts either case, stores canonical uppercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(EngineError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].to_ascii_uppercase().wrapping_sub(b'A');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(|| EngineError::InvalidSquare(s.to_string()))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.file()) as char, self.rank() + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct SquareVisitor;

impl<'de> Visitor<'de> for SquareVisitor {
    type Value = Square;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a square label such as \"E4\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Square, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(SquareVisitor)
    }
}
