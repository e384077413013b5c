use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::position::Castling;
use super::types::{Color, Piece, Square};
use super::{Board, MoveMap};

/// Exported board state. Field names are the wire contract consumed by UIs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub moves: MoveMap,
    pub pieces: BTreeMap<Square, Piece>,
    pub turn: Color,
    pub is_finished: bool,
    pub check: bool,
    pub check_mate: bool,
    pub castling: Castling,
    pub en_passant: Option<Square>,
    pub half_move: u32,
    pub full_move: u32,
}

impl Board {
    /// Generates the legal move map first, so a finished game is reported as such.
    pub fn export_json(&mut self) -> Snapshot {
        let moves = self.moves();
        let pos = self.position();
        Snapshot {
            moves,
            pieces: pos.pieces().collect(),
            turn: pos.turn,
            is_finished: pos.is_finished,
            check: self.has_playing_player_check(),
            check_mate: pos.check_mate,
            castling: pos.castling,
            en_passant: pos.en_passant,
            half_move: pos.half_move,
            full_move: pos.full_move,
        }
    }
}
