use crate::board::{Board, Color};
use crate::search::pst::position_value;

// Terminal score bounds
pub const SCORE_MIN: f64 = -1000.0;
pub const SCORE_MAX: f64 = 1000.0;

pub const PIECE_VALUE_MULTIPLIER: f64 = 10.0;
pub const POSITION_SCORE_MULTIPLIER: f64 = 0.5;

/// Below this much total material (both sides, kings included) the AI searches one level deeper.
pub const LOW_MATERIAL_THRESHOLD: u32 = 50;

impl Board {
    /// Material balance from `color`'s side.
    ///
    /// Finished games short-circuit: a mated side to move scores [`SCORE_MIN`], while a
    /// stalemated side to move scores [`SCORE_MAX`].
    pub fn calculate_score(&self, color: Color) -> f64 {
        let to_move = self.playing_color();
        if self.is_check_mate() {
            return if to_move == color { SCORE_MIN } else { SCORE_MAX };
        }
        if self.is_finished() {
            return if to_move == color { SCORE_MAX } else { SCORE_MIN };
        }
        self.pieces()
            .map(|(_, piece)| {
                let value = piece.value() as f64 * PIECE_VALUE_MULTIPLIER;
                if piece.color == color { value } else { -value }
            })
            .sum()
    }

    /// Piece-square bonus from `color`'s side.
    pub fn calculate_score_by_pieces_location(&self, color: Color) -> f64 {
        self.pieces()
            .map(|(sq, piece)| {
                let value = position_value(piece.kind, piece.color, sq) * POSITION_SCORE_MULTIPLIER;
                if piece.color == color { value } else { -value }
            })
            .sum()
    }

    pub fn ingame_pieces_value(&self) -> u32 {
        self.pieces().map(|(_, p)| p.value() as u32).sum()
    }

    pub fn should_increase_level(&self) -> bool {
        self.ingame_pieces_value() < LOW_MATERIAL_THRESHOLD
    }
}
