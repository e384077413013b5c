//! Move application. No legality checks happen here; callers validate against
//! [`Board::get_moves`] first.

use super::types::{Color, Piece, PieceKind, Square};
use super::Board;
use crate::error::{EngineError, Result};

impl Board {
    /// Applies `from -> to`, failing only when `from` is empty.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<()> {
        let piece = self.piece(from).ok_or(EngineError::EmptySquare(from))?;
        self.apply_move(from, to, piece);
        Ok(())
    }

    /// State transition for a move whose origin is known to hold `piece`.
    pub(crate) fn apply_move(&mut self, from: Square, to: Square, piece: Piece) {
        let is_pawn = piece.kind == PieceKind::Pawn;
        let pos = self.position_mut();
        let captured = pos.piece(to);

        pos.put(from, None);
        let placed = if is_pawn && to.rank() == piece.color.promotion_rank() {
            Piece::new(piece.color, PieceKind::Queen)
        } else {
            piece
        };
        pos.put(to, Some(placed));

        if is_pawn && pos.en_passant == Some(to) {
            if let Some(behind) = to.back(piece.color) {
                pos.put(behind, None);
            }
        }

        let double_step = is_pawn
            && from.rank() == piece.color.pawn_rank()
            && from.front(piece.color).and_then(|sq| sq.front(piece.color)) == Some(to);
        pos.en_passant = if double_step { from.front(piece.color) } else { None };

        match from {
            Square::E1 => {
                pos.castling.white_short = false;
                pos.castling.white_long = false;
            }
            Square::E8 => {
                pos.castling.black_short = false;
                pos.castling.black_long = false;
            }
            Square::A1 => pos.castling.white_long = false,
            Square::H1 => pos.castling.white_short = false,
            Square::A8 => pos.castling.black_long = false,
            Square::H8 => pos.castling.black_short = false,
            _ => {}
        }

        // The paired rook move finishes the ply, so turn and clocks advance once.
        if piece.kind == PieceKind::King {
            if let Some((rook_from, rook_to)) = castling_rook(piece.color, from, to) {
                if let Some(rook) = self.piece(rook_from) {
                    return self.apply_move(rook_from, rook_to, rook);
                }
            }
        }

        let pos = self.position_mut();
        if pos.turn == Color::Black {
            pos.full_move += 1;
        }
        pos.turn = !pos.turn;
        pos.half_move += 1;
        if captured.is_some() || is_pawn {
            pos.half_move = 0;
        }
    }
}

fn castling_rook(color: Color, from: Square, to: Square) -> Option<(Square, Square)> {
    match (color, from, to) {
        (Color::White, Square::E1, Square::C1) => Some((Square::A1, Square::D1)),
        (Color::White, Square::E1, Square::G1) => Some((Square::H1, Square::F1)),
        (Color::Black, Square::E8, Square::C8) => Some((Square::A8, Square::D8)),
        (Color::Black, Square::E8, Square::G8) => Some((Square::H8, Square::F8)),
        _ => None,
    }
}
