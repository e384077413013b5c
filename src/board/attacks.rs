//! Attack and check detection.
//!
//! [`Board::is_piece_under_attack`] ray-casts outward from the defended square
//! instead of generating the attacker's moves.

use std::collections::BTreeSet;

use super::types::{Color, PieceKind, Square, DIAGONALS, ORTHOGONALS};
use super::Board;

impl Board {
    /// Whether the piece on `sq` is attacked by the opposite color. Empty squares are never attacked.
    pub fn is_piece_under_attack(&self, sq: Square) -> bool {
        let Some(defender) = self.piece(sq) else { return false };
        let color = defender.color;

        for (df, dr) in ORTHOGONALS {
            if let Some((distance, kind)) = self.first_enemy_on_ray(sq, color, df, dr) {
                match kind {
                    PieceKind::Rook | PieceKind::Queen => return true,
                    PieceKind::King if distance == 1 => return true,
                    _ => {}
                }
            }
        }

        for (df, dr) in DIAGONALS {
            if let Some((distance, kind)) = self.first_enemy_on_ray(sq, color, df, dr) {
                match kind {
                    PieceKind::Bishop | PieceKind::Queen => return true,
                    PieceKind::King if distance == 1 => return true,
                    // enemy pawns capture toward us, so they sit on our forward diagonals
                    PieceKind::Pawn if distance == 1 && dr == color.forward() => return true,
                    _ => {}
                }
            }
        }

        sq.knight_targets().any(|target| {
            self.piece(target).is_some_and(|p| p.is(!color, PieceKind::Knight))
        })
    }

    /// Walks one ray and reports the first piece met if it is an enemy, with its distance.
    fn first_enemy_on_ray(&self, from: Square, color: Color, df: i8, dr: i8) -> Option<(u8, PieceKind)> {
        let mut distance = 1u8;
        let mut next = from.offset(df, dr);
        while let Some(sq) = next {
            if let Some(p) = self.piece(sq) {
                return (p.color != color).then_some((distance, p.kind));
            }
            distance += 1;
            next = sq.offset(df, dr);
        }
        None
    }

    /// Every square reachable by a pseudo-legal move of some `color` piece.
    pub fn attacking_fields(&self, color: Color) -> BTreeSet<Square> {
        self.pieces_of(color)
            .flat_map(|(sq, piece)| self.piece_moves(piece, sq))
            .collect()
    }

    /// True if `color` currently attacks the opposing king. No opposing king means no attack.
    pub fn is_attacking_king(&self, color: Color) -> bool {
        self.pieces_of(!color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .is_some_and(|(sq, _)| self.is_piece_under_attack(sq))
    }

    /// Side to move is in check.
    pub fn has_playing_player_check(&self) -> bool {
        self.is_attacking_king(self.non_playing_color())
    }

    /// Side that just moved left its own king attacked.
    pub fn has_non_playing_player_check(&self) -> bool {
        self.is_attacking_king(self.playing_color())
    }

    /// Cheapest `color` piece whose pseudo-legal moves reach `sq`, by material value.
    pub fn lowest_value_piece_attacking(&self, sq: Square, color: Color) -> Option<u8> {
        self.pieces_of(color)
            .filter(|(from, piece)| self.piece_moves(*piece, *from).contains(&sq))
            .map(|(_, piece)| piece.value())
            .min()
    }
}
