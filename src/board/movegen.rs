//! Pseudo-legal move generation per piece kind, castling, and the legality filter.

use std::collections::{BTreeMap, BTreeSet};

use super::types::{Color, Piece, PieceKind, Square, DIAGONALS, ORTHOGONALS};
use super::Board;

/// Legal destinations keyed by origin square. A missing key means no moves from that square.
pub type MoveMap = BTreeMap<Square, Vec<Square>>;

/// Home squares one color's castling depends on. Path arrays end on the king's landing square.
struct CastlingSquares {
    king: Square,
    short_rook: Square,
    long_rook: Square,
    short_path: [Square; 2],
    long_path: [Square; 2],
    long_rook_path: Square,
}

const WHITE_CASTLING: CastlingSquares = CastlingSquares {
    king: Square::E1,
    short_rook: Square::H1,
    long_rook: Square::A1,
    short_path: [Square::F1, Square::G1],
    long_path: [Square::D1, Square::C1],
    long_rook_path: Square::B1,
};

const BLACK_CASTLING: CastlingSquares = CastlingSquares {
    king: Square::E8,
    short_rook: Square::H8,
    long_rook: Square::A8,
    short_path: [Square::F8, Square::G8],
    long_path: [Square::D8, Square::C8],
    long_rook_path: Square::B8,
};

fn castling_squares(color: Color) -> &'static CastlingSquares {
    match color {
        Color::White => &WHITE_CASTLING,
        Color::Black => &BLACK_CASTLING,
    }
}

impl Board {
    /// Pseudo-legal destinations for `piece` standing on `from`, in directional scan order.
    pub fn piece_moves(&self, piece: Piece, from: Square) -> Vec<Square> {
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(piece.color, from),
            PieceKind::Knight => self.knight_moves(piece.color, from),
            PieceKind::Bishop => self.sliding_moves(piece.color, from, &DIAGONALS),
            PieceKind::Rook => self.sliding_moves(piece.color, from, &ORTHOGONALS),
            PieceKind::Queen => {
                let mut moves = self.sliding_moves(piece.color, from, &ORTHOGONALS);
                moves.extend(self.sliding_moves(piece.color, from, &DIAGONALS));
                moves
            }
            PieceKind::King => self.king_moves(piece.color, from),
        }
    }

    pub fn pawn_moves(&self, color: Color, from: Square) -> Vec<Square> {
        let mut moves = Vec::new();
        if let Some(one) = from.front(color) {
            if self.is_empty(one) {
                moves.push(one);
                if from.rank() == color.pawn_rank() {
                    if let Some(two) = one.front(color) {
                        if self.is_empty(two) { moves.push(two); }
                    }
                }
            }
        }
        for target in [from.front_left(color), from.front_right(color)].into_iter().flatten() {
            let enemy = self.piece(target).is_some_and(|p| p.color != color);
            if enemy || self.position().en_passant == Some(target) {
                moves.push(target);
            }
        }
        moves
    }

    pub fn knight_moves(&self, color: Color, from: Square) -> Vec<Square> {
        from.knight_targets()
            .filter(|&to| !self.piece(to).is_some_and(|p| p.color == color))
            .collect()
    }

    pub fn king_moves(&self, color: Color, from: Square) -> Vec<Square> {
        ORTHOGONALS
            .iter()
            .chain(DIAGONALS.iter())
            .filter_map(|&(df, dr)| from.offset(df, dr))
            .filter(|&to| !self.piece(to).is_some_and(|p| p.color == color))
            .collect()
    }

    /// Walks each ray until blocked; an enemy-occupied square is the last one included.
    pub fn sliding_moves(&self, color: Color, from: Square, directions: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::new();
        for &(df, dr) in directions {
            let mut next = from.offset(df, dr);
            while let Some(to) = next {
                match self.piece(to) {
                    None => moves.push(to),
                    Some(p) => {
                        if p.color != color { moves.push(to); }
                        break;
                    }
                }
                next = to.offset(df, dr);
            }
        }
        moves
    }

    /// Castling destinations currently available to `color`'s king.
    pub fn castling_moves(&self, color: Color) -> Vec<Square> {
        let home = castling_squares(color);
        let rights = self.position().castling;
        if !rights.short(color) && !rights.long(color) {
            return Vec::new();
        }
        if self.piece(home.king) != Some(Piece::new(color, PieceKind::King)) {
            return Vec::new();
        }
        let rook = Some(Piece::new(color, PieceKind::Rook));
        let short_open = rights.short(color)
            && self.piece(home.short_rook) == rook
            && home.short_path.iter().all(|&sq| self.is_empty(sq));
        let long_open = rights.long(color)
            && self.piece(home.long_rook) == rook
            && self.is_empty(home.long_rook_path)
            && home.long_path.iter().all(|&sq| self.is_empty(sq));
        if !short_open && !long_open {
            return Vec::new();
        }

        let attacked: BTreeSet<Square> = self.attacking_fields(!color);
        if attacked.contains(&home.king) {
            return Vec::new();
        }
        let mut moves = Vec::new();
        if long_open && home.long_path.iter().all(|sq| !attacked.contains(sq)) {
            moves.push(home.long_path[1]);
        }
        if short_open && home.short_path.iter().all(|sq| !attacked.contains(sq)) {
            moves.push(home.short_path[1]);
        }
        moves
    }

    /// Moves for `color`.
    ///
    /// With `skip_test_threshold = Some(n)` and more than `n` movable pieces, the
    /// pseudo-legal map is returned as-is; moves in it may leave the mover in check.
    /// Otherwise each move is probed on a copy and kept only if the mover's king is
    /// safe afterwards. An empty result for the side to move finishes the game.
    ///
    /// The threshold must be at least 1; `Some(0)` skips the filter whenever anything can move.
    pub fn get_moves(&mut self, color: Color, skip_test_threshold: Option<usize>) -> MoveMap {
        let mut pseudo = MoveMap::new();
        let mut movable_pieces = 0usize;
        for (from, piece) in self.pieces_of(color) {
            let moves = self.piece_moves(piece, from);
            if !moves.is_empty() {
                movable_pieces += 1;
                pseudo.insert(from, moves);
            }
        }

        let castling = self.castling_moves(color);
        if !castling.is_empty() {
            pseudo.entry(castling_squares(color).king).or_default().extend(castling);
        }

        if let Some(threshold) = skip_test_threshold {
            if movable_pieces > threshold {
                return pseudo;
            }
        }

        let mut legal = MoveMap::new();
        for (from, targets) in pseudo {
            let piece = self.piece_at(from);
            let kept: Vec<Square> = targets
                .into_iter()
                .filter(|&to| {
                    let mut probe = *self;
                    probe.apply_move(from, to, piece);
                    !probe.is_attacking_king(!color)
                })
                .collect();
            if !kept.is_empty() {
                legal.insert(from, kept);
            }
        }

        if legal.is_empty() && color == self.playing_color() {
            let check = self.has_playing_player_check();
            let pos = self.position_mut();
            pos.is_finished = true;
            pos.check_mate = check;
            log::debug!("{color} has no legal moves: {}", if check { "checkmate" } else { "stalemate" });
        }
        legal
    }

    /// Full legal move map for the side to move.
    pub fn moves(&mut self) -> MoveMap {
        let color = self.playing_color();
        self.get_moves(color, None)
    }

    /// Legal destinations from one square for the side to move.
    pub fn moves_from(&mut self, from: Square) -> Vec<Square> {
        self.moves().remove(&from).unwrap_or_default()
    }
}
