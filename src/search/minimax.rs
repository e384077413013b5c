use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Square};
use crate::error::Result;
use crate::search::eval::{SCORE_MAX, SCORE_MIN};
use crate::search::level::{self, LevelDepth};
use crate::search::noise::jitter;

/// Past this many movable pieces, inner nodes skip the self-check filter.
pub const BRANCHING_SKIP_THRESHOLD: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub from: Square,
    pub to: Square,
    pub score: f64,
}

/// Score of a searched node; `terminal` marks a finished game found below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeScore {
    pub score: f64,
    pub terminal: bool,
}

impl Board {
    /// Every legal move for the side to move, scored and sorted best first.
    ///
    /// Jitter comes from `rng`; pass a seeded or mock generator for reproducible rankings.
    pub fn calculate_ai_moves<R: Rng + ?Sized>(&mut self, level: u8, rng: &mut R) -> Result<Vec<ScoredMove>> {
        let mut effective = level::validate(level)?;
        if self.should_increase_level() {
            effective += 1;
        }
        let depth = level::depth(effective);
        let ai_color = self.playing_color();
        let initial_score = self.calculate_score(ai_color);
        let half_move = self.position().half_move;

        let moves = self.moves();
        let mut scores = Vec::with_capacity(moves.values().map(Vec::len).sum());
        for (&from, targets) in &moves {
            let piece = self.piece_at(from);
            for &to in targets {
                let mut probe = *self;
                let capture = probe.piece(to).is_some();
                probe.apply_move(from, to, piece);
                let carried = if capture { probe.calculate_score(ai_color) } else { initial_score };
                let node = probe.test_move_scores(ai_color, depth, capture, Some(carried), 1);
                let score = node.score
                    + probe.calculate_score_by_pieces_location(ai_color)
                    + jitter(rng, half_move);
                log::trace!("candidate {from}{to} scored {score:.1}");
                scores.push(ScoredMove { from, to, score });
            }
        }

        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        log::debug!(
            "level {level} (effective {effective}) for {ai_color}: {} candidates, best {:?}",
            scores.len(),
            scores.first().map(|m| (m.from, m.to, m.score))
        );
        Ok(scores)
    }

    /// Best AI candidate, or `None` when the side to move has no legal moves.
    pub fn calculate_ai_move<R: Rng + ?Sized>(&mut self, level: u8, rng: &mut R) -> Result<Option<ScoredMove>> {
        Ok(self.calculate_ai_moves(level, rng)?.into_iter().next())
    }

    /// Minimax over the position reached after a candidate move, scored for `ai_color`.
    ///
    /// Lines in check are always extended up to `depth.extended`; quiet lines stop at
    /// `depth.base` and capture lines at `depth.extended`. `initial_score` carries the
    /// parent's static score when nothing was captured on the way down.
    pub fn test_move_scores(
        &mut self,
        ai_color: Color,
        depth: LevelDepth,
        capture: bool,
        initial_score: Option<f64>,
        ply: u32,
    ) -> NodeScore {
        let to_move = self.playing_color();
        let next_moves = if ply < depth.extended && self.has_playing_player_check() {
            Some(self.get_moves(to_move, None))
        } else if ply < depth.base || (capture && ply < depth.extended) {
            Some(self.get_moves(to_move, Some(BRANCHING_SKIP_THRESHOLD)))
        } else {
            None
        };

        if self.is_finished() {
            // sooner mates weigh more for both sides
            let bias = if to_move == ai_color { ply as f64 } else { -(ply as f64) };
            return NodeScore { score: self.calculate_score(ai_color) + bias, terminal: true };
        }

        let Some(next_moves) = next_moves else {
            let score = initial_score.unwrap_or_else(|| self.calculate_score(ai_color));
            return NodeScore { score, terminal: false };
        };

        let maximizing = to_move == ai_color;
        let mut best = if maximizing { SCORE_MIN } else { SCORE_MAX };
        'moves: for (from, targets) in next_moves {
            let piece = self.piece_at(from);
            for to in targets {
                let mut probe = *self;
                let capture = probe.piece(to).is_some();
                probe.apply_move(from, to, piece);
                if probe.has_non_playing_player_check() {
                    continue;
                }
                let carried = if capture { Some(probe.calculate_score(ai_color)) } else { initial_score };
                let child = probe.test_move_scores(ai_color, depth, capture, carried, ply + 1);
                best = if maximizing { best.max(child.score) } else { best.min(child.score) };
                if child.terminal {
                    break 'moves;
                }
            }
        }
        NodeScore { score: best, terminal: false }
    }
}
