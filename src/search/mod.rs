//! AI move search: static evaluation, level table, jitter and the recursive minimax.

pub mod eval;
pub mod level;
pub mod minimax;
pub mod noise;
pub mod pst;

pub use level::{LevelDepth, AI_LEVELS};
pub use minimax::{NodeScore, ScoredMove};
