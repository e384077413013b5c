use crate::error::{EngineError, Result};

/// Levels callers may request.
pub const AI_LEVELS: [u8; 5] = [0, 1, 2, 3, 4];

/// Ply bounds for one level. `base` bounds quiet lines, `extended` bounds capture and check lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelDepth {
    pub base: u32,
    pub extended: u32,
}

// One entry past the top level so the low-material bump always has a row.
const LEVEL_DEPTHS: [LevelDepth; 6] = [
    LevelDepth { base: 1, extended: 1 },
    LevelDepth { base: 2, extended: 2 },
    LevelDepth { base: 2, extended: 3 },
    LevelDepth { base: 3, extended: 4 },
    LevelDepth { base: 3, extended: 5 },
    LevelDepth { base: 4, extended: 5 },
];

pub fn validate(level: u8) -> Result<u8> {
    if AI_LEVELS.contains(&level) {
        Ok(level)
    } else {
        let valid = AI_LEVELS.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(",");
        Err(EngineError::InvalidLevel { level, valid })
    }
}

/// Depth bounds for an effective level (a validated level, possibly bumped by one).
pub fn depth(level: u8) -> LevelDepth {
    LEVEL_DEPTHS[(level as usize).min(LEVEL_DEPTHS.len() - 1)]
}
