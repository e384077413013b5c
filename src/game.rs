//! Game session: drives a [`Board`] through validated moves and keeps history.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Configuration, MoveMap, Snapshot, Square};
use crate::error::{EngineError, Result};
use crate::search::ScoredMove;

/// One applied move and the configuration it was played from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub from: Square,
    pub to: Square,
    pub configuration: Configuration,
}

#[derive(Clone, Debug, Default)]
pub struct Game {
    board: Board,
    history: Vec<HistoryEntry>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_configuration(configuration: Configuration) -> Self {
        Self { board: Board::from(configuration), history: Vec::new() }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self { board: Board::from_json(json)?, history: Vec::new() })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays `from -> to` for the side to move. Labels are case-insensitive.
    pub fn move_piece(&mut self, from: &str, to: &str) -> Result<(Square, Square)> {
        let from: Square = from.parse()?;
        let to: Square = to.parse()?;
        self.play(from, to)
    }

    fn play(&mut self, from: Square, to: Square) -> Result<(Square, Square)> {
        if self.board.is_finished() {
            return Err(EngineError::GameFinished);
        }
        let color = self.board.playing_color();
        let legal = self.board.moves();
        if !legal.get(&from).is_some_and(|targets| targets.contains(&to)) {
            return Err(EngineError::IllegalMove { from, to, color });
        }
        let configuration = self.board.configuration();
        self.board.move_piece(from, to)?;
        self.history.push(HistoryEntry { from, to, configuration });

        // surface mate/stalemate right after the move
        self.board.moves();
        if self.board.is_finished() {
            log::info!(
                "game finished after {} plies: {}",
                self.history.len(),
                if self.board.is_check_mate() { "checkmate" } else { "stalemate" }
            );
        }
        Ok((from, to))
    }

    /// Legal moves for the side to move, optionally only those from one square.
    pub fn moves(&mut self, from: Option<&str>) -> Result<MoveMap> {
        let mut all = self.board.moves();
        match from {
            None => Ok(all),
            Some(label) => {
                let sq: Square = label.parse()?;
                Ok(all.remove(&sq).map(|targets| MoveMap::from([(sq, targets)])).unwrap_or_default())
            }
        }
    }

    pub fn set_piece(&mut self, square: &str, piece: &str) -> Result<()> {
        self.board.set_piece_str(square, piece)
    }

    pub fn remove_piece(&mut self, square: &str) -> Result<()> {
        self.board.remove_piece_str(square)
    }

    pub fn is_empty(&self, square: &str) -> Result<bool> {
        self.board.is_empty_str(square)
    }

    /// Plays the AI's best move and returns it.
    pub fn ai_move<R: Rng + ?Sized>(&mut self, level: u8, rng: &mut R) -> Result<ScoredMove> {
        if self.board.is_finished() {
            return Err(EngineError::GameFinished);
        }
        match self.board.calculate_ai_move(level, rng)? {
            Some(best) => {
                self.play(best.from, best.to)?;
                Ok(best)
            }
            None => Err(EngineError::GameFinished),
        }
    }

    pub fn history(&self, reversed: bool) -> Vec<&HistoryEntry> {
        if reversed { self.history.iter().rev().collect() } else { self.history.iter().collect() }
    }

    pub fn export_json(&mut self) -> Snapshot {
        self.board.export_json()
    }
}
