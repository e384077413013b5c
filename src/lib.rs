// Mailbox chess rules engine with a depth-limited minimax AI
pub mod board;
pub mod error;
pub mod game;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::{Board, Color, Configuration, MoveMap, Piece, PieceKind, Position, Snapshot, Square};
pub use error::{EngineError, Result};
pub use game::{Game, HistoryEntry};
pub use search::ScoredMove;
