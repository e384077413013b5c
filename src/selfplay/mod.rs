use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::{Color, Configuration};
use crate::error::Result;
use crate::game::Game;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub threads: usize,
    pub white_level: u8,
    pub black_level: u8,
    pub seed: u64,
    pub start: Option<Configuration>, // defaults to the standard layout
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 1, max_plies: 200, threads: 1, white_level: 1, black_level: 1, seed: 42, start: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Checkmate,
    Stalemate,
    Unfinished,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub moves: Vec<String>,
    pub outcome: Outcome,
    pub winner: Option<Color>,
    pub final_position: Configuration,
}

/// Plays one AI-vs-AI game until it finishes or hits the ply cap.
pub fn play_game(params: &SelfPlayParams, seed: u64) -> Result<GameRecord> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = match &params.start {
        Some(c) => Game::from_configuration(c.clone()),
        None => Game::new(),
    };
    let mut moves = Vec::new();
    while moves.len() < params.max_plies && !game.board().is_finished() {
        let level = match game.board().playing_color() {
            Color::White => params.white_level,
            Color::Black => params.black_level,
        };
        // an empty legal set marks the game finished and ends the loop
        if game.moves(None)?.is_empty() { break; }
        let best = game.ai_move(level, &mut rng)?;
        moves.push(format!("{}{}", best.from, best.to));
    }
    let board = game.board();
    let outcome = if board.is_check_mate() {
        Outcome::Checkmate
    } else if board.is_finished() {
        Outcome::Stalemate
    } else {
        Outcome::Unfinished
    };
    let winner = (outcome == Outcome::Checkmate).then(|| board.non_playing_color());
    log::info!("seed {seed}: {outcome:?} after {} plies", moves.len());
    Ok(GameRecord { seed, moves, outcome, winner, final_position: board.configuration() })
}

/// Plays `params.games` games across a worker pool; game `i` uses seed `params.seed + i`.
pub fn generate_games<F>(params: &SelfPlayParams, on_game: F) -> Result<Vec<GameRecord>>
where
    F: Fn(&GameRecord) + Sync,
{
    let run = || {
        (0..params.games)
            .into_par_iter()
            .map(|i| {
                let record = play_game(params, params.seed.wrapping_add(i as u64))?;
                on_game(&record);
                Ok(record)
            })
            .collect::<Result<Vec<_>>>()
    };
    match rayon::ThreadPoolBuilder::new().num_threads(params.threads.max(1)).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            log::warn!("falling back to the global thread pool: {e}");
            run()
        }
    }
}

pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], path: P) -> std::io::Result<()> {
    if let Some(dir) = path.as_ref().parent() {
        if !dir.as_os_str().is_empty() { create_dir_all(dir)?; }
    }
    let mut w = BufWriter::new(File::create(path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()
}

pub fn read_jsonl<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<GameRecord>> {
    let f = BufReader::new(File::open(path)?);
    let mut games = Vec::new();
    for line in f.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        games.push(serde_json::from_str(&line)?);
    }
    Ok(games)
}
