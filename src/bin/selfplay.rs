use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rookbot::selfplay::{generate_games, write_jsonl, Outcome, SelfPlayParams};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rookbot-selfplay", about = "Play AI-vs-AI games and write them as JSON lines")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 1)]
    white_level: u8,
    #[arg(long, default_value_t = 1)]
    black_level: u8,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Starting position as a JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let start = match &a.config {
        Some(path) => Some(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => None,
    };
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        threads: a.threads,
        white_level: a.white_level,
        black_level: a.black_level,
        seed: a.seed,
        start,
    };

    let bar = ProgressBar::new(a.games as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games ({elapsed})")?);
    let games = generate_games(&params, |_| bar.inc(1))?;
    bar.finish();

    let mates = games.iter().filter(|g| g.outcome == Outcome::Checkmate).count();
    let stalemates = games.iter().filter(|g| g.outcome == Outcome::Stalemate).count();
    eprintln!("{} games: {} checkmates, {} stalemates, {} unfinished", games.len(), mates, stalemates, games.len() - mates - stalemates);
    write_jsonl(&games, &a.out)?;
    eprintln!("Wrote {}", a.out.display());
    Ok(())
}
