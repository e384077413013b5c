use rookbot::perft::{divide, perft};
use rookbot::Board;
use std::time::Instant;

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for RookBot")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// JSON configuration file, or "startpos"
    #[arg(value_name = "CONFIG", default_value = "startpos")]
    config: String,
    /// Print node counts per root move
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    use clap::Parser;
    env_logger::init();
    let args = Args::parse();

    let board = if args.config == "startpos" {
        Board::new()
    } else {
        Board::from_json(&std::fs::read_to_string(&args.config)?)?
    };

    let t0 = Instant::now();
    let nodes = if args.divide {
        let split = divide(&board, args.depth);
        for (mv, n) in &split { println!("{mv}: {n}"); }
        split.iter().map(|(_, n)| n).sum()
    } else {
        perft(&board, args.depth)
    };
    let dt = t0.elapsed().as_secs_f64();

    if args.nps {
        let nps = if dt > 0.0 { nodes as f64 / dt } else { f64::INFINITY };
        println!("nodes: {} elapsed: {:.3}s nps: {:.0}", nodes, dt, nps);
    } else {
        println!("nodes: {}", nodes);
    }
    Ok(())
}
