use anyhow::Result;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rookbot::{Color, Game, Square};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against the RookBot AI", long_about = None)]
struct Args {
    /// AI level (0-4)
    #[arg(long, default_value_t = 2)]
    level: u8,

    /// Your color: 'w' for white, 'b' for black, 'n' to watch the AI play itself
    #[arg(long, default_value = "w")]
    color: String,

    /// Seed for the AI's move jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,

    /// Starting position as a JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final position as JSON
    #[arg(long)]
    json: bool,
}

fn parse_color(color_str: &str) -> Result<Option<Color>> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Some(Color::White)),
        "b" | "black" => Ok(Some(Color::Black)),
        "n" | "none" => Ok(None),
        _ => anyhow::bail!("Invalid color: use 'w', 'b' or 'n'"),
    }
}

/// Accepts `e2e4`, `E2E4` or `e2 e4`.
fn parse_move(input: &str) -> Option<(Square, Square)> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() != 4 || !compact.is_ascii() { return None; }
    let from = compact[0..2].parse().ok()?;
    let to = compact[2..4].parse().ok()?;
    Some((from, to))
}

fn get_human_move(game: &mut Game) -> Result<Option<(Square, Square)>> {
    let legal = game.moves(None)?;
    loop {
        print!("Enter your move (e.g., e2e4, or 'quit'): ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 { return Ok(None); }
        let input = input.trim();
        if input.eq_ignore_ascii_case("quit") { return Ok(None); }

        match parse_move(input) {
            Some((from, to)) if legal.get(&from).is_some_and(|t| t.contains(&to)) => return Ok(Some((from, to))),
            Some(_) => println!("Illegal move!"),
            None => println!("Invalid move format! Use format like 'e2e4'"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let human_color = parse_color(&args.color)?;
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut game = match &args.config {
        Some(path) => Game::from_json(&std::fs::read_to_string(path)?)?,
        None => Game::new(),
    };

    loop {
        let legal = game.moves(None)?;
        let board = game.board();
        if board.is_finished() || legal.is_empty() {
            if board.is_check_mate() {
                println!("\n{}\nCheckmate! {} wins!", board, board.non_playing_color());
            } else {
                println!("\n{}\nGame is a stalemate!", board);
            }
            break;
        }

        println!("\n{}'s turn", board.playing_color());
        println!("{}", board);

        if Some(board.playing_color()) == human_color {
            match get_human_move(&mut game)? {
                Some((from, to)) => { game.move_piece(&from.to_string(), &to.to_string())?; }
                None => break,
            }
        } else {
            if args.verbose { println!("Thinking..."); }
            let start_time = Instant::now();
            let best = game.ai_move(args.level, &mut rng)?;
            if args.verbose {
                println!("score {:.1}, elapsed {:.2}s", best.score, start_time.elapsed().as_secs_f32());
            }
            println!("Computer plays: {}{}", best.from, best.to);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.export_json())?);
    }
    Ok(())
}
