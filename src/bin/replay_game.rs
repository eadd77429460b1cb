//! Replays a move list (or a PGN file) and prints the resulting position.
//!
//! Usage:
//! `cargo run --bin replay_game -- e4 e5 Nf3 Nc6`
//! `cargo run --bin replay_game -- --fen "<FEN>" Qf7`
//! `cargo run --bin replay_game -- --pgn game.pgn`
//! `cargo run --bin replay_game -- --perft 3`
//!
//! `CHESS_ARBITER_CASTLING` and `CHESS_ARBITER_PROMOTION` configure the
//! engine; `RUST_LOG` controls log output (default `info`).

use std::process::ExitCode;

use chess_arbiter::move_generation::perft::perft;
use chess_arbiter::utils::pgn::read_pgn;
use chess_arbiter::utils::render_game_state::render_game_state;
use chess_arbiter::{EngineConfig, GameEngine};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    fen: Option<String>,
    pgn_path: Option<String>,
    perft_depth: Option<u8>,
    moves: Vec<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fen" => args.fen = Some(iter.next().ok_or("--fen needs a value")?),
            "--pgn" => args.pgn_path = Some(iter.next().ok_or("--pgn needs a path")?),
            "--perft" => {
                let depth = iter.next().ok_or("--perft needs a depth")?;
                args.perft_depth = Some(
                    depth
                        .parse::<u8>()
                        .map_err(|_| format!("invalid perft depth '{depth}'"))?,
                );
            }
            _ => args.moves.push(arg),
        }
    }

    Ok(args)
}

fn run(args: Args) -> Result<(), String> {
    let config = EngineConfig::from_env();

    let engine = if let Some(path) = &args.pgn_path {
        let text = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
        let game = read_pgn(&text, config).map_err(|e| e.to_string())?;
        let mut engine =
            GameEngine::from_fen(&game.final_state.get_fen(), config).map_err(|e| e.to_string())?;
        engine.replay(&args.moves).map_err(|e| e.to_string())?;
        println!("Result: {}", game.result);
        engine
    } else {
        let mut engine = match &args.fen {
            Some(fen) => GameEngine::from_fen(fen, config).map_err(|e| e.to_string())?,
            None => GameEngine::with_config(config),
        };
        engine.replay(&args.moves).map_err(|e| e.to_string())?;
        engine
    };

    println!("{}", render_game_state(&engine.state()));

    if let Some(depth) = args.perft_depth {
        let counts = perft(&engine.state(), depth, config.castling).map_err(|e| e.to_string())?;
        println!("perft({depth}) = {} {:?}", counts.nodes, counts);
    }

    if args.pgn_path.is_none() && !engine.move_history().is_empty() {
        println!();
        print!("{}", engine.to_pgn());
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let result = parse_args().and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
