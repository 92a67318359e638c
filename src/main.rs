//! Command-line front end for the gobot engine.
//!
//! The binary wires the library to the built-in uniform oracle, which
//! makes it handy for poking at positions offline; production runs the
//! same library against a real model.
//!
//! ## Usage
//!
//! - `gobot find <fen>` - Search a position and play the best move
//! - `gobot advise <fen>` - Rank candidate moves without searching
//! - `gobot demo` - Run a short search on the empty board

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gobot::engine::Engine;
use gobot::fen::{decode, format_move};
use gobot::oracle::UniformOracle;

/// Gobot: an oracle-guided Go move-search engine
#[derive(Parser)]
#[command(name = "gobot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a position and print the chosen move
    Find {
        /// Position in run-length notation
        fen: String,
        /// Search budget in milliseconds
        #[arg(long, default_value_t = 1000)]
        timeout: u64,
    },
    /// Rank candidate moves without spending any rollouts
    Advise {
        /// Position in run-length notation
        fen: String,
        /// Dropoff ratio for the candidate filter
        #[arg(long, default_value_t = 2.0)]
        coeff: f32,
    },
    /// Run a short search on the empty board
    Demo,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let engine = Engine::new(UniformOracle::default());

    match cli.command {
        Some(Commands::Find { fen, timeout }) => {
            let mut sink = |line: &str| println!("  {line}");
            let result =
                engine.find_move(&fen, Some(Duration::from_millis(timeout)), &mut sink)?;
            println!(
                "move = {}, value = {:.1}, time = {} ms",
                format_move(result.mv),
                result.confidence,
                result.elapsed.as_millis()
            );
            println!("{}", result.fen);
        }
        Some(Commands::Advise { fen, coeff }) => {
            let mut sink = |_: &str| {};
            for advice in engine.advisor(0, &fen, coeff, &mut sink)? {
                println!("move = {}, value = {:.1}", advice.mv, advice.weight);
            }
        }
        Some(Commands::Demo) | None => run_demo(&engine)?,
    }
    Ok(())
}

fn run_demo(engine: &Engine<UniformOracle>) -> Result<()> {
    println!("Gobot: oracle-guided Go move search\n");
    println!("Searching the empty board with the uniform oracle...");
    let empty = vec!["991"; 19].join("/");
    let mut sink = |line: &str| println!("  {line}");
    let result = engine.find_move(&empty, Some(Duration::from_millis(500)), &mut sink)?;
    println!("Best move: {}", format_move(result.mv));
    println!("Position after: {}", result.fen);
    println!("{}", decode(&result.fen)?.board);
    Ok(())
}
