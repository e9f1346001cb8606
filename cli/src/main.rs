use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use huemory_core::Game;
use rand::prelude::*;

use crate::app::{ConsoleRenderer, parse_deck, run_loop};

mod app;

#[derive(Parser, Debug)]
#[command(version, about = "Colour-pair memory game for the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Comma-separated list of 16 colour names, placed row-major unshuffled
    #[arg(long)]
    deck: Option<String>,

    /// How long a mismatched pair stays revealed, in milliseconds
    #[arg(long, default_value_t = 2000)]
    reveal_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("seed: {seed}");

    let renderer = ConsoleRenderer::new(io::stdout());
    let mut game = match &args.deck {
        Some(names) => {
            let deck = parse_deck(names).context("could not parse --deck")?;
            Game::with_colours(&deck, seed, renderer)
        }
        None => Game::new(seed, renderer),
    };
    game.set_reveal_delay(Duration::from_millis(args.reveal_ms));

    let stdin = io::stdin();
    run_loop(&mut game, stdin.lock(), io::stdout())
}
