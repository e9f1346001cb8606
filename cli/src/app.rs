use std::io::{BufRead, Write};
use std::thread;
use std::time::Instant;

use huemory_core::{
    BOARD_SIDE, Colour, Coord, Coord2, Game, MatchEngine, TurnOutcome, UpdateListener,
};

/// Prints the board and score after every game update.
pub struct ConsoleRenderer<W> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> UpdateListener for ConsoleRenderer<W> {
    fn game_updated(&mut self, engine: &MatchEngine) {
        if let Err(err) = render(&mut self.out, engine) {
            log::error!("could not render the board: {err}");
        }
    }
}

fn render<W: Write>(out: &mut W, engine: &MatchEngine) -> std::io::Result<()> {
    writeln!(out)?;
    for row in 0..BOARD_SIDE {
        for col in 0..BOARD_SIDE {
            let card = engine.card_at((row, col));
            if card.is_face_up() {
                // two-letter colour codes are unambiguous for this deck
                write!(out, "{} ", &card.colour().name()[..2])?;
            } else {
                write!(out, ".. ")?;
            }
        }
        writeln!(out)?;
    }

    if engine.is_game_over() {
        writeln!(out, "Game over! Your score: {}", engine.score())?;
    } else {
        writeln!(out, "Score: {}", engine.score())?;
    }
    Ok(())
}

/// Parses a "row col" move; both values must be on the board.
pub fn parse_move(line: &str) -> Option<Coord2> {
    let mut parts = line.split_whitespace();
    let row: Coord = parts.next()?.parse().ok()?;
    let col: Coord = parts.next()?.parse().ok()?;

    if parts.next().is_some() || row >= BOARD_SIDE || col >= BOARD_SIDE {
        return None;
    }
    Some((row, col))
}

/// Parses a comma- or space-separated list of colour names.
pub fn parse_deck(names: &str) -> anyhow::Result<Vec<Colour>> {
    names.split([',', ' '])
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<Colour>()
                .map_err(|err| anyhow::anyhow!("{name}: {err}"))
        })
        .collect()
}

/// Drives a game to completion over line-based input, then offers a rematch.
///
/// Reads from any [`BufRead`], so tests can script a whole session. After a
/// mismatch the reveal pause runs right here on the caller's thread: input
/// stays blocked for exactly the lock window, and the concealment is ticked
/// before the next prompt.
pub fn run_loop<L, R, W>(game: &mut Game<L>, mut input: R, mut out: W) -> anyhow::Result<()>
where
    L: UpdateListener,
    R: BufRead,
    W: Write,
{
    loop {
        while !game.is_game_over() {
            write!(out, "Enter your move (row col, for example: 0 0): ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            let Some(coords) = parse_move(&line) else {
                writeln!(out, "Invalid input. Enter two integers between 0 and 3.")?;
                continue;
            };

            let outcome = game.play_turn(coords, Instant::now())?;
            if matches!(outcome, TurnOutcome::Mismatched) {
                thread::sleep(game.reveal_delay());
                game.tick(Instant::now());
            }
        }

        write!(out, "Play again? (y/n): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || !line.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
        game.reset();
    }
}
