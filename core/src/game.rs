use rand::prelude::*;
use std::time::{Duration, Instant};

use crate::*;

/// How long a mismatched pair stays revealed before the board unlocks.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(2000);

/// Receives a signal after every observable change to the game.
///
/// No payload is pushed; the borrowed engine is there to be queried for
/// whatever the presentation layer needs to re-render.
pub trait UpdateListener {
    fn game_updated(&mut self, engine: &MatchEngine);
}

/// Adapts a closure to [`UpdateListener`].
pub struct OnUpdate<F>(pub F);

impl<F: FnMut(&MatchEngine)> UpdateListener for OnUpdate<F> {
    fn game_updated(&mut self, engine: &MatchEngine) {
        (self.0)(engine)
    }
}

/// A game from start to finish: the engine plus the reveal timer and the
/// update listener.
///
/// All mutation runs on the caller's thread. The deferred concealment of a
/// mismatched pair is a deadline checked by [`Game::tick`], not a background
/// timer, so turns and concealment share one logical timeline.
pub struct Game<L> {
    engine: MatchEngine,
    listener: L,
    rng: SmallRng,
    reveal_delay: Duration,
    conceal_at: Option<Instant>,
}

impl<L: UpdateListener> Game<L> {
    /// Fresh game over a shuffled default deck. `seed` makes the whole
    /// session reproducible: the initial board and every reset draw their
    /// layout from it.
    pub fn new(seed: u64, listener: L) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = ShuffledLayoutGenerator::new(rng.random()).generate();
        Self::from_parts(MatchEngine::new(layout), rng, listener)
    }

    /// Fresh game over a caller-supplied deck, placed row-major without
    /// shuffling. A deck that is not exactly one colour per card falls back
    /// to a shuffled default board.
    pub fn with_colours(deck: &[Colour], seed: u64, listener: L) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = CardLayout::from_deck(deck).unwrap_or_else(|err| {
            log::warn!(
                "deck of {} colours rejected ({err}), using a shuffled default board",
                deck.len()
            );
            ShuffledLayoutGenerator::new(rng.random()).generate()
        });
        Self::from_parts(MatchEngine::new(layout), rng, listener)
    }

    fn from_parts(engine: MatchEngine, rng: SmallRng, listener: L) -> Self {
        Self {
            engine,
            listener,
            rng,
            reveal_delay: DEFAULT_REVEAL_DELAY,
            conceal_at: None,
        }
    }

    pub const fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub const fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    pub fn set_reveal_delay(&mut self, delay: Duration) {
        self.reveal_delay = delay;
    }

    pub const fn score(&self) -> i32 {
        self.engine.score()
    }

    pub const fn is_game_over(&self) -> bool {
        self.engine.is_game_over()
    }

    /// Plays one flip at `coords`, notifying the listener on any observable
    /// change and once more the instant the game is won. A mismatch arms the
    /// conceal deadline at `now` plus the reveal delay.
    pub fn play_turn(&mut self, coords: Coord2, now: Instant) -> Result<TurnOutcome> {
        let outcome = self.engine.play_turn(coords)?;

        if matches!(outcome, TurnOutcome::Mismatched) {
            self.conceal_at = Some(now + self.reveal_delay);
        }
        if outcome.has_update() {
            self.notify();
        }
        if matches!(outcome, TurnOutcome::Won) {
            // the game-over signal, layered on the normal update
            self.notify();
        }

        Ok(outcome)
    }

    /// Checks the conceal deadline; once `now` reaches it the mismatched
    /// pair flips back, the board unlocks, and the listener is notified.
    pub fn tick(&mut self, now: Instant) -> ConcealOutcome {
        match self.conceal_at {
            Some(deadline) if now >= deadline => {
                self.conceal_at = None;
                let outcome = self.engine.conceal_mismatch();
                if outcome.has_update() {
                    self.notify();
                }
                outcome
            }
            _ => ConcealOutcome::NoChange,
        }
    }

    /// Replaces the board wholesale with a fresh shuffled default deck and
    /// zeroes the bookkeeping. An armed conceal deadline is disarmed so it
    /// cannot fire into the new board. Does not notify; callers refresh
    /// their own view.
    pub fn reset(&mut self) {
        let layout = ShuffledLayoutGenerator::new(self.rng.random()).generate();
        self.engine = MatchEngine::new(layout);
        self.conceal_at = None;
        log::debug!("game reset");
    }

    fn notify(&mut self) {
        self.listener.game_updated(&self.engine);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_listener() -> (Rc<Cell<u32>>, OnUpdate<impl FnMut(&MatchEngine)>) {
        let updates = Rc::new(Cell::new(0));
        let listener = OnUpdate({
            let updates = Rc::clone(&updates);
            move |_: &MatchEngine| updates.set(updates.get() + 1)
        });
        (updates, listener)
    }

    fn ordered_game() -> (Rc<Cell<u32>>, Game<OnUpdate<impl FnMut(&MatchEngine)>>) {
        let (updates, listener) = counting_listener();
        let game = Game::with_colours(&CardLayout::default_deck(), 7, listener);
        (updates, game)
    }

    #[test]
    fn custom_deck_is_placed_in_order() {
        let deck = CardLayout::default_deck();
        let (_, game) = ordered_game();

        for row in 0..BOARD_SIDE {
            for col in 0..BOARD_SIDE {
                let flat = (row as usize) * (BOARD_SIDE as usize) + (col as usize);
                assert_eq!(game.engine().card_at((row, col)).colour(), deck[flat]);
            }
        }
    }

    #[test]
    fn wrong_deck_size_falls_back_to_a_shuffled_default_board() {
        let (_, listener) = counting_listener();
        let game = Game::with_colours(&[Colour::Red; 3], 7, listener);

        for colour in Colour::ALL {
            let count = (0..BOARD_SIDE)
                .flat_map(|row| (0..BOARD_SIDE).map(move |col| (row, col)))
                .filter(|&coords| game.engine().card_at(coords).colour() == colour)
                .count();
            assert_eq!(count, 2);
        }
    }

    #[test]
    fn each_flip_notifies_once() {
        let (updates, mut game) = ordered_game();
        let t0 = Instant::now();

        game.play_turn((0, 0), t0).unwrap();
        assert_eq!(updates.get(), 1);

        game.play_turn((0, 1), t0).unwrap();
        assert_eq!(updates.get(), 2);
    }

    #[test]
    fn absorbed_clicks_do_not_notify() {
        let (updates, mut game) = ordered_game();
        let t0 = Instant::now();
        game.play_turn((0, 0), t0).unwrap();

        game.play_turn((0, 0), t0).unwrap();

        assert_eq!(updates.get(), 1);
    }

    #[test]
    fn mismatch_stays_revealed_until_the_deadline() {
        let (updates, mut game) = ordered_game();
        let t0 = Instant::now();

        game.play_turn((0, 0), t0).unwrap();
        let outcome = game.play_turn((0, 2), t0).unwrap();

        assert_eq!(outcome, TurnOutcome::Mismatched);
        assert_eq!(game.score(), -1);
        assert!(!game.engine().clicks_allowed());
        for coords in [(0, 0), (0, 2)] {
            assert!(game.engine().card_at(coords).is_face_up());
            assert!(game.engine().card_at(coords).is_selected());
        }

        // input during the lock window is absorbed
        assert_eq!(
            game.play_turn((1, 0), t0).unwrap(),
            TurnOutcome::NoChange
        );

        // too early: nothing happens
        assert_eq!(game.tick(t0), ConcealOutcome::NoChange);
        assert!(!game.engine().clicks_allowed());

        let concealed = game.tick(t0 + DEFAULT_REVEAL_DELAY);

        assert_eq!(concealed, ConcealOutcome::Concealed);
        assert!(game.engine().clicks_allowed());
        for coords in [(0, 0), (0, 2)] {
            assert!(!game.engine().card_at(coords).is_face_up());
            assert!(!game.engine().card_at(coords).is_selected());
        }
        assert_eq!(updates.get(), 3); // two flips + the concealment
    }

    #[test]
    fn reveal_delay_is_adjustable() {
        let (_, mut game) = ordered_game();
        game.set_reveal_delay(Duration::from_millis(10));
        let t0 = Instant::now();

        game.play_turn((0, 0), t0).unwrap();
        game.play_turn((0, 2), t0).unwrap();

        assert_eq!(game.tick(t0 + Duration::from_millis(9)), ConcealOutcome::NoChange);
        assert_eq!(
            game.tick(t0 + Duration::from_millis(10)),
            ConcealOutcome::Concealed
        );
    }

    #[test]
    fn winning_turn_signals_game_over_separately() {
        let (updates, mut game) = ordered_game();
        let t0 = Instant::now();

        for pair in 0..PAIR_COUNT {
            let first = 2 * pair;
            let second = first + 1;
            game.play_turn((first / 4, first % 4), t0).unwrap();
            game.play_turn((second / 4, second % 4), t0).unwrap();
        }

        assert!(game.is_game_over());
        assert_eq!(game.score(), 8);
        // two notifications per turn pair, plus the extra game-over signal
        assert_eq!(updates.get(), u32::from(PAIR_COUNT) * 2 + 1);
    }

    #[test]
    fn reset_zeroes_the_game_and_disarms_the_deadline() {
        let (updates, mut game) = ordered_game();
        let t0 = Instant::now();

        game.play_turn((0, 0), t0).unwrap();
        game.play_turn((0, 1), t0).unwrap(); // match
        game.play_turn((0, 2), t0).unwrap();
        game.play_turn((1, 0), t0).unwrap(); // mismatch, deadline armed
        let before_reset = updates.get();

        game.reset();

        assert_eq!(game.score(), 0);
        assert_eq!(game.engine().matched_pairs(), 0);
        assert!(game.engine().clicks_allowed());
        assert_eq!(updates.get(), before_reset); // reset itself is silent
        for row in 0..BOARD_SIDE {
            for col in 0..BOARD_SIDE {
                assert!(!game.engine().card_at((row, col)).is_face_up());
            }
        }

        // the stale deadline must not touch the new board
        assert_eq!(
            game.tick(t0 + DEFAULT_REVEAL_DELAY * 2),
            ConcealOutcome::NoChange
        );
        assert_eq!(updates.get(), before_reset);
    }

    #[test]
    fn same_seed_builds_the_same_session() {
        let (_, first_listener) = counting_listener();
        let (_, second_listener) = counting_listener();
        let first = Game::new(99, first_listener);
        let second = Game::new(99, second_listener);

        assert_eq!(first.engine(), second.engine());
    }
}
