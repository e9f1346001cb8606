use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Phase of the two-flip comparison cycle.
///
/// Valid transitions:
/// - Idle -> AwaitingSecond (first card of a pair flipped)
/// - AwaitingSecond -> Idle (second card matched)
/// - AwaitingSecond -> Locked (second card mismatched)
/// - Locked -> Idle (mismatch concealed)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurnState {
    Idle,
    AwaitingSecond { first: Coord2 },
    Locked { first: Coord2, second: Coord2 },
}

impl TurnState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked { .. })
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Turn-resolution engine over a 4x4 board of colour pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEngine {
    board: Array2<Card>,
    state: TurnState,
    score: i32,
    matched_pairs: u8,
}

impl MatchEngine {
    pub fn new(layout: CardLayout) -> Self {
        Self {
            board: layout.colours.mapv(Card::new),
            state: Default::default(),
            score: 0,
            matched_pairs: 0,
        }
    }

    pub const fn state(&self) -> TurnState {
        self.state
    }

    pub const fn score(&self) -> i32 {
        self.score
    }

    pub const fn matched_pairs(&self) -> u8 {
        self.matched_pairs
    }

    pub const fn is_game_over(&self) -> bool {
        self.matched_pairs == PAIR_COUNT
    }

    /// Whether flips are accepted right now; false for the whole interval
    /// between a mismatch and its concealment.
    pub const fn clicks_allowed(&self) -> bool {
        !self.state.is_locked()
    }

    /// The first card of an in-progress comparison, if one is pending.
    pub const fn pending_card(&self) -> Option<Coord2> {
        match self.state {
            TurnState::AwaitingSecond { first } => Some(first),
            _ => None,
        }
    }

    pub const fn size(&self) -> Coord2 {
        (BOARD_SIDE, BOARD_SIDE)
    }

    pub fn card_at(&self, coords: Coord2) -> Card {
        self.board[coords.to_nd_index()]
    }

    /// Flips the card at `coords` and resolves the comparison it completes.
    ///
    /// A click on a face-up card, or any click while the board is locked, is
    /// absorbed as [`TurnOutcome::NoChange`].
    pub fn play_turn(&mut self, coords: Coord2) -> Result<TurnOutcome> {
        use TurnOutcome::*;

        let coords = self.validate_coords(coords)?;

        if !self.clicks_allowed() || self.board[coords.to_nd_index()].is_face_up() {
            return Ok(NoChange);
        }

        {
            let card = &mut self.board[coords.to_nd_index()];
            card.set_face_up(true);
            card.set_selected(true);
        }
        log::trace!("flipped {:?} showing {}", coords, self.card_at(coords).colour());

        let TurnState::AwaitingSecond { first } = self.state else {
            self.state = TurnState::AwaitingSecond { first: coords };
            return Ok(Flipped);
        };

        if self.card_at(first).colour() == self.card_at(coords).colour() {
            self.score += 1;
            self.matched_pairs += 1;
            self.board[first.to_nd_index()].set_selected(false);
            self.board[coords.to_nd_index()].set_selected(false);
            self.state = TurnState::Idle;
            log::debug!(
                "matched {} ({} of {} pairs)",
                self.card_at(coords).colour(),
                self.matched_pairs,
                PAIR_COUNT
            );
            Ok(if self.is_game_over() { Won } else { Matched })
        } else {
            self.score -= 1;
            self.state = TurnState::Locked {
                first,
                second: coords,
            };
            log::debug!("mismatch at {:?} / {:?}, board locked", first, coords);
            Ok(Mismatched)
        }
    }

    /// Turns a mismatched pair face-down again and unlocks the board.
    pub fn conceal_mismatch(&mut self) -> ConcealOutcome {
        let TurnState::Locked { first, second } = self.state else {
            return ConcealOutcome::NoChange;
        };

        for coords in [first, second] {
            let card = &mut self.board[coords.to_nd_index()];
            card.set_face_up(false);
            card.set_selected(false);
        }
        self.state = TurnState::Idle;
        ConcealOutcome::Concealed
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < BOARD_SIDE && coords.1 < BOARD_SIDE {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}
