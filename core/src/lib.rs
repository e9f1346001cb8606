use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod game;
mod generator;
mod types;

/// Colour arrangement of a 4x4 board, fixed at initialization.
///
/// This is the immutable half of a board: which colour sits where. The
/// mutable per-card flags live in [`MatchEngine`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    pub(crate) colours: Array2<Colour>,
}

impl CardLayout {
    /// The fixed deck of eight colour pairs in canonical order.
    pub fn default_deck() -> [Colour; CARD_COUNT] {
        core::array::from_fn(|i| Colour::ALL[i / 2])
    }

    /// Places `colours` row-major: cell `(r, c)` holds `colours[4r + c]`.
    pub fn from_colours(colours: [Colour; CARD_COUNT]) -> Self {
        let side = BOARD_SIDE as usize;
        let colours = Array2::from_shape_vec((side, side), colours.to_vec())
            .expect("a full deck fills the board");
        Self { colours }
    }

    /// Length-checked variant of [`CardLayout::from_colours`] for decks
    /// assembled at runtime.
    pub fn from_deck(deck: &[Colour]) -> Result<Self> {
        let colours: [Colour; CARD_COUNT] =
            deck.try_into().map_err(|_| GameError::WrongDeckSize)?;
        Ok(Self::from_colours(colours))
    }

    pub const fn size(&self) -> Coord2 {
        (BOARD_SIDE, BOARD_SIDE)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < BOARD_SIDE && coords.1 < BOARD_SIDE {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn colour_at(&self, coords: Coord2) -> Colour {
        self[coords]
    }
}

impl Index<Coord2> for CardLayout {
    type Output = Colour;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.colours[coords.to_nd_index()]
    }
}

/// Outcome of a single [`MatchEngine::play_turn`] call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TurnOutcome {
    NoChange,
    Flipped,
    Matched,
    Mismatched,
    Won,
}

impl TurnOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use TurnOutcome::*;
        match self {
            NoChange => false,
            Flipped => true,
            Matched => true,
            Mismatched => true,
            Won => true,
        }
    }
}

/// Outcome of concealing a pending mismatch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConcealOutcome {
    NoChange,
    Concealed,
}

impl ConcealOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Concealed => true,
        }
    }
}
