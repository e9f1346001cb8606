use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{GameError, PAIR_COUNT};

/// Colour identity shared by exactly one pair of cards on a full board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Cyan,
    Orange,
    Magenta,
}

impl Colour {
    pub const ALL: [Colour; PAIR_COUNT as usize] = [
        Colour::Red,
        Colour::Blue,
        Colour::Green,
        Colour::Yellow,
        Colour::Purple,
        Colour::Cyan,
        Colour::Orange,
        Colour::Magenta,
    ];

    pub const fn name(self) -> &'static str {
        use Colour::*;
        match self {
            Red => "Red",
            Blue => "Blue",
            Green => "Green",
            Yellow => "Yellow",
            Purple => "Purple",
            Cyan => "Cyan",
            Orange => "Orange",
            Magenta => "Magenta",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colour {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Colour::*;
        Ok(match s.to_ascii_lowercase().as_str() {
            "red" => Red,
            "blue" => Blue,
            "green" => Green,
            "yellow" => Yellow,
            "purple" => Purple,
            "cyan" => Cyan,
            "orange" => Orange,
            "magenta" => Magenta,
            _ => return Err(GameError::UnknownColour),
        })
    }
}

/// A single card: an immutable colour plus the two player-visible flags.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    colour: Colour,
    face_up: bool,
    selected: bool,
}

impl Card {
    pub const fn new(colour: Colour) -> Self {
        Self {
            colour,
            face_up: false,
            selected: false,
        }
    }

    pub const fn colour(self) -> Colour {
        self.colour
    }

    pub const fn is_face_up(self) -> bool {
        self.face_up
    }

    /// Highlight hint for the presentation layer; carries no game logic.
    pub const fn is_selected(self) -> bool {
        self.selected
    }

    pub(crate) fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
