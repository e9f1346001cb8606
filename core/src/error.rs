use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("A deck must hold exactly one colour per card")]
    WrongDeckSize,
    #[error("Unknown colour name")]
    UnknownColour,
}

pub type Result<T> = core::result::Result<T, GameError>;
