use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("Board dimensions and mine count must be positive")]
    EmptyBoard,
    #[error("Too many mines to keep the first click and its neighbors safe")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
