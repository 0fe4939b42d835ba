use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration, the board needs a non-zero size and at least one safe cell")]
    InvalidConfiguration,
    #[error("Coordinates are outside the grid")]
    OutOfBounds,
    #[error("Game already ended, no new moves are accepted")]
    SessionTerminated,
}

pub type Result<T> = core::result::Result<T, GameError>;
