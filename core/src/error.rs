use thiserror::Error;

use crate::GameId;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(&'static str),
    #[error("Game {0} not found")]
    GameNotFound(GameId),
    #[error("Game already completed, no new moves are accepted")]
    GameAlreadyCompleted,
    #[error("Cell is out of bounds")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, GameError>;
