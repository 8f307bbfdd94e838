use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid width or height of game board")]
    InvalidDimensions,
    #[error("Requested mine count exceeds size of board")]
    MineCountOutOfRange,
    #[error("Coordinates outside of the board")]
    OutOfRange,
    #[error("Minefield shape does not match declared configuration")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
