use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Width and height should be > 0")]
    InvalidDimensions,
    #[error("Width and height should be at most 65535")]
    BoardTooLarge,
    #[error("At least one mine is required")]
    NoMines,
    #[error("Too many mines for the given board size")]
    TooManyMines,
    #[error("Out of bounds")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board already initialized")]
    AlreadyInitialized,
    #[error("Board not initialized yet")]
    NotInitialized,
    #[error("Game already finished.")]
    AlreadyEnded,
}

impl GameError {
    /// Whether the error rejects the requested game configuration.
    pub const fn is_config_error(self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions | Self::BoardTooLarge | Self::NoMines | Self::TooManyMines
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
