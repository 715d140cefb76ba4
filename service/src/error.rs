use sweeper_core::{GameError, SessionId};
use sweeper_protocol::ErrorResponse;
use thiserror::Error;

use crate::StoreError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Game not found")]
    NotFound(SessionId),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Whether the caller's input was at fault, as opposed to the store.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Store(_))
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self)
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
