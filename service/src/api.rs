use sweeper_core::SessionId;
use sweeper_protocol::{CreateGameRequest, GameState, RevealRequest, RevealResponse};

use crate::*;

/// Wire-level entry points, mapping protocol requests onto [`GameService`].
impl<S: SessionStore> GameService<S> {
    pub fn create_game(&self, request: CreateGameRequest) -> Result<GameState> {
        let config = request.into_config()?;
        let snapshot = self.create_session(config)?;
        Ok(GameState::from(&snapshot))
    }

    pub fn get_game(&self, id: SessionId) -> Result<GameState> {
        Ok(GameState::from(&self.get_session(id)?))
    }

    /// Checks in order: unknown id, finished game, then the coordinates.
    pub fn reveal_request(&self, id: SessionId, request: &RevealRequest) -> Result<RevealReport> {
        self.reveal_with(id, || request.coords())
    }

    pub fn reveal_cell(&self, id: SessionId, request: &RevealRequest) -> Result<RevealResponse> {
        let report = self.reveal_request(id, request)?;
        Ok(RevealResponse::new(report.outcome, &report.snapshot))
    }
}
