use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::*;

/// Opaque identifier of a game session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Valid transitions:
/// - Created -> Active
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No mine layout yet
    Created,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Created
    }
}

/// Result of a reveal that passed every precondition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayOutcome {
    /// Target was not hidden, nothing changed.
    AlreadyRevealed,
    HitMine,
    Revealed { cells: CellCount, won: bool },
}

/// Read-only copy of what a player may see of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    pub view: Grid<PlayerCell>,
    pub revealed_count: CellCount,
    pub game_over: bool,
    pub game_won: bool,
}

/// One game from creation to its terminal state.
///
/// Not synchronized: callers must hold exclusive access for a whole
/// [`GameSession::reveal_at`] call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    id: SessionId,
    config: GameConfig,
    board: Option<Board>,
    revealed_count: CellCount,
    state: SessionState,
}

impl GameSession {
    pub fn new(id: SessionId, config: GameConfig) -> Self {
        Self {
            id,
            config,
            board: None,
            revealed_count: 0,
            state: Default::default(),
        }
    }

    /// Starts an active session on a known mine layout.
    pub fn with_layout(id: SessionId, layout: MineLayout) -> Result<Self> {
        let config = layout.game_config()?;
        let view = Grid::new(layout.size());
        let mut session = Self::new(id, config);
        session.store_board(Board { layout, view });
        Ok(session)
    }

    /// Generates the mine layout; only allowed once.
    pub fn initialize<G: MineLayoutGenerator>(&mut self, generator: G) -> Result<()> {
        if self.board.is_some() {
            return Err(GameError::AlreadyInitialized);
        }

        let board = generator.generate_board(self.config);
        if board.layout.size() != self.config.size() || board.view.size() != self.config.size() {
            return Err(GameError::InvalidBoardShape);
        }
        self.store_board(board);
        log::debug!("Session {} initialized", self.id);
        Ok(())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn game_over(&self) -> bool {
        matches!(self.state, SessionState::Lost)
    }

    pub fn game_won(&self) -> bool {
        matches!(self.state, SessionState::Won)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn layout(&self) -> Option<&MineLayout> {
        self.board.as_ref().map(|board| &board.layout)
    }

    pub fn view(&self) -> Option<&Grid<PlayerCell>> {
        self.board.as_ref().map(|board| &board.view)
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<PlayerCell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.view().map_or(PlayerCell::Hidden, |view| view[coords]))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            width: self.config.width(),
            height: self.config.height(),
            mines: self.config.mines(),
            view: self
                .view()
                .cloned()
                .unwrap_or_else(|| Grid::new(self.config.size())),
            revealed_count: self.revealed_count,
            game_over: self.game_over(),
            game_won: self.game_won(),
        }
    }

    /// Reveals the cell at `coords`.
    ///
    /// Nothing is mutated unless every check passes: the session must be
    /// initialized and not finished, and `coords` must be on the board.
    pub fn reveal_at(&mut self, coords: Coord2) -> Result<PlayOutcome> {
        self.check_playable()?;
        let coords = self.config.validate_coords(coords)?;

        let Some(board) = self.board.as_mut() else {
            return Err(GameError::NotInitialized);
        };
        if !board.view[coords].is_hidden() {
            return Ok(PlayOutcome::AlreadyRevealed);
        }

        Ok(match reveal(&board.layout, &mut board.view, coords) {
            RevealOutcome::HitMine => {
                self.end_game(false);
                PlayOutcome::HitMine
            }
            RevealOutcome::Revealed(cells) => {
                self.revealed_count += cells;
                let safe_cells = self.config.safe_cells();
                assert!(
                    self.revealed_count <= safe_cells,
                    "revealed {} cells but only {} are safe",
                    self.revealed_count,
                    safe_cells
                );

                let won = self.revealed_count == safe_cells;
                if won {
                    self.end_game(true);
                }
                PlayOutcome::Revealed { cells, won }
            }
            RevealOutcome::NoChange => PlayOutcome::AlreadyRevealed,
        })
    }

    /// Fails with the error [`GameSession::reveal_at`] would give before it
    /// ever looks at coordinates.
    pub fn check_playable(&self) -> Result<()> {
        self.check_initialized()?;
        self.check_not_finished()
    }

    fn store_board(&mut self, board: Board) {
        self.board = Some(board);
        self.state = SessionState::Active;
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        log::debug!("Session {} ended, state: {:?}", self.id, self.state);
    }

    fn check_initialized(&self) -> Result<()> {
        if matches!(self.state, SessionState::Created) {
            Err(GameError::NotInitialized)
        } else {
            Ok(())
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
