//! Wire format shared by game front ends.
//!
//! Boards travel as rows of strings: `""` for a hidden cell, `"M"` for a
//! revealed mine and `"0"` to `"8"` for a revealed count.

use serde::{Deserialize, Serialize};
use sweeper_core::{
    CellCount, Coord, Coord2, GameConfig, GameError, Grid, PlayOutcome, PlayerCell, SessionId,
    SessionSnapshot,
};
use thiserror::Error;

pub const DEFAULT_WIDTH: i64 = 10;
pub const DEFAULT_HEIGHT: i64 = 10;
pub const DEFAULT_MINES: i64 = 10;

const HIDDEN: &str = "";
const MINE: &str = "M";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unknown cell value {0:?}")]
    InvalidCell(String),
    #[error(transparent)]
    Game(#[from] GameError),
}

pub fn encode_cell(cell: PlayerCell) -> String {
    match cell {
        PlayerCell::Hidden => HIDDEN.to_owned(),
        PlayerCell::Mine => MINE.to_owned(),
        PlayerCell::Revealed(count) => count.to_string(),
    }
}

pub fn decode_cell(value: &str) -> Result<PlayerCell, ProtocolError> {
    match value {
        HIDDEN => Ok(PlayerCell::Hidden),
        MINE => Ok(PlayerCell::Mine),
        _ => match value.parse::<u8>() {
            Ok(count) if count <= 8 => Ok(PlayerCell::Revealed(count)),
            _ => Err(ProtocolError::InvalidCell(value.to_owned())),
        },
    }
}

pub fn encode_board(view: &Grid<PlayerCell>) -> Vec<Vec<String>> {
    view.rows()
        .map(|row| row.iter().copied().map(encode_cell).collect())
        .collect()
}

pub fn decode_board(rows: &[Vec<String>]) -> Result<Grid<PlayerCell>, ProtocolError> {
    let cells = rows
        .iter()
        .map(|row| row.iter().map(|value| decode_cell(value)).collect())
        .collect::<Result<Vec<Vec<_>>, _>>()?;
    Ok(Grid::from_rows(cells)?)
}

/// Non-positive sizes are invalid; sizes past [`Coord::MAX`] are too large.
fn dimension(value: i64) -> Result<Coord, GameError> {
    if value <= 0 {
        return Err(GameError::InvalidDimensions);
    }
    Coord::try_from(value).map_err(|_| GameError::BoardTooLarge)
}

fn default_width() -> i64 {
    DEFAULT_WIDTH
}

fn default_height() -> i64 {
    DEFAULT_HEIGHT
}

fn default_mines() -> i64 {
    DEFAULT_MINES
}

/// Body of a create-game call; missing fields fall back to 10.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    #[serde(default = "default_width")]
    pub width: i64,
    #[serde(default = "default_height")]
    pub height: i64,
    #[serde(default = "default_mines")]
    pub mines: i64,
}

impl Default for CreateGameRequest {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            mines: DEFAULT_MINES,
        }
    }
}

impl CreateGameRequest {
    pub fn into_config(self) -> Result<GameConfig, GameError> {
        let width = dimension(self.width)?;
        let height = dimension(self.height)?;
        if self.mines <= 0 {
            return Err(GameError::NoMines);
        }
        let mines = CellCount::try_from(self.mines).map_err(|_| GameError::TooManyMines)?;
        GameConfig::new(width, height, mines)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealRequest {
    pub row: i64,
    pub col: i64,
}

impl RevealRequest {
    /// Coordinates that cannot exist on any board are out of bounds.
    pub fn coords(&self) -> Result<Coord2, GameError> {
        let row = Coord::try_from(self.row).map_err(|_| GameError::InvalidCoords)?;
        let col = Coord::try_from(self.col).map_err(|_| GameError::InvalidCoords)?;
        Ok((row, col))
    }
}

/// Player-facing state of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: SessionId,
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    pub board_state: Vec<Vec<String>>,
    pub game_over: bool,
    pub game_won: bool,
}

impl From<&SessionSnapshot> for GameState {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            game_id: snapshot.id,
            width: snapshot.width,
            height: snapshot.height,
            mines: snapshot.mines,
            board_state: encode_board(&snapshot.view),
            game_over: snapshot.game_over,
            game_won: snapshot.game_won,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealResponse {
    pub message: String,
    pub game_id: SessionId,
    pub board_state: Vec<Vec<String>>,
    pub game_over: bool,
    pub game_won: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revealed_count: Option<CellCount>,
}

impl RevealResponse {
    pub fn new(outcome: PlayOutcome, snapshot: &SessionSnapshot) -> Self {
        let (message, revealed_count) = match outcome {
            PlayOutcome::AlreadyRevealed => ("Cell already revealed", None),
            PlayOutcome::HitMine => ("Game Over! You hit a mine!", None),
            PlayOutcome::Revealed { cells, .. } => ("Cell revealed", Some(cells)),
        };
        Self {
            message: message.to_owned(),
            game_id: snapshot.id,
            board_state: encode_board(&snapshot.view),
            game_over: snapshot.game_over,
            game_won: snapshot.game_won,
            revealed_count,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
