#![no_std]

extern crate alloc;

use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use reveal::*;
pub use session::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod reveal;
mod session;
mod types;

/// Validated board parameters: `width > 0`, `height > 0` and
/// `0 < mines < width * height`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedConfig")]
pub struct GameConfig {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct UncheckedConfig {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

impl TryFrom<UncheckedConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: UncheckedConfig) -> Result<Self> {
        Self::new(raw.width, raw.height, raw.mines)
    }
}

impl GameConfig {
    pub(crate) const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if mines == 0 {
            return Err(GameError::NoMines);
        }
        if mines >= mult(width, height) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(width, height, mines))
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    /// Grid dimensions as `(height, width)`.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Cells that must be revealed to win, fixed before any mine is placed.
    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn validate_coords(&self, (row, col): Coord2) -> Result<Coord2> {
        if row < self.height && col < self.width {
            Ok((row, col))
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

/// Write-once ground truth of where the mines are.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineLayout {
    cells: Grid<MineCell>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_grid(cells: Grid<MineCell>) -> Self {
        let mine_count = cells.count_where(|cell| cell.is_mine());
        Self { cells, mine_count }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut cells: Grid<MineCell> = Grid::new(size);

        for &coords in mine_coords {
            if !cells.in_bounds(coords) {
                return Err(GameError::InvalidCoords);
            }
            cells[coords] = MineCell::Mine;
        }

        Ok(Self::from_grid(cells))
    }

    /// Validated configuration matching this layout.
    pub fn game_config(&self) -> Result<GameConfig> {
        let (height, width) = self.size();
        GameConfig::new(width, height, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        self.cells.size()
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        self.cells.in_bounds(coords)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.cells
            .neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count()
            .try_into()
            .unwrap()
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.neighbors(coords)
    }

    pub fn cells(&self) -> &Grid<MineCell> {
        &self.cells
    }
}

impl Index<Coord2> for MineLayout {
    type Output = MineCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords]
    }
}
