use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size `height × width` container addressed by `(row, col)`.
///
/// Rows always share one length since the cells live in a single `Array2`.
/// Indexing outside the grid panics; callers are expected to check
/// [`Grid::in_bounds`] first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid<T> {
    cells: Array2<T>,
}

impl<T> Grid<T> {
    pub fn new(size: Coord2) -> Self
    where
        T: Default,
    {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    /// Builds a grid from row-major nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if Coord::try_from(height).is_err() || Coord::try_from(width).is_err() {
            return Err(GameError::InvalidBoardShape);
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(GameError::InvalidBoardShape);
        }

        let flat: Vec<T> = rows.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec((height, width), flat)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { cells })
    }

    /// Dimensions as `(height, width)`.
    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn in_bounds(&self, (row, col): Coord2) -> bool {
        let (height, width) = self.size();
        row < height && col < width
    }

    pub fn get(&self, coords: Coord2) -> T
    where
        T: Copy,
    {
        self[coords]
    }

    pub fn set(&mut self, coords: Coord2, value: T) {
        self[coords] = value;
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, T>> {
        self.cells.rows().into_iter()
    }

    pub fn count_where(&self, predicate: impl Fn(&T) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| predicate(cell))
            .count()
            .try_into()
            .unwrap()
    }
}

impl<T> Index<Coord2> for Grid<T> {
    type Output = T;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl<T> IndexMut<Coord2> for Grid<T> {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
