use serde::{Deserialize, Serialize};

/// Ground-truth content of a cell in the mine layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineCell {
    Empty,
    Mine,
}

impl MineCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for MineCell {
    fn default() -> Self {
        Self::Empty
    }
}

/// Player-visible state of a cell, only ever changed by a reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCell {
    Hidden,
    Mine,
    /// Revealed safe cell with its adjacent mine count (0..=8).
    Revealed(u8),
}

impl PlayerCell {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for PlayerCell {
    fn default() -> Self {
        Self::Hidden
    }
}
