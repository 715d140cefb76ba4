use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Freshly generated board: the mine layout and an all-hidden player view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub layout: MineLayout,
    pub view: Grid<PlayerCell>,
}

pub trait MineLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;

    fn generate_board(self, config: GameConfig) -> Board
    where
        Self: Sized,
    {
        let layout = self.generate(config);
        let view = Grid::new(layout.size());
        Board { layout, view }
    }
}
