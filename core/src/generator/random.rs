use super::*;

/// Purely random placement: draws uniform `(row, col)` pairs and keeps the
/// ones that are not mined yet.
///
/// Expected draws stay close to `mines` on sparse boards and grow as the
/// density approaches one, but the result is always exact since
/// [`GameConfig`] guarantees at least one safe cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineLayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let mut cells: Grid<MineCell> = Grid::new(config.size());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed: CellCount = 0;
        let mut draws: u64 = 0;

        while mines_placed < config.mines() {
            let coords = (
                rng.random_range(0..config.height()),
                rng.random_range(0..config.width()),
            );
            draws += 1;
            if !cells[coords].is_mine() {
                cells[coords] = MineCell::Mine;
                mines_placed += 1;
            }
        }
        log::debug!(
            "Placed {} mines on {}x{} in {} draws",
            mines_placed,
            config.width(),
            config.height(),
            draws
        );

        let layout = MineLayout::from_grid(cells);
        // double check mine count
        if layout.mine_count() != config.mines() {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines()
            );
        }
        layout
    }
}
