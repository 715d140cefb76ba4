use alloc::collections::BTreeSet;
use alloc::vec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Start cell was out of bounds or already revealed.
    NoChange,
    /// Number of safe cells newly revealed, always at least one.
    Revealed(CellCount),
    HitMine,
}

/// Reveals `start` on `view` and flood-fills through zero-count cells.
///
/// The traversal uses an explicit stack and a visited set, so large empty
/// regions never grow the call stack and no cell is processed twice. The
/// first mine popped ends the traversal: it is the only mine made visible and
/// whatever is still queued is dropped.
///
/// Bounds and revealed state are checked again here even though
/// [`GameSession::reveal_at`] already did.
pub fn reveal(layout: &MineLayout, view: &mut Grid<PlayerCell>, start: Coord2) -> RevealOutcome {
    debug_assert_eq!(layout.size(), view.size(), "layout and view must match");

    let mut visited = BTreeSet::new();
    let mut to_visit = vec![start];
    let mut revealed: CellCount = 0;

    while let Some(coords) = to_visit.pop() {
        if !view.in_bounds(coords) || !view[coords].is_hidden() {
            continue;
        }
        if !visited.insert(coords) {
            continue;
        }

        if layout.contains_mine(coords) {
            view[coords] = PlayerCell::Mine;
            log::debug!(
                "Hit mine at {:?}, dropping {} queued cells",
                coords,
                to_visit.len()
            );
            return RevealOutcome::HitMine;
        }

        let adjacent_mines = layout.adjacent_mine_count(coords);
        view[coords] = PlayerCell::Revealed(adjacent_mines);
        revealed += 1;
        log::trace!("Revealed {:?}, mine count: {}", coords, adjacent_mines);

        // zero cells expand, numbered cells form the border
        if adjacent_mines == 0 {
            to_visit.extend(
                view.neighbors(coords)
                    .filter(|&pos| view[pos].is_hidden())
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }

    if revealed == 0 {
        RevealOutcome::NoChange
    } else {
        log::debug!("Revealed {} cells starting at {:?}", revealed, start);
        RevealOutcome::Revealed(revealed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> MineLayout {
        MineLayout::from_mine_coords(size, mines).unwrap()
    }

    fn hidden(layout: &MineLayout) -> Grid<PlayerCell> {
        Grid::new(layout.size())
    }

    #[test]
    fn zero_cell_opens_region_and_numbered_border() {
        let layout = layout((3, 3), &[(2, 2)]);
        let mut view = hidden(&layout);

        let outcome = reveal(&layout, &mut view, (0, 0));

        assert_eq!(outcome, RevealOutcome::Revealed(8));
        assert_eq!(view[(0, 0)], PlayerCell::Revealed(0));
        assert_eq!(view[(1, 1)], PlayerCell::Revealed(1));
        assert_eq!(view[(1, 2)], PlayerCell::Revealed(1));
        assert_eq!(view[(2, 1)], PlayerCell::Revealed(1));
        assert_eq!(view[(2, 2)], PlayerCell::Hidden);
    }

    #[test]
    fn numbered_cell_does_not_propagate() {
        let layout = layout((3, 3), &[(0, 1), (1, 0), (1, 2), (2, 1)]);
        let mut view = hidden(&layout);

        let outcome = reveal(&layout, &mut view, (1, 1));

        assert_eq!(outcome, RevealOutcome::Revealed(1));
        assert_eq!(view[(1, 1)], PlayerCell::Revealed(4));
        assert_eq!(view.count_where(|cell| !cell.is_hidden()), 1);
    }

    #[test]
    fn mine_shows_only_itself() {
        let layout = layout((3, 3), &[(0, 0), (0, 2), (2, 0), (2, 2)]);
        let mut view = hidden(&layout);

        let outcome = reveal(&layout, &mut view, (0, 0));

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(view[(0, 0)], PlayerCell::Mine);
        assert_eq!(view.count_where(|cell| !cell.is_hidden()), 1);
    }

    #[test]
    fn revealed_or_outside_start_is_no_change() {
        let layout = layout((2, 2), &[(1, 1)]);
        let mut view = hidden(&layout);

        assert_eq!(reveal(&layout, &mut view, (0, 0)), RevealOutcome::Revealed(1));
        let before = view.clone();

        assert_eq!(reveal(&layout, &mut view, (0, 0)), RevealOutcome::NoChange);
        assert_eq!(reveal(&layout, &mut view, (2, 0)), RevealOutcome::NoChange);
        assert_eq!(reveal(&layout, &mut view, (0, Coord::MAX)), RevealOutcome::NoChange);
        assert_eq!(view, before);
    }

    #[test]
    fn flood_stops_at_existing_reveals() {
        // mine wall down column 2 splits the board
        let layout = layout((3, 5), &[(0, 2), (1, 2), (2, 2)]);
        let mut view = hidden(&layout);

        assert_eq!(reveal(&layout, &mut view, (1, 4)), RevealOutcome::Revealed(6));
        assert_eq!(reveal(&layout, &mut view, (1, 0)), RevealOutcome::Revealed(6));
        assert_eq!(view.count_where(|cell| cell.is_hidden()), 3);
    }

    #[test]
    fn large_empty_board_reveals_every_cell_once() {
        let size = (512, 512);
        let layout = layout(size, &[(511, 511)]);
        let mut view = hidden(&layout);

        let outcome = reveal(&layout, &mut view, (0, 0));

        assert_eq!(outcome, RevealOutcome::Revealed(512 * 512 - 1));
        assert_eq!(view[(511, 511)], PlayerCell::Hidden);
        assert_eq!(view[(510, 510)], PlayerCell::Revealed(1));
    }
}
