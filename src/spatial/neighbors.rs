//! Moore-neighbourhood counting under a boundary policy.

use crate::core::BoundaryPolicy;
use crate::grid::GridView;

const OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Live cells among the eight neighbours of `(x, y)`, in `0..=8`.
///
/// Toroidal wrapping is plain modulo arithmetic, so on a 1- or 2-wide axis an
/// offset may land on the same cell twice (or on the cell itself) and is
/// counted each time.
pub fn count_live_neighbors(view: GridView<'_>, x: u32, y: u32, policy: BoundaryPolicy) -> u8 {
    let width = view.width() as i64;
    let height = view.height() as i64;
    let (x, y) = (x as i64, y as i64);

    let mut live = 0u8;
    for (dx, dy) in OFFSETS {
        let nx = x + dx as i64;
        let ny = y + dy as i64;
        let (nx, ny) = match policy {
            BoundaryPolicy::Toroidal => (nx.rem_euclid(width), ny.rem_euclid(height)),
            BoundaryPolicy::Bounded => {
                if nx < 0 || ny < 0 || nx >= width || ny >= height {
                    continue;
                }
                (nx, ny)
            }
        };
        if view.at(nx as u32, ny as u32).is_alive() {
            live += 1;
        }
    }
    live
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellState, Grid};

    fn grid_from(rows: &[&str]) -> Grid {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        Grid::from_fn(width, height, |x, y| {
            CellState::from_alive(rows[y as usize].as_bytes()[x as usize] == b'#')
        })
        .unwrap()
    }

    #[test]
    fn interior_cell_counts_all_eight() {
        let grid = grid_from(&["###", "###", "###"]);
        assert_eq!(count_live_neighbors(grid.view(), 1, 1, BoundaryPolicy::Bounded), 8);
    }

    #[test]
    fn bounded_corner_ignores_off_grid() {
        let grid = grid_from(&["###", "###", "###"]);
        assert_eq!(count_live_neighbors(grid.view(), 0, 0, BoundaryPolicy::Bounded), 3);
        assert_eq!(count_live_neighbors(grid.view(), 1, 0, BoundaryPolicy::Bounded), 5);
    }

    #[test]
    fn toroidal_corner_wraps() {
        let grid = grid_from(&[
            "....",
            "....",
            "....",
            "...#",
        ]);
        assert_eq!(count_live_neighbors(grid.view(), 0, 0, BoundaryPolicy::Toroidal), 1);
        assert_eq!(count_live_neighbors(grid.view(), 0, 0, BoundaryPolicy::Bounded), 0);
    }

    #[test]
    fn single_cell_torus_sees_itself_eight_times() {
        let grid = grid_from(&["#"]);
        assert_eq!(count_live_neighbors(grid.view(), 0, 0, BoundaryPolicy::Toroidal), 8);
        assert_eq!(count_live_neighbors(grid.view(), 0, 0, BoundaryPolicy::Bounded), 0);
    }

    #[test]
    fn cell_itself_is_not_counted() {
        let grid = grid_from(&["...", ".#.", "..."]);
        assert_eq!(count_live_neighbors(grid.view(), 1, 1, BoundaryPolicy::Toroidal), 0);
    }
}
