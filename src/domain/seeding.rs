//! Initial grid contents used at construction and on reset.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::{BoundaryPolicy, LifeError, LifeResult};
use crate::grid::{CellState, Grid};

use super::draws::splitmix64;
use super::patterns::Pattern;

/// Keeps the fill stream apart from the per-row transition draws.
const FILL_SALT: u64 = 0xF111_5EED_0000_0001;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InitialState {
    /// Every cell in the same state.
    Uniform { state: CellState },
    /// Each cell alive with probability `density`.
    Random { density: f64 },
    /// A named pattern with its top-left corner at `(x, y)` on an otherwise dead grid.
    Pattern { pattern: Pattern, x: u32, y: u32 },
}

impl Default for InitialState {
    fn default() -> Self {
        InitialState::Uniform { state: CellState::Dead }
    }
}

impl InitialState {
    pub fn dead() -> Self {
        Self::default()
    }

    pub fn random(density: f64) -> Self {
        InitialState::Random { density }
    }

    pub fn pattern(pattern: Pattern, x: u32, y: u32) -> Self {
        InitialState::Pattern { pattern, x, y }
    }

    /// New generation-0 grid.
    pub fn build(
        &self,
        width: u32,
        height: u32,
        boundary: BoundaryPolicy,
        seed: u64,
    ) -> LifeResult<Grid> {
        let mut grid = Grid::new(width, height, CellState::Dead)?;
        self.apply(&mut grid, boundary, seed)?;
        Ok(grid)
    }

    /// Refill `grid` in place and reset its generation. On error the grid is untouched.
    pub fn apply(&self, grid: &mut Grid, boundary: BoundaryPolicy, seed: u64) -> LifeResult<()> {
        match *self {
            InitialState::Uniform { state } => grid.refill(|_, _| state),
            InitialState::Random { density } => {
                if !density.is_finite() || !(0.0..=1.0).contains(&density) {
                    return Err(LifeError::InvalidConfig(format!(
                        "density must be within [0, 1], got {}",
                        density
                    )));
                }
                let mut rng = SmallRng::seed_from_u64(splitmix64(seed ^ FILL_SALT));
                grid.refill(|_, _| CellState::from_alive(rng.random::<f64>() < density));
            }
            InitialState::Pattern { pattern, x, y } => {
                let mask = pattern_mask(grid, pattern, x, y, boundary)?;
                let width = grid.width() as usize;
                grid.refill(|cx, cy| CellState::from_alive(mask[cy as usize * width + cx as usize]));
            }
        }
        Ok(())
    }
}

/// Alive mask for `pattern` placed at `(x, y)`: wrapped on a torus, clipped when bounded.
fn pattern_mask(
    grid: &Grid,
    pattern: Pattern,
    x: u32,
    y: u32,
    boundary: BoundaryPolicy,
) -> LifeResult<Vec<bool>> {
    if !grid.in_bounds(x, y) {
        return Err(LifeError::OutOfBounds {
            x,
            y,
            width: grid.width(),
            height: grid.height(),
        });
    }
    let (width, height) = (grid.width() as u64, grid.height() as u64);
    let mut mask = vec![false; grid.size()];
    for &(dx, dy) in pattern.cells() {
        let mut px = x as u64 + dx as u64;
        let mut py = y as u64 + dy as u64;
        match boundary {
            BoundaryPolicy::Toroidal => {
                px %= width;
                py %= height;
            }
            BoundaryPolicy::Bounded => {
                if px >= width || py >= height {
                    continue;
                }
            }
        }
        mask[grid.index(px as u32, py as u32)] = true;
    }
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_at_origin() {
        let grid = InitialState::pattern(Pattern::Block, 0, 0)
            .build(6, 6, BoundaryPolicy::Bounded, 0)
            .unwrap();
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(grid.get(x, y), Ok(CellState::Alive));
        }
        assert_eq!(grid.get(2, 0), Ok(CellState::Dead));
        assert_eq!(grid.population(), 4);
    }

    #[test]
    fn patterns_wrap_on_torus_and_clip_when_bounded() {
        let wrapped = InitialState::pattern(Pattern::Blinker, 4, 0)
            .build(5, 3, BoundaryPolicy::Toroidal, 0)
            .unwrap();
        assert_eq!(wrapped.population(), 3);
        assert_eq!(wrapped.get(0, 0), Ok(CellState::Alive));

        let clipped = InitialState::pattern(Pattern::Blinker, 4, 0)
            .build(5, 3, BoundaryPolicy::Bounded, 0)
            .unwrap();
        assert_eq!(clipped.population(), 1);
    }

    #[test]
    fn pattern_origin_must_be_on_grid() {
        let err = InitialState::pattern(Pattern::Tub, 9, 0)
            .build(5, 5, BoundaryPolicy::Toroidal, 0)
            .err()
            .unwrap();
        assert!(matches!(err, LifeError::OutOfBounds { .. }));
    }

    #[test]
    fn random_fill_is_seeded() {
        let a = InitialState::random(0.3).build(32, 32, BoundaryPolicy::Toroidal, 5).unwrap();
        let b = InitialState::random(0.3).build(32, 32, BoundaryPolicy::Toroidal, 5).unwrap();
        let c = InitialState::random(0.3).build(32, 32, BoundaryPolicy::Toroidal, 6).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
        assert_ne!(a.snapshot(), c.snapshot());
        assert!(a.population() > 0 && a.population() < 32 * 32);
    }

    #[test]
    fn random_density_extremes() {
        let empty = InitialState::random(0.0).build(8, 8, BoundaryPolicy::Bounded, 1).unwrap();
        let full = InitialState::random(1.0).build(8, 8, BoundaryPolicy::Bounded, 1).unwrap();
        assert_eq!(empty.population(), 0);
        assert_eq!(full.population(), 64);
        assert!(InitialState::random(1.5).build(8, 8, BoundaryPolicy::Bounded, 1).is_err());
    }

    #[test]
    fn serde_is_tagged() {
        let json = serde_json::to_string(&InitialState::pattern(Pattern::Glider, 1, 2)).unwrap();
        assert_eq!(json, r#"{"kind":"pattern","pattern":"glider","x":1,"y":2}"#);
        let back: InitialState = serde_json::from_str(r#"{"kind":"uniform","state":1}"#).unwrap();
        assert_eq!(back, InitialState::Uniform { state: CellState::Alive });
    }
}
