//! Grid - double-buffered cell storage
//!
//! Two same-shaped row-major buffers: `front` is the current generation that
//! collaborators read, `back` is the next generation being written by the
//! scheduler. Dimensions never change after construction.

use serde::{Deserialize, Serialize};

use crate::core::config::validate_dimensions;
use crate::core::{LifeError, LifeResult};

mod indexing;
mod snapshot;
mod view;

pub use snapshot::Snapshot;
pub use view::GridView;

/// State of a single cell. One byte, so the buffer can be handed to JS as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    #[inline]
    pub fn from_alive(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> u8 {
        state as u8
    }
}

impl TryFrom<u8> for CellState {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CellState::Dead),
            1 => Ok(CellState::Alive),
            other => Err(format!("invalid cell state {}", other)),
        }
    }
}

pub struct Grid {
    width: u32,
    height: u32,
    size: usize,

    front: Vec<CellState>,
    back: Vec<CellState>,
    generation: u64,
}

impl Grid {
    /// Grid with every cell set to `fill`, generation 0.
    pub fn new(width: u32, height: u32, fill: CellState) -> LifeResult<Self> {
        let size = validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            size,
            front: alloc_buffer(width, height, size, fill)?,
            back: alloc_buffer(width, height, size, fill)?,
            generation: 0,
        })
    }

    /// Grid whose cells are produced by `f(x, y)` in row-major order.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> LifeResult<Self>
    where
        F: FnMut(u32, u32) -> CellState,
    {
        let mut grid = Self::new(width, height, CellState::Dead)?;
        for y in 0..height {
            for x in 0..width {
                let idx = grid.index(x, y);
                grid.front[idx] = f(x, y);
            }
        }
        Ok(grid)
    }

    /// Rebuild a grid (cells and generation) from a snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> LifeResult<Self> {
        snapshot.check_shape()?;
        let mut grid = Self::new(snapshot.width, snapshot.height, CellState::Dead)?;
        grid.load(snapshot)?;
        Ok(grid)
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, x: u32, y: u32) -> LifeResult<CellState> {
        self.check_bounds(x, y)?;
        Ok(self.front[self.index(x, y)])
    }

    /// Direct write into the current buffer. The controller decides when this is allowed.
    pub fn set(&mut self, x: u32, y: u32, state: CellState) -> LifeResult<()> {
        self.check_bounds(x, y)?;
        let idx = self.index(x, y);
        self.front[idx] = state;
        Ok(())
    }

    /// Overwrite the current buffer with `f(x, y)` and restart at generation 0.
    pub fn refill<F>(&mut self, mut f: F)
    where
        F: FnMut(u32, u32) -> CellState,
    {
        let width = self.width as usize;
        for (idx, cell) in self.front.iter_mut().enumerate() {
            *cell = f((idx % width) as u32, (idx / width) as u32);
        }
        self.generation = 0;
    }

    /// Replace cells and generation with a snapshot of the same shape.
    pub fn load(&mut self, snapshot: &Snapshot) -> LifeResult<()> {
        if snapshot.width != self.width || snapshot.height != self.height {
            return Err(LifeError::SnapshotMismatch(format!(
                "snapshot is {}x{}, grid is {}x{}",
                snapshot.width, snapshot.height, self.width, self.height
            )));
        }
        snapshot.check_shape()?;
        self.front.copy_from_slice(&snapshot.cells);
        self.generation = snapshot.generation;
        Ok(())
    }

    /// Owned copy of the current generation; never aliases the live buffers.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            generation: self.generation,
            cells: self.front.clone(),
        }
    }

    /// Read-only view of the current generation.
    #[inline]
    pub fn view(&self) -> GridView<'_> {
        GridView::new(&self.front, self.width, self.height)
    }

    pub fn population(&self) -> usize {
        self.front.iter().filter(|c| c.is_alive()).count()
    }

    /// Current buffer as raw bytes (0 dead, 1 alive) for renderers.
    pub fn cells_ptr(&self) -> *const u8 {
        self.front.as_ptr() as *const u8
    }

    /// Split borrow for an advance: current buffer shared, next buffer exclusive.
    pub(crate) fn buffers_mut(&mut self) -> (GridView<'_>, &mut [CellState]) {
        (
            GridView::new(&self.front, self.width, self.height),
            self.back.as_mut_slice(),
        )
    }

    /// Promote the next buffer to current. Only the scheduler calls this, after
    /// every partition has been written.
    pub(crate) fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        self.generation += 1;
    }
}

/// One cell buffer; allocation failure is reported instead of aborting.
fn alloc_buffer(width: u32, height: u32, size: usize, fill: CellState) -> LifeResult<Vec<CellState>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|_| LifeError::InvalidDimensions { width, height })?;
    buffer.resize(size, fill);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 3, CellState::Dead).err(),
            Some(LifeError::InvalidDimensions { width: 0, height: 3 })
        );
        assert!(Grid::new(3, 0, CellState::Alive).is_err());
    }

    #[test]
    fn oversized_grids_are_errors_not_aborts() {
        assert_eq!(
            Grid::new(u32::MAX, u32::MAX, CellState::Dead).err(),
            Some(LifeError::InvalidDimensions { width: u32::MAX, height: u32::MAX })
        );
        assert!(Grid::new(100_000, 100_000, CellState::Dead).is_err());
    }

    #[test]
    fn from_snapshot_checks_the_payload_before_allocating() {
        let hostile = Snapshot { width: u32::MAX, height: u32::MAX, generation: 0, cells: vec![] };
        assert!(matches!(Grid::from_snapshot(&hostile), Err(LifeError::SnapshotMismatch(_))));

        let mut short = Grid::new(3, 3, CellState::Alive).unwrap().snapshot();
        short.cells.truncate(8);
        assert!(matches!(Grid::from_snapshot(&short), Err(LifeError::SnapshotMismatch(_))));
    }

    #[test]
    fn from_fn_is_row_major() {
        let grid = Grid::from_fn(3, 2, |x, y| CellState::from_alive(x == 2 && y == 1)).unwrap();
        assert_eq!(grid.get(2, 1), Ok(CellState::Alive));
        assert_eq!(grid.get(1, 2).unwrap_err(), LifeError::OutOfBounds {
            x: 1,
            y: 2,
            width: 3,
            height: 2
        });
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn set_then_get() {
        let mut grid = Grid::new(4, 4, CellState::Dead).unwrap();
        grid.set(3, 0, CellState::Alive).unwrap();
        assert_eq!(grid.get(3, 0), Ok(CellState::Alive));
        assert!(grid.set(4, 0, CellState::Alive).is_err());
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn swap_promotes_back_buffer_and_counts_generations() {
        let mut grid = Grid::new(2, 2, CellState::Dead).unwrap();
        {
            let (_, next) = grid.buffers_mut();
            next.fill(CellState::Alive);
        }
        assert_eq!(grid.population(), 0);
        grid.swap();
        assert_eq!(grid.generation(), 1);
        assert_eq!(grid.population(), 4);
    }

    #[test]
    fn snapshot_does_not_alias_live_state() {
        let mut grid = Grid::new(2, 2, CellState::Dead).unwrap();
        let before = grid.snapshot();
        grid.set(0, 0, CellState::Alive).unwrap();
        assert_eq!(before.cells[0], CellState::Dead);
    }

    #[test]
    fn load_requires_matching_shape() {
        let mut grid = Grid::new(3, 3, CellState::Dead).unwrap();
        let other = Grid::new(3, 2, CellState::Alive).unwrap().snapshot();
        assert!(matches!(grid.load(&other), Err(LifeError::SnapshotMismatch(_))));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn refill_resets_generation() {
        let mut grid = Grid::new(2, 1, CellState::Dead).unwrap();
        grid.swap();
        grid.refill(|x, _| CellState::from_alive(x == 0));
        assert_eq!(grid.generation(), 0);
        assert_eq!(grid.get(0, 0), Ok(CellState::Alive));
        assert_eq!(grid.get(1, 0), Ok(CellState::Dead));
    }

    #[test]
    fn cell_state_byte_encoding() {
        assert_eq!(u8::from(CellState::Alive), 1);
        assert_eq!(CellState::try_from(0u8), Ok(CellState::Dead));
        assert!(CellState::try_from(2u8).is_err());
        assert_eq!(CellState::Dead.flipped(), CellState::Alive);
    }
}
