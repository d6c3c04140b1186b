use serde::{Deserialize, Serialize};

use crate::core::{LifeError, LifeResult};

use super::CellState;

/// Immutable copy of one generation: what renderers draw and persistence stores.
///
/// Cells are row-major and serialize as `0`/`1` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub generation: u64,
    pub cells: Vec<CellState>,
}

impl Snapshot {
    pub fn to_json(&self) -> LifeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> LifeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Header and payload agree: `cells` holds exactly `width * height` entries.
    pub fn check_shape(&self) -> LifeResult<()> {
        let expected = (self.width as usize).checked_mul(self.height as usize);
        if expected != Some(self.cells.len()) {
            return Err(LifeError::SnapshotMismatch(format!(
                "{}x{} snapshot holds {} cells",
                self.width,
                self.height,
                self.cells.len()
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<CellState> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Rows of `#` (alive) and `.` (dead); handy in assertions and logs.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|c| if c.is_alive() { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::grid::Grid;

    #[test]
    fn shape_check_compares_header_and_payload() {
        let mut snapshot = Grid::new(4, 3, CellState::Alive).unwrap().snapshot();
        assert!(snapshot.check_shape().is_ok());
        snapshot.cells.push(CellState::Dead);
        assert!(matches!(snapshot.check_shape(), Err(LifeError::SnapshotMismatch(_))));

        let hostile = Snapshot { width: u32::MAX, height: u32::MAX, generation: 0, cells: vec![] };
        assert!(matches!(hostile.check_shape(), Err(LifeError::SnapshotMismatch(_))));
    }

    #[test]
    fn json_round_trip_is_exact() {
        let grid = Grid::from_fn(3, 2, |x, y| CellState::from_alive((x + y) % 2 == 0)).unwrap();
        let snapshot = grid.snapshot();
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"cells\":[1,0,1,0,1,0]"));
        assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn rejects_unknown_cell_values() {
        let json = r#"{"width":1,"height":1,"generation":0,"cells":[7]}"#;
        assert!(Snapshot::from_json(json).is_err());
    }

    #[test]
    fn ascii_rendering() {
        let grid = Grid::from_fn(3, 2, |x, _| CellState::from_alive(x == 1)).unwrap();
        assert_eq!(grid.snapshot().to_ascii(), ".#.\n.#.\n");
    }
}
