use super::CellState;

/// Borrowed, read-only view of one buffer. Cheap to copy into worker tasks.
#[derive(Clone, Copy)]
pub struct GridView<'a> {
    cells: &'a [CellState],
    width: u32,
    height: u32,
}

impl<'a> GridView<'a> {
    pub fn new(cells: &'a [CellState], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            cells.len(),
            width as usize * height as usize,
            "GridView: buffer length does not match {}x{}",
            width,
            height
        );
        Self { cells, width, height }
    }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    /// Caller guarantees `x < width` and `y < height`.
    #[inline(always)]
    pub fn at(&self, x: u32, y: u32) -> CellState {
        debug_assert!(
            x < self.width && y < self.height,
            "GridView::at: out of bounds ({}, {}) for {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Fraction of live cells, in `[0, 1]`.
    pub fn density(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let live = self.cells.iter().filter(|c| c.is_alive()).count();
        live as f64 / self.cells.len() as f64
    }
}
