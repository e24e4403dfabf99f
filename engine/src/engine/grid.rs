// engine/src/engine/grid.rs
#![forbid(unsafe_code)]

use crate::engine::geometry::Cell;

/// Fixed-size occupancy grid. Each cell is either empty or owned by one occupant handle.
///
/// Storage is row-major: `index = x + width * y`. Dimensions never change after construction.
/// Positions outside `[0, width) x [0, height)` are never written; single-cell queries on
/// them answer "nothing there".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<Option<T>>,
}

impl<T: Copy + PartialEq> OccupancyGrid<T> {
    /// Callers validate dimensions (see `InventoryParams::validate`); a zero side yields a
    /// grid in which every position is out of range.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_range(&self, pos: Cell) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    #[inline]
    fn index(&self, pos: Cell) -> Option<usize> {
        self.in_range(pos)
            .then(|| pos.x as usize + self.width * pos.y as usize)
    }

    #[inline]
    fn position(&self, idx: usize) -> Cell {
        Cell::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    /// Occupant at `pos`; `None` when free or out of range.
    #[inline]
    pub fn get(&self, pos: Cell) -> Option<T> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// True iff `pos` is in range and empty.
    #[inline]
    pub fn is_free(&self, pos: Cell) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i].is_none())
    }

    /// Write `item` into `pos`. Returns false (no mutation) when out of range.
    pub fn set(&mut self, pos: Cell, item: T) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = Some(item);
                true
            }
            None => false,
        }
    }

    /// Write `item` into every position, all or nothing.
    ///
    /// Every position is range-checked before the first write. If any is out of range the
    /// grid is left untouched and `false` is returned.
    pub fn set_many(&mut self, positions: &[Cell], item: T) -> bool {
        if !positions.iter().all(|&p| self.in_range(p)) {
            return false;
        }
        for &p in positions {
            self.set(p, item);
        }
        true
    }

    /// Empty one cell. Out of range is a no-op.
    #[inline]
    pub fn clear(&mut self, pos: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = None;
        }
    }

    pub fn clear_many(&mut self, positions: &[Cell]) {
        for &p in positions {
            self.clear(p);
        }
    }

    /// Empty every cell owned by `item`, wherever it is. Returns the number of cells cleared.
    pub fn clear_all_matching(&mut self, item: T) -> usize {
        let mut cleared = 0;
        for slot in self.cells.iter_mut() {
            if *slot == Some(item) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// True iff every position is in range and free. Out of range counts as not free.
    pub fn all_free(&self, positions: &[Cell]) -> bool {
        positions.iter().all(|&p| self.is_free(p))
    }

    pub fn count_matching(&self, item: T) -> usize {
        self.cells.iter().filter(|&&c| c == Some(item)).count()
    }

    /// Positions owned by `item`, in row-major order.
    pub fn cells_of(&self, item: T) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| (c == Some(item)).then(|| self.position(i)))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Row-major walk over `(position, occupant)`.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Option<T>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (self.position(i), c))
    }
}
