// engine/src/engine/inventory.rs
#![forbid(unsafe_code)]

use tracing::{debug, error, trace};

use crate::engine::error::{Blocked, InventoryError, InventoryResult};
use crate::engine::geometry::{Cell, bounding_box};
use crate::engine::grid::OccupancyGrid;
use crate::engine::item::{InventoryItem, ItemHandle, Shape};
use crate::engine::params::InventoryParams;
use crate::policy::PlacementPolicy;

/// A placement that did not happen. The item goes back to the caller untouched.
#[derive(Debug, PartialEq, Eq)]
pub struct Rejected {
    pub item: InventoryItem,
    pub reason: Blocked,
}

/// One grid plus the items placed in it.
///
/// Invariant: a handle owns grid cells iff its item is in `items`, and then it owns exactly
/// the cells of its shape at its origin.
#[derive(Debug)]
pub struct Inventory {
    params: InventoryParams,
    grid: OccupancyGrid<ItemHandle>,
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new(params: InventoryParams) -> InventoryResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            grid: OccupancyGrid::new(params.width as usize, params.height as usize),
            items: Vec::new(),
        })
    }

    pub fn params(&self) -> &InventoryParams {
        &self.params
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Read-only view of cell ownership.
    pub fn grid(&self) -> &OccupancyGrid<ItemHandle> {
        &self.grid
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Handle of the item covering `pos`, if any. Out of range answers `None`.
    #[inline]
    pub fn get_item(&self, pos: Cell) -> Option<ItemHandle> {
        self.grid.get(pos)
    }

    pub fn item(&self, handle: ItemHandle) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.handle() == handle)
    }

    pub fn item_at(&self, pos: Cell) -> Option<&InventoryItem> {
        self.get_item(pos).and_then(|h| self.item(h))
    }

    /// Placed items. Order carries no meaning.
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, handle: ItemHandle) -> bool {
        self.items.iter().any(|i| i.handle() == handle)
    }

    pub fn occupied_cells(&self) -> usize {
        self.grid.occupied_count()
    }

    // -------------------------------------------------------------------------
    // Placement predicate (pure)
    // -------------------------------------------------------------------------

    fn check_cells(
        &self,
        cells: impl Iterator<Item = Cell>,
        ignore: Option<ItemHandle>,
    ) -> Result<(), Blocked> {
        for cell in cells {
            if !self.grid.in_range(cell) {
                return Err(Blocked::OutOfRange { cell });
            }
            match self.grid.get(cell) {
                Some(occupant) if Some(occupant) != ignore => {
                    return Err(Blocked::Collision { cell, occupant });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Would `shape` fit with its origin at `origin`? Reports the first blocking cell.
    pub fn check_shape(&self, shape: &Shape, origin: Cell) -> Result<(), Blocked> {
        self.check_cells(shape.at(origin), None)
    }

    pub fn check(&self, item: &InventoryItem, origin: Cell) -> Result<(), Blocked> {
        self.check_shape(item.shape(), origin)
    }

    /// True iff every cell of the item at `origin` is in range and free.
    #[inline]
    pub fn can_place(&self, item: &InventoryItem, origin: Cell) -> bool {
        self.check(item, origin).is_ok()
    }

    /// Non-mutating placement, for drag ghosts. Same answer `place` would give.
    #[inline]
    pub fn preview(&self, item: &InventoryItem, origin: Cell) -> bool {
        self.can_place(item, origin)
    }

    /// Every origin at which `item` fits, row-major.
    pub fn valid_origins(&self, item: &InventoryItem) -> Vec<Cell> {
        let Some((mn, mx)) = bounding_box(item.shape().offsets()) else {
            return Vec::new();
        };
        let (w, h) = (self.width() as i32, self.height() as i32);

        let mut out = Vec::new();
        for y in mn.y.saturating_neg()..h.saturating_sub(mx.y) {
            for x in mn.x.saturating_neg()..w.saturating_sub(mx.x) {
                let origin = Cell::new(x, y);
                if self.can_place(item, origin) {
                    out.push(origin);
                }
            }
        }
        out
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Place `item` with its origin at `origin`.
    ///
    /// Check-then-write: the grid is only touched once every covered cell is known to be in
    /// range and free, so a rejected placement leaves no residue.
    pub fn place(&mut self, mut item: InventoryItem, origin: Cell) -> Result<ItemHandle, Rejected> {
        if let Err(reason) = self.check(&item, origin) {
            trace!(item = %item.id(), x = origin.x, y = origin.y, ?reason, "placement rejected");
            return Err(Rejected { item, reason });
        }

        let handle = item.handle();
        let cells: Vec<Cell> = item.cells_at(origin).collect();
        let written = self.grid.set_many(&cells, handle);
        debug_assert!(written, "checked cells must be writable");

        item.set_origin(origin);
        debug!(item = %item.id(), %handle, x = origin.x, y = origin.y, "placed item");
        self.items.push(item);
        Ok(handle)
    }

    /// Let `policy` pick an origin and place there. Gives the item back if nothing fits.
    pub fn auto_place<P>(
        &mut self,
        item: InventoryItem,
        policy: &mut P,
    ) -> Result<ItemHandle, InventoryItem>
    where
        P: PlacementPolicy + ?Sized,
    {
        let Some(origin) = policy.choose_origin(self, &item) else {
            debug!(item = %item.id(), "no room for item");
            return Err(item);
        };
        self.place(item, origin).map_err(|rejected| rejected.item)
    }

    /// Take an item out of the inventory and return it unplaced.
    ///
    /// Cells are cleared by handle, so a stale origin cannot leave residue. `Ok(None)` means
    /// the handle is not a member. A grid/membership mismatch aborts without mutation.
    pub fn remove(&mut self, handle: ItemHandle) -> InventoryResult<Option<InventoryItem>> {
        let owned = self.grid.count_matching(handle);

        let Some(idx) = self.items.iter().position(|i| i.handle() == handle) else {
            if owned != 0 {
                error!(%handle, owned, "grid cells owned by a non-member");
                return Err(InventoryError::invariant(format!(
                    "{handle} owns {owned} cells but is not in the inventory"
                )));
            }
            return Ok(None);
        };

        let expected = self.items[idx].shape().len();
        if owned != expected {
            error!(%handle, owned, expected, "grid cells disagree with shape");
            return Err(InventoryError::invariant(format!(
                "{handle} owns {owned} cells, shape has {expected}"
            )));
        }

        self.grid.clear_all_matching(handle);
        let mut item = self.items.swap_remove(idx);
        item.clear_origin();
        debug!(item = %item.id(), %handle, "removed item");
        Ok(Some(item))
    }

    /// Move a placed item to a new origin in one step.
    ///
    /// The item's own cells count as free for the check. On `Ok(false)` nothing changed.
    pub fn move_item(&mut self, handle: ItemHandle, origin: Cell) -> InventoryResult<bool> {
        let Some(idx) = self.items.iter().position(|i| i.handle() == handle) else {
            return Err(InventoryError::NotInInventory(handle));
        };

        let target: Vec<Cell> = self.items[idx].cells_at(origin).collect();
        if let Err(reason) = self.check_cells(target.iter().copied(), Some(handle)) {
            trace!(%handle, x = origin.x, y = origin.y, ?reason, "move rejected");
            return Ok(false);
        }

        self.grid.clear_all_matching(handle);
        let written = self.grid.set_many(&target, handle);
        debug_assert!(written, "checked cells must be writable");
        self.items[idx].set_origin(origin);
        debug!(%handle, x = origin.x, y = origin.y, "moved item");
        Ok(true)
    }

    /// Full consistency scan: every member owns exactly its shape's cells at its origin and no
    /// cell is owned by a non-member.
    pub fn verify_integrity(&self) -> InventoryResult<()> {
        let mut expected = 0usize;
        for item in &self.items {
            let Some(origin) = item.origin() else {
                return Err(InventoryError::invariant(format!(
                    "{} is a member without an origin",
                    item.handle()
                )));
            };
            for cell in item.cells_at(origin) {
                if self.grid.get(cell) != Some(item.handle()) {
                    return Err(InventoryError::invariant(format!(
                        "{} does not own {cell}",
                        item.handle()
                    )));
                }
            }
            expected += item.shape().len();
        }

        let occupied = self.grid.occupied_count();
        if occupied != expected {
            return Err(InventoryError::invariant(format!(
                "{occupied} cells occupied, members cover {expected}"
            )));
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Debug
    // -------------------------------------------------------------------------

    /// Text dump: one letter per member (membership order), `.` for free cells.
    pub fn render_ascii(&self) -> String {
        let glyph = |h: ItemHandle| -> char {
            match self.items.iter().position(|i| i.handle() == h) {
                Some(idx) => (b'A' + (idx % 26) as u8) as char,
                None => '?',
            }
        };

        let border = format!("+{}+\n", "-".repeat(self.width()));
        let mut s = String::new();
        s.push_str(&border);
        for y in 0..self.height() {
            s.push('|');
            for x in 0..self.width() {
                match self.grid.get(Cell::new(x as i32, y as i32)) {
                    Some(h) => s.push(glyph(h)),
                    None => s.push('.'),
                }
            }
            s.push_str("|\n");
        }
        s.push_str(&border);
        s.push_str(&format!(
            "items={} occupied={}/{}\n",
            self.items.len(),
            self.grid.occupied_count(),
            self.params.cell_count()
        ));
        s
    }
}
