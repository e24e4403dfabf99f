// engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod constants;
mod drag;
mod error;
mod geometry;
mod grid;
mod inventory;
mod item;
mod params;
mod registry;
mod snapshot;

/**
 * Inventory model: geometry and grids at the bottom, items and inventories on top, the drag
 * session driving moves between inventories. Submodules stay private; callers see the names
 * below.
 */
pub use constants::{
    DEFAULT_CELL_GAP, DEFAULT_CELL_SIZE, DEFAULT_GRID_H, DEFAULT_GRID_W, MAX_SHAPE_OFFSET,
    QUARTER_TURNS,
};
pub use drag::{DragSession, DragState, DropOutcome};
pub use error::{Blocked, InventoryError, InventoryResult};
pub use geometry::{Cell, Rotation, bounding_box, center, extent, rotate_clockwise};
pub use grid::OccupancyGrid;
pub use inventory::{Inventory, Rejected};
pub use item::{InventoryItem, ItemHandle, ItemId, ItemTemplate, RenderHandle, Shape};
pub use params::InventoryParams;
pub use registry::{Inventories, InventoryId};
pub use snapshot::{InventorySnapshot, ItemCatalog, PlacedRecord};
