// engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod engine;
pub mod policy;

pub use engine::{
    Blocked, Cell, DEFAULT_CELL_GAP, DEFAULT_CELL_SIZE, DEFAULT_GRID_H, DEFAULT_GRID_W,
    DragSession, DragState, DropOutcome, Inventories, Inventory, InventoryError, InventoryId,
    InventoryItem, InventoryParams, InventoryResult, InventorySnapshot, ItemCatalog, ItemHandle,
    ItemId, ItemTemplate, MAX_SHAPE_OFFSET, OccupancyGrid, PlacedRecord, QUARTER_TURNS, Rejected,
    RenderHandle, Rotation, Shape, bounding_box, center, extent, rotate_clockwise,
};
pub use policy::{FirstFit, PlacementPolicy, RandomFit, SnugFit};
