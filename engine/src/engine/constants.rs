// engine/src/engine/constants.rs
#![forbid(unsafe_code)]

/// Default grid width in cells.
pub const DEFAULT_GRID_W: u32 = 10;
/// Default grid height in cells.
pub const DEFAULT_GRID_H: u32 = 10;

/// Default on-screen cell size. Carried for renderers, never read by the core.
pub const DEFAULT_CELL_SIZE: u32 = 30;
/// Default on-screen gap between cells. Carried for renderers, never read by the core.
pub const DEFAULT_CELL_GAP: u32 = 2;

/// Number of clockwise quarter turns that bring a shape back to itself.
pub const QUARTER_TURNS: usize = 4;

/// Largest absolute offset a shape may use on either axis. Every rotation of such a shape
/// stays well inside `i32`.
pub const MAX_SHAPE_OFFSET: i32 = 1 << 29;
