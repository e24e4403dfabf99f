// engine/src/engine/params.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::engine::constants::{
    DEFAULT_CELL_GAP, DEFAULT_CELL_SIZE, DEFAULT_GRID_H, DEFAULT_GRID_W,
};
use crate::engine::error::{InventoryError, InventoryResult};

/// Grid parameters of one inventory.
///
/// `width`/`height` are the grid size in cells. `cell_size` and `cell_gap` are layout values
/// for renderers; the core carries them but never reads them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryParams {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub cell_gap: u32,
}

impl Default for InventoryParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_W,
            height: DEFAULT_GRID_H,
            cell_size: DEFAULT_CELL_SIZE,
            cell_gap: DEFAULT_CELL_GAP,
        }
    }
}

impl InventoryParams {
    /// Default layout with a custom grid size.
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> InventoryResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(InventoryError::invalid_params(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        // Coordinates are i32; every cell must stay addressable.
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(InventoryError::invalid_params("grid side exceeds i32 range"));
        }
        if (self.width as usize).checked_mul(self.height as usize).is_none() {
            return Err(InventoryError::invalid_params("cell count overflows usize"));
        }
        Ok(())
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_layout() {
        let p = InventoryParams::default();
        assert_eq!((p.width, p.height), (10, 10));
        assert_eq!((p.cell_size, p.cell_gap), (30, 2));
        assert!(p.validate().is_ok());
        assert_eq!(p.cell_count(), 100);
    }

    #[test]
    fn zero_sized_grids_are_rejected() {
        assert!(matches!(
            InventoryParams::sized(0, 4).validate(),
            Err(InventoryError::InvalidParams(_))
        ));
        assert!(InventoryParams::sized(4, 0).validate().is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let p: InventoryParams =
            serde_json::from_str(r#"{ "width": 6, "height": 4 }"#).expect("valid json");
        assert_eq!(p, InventoryParams::sized(6, 4));
    }
}
