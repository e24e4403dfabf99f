// engine/src/policy/first_fit.rs
#![forbid(unsafe_code)]

use crate::engine::{Cell, Inventory, InventoryItem};

use super::base::PlacementPolicy;

/// First valid origin in row-major order (top row first, left to right).
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstFit;

impl PlacementPolicy for FirstFit {
    fn choose_origin(&mut self, inventory: &Inventory, item: &InventoryItem) -> Option<Cell> {
        inventory.valid_origins(item).first().copied()
    }
}
