// engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::engine::{Cell, Inventory, InventoryItem};

/// Policy chooses an origin for `item` in `inventory`.
///
/// Returns an origin where `inventory.can_place(item, origin)` holds, or `None` if the item
/// fits nowhere. Policies never mutate the inventory.
///
/// Object-safe so it can be used as `Box<dyn PlacementPolicy>`.
pub trait PlacementPolicy {
    fn choose_origin(&mut self, inventory: &Inventory, item: &InventoryItem) -> Option<Cell>;
}
