// engine/src/engine/registry.rs
#![forbid(unsafe_code)]

use std::fmt;

use crate::engine::error::{InventoryError, InventoryResult};
use crate::engine::inventory::Inventory;
use crate::engine::item::ItemHandle;
use crate::engine::params::InventoryParams;

/// Index of an inventory inside an [`Inventories`] container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InventoryId(usize);

impl InventoryId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inv{}", self.0)
    }
}

/// Owns every inventory a drag can reach (player bag, chest, vendor, ...).
///
/// Inventories are never removed, so ids stay valid for the container's lifetime.
#[derive(Debug, Default)]
pub struct Inventories {
    slots: Vec<Inventory>,
}

impl Inventories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, inventory: Inventory) -> InventoryId {
        self.slots.push(inventory);
        InventoryId(self.slots.len() - 1)
    }

    /// Build and insert an empty inventory.
    pub fn create(&mut self, params: InventoryParams) -> InventoryResult<InventoryId> {
        Ok(self.insert(Inventory::new(params)?))
    }

    pub fn get(&self, id: InventoryId) -> InventoryResult<&Inventory> {
        self.slots
            .get(id.0)
            .ok_or(InventoryError::UnknownInventory(id))
    }

    pub fn get_mut(&mut self, id: InventoryId) -> InventoryResult<&mut Inventory> {
        self.slots
            .get_mut(id.0)
            .ok_or(InventoryError::UnknownInventory(id))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InventoryId, &Inventory)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, inv)| (InventoryId(i), inv))
    }

    /// Which inventory currently holds `handle`, if any.
    pub fn locate(&self, handle: ItemHandle) -> Option<InventoryId> {
        self.iter()
            .find(|(_, inv)| inv.contains(handle))
            .map(|(id, _)| id)
    }
}
