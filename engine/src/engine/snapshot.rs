// engine/src/engine/snapshot.rs
#![forbid(unsafe_code)]

//! In-memory snapshot of an inventory's placed items.
//!
//! A snapshot stores `(id, origin, rotation)` per item plus the grid parameters. The types
//! derive serde so the host application can persist them in whatever format it uses; the
//! engine itself never touches storage.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::error::{InventoryError, InventoryResult};
use crate::engine::geometry::{Cell, Rotation};
use crate::engine::inventory::Inventory;
use crate::engine::item::{ItemId, ItemTemplate};
use crate::engine::params::InventoryParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedRecord {
    pub id: ItemId,
    pub origin: Cell,
    #[serde(default)]
    pub rotation: Rotation,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub params: InventoryParams,
    pub items: Vec<PlacedRecord>,
}

/// Templates by item id, used to rebuild items from snapshot records.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    templates: FxHashMap<ItemId, ItemTemplate>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, replacing any previous one with the same id.
    pub fn insert(&mut self, template: ItemTemplate) -> Option<ItemTemplate> {
        self.templates.insert(template.id, template)
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemTemplate> {
        self.templates.get(&id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<ItemTemplate> for ItemCatalog {
    fn from_iter<I: IntoIterator<Item = ItemTemplate>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for t in iter {
            catalog.insert(t);
        }
        catalog
    }
}

impl Inventory {
    /// Records are sorted row-major by origin so equal layouts give equal snapshots.
    pub fn snapshot(&self) -> InventorySnapshot {
        let mut items: Vec<PlacedRecord> = self
            .items()
            .iter()
            .filter_map(|item| {
                item.origin().map(|origin| PlacedRecord {
                    id: item.id(),
                    origin,
                    rotation: item.rotation(),
                })
            })
            .collect();
        items.sort_by_key(|r| (r.origin.y, r.origin.x, r.id));

        InventorySnapshot {
            params: *self.params(),
            items,
        }
    }

    /// Build a fresh inventory from a snapshot. Item handles are new.
    pub fn restore(snapshot: &InventorySnapshot, catalog: &ItemCatalog) -> InventoryResult<Self> {
        let mut inventory = Inventory::new(snapshot.params)?;

        for record in &snapshot.items {
            let template = catalog
                .get(record.id)
                .ok_or(InventoryError::UnknownItem(record.id))?;

            let mut item = template.instantiate();
            item.rotate_to(record.rotation);

            inventory
                .place(item, record.origin)
                .map_err(|rejected| InventoryError::Restore {
                    id: record.id,
                    origin: record.origin,
                    reason: rejected.reason,
                })?;
        }

        debug!(items = inventory.len(), "restored inventory");
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::Blocked;

    fn catalog() -> ItemCatalog {
        [
            ItemTemplate::new(ItemId(1), "The Item", [(0, 0)]),
            ItemTemplate::new(ItemId(2), "Other Item", [(0, 0), (0, 1), (0, 2)]),
            ItemTemplate::new(ItemId(3), "The Weird One", [(0, 0), (0, 1), (1, 1), (2, 1)]),
        ]
        .into_iter()
        .collect::<InventoryResult<Vec<_>>>()
        .expect("valid templates")
        .into_iter()
        .collect()
    }

    #[test]
    fn snapshot_then_restore_reproduces_layout() {
        let catalog = catalog();
        let mut inv = Inventory::new(InventoryParams::default()).expect("valid");

        let mut weird = catalog.get(ItemId(3)).expect("known").instantiate();
        weird.rotate_clockwise();
        inv.place(weird, Cell::new(5, 5)).expect("fits");
        inv.place(catalog.get(ItemId(2)).expect("known").instantiate(), Cell::new(0, 5))
            .expect("fits");
        inv.place(catalog.get(ItemId(1)).expect("known").instantiate(), Cell::new(2, 0))
            .expect("fits");

        let snap = inv.snapshot();
        assert_eq!(snap.items.len(), 3);
        assert_eq!(snap.items[0].origin, Cell::new(2, 0));

        let back = Inventory::restore(&snap, &catalog).expect("restorable");
        assert_eq!(back.snapshot(), snap);
        assert_eq!(back.occupied_cells(), inv.occupied_cells());
        for (pos, occupant) in inv.grid().iter() {
            assert_eq!(occupant.is_some(), back.get_item(pos).is_some());
        }
    }

    #[test]
    fn restore_reports_unknown_ids_and_overlaps() {
        let catalog = catalog();
        let mut snap = InventorySnapshot {
            params: InventoryParams::sized(4, 4),
            items: vec![PlacedRecord {
                id: ItemId(42),
                origin: Cell::ORIGIN,
                rotation: Rotation::Deg0,
            }],
        };
        assert_eq!(
            Inventory::restore(&snap, &catalog).err(),
            Some(InventoryError::UnknownItem(ItemId(42)))
        );

        snap.items = vec![
            PlacedRecord {
                id: ItemId(2),
                origin: Cell::ORIGIN,
                rotation: Rotation::Deg0,
            },
            PlacedRecord {
                id: ItemId(1),
                origin: Cell::new(0, 2),
                rotation: Rotation::Deg0,
            },
        ];
        match Inventory::restore(&snap, &catalog) {
            Err(InventoryError::Restore { id, reason, .. }) => {
                assert_eq!(id, ItemId(1));
                assert!(matches!(reason, Blocked::Collision { .. }));
            }
            other => panic!("expected restore failure, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_survives_json() {
        let snap = InventorySnapshot {
            params: InventoryParams::default(),
            items: vec![PlacedRecord {
                id: ItemId(3),
                origin: Cell::new(6, 2),
                rotation: Rotation::Deg90,
            }],
        };
        let text = serde_json::to_string(&snap).expect("serializable");
        let back: InventorySnapshot = serde_json::from_str(&text).expect("deserializable");
        assert_eq!(back, snap);
    }
}
