// engine/src/engine/drag.rs
#![forbid(unsafe_code)]

/*
Drag protocol

    Idle --pick(hit)--> Holding --commit(ok)-----------> Idle
      ^                   |  ^
      |                   |  +-- preview / rotate
      +---- rollback -----+-- commit(blocked) / cancel

While Holding, the session has sole custody of the item: it is in no inventory's grid.
Rollback puts the item back into its source inventory at its source origin with its source
orientation. Nothing else can have claimed those cells in between, so a failed rollback is an
invariant violation; the session then keeps holding the item and reports the error.
*/

use std::mem;

use tracing::{debug, error, warn};

use crate::engine::error::{InventoryError, InventoryResult};
use crate::engine::geometry::{Cell, Rotation};
use crate::engine::item::{InventoryItem, ItemHandle};
use crate::engine::registry::{Inventories, InventoryId};

#[derive(Debug, Default)]
pub enum DragState {
    #[default]
    Idle,
    Holding {
        item: InventoryItem,
        source: InventoryId,
        origin: Cell,
        rotation: Rotation,
    },
}

/// How a drag settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The item now sits in `inventory` at `origin`.
    Placed {
        handle: ItemHandle,
        inventory: InventoryId,
        origin: Cell,
    },
    /// The drop was refused (or cancelled) and the item went back where it came from.
    RolledBack {
        handle: ItemHandle,
        inventory: InventoryId,
        origin: Cell,
    },
}

impl DropOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, DropOutcome::Placed { .. })
    }

    pub fn handle(&self) -> ItemHandle {
        match *self {
            DropOutcome::Placed { handle, .. } | DropOutcome::RolledBack { handle, .. } => handle,
        }
    }
}

/// Pick / preview / commit-or-rollback state machine driven by discrete input commands.
#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.state, DragState::Holding { .. })
    }

    /// The detached item, for ghost rendering.
    pub fn held(&self) -> Option<&InventoryItem> {
        match &self.state {
            DragState::Holding { item, .. } => Some(item),
            DragState::Idle => None,
        }
    }

    /// Where the held item came from.
    pub fn source(&self) -> Option<(InventoryId, Cell)> {
        match &self.state {
            DragState::Holding { source, origin, .. } => Some((*source, *origin)),
            DragState::Idle => None,
        }
    }

    /// Lift the item under `pos` out of `source`. `Ok(None)` when the cell is empty.
    pub fn pick(
        &mut self,
        inventories: &mut Inventories,
        source: InventoryId,
        pos: Cell,
    ) -> InventoryResult<Option<ItemHandle>> {
        if self.is_holding() {
            return Err(InventoryError::NotIdle);
        }

        let inventory = inventories.get_mut(source)?;
        let Some(handle) = inventory.get_item(pos) else {
            return Ok(None);
        };
        let Some(origin) = inventory.item(handle).and_then(InventoryItem::origin) else {
            error!(%handle, inventory = %source, "grid cell points at an item with no origin");
            return Err(InventoryError::invariant(format!(
                "cell {pos} of {source} points at {handle}, which is not placed there"
            )));
        };
        let Some(item) = inventory.remove(handle)? else {
            return Err(InventoryError::invariant(format!(
                "{handle} vanished from {source} during pick"
            )));
        };

        debug!(item = %item.id(), %handle, inventory = %source, x = origin.x, y = origin.y, "picked item");
        self.state = DragState::Holding {
            rotation: item.rotation(),
            item,
            source,
            origin,
        };
        Ok(Some(handle))
    }

    /// Would the held item fit in `target` at `pos`? False when idle or `target` is unknown.
    pub fn preview(&self, inventories: &Inventories, target: InventoryId, pos: Cell) -> bool {
        let Some(item) = self.held() else {
            return false;
        };
        inventories
            .get(target)
            .is_ok_and(|inventory| inventory.preview(item, pos))
    }

    /// Turn the held item a quarter clockwise. Touches no inventory.
    pub fn rotate(&mut self) -> InventoryResult<Rotation> {
        match &mut self.state {
            DragState::Holding { item, .. } => {
                item.rotate_clockwise();
                Ok(item.rotation())
            }
            DragState::Idle => Err(InventoryError::NotHolding),
        }
    }

    /// Drop the held item into `target` at `pos`, or roll it back if it does not fit.
    ///
    /// An unknown `target` (pointer released outside every grid) also rolls back.
    pub fn commit(
        &mut self,
        inventories: &mut Inventories,
        target: InventoryId,
        pos: Cell,
    ) -> InventoryResult<DropOutcome> {
        let DragState::Holding {
            item,
            source,
            origin,
            rotation,
        } = mem::take(&mut self.state)
        else {
            return Err(InventoryError::NotHolding);
        };

        let item = match inventories.get_mut(target) {
            Ok(inventory) => match inventory.place(item, pos) {
                Ok(handle) => {
                    debug!(%handle, inventory = %target, x = pos.x, y = pos.y, "drop committed");
                    return Ok(DropOutcome::Placed {
                        handle,
                        inventory: target,
                        origin: pos,
                    });
                }
                Err(rejected) => {
                    debug!(handle = %rejected.item.handle(), reason = ?rejected.reason, "drop refused");
                    rejected.item
                }
            },
            Err(_) => {
                warn!(handle = %item.handle(), inventory = %target, "drop on unknown inventory");
                item
            }
        };

        self.rollback(inventories, item, source, origin, rotation)
    }

    /// Abort the drag. Always takes the rollback path.
    pub fn cancel(&mut self, inventories: &mut Inventories) -> InventoryResult<DropOutcome> {
        let DragState::Holding {
            item,
            source,
            origin,
            rotation,
        } = mem::take(&mut self.state)
        else {
            return Err(InventoryError::NotHolding);
        };
        self.rollback(inventories, item, source, origin, rotation)
    }

    fn rollback(
        &mut self,
        inventories: &mut Inventories,
        mut item: InventoryItem,
        source: InventoryId,
        origin: Cell,
        rotation: Rotation,
    ) -> InventoryResult<DropOutcome> {
        // The vacated cells match the orientation the item had when picked.
        item.rotate_to(rotation);

        let failure = match inventories.get_mut(source) {
            Ok(inventory) => match inventory.place(item, origin) {
                Ok(handle) => {
                    debug!(%handle, inventory = %source, x = origin.x, y = origin.y, "drag rolled back");
                    return Ok(DropOutcome::RolledBack {
                        handle,
                        inventory: source,
                        origin,
                    });
                }
                Err(rejected) => {
                    let msg = format!(
                        "rollback of {} to {source} at {origin} blocked: {:?}",
                        rejected.item.handle(),
                        rejected.reason
                    );
                    item = rejected.item;
                    msg
                }
            },
            Err(e) => format!("rollback source missing: {e}"),
        };

        error!(handle = %item.handle(), inventory = %source, "{failure}");
        self.state = DragState::Holding {
            item,
            source,
            origin,
            rotation,
        };
        Err(InventoryError::invariant(failure))
    }
}
