// engine/src/policy/snug.rs
#![forbid(unsafe_code)]

use crate::engine::{Cell, Inventory, InventoryItem};

use super::base::PlacementPolicy;

const NEIGHBORS: [Cell; 4] = [
    Cell::new(1, 0),
    Cell::new(-1, 0),
    Cell::new(0, 1),
    Cell::new(0, -1),
];

/// Prefer origins where the item touches the most walls and occupied cells.
///
/// Keeps free space in large connected blocks. Ties go to the earliest origin in row-major
/// order, so an empty grid fills from the top-left corner.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnugFit;

impl SnugFit {
    /// Number of item-cell edges that face a wall or another item.
    pub fn contact(inventory: &Inventory, item: &InventoryItem, origin: Cell) -> u32 {
        let own: Vec<Cell> = item.cells_at(origin).collect();
        let grid = inventory.grid();

        let mut contact = 0u32;
        for &cell in &own {
            for d in NEIGHBORS {
                let n = cell.saturating_add(d);
                if own.contains(&n) {
                    continue;
                }
                if !grid.in_range(n) || grid.get(n).is_some() {
                    contact += 1;
                }
            }
        }
        contact
    }
}

impl PlacementPolicy for SnugFit {
    fn choose_origin(&mut self, inventory: &Inventory, item: &InventoryItem) -> Option<Cell> {
        let mut best: Option<(u32, Cell)> = None;
        for origin in inventory.valid_origins(item) {
            let score = Self::contact(inventory, item, origin);
            match best {
                Some((s, _)) if s >= score => {}
                _ => best = Some((score, origin)),
            }
        }
        best.map(|(_, origin)| origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{InventoryParams, ItemId, ItemTemplate};

    #[test]
    fn prefers_the_pocket_next_to_an_item() {
        let mut inv = Inventory::new(InventoryParams::sized(3, 3)).expect("valid");
        let coin = ItemTemplate::new(ItemId(1), "coin", [(0, 0)]).expect("valid");
        inv.place(coin.instantiate(), Cell::new(2, 1)).expect("fits");

        let next = coin.instantiate();
        assert_eq!(SnugFit::contact(&inv, &next, Cell::new(0, 0)), 2);
        assert_eq!(SnugFit::contact(&inv, &next, Cell::new(2, 0)), 3);
        assert_eq!(SnugFit::contact(&inv, &next, Cell::new(1, 1)), 1);

        // (2, 0) and (2, 2) tie; row-major order breaks the tie.
        assert_eq!(SnugFit.choose_origin(&inv, &next), Some(Cell::new(2, 0)));
    }

    #[test]
    fn full_grid_has_no_choice() {
        let mut inv = Inventory::new(InventoryParams::sized(1, 1)).expect("valid");
        let coin = ItemTemplate::new(ItemId(1), "coin", [(0, 0)]).expect("valid");
        inv.place(coin.instantiate(), Cell::ORIGIN).expect("fits");
        assert_eq!(SnugFit.choose_origin(&inv, &coin.instantiate()), None);
    }
}
