// engine/tests/inventory_invariants_prop.rs
#![forbid(unsafe_code)]

/**
 * Property/invariant tests for the placement engine and drag protocol.
 *
 * Purpose:
 * - Provide fuzz-like coverage over generated shapes, grid sizes and origins.
 * - Lock laws that must hold for every input, not just the fixtures.
 *
 * Invariants covered:
 * - `all_free` is false whenever any position is out of range.
 * - Four clockwise rotations reproduce the exact offset list.
 * - `preview` never mutates the grid.
 * - Any `i32` origin, however far out, answers `false` instead of faulting.
 * - `place` followed by `remove` restores the previous occupancy exactly.
 * - A rejected placement writes no cells at all.
 * - A drag that settles (placed or rolled back) conserves items and cells.
 */
mod common;

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

use grid_inventory::{
    Cell, DragSession, Inventories, Inventory, InventoryParams, ItemHandle, ItemId, ItemTemplate,
    OccupancyGrid, QUARTER_TURNS, rotate_clockwise,
};

fn arb_offsets() -> impl Strategy<Value = Vec<Cell>> {
    btree_set((-3i32..4, -3i32..4), 1..7)
        .prop_map(|set| set.into_iter().map(Cell::from).collect::<Vec<_>>())
        .prop_shuffle()
}

fn arb_cell() -> impl Strategy<Value = Cell> {
    (-4i32..14, -4i32..14).prop_map(Cell::from)
}

fn template(id: u32, offsets: &[Cell]) -> ItemTemplate {
    ItemTemplate::new(ItemId(id), "", offsets.iter().copied()).expect("generated shape is valid")
}

fn occupancy(inv: &Inventory) -> Vec<Option<ItemHandle>> {
    inv.grid().iter().map(|(_, o)| o).collect()
}

/// Scatter single-cell blockers over the grid; positions outside it are skipped.
fn cluttered(w: u32, h: u32, blockers: &[Cell]) -> Inventory {
    let mut inv = Inventory::new(InventoryParams::sized(w, h)).expect("valid");
    let rock = template(99, &[Cell::ORIGIN]);
    for &b in blockers {
        let _ = inv.place(rock.instantiate(), b);
    }
    inv
}

proptest! {
    #[test]
    fn all_free_is_false_with_any_out_of_range_position(
        w in 1usize..8,
        h in 1usize..8,
        inside in vec((0i32..8, 0i32..8), 0..6),
        dx in 0i32..4,
        dy in -3i32..4,
    ) {
        let grid: OccupancyGrid<u32> = OccupancyGrid::new(w, h);
        let mut positions: Vec<Cell> = inside
            .into_iter()
            .map(|(x, y)| Cell::new(x % w as i32, y % h as i32))
            .collect();
        prop_assert!(grid.all_free(&positions));

        positions.push(Cell::new(w as i32 + dx, dy));
        prop_assert!(!grid.all_free(&positions));
    }

    #[test]
    fn four_rotations_are_identity(offsets in arb_offsets()) {
        let mut t = offsets.clone();
        for _ in 0..QUARTER_TURNS {
            t = rotate_clockwise(&t);
            let mut dedup = t.clone();
            dedup.sort();
            dedup.dedup();
            prop_assert_eq!(dedup.len(), offsets.len());
        }
        prop_assert_eq!(t, offsets);
    }

    #[test]
    fn preview_never_mutates(
        offsets in arb_offsets(),
        blockers in vec(arb_cell(), 0..20),
        origin in arb_cell(),
    ) {
        let inv = cluttered(10, 10, &blockers);
        let before = occupancy(&inv);
        let item = template(1, &offsets).instantiate();

        let verdict = inv.preview(&item, origin);
        prop_assert_eq!(verdict, inv.check(&item, origin).is_ok());
        prop_assert_eq!(occupancy(&inv), before);
        prop_assert!(!item.is_placed());
    }

    #[test]
    fn any_origin_is_a_plain_answer(
        offsets in arb_offsets(),
        x in any::<i32>(),
        y in any::<i32>(),
    ) {
        let inv = cluttered(10, 10, &[]);
        let item = template(1, &offsets).instantiate();
        let origin = Cell::new(x, y);

        let inside = item.cells_at(origin).all(|c| inv.grid().in_range(c));
        prop_assert_eq!(inv.preview(&item, origin), inside);
    }

    #[test]
    fn place_then_remove_restores_occupancy(
        offsets in arb_offsets(),
        blockers in vec(arb_cell(), 0..20),
        origin in arb_cell(),
    ) {
        let mut inv = cluttered(10, 10, &blockers);
        let before = occupancy(&inv);
        let members = inv.len();

        match inv.place(template(1, &offsets).instantiate(), origin) {
            Ok(h) => {
                prop_assert_eq!(inv.occupied_cells(), before.iter().flatten().count() + offsets.len());
                let item = inv.remove(h).expect("consistent").expect("member");
                prop_assert!(!item.is_placed());
            }
            Err(rejected) => {
                // No partial residue, even when some offsets were individually in range.
                prop_assert!(!rejected.item.is_placed());
            }
        }

        prop_assert_eq!(occupancy(&inv), before);
        prop_assert_eq!(inv.len(), members);
        prop_assert!(inv.verify_integrity().is_ok());
    }

    #[test]
    fn settled_drag_conserves_items_and_cells(
        offsets in arb_offsets(),
        blockers in vec(arb_cell(), 0..15),
        drop_at in arb_cell(),
        turns in 0usize..4,
        into_second in any::<bool>(),
    ) {
        common::init_tracing();

        let mut invs = Inventories::new();
        let a = invs.insert(cluttered(10, 10, &blockers));
        let b = invs.insert(cluttered(6, 6, &blockers));

        let item = template(1, &offsets).instantiate();
        let Some(home) = invs.get(a).expect("exists").valid_origins(&item).first().copied() else {
            return Ok(());
        };
        let h = invs.get_mut(a).expect("exists").place(item, home).expect("valid origin");
        let grab = home + offsets[0];

        let total_before: usize = invs.iter().map(|(_, inv)| inv.occupied_cells()).sum();
        let count_before: usize = invs.iter().map(|(_, inv)| inv.len()).sum();

        let mut session = DragSession::new();
        prop_assert_eq!(session.pick(&mut invs, a, grab), Ok(Some(h)));
        for _ in 0..turns {
            session.rotate().expect("holding");
        }

        let target = if into_second { b } else { a };
        let predicted = session.preview(&invs, target, drop_at);
        let out = session.commit(&mut invs, target, drop_at).expect("settled");

        prop_assert_eq!(out.is_placed(), predicted);
        prop_assert!(!session.is_holding());
        prop_assert_eq!(out.handle(), h);
        prop_assert_eq!(invs.locate(h), Some(if predicted { target } else { a }));

        let total_after: usize = invs.iter().map(|(_, inv)| inv.occupied_cells()).sum();
        let count_after: usize = invs.iter().map(|(_, inv)| inv.len()).sum();
        prop_assert_eq!(total_after, total_before);
        prop_assert_eq!(count_after, count_before);
        for (_, inv) in invs.iter() {
            prop_assert!(inv.verify_integrity().is_ok());
        }
    }
}
