// engine/tests/common/mod.rs
#![allow(dead_code)]

use grid_inventory::{Inventories, InventoryId, InventoryParams, ItemId, ItemTemplate, RenderHandle};
use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once per test binary. Filter via `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(false)
        .try_init();
}

pub fn single_cell() -> ItemTemplate {
    ItemTemplate::new(ItemId(1), "The Item", [(0, 0)])
        .expect("valid template")
        .with_render(RenderHandle(0x4a7a96))
}

pub fn bar() -> ItemTemplate {
    ItemTemplate::new(ItemId(2), "Other Item", [(0, 0), (0, 1), (0, 2)])
        .expect("valid template")
        .with_render(RenderHandle(0xee8695))
}

pub fn zig_zag() -> ItemTemplate {
    ItemTemplate::new(ItemId(3), "The Weird One", [(0, 0), (0, 1), (1, 1), (2, 1)])
        .expect("valid template")
        .with_render(RenderHandle(0xff7777))
}

/// One empty 10x10 inventory.
pub fn single_inventory() -> (Inventories, InventoryId) {
    let mut invs = Inventories::new();
    let id = invs
        .create(InventoryParams::default())
        .expect("default params are valid");
    (invs, id)
}
