// engine/src/policy/mod.rs
#![forbid(unsafe_code)]

mod base;
mod first_fit;
mod random;
mod snug;

/**
 * Auto-placement.
 *
 * Used when an item enters an inventory without a drop position (loot pickup, "sort bag").
 * Every policy only picks among `Inventory::valid_origins`, so its answer always fits.
 */
pub use base::PlacementPolicy;
pub use first_fit::FirstFit;
pub use random::RandomFit;
pub use snug::SnugFit;
