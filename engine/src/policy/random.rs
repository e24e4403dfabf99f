// engine/src/policy/random.rs
#![forbid(unsafe_code)]

use rand::prelude::*;
use tracing::trace;

use crate::engine::{Cell, Inventory, InventoryItem};

use super::base::PlacementPolicy;

/// Scatters items: every valid origin is equally likely.
///
/// The stream is seeded so a loot drop replays identically; `reseed` rewinds it.
#[derive(Clone, Debug)]
pub struct RandomFit {
    seed: u64,
    rng: StdRng,
}

impl RandomFit {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}

impl PlacementPolicy for RandomFit {
    fn choose_origin(&mut self, inventory: &Inventory, item: &InventoryItem) -> Option<Cell> {
        let candidates = inventory.valid_origins(item);
        if candidates.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range(0..candidates.len());
        trace!(item = %item.id(), candidates = candidates.len(), pick, "scattered origin");
        candidates.get(pick).copied()
    }
}
