// engine/src/engine/error.rs
#![forbid(unsafe_code)]

//! Error model.
//!
//! Two tiers:
//! - [`Blocked`] is an expected placement outcome (the pointer can be anywhere, items collide
//!   all the time). It is data, not a failure.
//! - [`InventoryError`] is a rejected configuration or a broken invariant. Invariant
//!   violations mean the check-then-write contract was bypassed somewhere.

use thiserror::Error;

use crate::engine::geometry::Cell;
use crate::engine::item::{ItemHandle, ItemId};
use crate::engine::registry::InventoryId;

/// Result type used by fallible engine operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Why a shape cannot go at a given origin. Reports the first offending cell in shape order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blocked {
    /// The cell lies outside `[0, width) x [0, height)`.
    OutOfRange { cell: Cell },
    /// The cell is held by another item.
    Collision { cell: Cell, occupant: ItemHandle },
}

impl Blocked {
    pub fn cell(&self) -> Cell {
        match *self {
            Blocked::OutOfRange { cell } | Blocked::Collision { cell, .. } => cell,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// An item template or shape failed validation.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// Grid parameters failed validation.
    #[error("invalid inventory parameters: {0}")]
    InvalidParams(String),

    /// Grid cells and the membership list disagree, or a rollback could not be applied.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("unknown inventory {0}")]
    UnknownInventory(InventoryId),

    /// The handle does not belong to this inventory.
    #[error("item {0} is not in this inventory")]
    NotInInventory(ItemHandle),

    #[error("unknown item id {0}")]
    UnknownItem(ItemId),

    /// `pick` was called while an item is already held.
    #[error("drag session already holds an item")]
    NotIdle,

    /// A holding-only transition was called on an idle session.
    #[error("drag session holds no item")]
    NotHolding,

    /// A snapshot record could not be placed back.
    #[error("cannot restore item {id} at {origin}: {reason:?}")]
    Restore {
        id: ItemId,
        origin: Cell,
        reason: Blocked,
    },
}

impl InventoryError {
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidShape(msg.into())
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}
