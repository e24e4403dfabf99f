// engine/src/engine/item.rs
#![forbid(unsafe_code)]

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::engine::constants::MAX_SHAPE_OFFSET;
use crate::engine::error::{InventoryError, InventoryResult};
use crate::engine::geometry::{Cell, Rotation, rotate_clockwise};

/// Item type id. Not unique per inventory: several placed instances may share one template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Identity of one item instance. This is what grid cells point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemHandle(u64);

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

impl ItemHandle {
    fn fresh() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque key a renderer uses to find the texture/color of an item. Never read by the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderHandle(pub u64);

/// Ordered, non-empty list of distinct cell offsets relative to an item's origin.
///
/// Shapes need not be contiguous or convex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Shape(Vec<Cell>);

impl Shape {
    pub fn new<I, C>(offsets: I) -> InventoryResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let cells: Vec<Cell> = offsets.into_iter().map(Into::into).collect();
        if cells.is_empty() {
            return Err(InventoryError::invalid_shape("shape must cover at least one cell"));
        }
        let mut seen = FxHashSet::default();
        for &c in &cells {
            if c.x.unsigned_abs() > MAX_SHAPE_OFFSET as u32
                || c.y.unsigned_abs() > MAX_SHAPE_OFFSET as u32
            {
                return Err(InventoryError::invalid_shape(format!(
                    "offset {c} is further than {MAX_SHAPE_OFFSET} from the origin"
                )));
            }
            if !seen.insert(c) {
                return Err(InventoryError::invalid_shape(format!(
                    "duplicate offset {c}"
                )));
            }
        }
        Ok(Self(cells))
    }

    /// Single cell at the origin.
    pub fn unit() -> Self {
        Self(vec![Cell::ORIGIN])
    }

    #[inline]
    pub fn offsets(&self) -> &[Cell] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated shape; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Absolute cells covered when the origin sits at `origin`. Coordinates saturate, so an
    /// origin near the `i32` limits yields out-of-range cells instead of wrapping.
    pub fn at(&self, origin: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.0.iter().map(move |&o| origin.saturating_add(o))
    }

    pub fn rotated_clockwise(&self) -> Self {
        Self(rotate_clockwise(&self.0))
    }
}

impl TryFrom<Vec<Cell>> for Shape {
    type Error = InventoryError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        Shape::new(cells)
    }
}

impl From<Shape> for Vec<Cell> {
    fn from(shape: Shape) -> Self {
        shape.0
    }
}

/// Static description of an item type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: ItemId,
    pub name: String,
    pub shape: Shape,
    #[serde(default)]
    pub render: Option<RenderHandle>,
}

impl ItemTemplate {
    pub fn new<I, C>(id: ItemId, name: impl Into<String>, offsets: I) -> InventoryResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Ok(Self {
            id,
            name: name.into(),
            shape: Shape::new(offsets)?,
            render: None,
        })
    }

    pub fn with_render(mut self, render: RenderHandle) -> Self {
        self.render = Some(render);
        self
    }

    pub fn instantiate(&self) -> InventoryItem {
        InventoryItem::from_template(self)
    }
}

/// A movable item instance.
///
/// `origin` is `Some` only while the item sits in an inventory. Instances are not `Clone`:
/// copying one goes through [`InventoryItem::duplicate`], which mints a new handle.
#[derive(Debug, PartialEq, Eq)]
pub struct InventoryItem {
    handle: ItemHandle,
    id: ItemId,
    name: String,
    render: Option<RenderHandle>,
    shape: Shape,
    rotation: Rotation,
    origin: Option<Cell>,
}

impl InventoryItem {
    pub fn new(id: ItemId, shape: Shape) -> Self {
        Self {
            handle: ItemHandle::fresh(),
            id,
            name: String::new(),
            render: None,
            shape,
            rotation: Rotation::Deg0,
            origin: None,
        }
    }

    pub fn from_template(template: &ItemTemplate) -> Self {
        Self {
            handle: ItemHandle::fresh(),
            id: template.id,
            name: template.name.clone(),
            render: template.render,
            shape: template.shape.clone(),
            rotation: Rotation::Deg0,
            origin: None,
        }
    }

    /// Deep copy of shape and orientation under a fresh handle, unplaced.
    pub fn duplicate(&self) -> Self {
        Self {
            handle: ItemHandle::fresh(),
            id: self.id,
            name: self.name.clone(),
            render: self.render,
            shape: self.shape.clone(),
            rotation: self.rotation,
            origin: None,
        }
    }

    #[inline]
    pub fn handle(&self) -> ItemHandle {
        self.handle
    }

    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self) -> Option<RenderHandle> {
        self.render
    }

    /// Current (post-rotation) shape.
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline]
    pub fn origin(&self) -> Option<Cell> {
        self.origin
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.origin.is_some()
    }

    /// Absolute cells this item would cover at `origin`.
    pub fn cells_at(&self, origin: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.shape.at(origin)
    }

    /// One clockwise quarter turn of shape and orientation.
    pub fn rotate_clockwise(&mut self) {
        self.shape = self.shape.rotated_clockwise();
        self.rotation = self.rotation.clockwise();
    }

    /// Turn clockwise until the orientation equals `target`.
    pub fn rotate_to(&mut self, target: Rotation) {
        while self.rotation != target {
            self.rotate_clockwise();
        }
    }

    pub(crate) fn set_origin(&mut self, origin: Cell) {
        self.origin = Some(origin);
    }

    pub(crate) fn clear_origin(&mut self) {
        self.origin = None;
    }
}
