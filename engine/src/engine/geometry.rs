// engine/src/engine/geometry.rs
#![forbid(unsafe_code)]

/*
Shape geometry

Shapes are ordered lists of integer cell offsets. Everything in here is pure.

Rotation
--------
A clockwise quarter turn maps an offset `p` to `c + (-(p.y - c.y), p.x - c.x)` where `c`
is the center of the shape's bounding box. The center is tracked in doubled coordinates
so it stays exact:

    X2 = (min_x + max_x) + (min_y + max_y) - 2 * p.y
    Y2 = (min_y + max_y) - (min_x + max_x) + 2 * p.x

When the bounding-box extents have the same parity, X2 and Y2 are even and the rotation is
exact. Otherwise every rotated offset sits on a half cell and the whole shape is shifted by
the same half cell:
- wider than tall: toward negative infinity (floor),
- taller than wide: toward positive infinity (ceil).

Odd-parity shapes alternate wide/tall on every turn, so the shifts cancel in pairs and four
turns reproduce the input exactly. A uniform shift can never merge two offsets.
*/

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Integer grid coordinate (or offset when used inside a shape).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise add clamped to the `i32` range. A clamped coordinate is never inside a
    /// grid, so callers that range-check the result need no separate overflow path.
    #[inline]
    pub const fn saturating_add(self, rhs: Cell) -> Cell {
        Cell::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl Add for Cell {
    type Output = Cell;

    #[inline]
    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Cell {
    type Output = Cell;

    #[inline]
    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orientation of an item, in clockwise quarter turns from its template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn all() -> &'static [Rotation] {
        use Rotation::*;
        &[Deg0, Deg90, Deg180, Deg270]
    }

    /// Next orientation after one clockwise quarter turn.
    pub fn clockwise(self) -> Self {
        use Rotation::*;
        match self {
            Deg0 => Deg90,
            Deg90 => Deg180,
            Deg180 => Deg270,
            Deg270 => Deg0,
        }
    }

    pub fn quarter_turns(self) -> usize {
        use Rotation::*;
        match self {
            Deg0 => 0,
            Deg90 => 1,
            Deg180 => 2,
            Deg270 => 3,
        }
    }

    /// Any count is reduced modulo four.
    pub fn from_quarter_turns(turns: usize) -> Self {
        Self::all()[turns % Self::all().len()]
    }

    pub fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    /// Sprite rotation for renderers that pivot around [`center`].
    pub fn radians(self) -> f32 {
        self.quarter_turns() as f32 * std::f32::consts::FRAC_PI_2
    }
}

/// Returns `(min, max)` corners of the shape's bounding box, or `None` for an empty shape.
pub fn bounding_box(cells: &[Cell]) -> Option<(Cell, Cell)> {
    let first = *cells.first()?;
    let mut mn = first;
    let mut mx = first;
    for c in &cells[1..] {
        mn.x = mn.x.min(c.x);
        mn.y = mn.y.min(c.y);
        mx.x = mx.x.max(c.x);
        mx.y = mx.y.max(c.y);
    }
    Some((mn, mx))
}

/// Bounding-box width and height in cells. `(0, 0)` for an empty shape.
#[inline]
pub fn extent(cells: &[Cell]) -> (i32, i32) {
    match bounding_box(cells) {
        Some((mn, mx)) => (
            mx.x.saturating_sub(mn.x).saturating_add(1),
            mx.y.saturating_sub(mn.y).saturating_add(1),
        ),
        None => (0, 0),
    }
}

/// Bounding-box center; half-cell values are kept as-is.
pub fn center(cells: &[Cell]) -> Option<(f32, f32)> {
    let (mn, mx) = bounding_box(cells)?;
    Some((
        (mn.x as f32 + mx.x as f32) / 2.0,
        (mn.y as f32 + mx.y as f32) / 2.0,
    ))
}

#[inline]
fn halve(v: i64, round_up: bool) -> i32 {
    let h = if round_up {
        -((-v).div_euclid(2))
    } else {
        v.div_euclid(2)
    };
    h.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Rotate a shape 90 degrees clockwise about its bounding-box center.
///
/// Offset order is preserved: `out[i]` is the image of `cells[i]`. Intermediates are `i64`;
/// shapes within `MAX_SHAPE_OFFSET` (and all their rotations) rotate exactly, anything
/// further out is clamped to the `i32` range.
pub fn rotate_clockwise(cells: &[Cell]) -> Vec<Cell> {
    let Some((mn, mx)) = bounding_box(cells) else {
        return Vec::new();
    };

    let sx = mn.x as i64 + mx.x as i64;
    let sy = mn.y as i64 + mx.y as i64;
    // Parity of sx + sy equals parity of width + height.
    let round_up = (mx.y as i64 - mn.y as i64) > (mx.x as i64 - mn.x as i64);

    cells
        .iter()
        .map(|p| {
            let x2 = sx + sy - 2 * p.y as i64;
            let y2 = sy - sx + 2 * p.x as i64;
            Cell::new(halve(x2, round_up), halve(y2, round_up))
        })
        .collect()
}
