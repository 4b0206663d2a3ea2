//! Axis-aligned rectangles on the placement grid

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in grid units, `(x, y)` is the top-left cell
///
/// Coordinates are signed so gesture previews can describe candidates that
/// hang off the grid before they are clamped or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest rectangle covering both cells, endpoints inclusive
    pub fn spanning(a: (i32, i32), b: (i32, i32)) -> Self {
        let x = a.0.min(b.0);
        let y = a.1.min(b.1);
        Self {
            x,
            y,
            w: (a.0 - b.0).abs() + 1,
            h: (a.1 - b.1).abs() + 1,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    pub fn perimeter(&self) -> i64 {
        2 * (self.w as i64 + self.h as i64)
    }

    pub fn contains_cell(&self, cx: i32, cy: i32) -> bool {
        cx >= self.x && cx < self.right() && cy >= self.y && cy < self.bottom()
    }

    pub fn with_origin(&self, x: i32, y: i32) -> Self {
        Self { x, y, ..*self }
    }
}

/// Strict AABB overlap; rectangles sharing an edge do not overlap
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Whether the rectangle lies entirely inside an `n` x `n` grid
#[inline]
pub fn in_bounds(rect: &Rect, n: i32) -> bool {
    rect.x >= 0 && rect.y >= 0 && rect.right() <= n && rect.bottom() <= n
}

/// Clamp `value` into `[lo, hi]`; `lo` wins if the range is empty
#[inline]
pub fn clamp(value: i32, lo: i32, hi: i32) -> i32 {
    value.min(hi).max(lo)
}

/// Shift a rectangle so it sits inside the grid, keeping its size
///
/// Rectangles larger than the grid are pinned to the origin.
pub fn clamp_origin(rect: &Rect, n: i32) -> Rect {
    rect.with_origin(clamp(rect.x, 0, n - rect.w), clamp(rect.y, 0, n - rect.h))
}
