//! Hit testing for gesture dispatch

use glam::Vec2;

use crate::core::types::EnclosureId;
use crate::placement::PlacementStore;
use crate::spatial::{clamp, Rect};

/// Enclosure sides grabbed by a resize gesture
///
/// At most one side per axis is ever set; two adjacent sides mean a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeSides {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl ResizeSides {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    pub fn is_corner(&self) -> bool {
        (self.left || self.right) && (self.top || self.bottom)
    }
}

/// Sides of `rect` within `threshold` grid units of the pointer
///
/// Only pointers inside the rectangle grown by the threshold count. On each
/// axis the nearer side wins, so a thin enclosure never grabs both.
pub fn near_sides(rect: &Rect, p: Vec2, threshold: f32) -> ResizeSides {
    let left = rect.x as f32;
    let right = rect.right() as f32;
    let top = rect.y as f32;
    let bottom = rect.bottom() as f32;

    if p.x < left - threshold || p.x > right + threshold || p.y < top - threshold || p.y > bottom + threshold {
        return ResizeSides::default();
    }

    let dl = (p.x - left).abs();
    let dr = (p.x - right).abs();
    let dt = (p.y - top).abs();
    let db = (p.y - bottom).abs();

    ResizeSides {
        left: dl <= threshold && dl <= dr,
        right: dr <= threshold && dr < dl,
        top: dt <= threshold && dt <= db,
        bottom: db <= threshold && db < dt,
    }
}

/// First enclosure (insertion order) with a side near the pointer
pub fn find_resize_target(store: &PlacementStore, p: Vec2, threshold: f32) -> Option<(EnclosureId, ResizeSides)> {
    store.enclosures().iter().find_map(|e| {
        let sides = near_sides(&e.rect(), p, threshold);
        sides.any().then_some((e.id, sides))
    })
}

/// Candidate geometry for a resize with the pointer over `cell`
///
/// Grabbed sides jump to the pointer cell (inclusive); the opposite sides
/// stay put. The result always lies inside the `n` x `n` grid with
/// width and height of at least one.
pub fn resize_candidate(current: &Rect, sides: ResizeSides, cell: (i32, i32), n: i32) -> Rect {
    let px = clamp(cell.0, 0, n - 1);
    let py = clamp(cell.1, 0, n - 1);
    let mut r = *current;

    if sides.right {
        r.w = (px - r.x + 1).max(1);
    } else if sides.left {
        let right = r.right();
        r.x = px.min(right - 1);
        r.w = right - r.x;
    }

    if sides.bottom {
        r.h = (py - r.y + 1).max(1);
    } else if sides.top {
        let bottom = r.bottom();
        r.y = py.min(bottom - 1);
        r.h = bottom - r.y;
    }

    r.x = clamp(r.x, 0, n - 1);
    r.y = clamp(r.y, 0, n - 1);
    r.w = clamp(r.w, 1, n - r.x);
    r.h = clamp(r.h, 1, n - r.y);
    r
}
