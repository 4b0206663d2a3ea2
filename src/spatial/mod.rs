//! Grid geometry primitives

pub mod geometry;

pub use geometry::{clamp, clamp_origin, in_bounds, overlaps, Rect};
