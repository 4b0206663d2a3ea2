//! Core type definitions used throughout the codebase

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier for a placed building or decoration
///
/// Unique within its collection and assigned monotonically by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Identifier for an enclosure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnclosureId(pub u32);

/// Which catalog-derived collection an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Building,
    Decoration,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Building => "building",
            ItemKind::Decoration => "decoration",
        }
    }
}

/// Reference to any placed entity, across all three collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityRef {
    Item(ItemKind, ItemId),
    Enclosure(EnclosureId),
}

impl EntityRef {
    pub fn building(id: u32) -> Self {
        EntityRef::Item(ItemKind::Building, ItemId(id))
    }

    pub fn decoration(id: u32) -> Self {
        EntityRef::Item(ItemKind::Decoration, ItemId(id))
    }

    pub fn enclosure(id: u32) -> Self {
        EntityRef::Enclosure(EnclosureId(id))
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityRef::Item(kind, id) => write!(f, "{}#{}", kind.label(), id.0),
            EntityRef::Enclosure(id) => write!(f, "enclosure#{}", id.0),
        }
    }
}

/// A pointer sample as delivered by the input layer
///
/// `grid` is the precise (fractional) position in grid units, `pixel` the raw
/// pointer position on screen. Gestures snap on `grid` but measure travel on
/// `pixel`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPos {
    pub grid: Vec2,
    pub pixel: Vec2,
}

impl PointerPos {
    pub fn new(grid: Vec2, pixel: Vec2) -> Self {
        Self { grid, pixel }
    }

    /// Grid cell under the pointer
    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        (self.grid.x.floor() as i32, self.grid.y.floor() as i32)
    }

    /// Raw pointer travel between two samples, in pixels
    pub fn pixel_distance(&self, other: &Self) -> f32 {
        self.pixel.distance(other.pixel)
    }
}
