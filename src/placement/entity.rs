//! Placed entities

use serde::Serialize;

use crate::core::types::{EnclosureId, EntityRef, ItemId, ItemKind};
use crate::spatial::Rect;

/// A building or decoration instantiated from a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem {
    pub id: ItemId,
    pub kind: ItemKind,
    /// Position of the source entry in its catalog array
    pub catalog_index: usize,
    /// Catalog `type_id`, fixed at creation
    pub type_id: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PlacedItem {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn entity(&self) -> EntityRef {
        EntityRef::Item(self.kind, self.id)
    }
}

/// A user-drawn, resizable area housing one kind of animal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enclosure {
    pub id: EnclosureId,
    /// Position of the occupant in the animal catalog
    pub occupant_index: usize,
    pub occupant_id: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Enclosure {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn entity(&self) -> EntityRef {
        EntityRef::Enclosure(self.id)
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.w;
        self.height = rect.h;
    }
}
