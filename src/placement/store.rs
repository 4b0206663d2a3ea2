//! Authoritative storage for everything placed on the grid
//!
//! Every mutating operation either leaves the store free of overlaps and
//! in-bounds, or does not apply. Two exceptions: [`PlacementStore::set_position`]
//! lets an in-progress move preview an invalid spot until
//! [`PlacementStore::commit_move`] settles it, and
//! [`PlacementStore::insert_enclosure`] leaves bounds to its callers, which
//! clamp (drawing) or reject (sessions and restore) first.

use crate::catalog::CatalogEntry;
use crate::core::error::PlacementError;
use crate::core::types::{EnclosureId, EntityRef, ItemId, ItemKind};
use crate::spatial::{in_bounds, overlaps, Rect};

use super::entity::{Enclosure, PlacedItem};

/// Result of settling a move gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The final position was valid and stays
    Committed,
    /// The final position was invalid; the entity is back at its origin
    Reverted,
}

/// Owns the building, decoration and enclosure collections
#[derive(Debug, Clone)]
pub struct PlacementStore {
    grid_size: i32,
    buildings: Vec<PlacedItem>,
    decorations: Vec<PlacedItem>,
    enclosures: Vec<Enclosure>,
    next_building_id: u32,
    next_decoration_id: u32,
    next_enclosure_id: u32,
}

impl PlacementStore {
    pub fn new(grid_size: i32) -> Self {
        Self {
            grid_size,
            buildings: Vec::new(),
            decorations: Vec::new(),
            enclosures: Vec::new(),
            next_building_id: 1,
            next_decoration_id: 1,
            next_enclosure_id: 1,
        }
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    pub fn items(&self, kind: ItemKind) -> &[PlacedItem] {
        match kind {
            ItemKind::Building => &self.buildings,
            ItemKind::Decoration => &self.decorations,
        }
    }

    fn items_mut(&mut self, kind: ItemKind) -> &mut Vec<PlacedItem> {
        match kind {
            ItemKind::Building => &mut self.buildings,
            ItemKind::Decoration => &mut self.decorations,
        }
    }

    pub fn enclosures(&self) -> &[Enclosure] {
        &self.enclosures
    }

    pub fn item(&self, kind: ItemKind, id: ItemId) -> Option<&PlacedItem> {
        self.items(kind).iter().find(|i| i.id == id)
    }

    pub fn enclosure(&self, id: EnclosureId) -> Option<&Enclosure> {
        self.enclosures.iter().find(|e| e.id == id)
    }

    pub fn enclosure_for_occupant(&self, occupant_index: usize) -> Option<&Enclosure> {
        self.enclosures.iter().find(|e| e.occupant_index == occupant_index)
    }

    pub fn rect_of(&self, entity: EntityRef) -> Option<Rect> {
        match entity {
            EntityRef::Item(kind, id) => self.item(kind, id).map(PlacedItem::rect),
            EntityRef::Enclosure(id) => self.enclosure(id).map(Enclosure::rect),
        }
    }

    /// Total number of placed entities
    pub fn len(&self) -> usize {
        self.buildings.len() + self.decorations.len() + self.enclosures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every entity with its rectangle, buildings first, then decorations,
    /// then enclosures
    pub fn iter_rects(&self) -> impl Iterator<Item = (EntityRef, Rect)> + '_ {
        self.buildings
            .iter()
            .chain(self.decorations.iter())
            .map(|i| (i.entity(), i.rect()))
            .chain(self.enclosures.iter().map(|e| (e.entity(), e.rect())))
    }

    /// First entity (other than `exclude`) whose rectangle overlaps `rect`
    pub fn first_overlap(&self, rect: &Rect, exclude: Option<EntityRef>) -> Option<EntityRef> {
        self.iter_rects()
            .filter(|(entity, _)| Some(*entity) != exclude)
            .find(|(_, other)| overlaps(rect, other))
            .map(|(entity, _)| entity)
    }

    /// Whether `rect` overlaps any stored entity other than `exclude`
    pub fn query_overlap(&self, rect: &Rect, exclude: Option<EntityRef>) -> bool {
        self.first_overlap(rect, exclude).is_some()
    }

    /// Entity whose body covers the given cell
    pub fn hit_test(&self, cx: i32, cy: i32) -> Option<EntityRef> {
        self.iter_rects()
            .find(|(_, rect)| rect.contains_cell(cx, cy))
            .map(|(entity, _)| entity)
    }

    /// Place a new building or decoration with its top-left at `(x, y)`
    pub fn insert_item(
        &mut self,
        kind: ItemKind,
        catalog_index: usize,
        entry: &CatalogEntry,
        x: i32,
        y: i32,
    ) -> Result<PlacedItem, PlacementError> {
        let rect = Rect::new(x, y, entry.width, entry.height);
        if rect.w <= 0 || rect.h <= 0 {
            return Err(PlacementError::InvalidDimension { w: rect.w, h: rect.h });
        }
        let unlimited = kind == ItemKind::Decoration || entry.unlimited;
        if !unlimited && self.items(kind).iter().any(|i| i.catalog_index == catalog_index) {
            return Err(PlacementError::DuplicateUniqueType(entry.type_id.clone()));
        }
        if !in_bounds(&rect, self.grid_size) {
            return Err(PlacementError::OutOfBounds { x, y, w: rect.w, h: rect.h });
        }
        if let Some(other) = self.first_overlap(&rect, None) {
            return Err(PlacementError::Overlap(other));
        }

        let id = match kind {
            ItemKind::Building => &mut self.next_building_id,
            ItemKind::Decoration => &mut self.next_decoration_id,
        };
        let item = PlacedItem {
            id: ItemId(*id),
            kind,
            catalog_index,
            type_id: entry.type_id.clone(),
            x,
            y,
            width: entry.width,
            height: entry.height,
        };
        *id += 1;

        tracing::debug!("Placed {} '{}' at ({}, {})", item.entity(), item.type_id, x, y);
        self.items_mut(kind).push(item.clone());
        Ok(item)
    }

    /// Create an enclosure for an occupant
    ///
    /// Out-of-bounds rectangles are accepted; validation reports them.
    pub fn insert_enclosure(
        &mut self,
        occupant_index: usize,
        occupant_id: &str,
        rect: Rect,
    ) -> Result<Enclosure, PlacementError> {
        if self.enclosure_for_occupant(occupant_index).is_some() {
            return Err(PlacementError::DuplicateUniqueType(occupant_id.to_string()));
        }
        if rect.w <= 0 || rect.h <= 0 {
            return Err(PlacementError::InvalidDimension { w: rect.w, h: rect.h });
        }
        if let Some(other) = self.first_overlap(&rect, None) {
            return Err(PlacementError::Overlap(other));
        }

        let enclosure = Enclosure {
            id: EnclosureId(self.next_enclosure_id),
            occupant_index,
            occupant_id: occupant_id.to_string(),
            x: rect.x,
            y: rect.y,
            width: rect.w,
            height: rect.h,
        };
        self.next_enclosure_id += 1;

        tracing::debug!("Created {} for '{}' at {:?}", enclosure.entity(), occupant_id, rect);
        self.enclosures.push(enclosure.clone());
        Ok(enclosure)
    }

    /// Write a new top-left position without any validation
    ///
    /// Used for live previews while a move is in progress.
    pub fn set_position(&mut self, entity: EntityRef, x: i32, y: i32) -> Result<Rect, PlacementError> {
        match entity {
            EntityRef::Item(kind, id) => {
                let item = self
                    .items_mut(kind)
                    .iter_mut()
                    .find(|i| i.id == id)
                    .ok_or(PlacementError::UnknownEntity(entity))?;
                item.x = x;
                item.y = y;
                Ok(item.rect())
            }
            EntityRef::Enclosure(id) => {
                let enclosure = self
                    .enclosures
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or(PlacementError::UnknownEntity(entity))?;
                enclosure.x = x;
                enclosure.y = y;
                Ok(enclosure.rect())
            }
        }
    }

    /// Keep the entity where it is if that spot is valid, otherwise put it
    /// back at `origin`
    pub fn commit_move(&mut self, entity: EntityRef, origin: (i32, i32)) -> Result<MoveOutcome, PlacementError> {
        let rect = self.rect_of(entity).ok_or(PlacementError::UnknownEntity(entity))?;
        if in_bounds(&rect, self.grid_size) && !self.query_overlap(&rect, Some(entity)) {
            tracing::debug!("Committed move of {} to ({}, {})", entity, rect.x, rect.y);
            return Ok(MoveOutcome::Committed);
        }
        self.set_position(entity, origin.0, origin.1)?;
        tracing::debug!("Reverted move of {} to ({}, {})", entity, origin.0, origin.1);
        Ok(MoveOutcome::Reverted)
    }

    /// Move an entity in one step, reverting if the target is invalid
    pub fn move_entity(&mut self, entity: EntityRef, x: i32, y: i32) -> Result<MoveOutcome, PlacementError> {
        let origin = self.rect_of(entity).ok_or(PlacementError::UnknownEntity(entity))?;
        self.set_position(entity, x, y)?;
        self.commit_move(entity, (origin.x, origin.y))
    }

    /// Replace an enclosure's geometry if the candidate is valid
    ///
    /// On rejection nothing about the enclosure changes.
    pub fn resize_enclosure(&mut self, id: EnclosureId, candidate: Rect) -> Result<Rect, PlacementError> {
        let entity = EntityRef::Enclosure(id);
        if self.enclosure(id).is_none() {
            return Err(PlacementError::UnknownEntity(entity));
        }
        if candidate.w < 1 || candidate.h < 1 {
            return Err(PlacementError::InvalidDimension { w: candidate.w, h: candidate.h });
        }
        if !in_bounds(&candidate, self.grid_size) {
            return Err(PlacementError::OutOfBounds {
                x: candidate.x,
                y: candidate.y,
                w: candidate.w,
                h: candidate.h,
            });
        }
        if let Some(other) = self.first_overlap(&candidate, Some(entity)) {
            return Err(PlacementError::Overlap(other));
        }

        self.restore_geometry(id, candidate)?;
        Ok(candidate)
    }

    /// Put back geometry recorded earlier in the same gesture
    pub(crate) fn restore_geometry(&mut self, id: EnclosureId, rect: Rect) -> Result<(), PlacementError> {
        let enclosure = self
            .enclosures
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(PlacementError::UnknownEntity(EntityRef::Enclosure(id)))?;
        enclosure.set_rect(rect);
        Ok(())
    }

    /// Delete an entity; returns false if it did not exist
    pub fn remove(&mut self, entity: EntityRef) -> bool {
        let removed = match entity {
            EntityRef::Item(kind, id) => {
                let items = self.items_mut(kind);
                let before = items.len();
                items.retain(|i| i.id != id);
                items.len() != before
            }
            EntityRef::Enclosure(id) => {
                let before = self.enclosures.len();
                self.enclosures.retain(|e| e.id != id);
                self.enclosures.len() != before
            }
        };
        if removed {
            tracing::debug!("Removed {}", entity);
        }
        removed
    }

    /// Delete every instance of one catalog entry, returning their ids
    pub fn remove_all_of_type(&mut self, kind: ItemKind, catalog_index: usize) -> Vec<ItemId> {
        let items = self.items_mut(kind);
        let removed: Vec<ItemId> = items
            .iter()
            .filter(|i| i.catalog_index == catalog_index)
            .map(|i| i.id)
            .collect();
        items.retain(|i| i.catalog_index != catalog_index);
        if !removed.is_empty() {
            tracing::debug!("Removed {} {}s of catalog index {}", removed.len(), kind.label(), catalog_index);
        }
        removed
    }

    /// First top-left position (row-major from the origin) where a `w` x `h`
    /// footprint fits without overlapping anything
    pub fn find_free_slot(&self, w: i32, h: i32) -> Option<(i32, i32)> {
        if w <= 0 || h <= 0 || w > self.grid_size || h > self.grid_size {
            return None;
        }
        (0..=self.grid_size - h)
            .flat_map(|y| (0..=self.grid_size - w).map(move |x| (x, y)))
            .find(|&(x, y)| !self.query_overlap(&Rect::new(x, y, w, h), None))
    }

    /// Drop every entity; id counters keep counting
    pub fn clear(&mut self) {
        self.buildings.clear();
        self.decorations.clear();
        self.enclosures.clear();
    }
}
