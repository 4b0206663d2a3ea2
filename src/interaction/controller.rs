//! Gesture state machine over the placement store
//!
//! A press dispatches on what lies under the pointer, in priority order:
//! an enclosure side (resize), an entity body (move), an empty cell (draw,
//! only with an occupant selected). Moves and resizes that travel less than
//! the click threshold are reinterpreted as delete requests.

use crate::catalog::Catalog;
use crate::core::config::PlannerConfig;
use crate::core::error::PlacementError;
use crate::core::types::{EntityRef, PointerPos};
use crate::placement::{MoveOutcome, PlacementStore};
use crate::spatial::{clamp, clamp_origin, in_bounds, overlaps, Rect};
use crate::validation::{EnclosureStatus, ValidationEngine};

use super::gesture::Gesture;
use super::hit::{find_resize_target, resize_candidate};

/// Asks the user whether a clicked entity should be deleted
pub trait DeleteConfirmation {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> DeleteConfirmation for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Changes the renderer needs to reflect
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    /// Outline of the enclosure being drawn; nothing is stored yet
    DrawPreview { rect: Rect, valid: bool },
    Created {
        entity: EntityRef,
        rect: Rect,
        status: Option<EnclosureStatus>,
    },
    Updated {
        entity: EntityRef,
        rect: Rect,
        status: Option<EnclosureStatus>,
    },
    /// Geometry was put back to where the gesture started
    Reverted { entity: EntityRef, rect: Rect },
    /// A candidate did not apply; `entity` is None for a rejected draw
    Rejected {
        entity: Option<EntityRef>,
        error: PlacementError,
    },
    Removed(EntityRef),
}

/// Drives draw, move and resize gestures from pointer events
#[derive(Debug, Clone)]
pub struct InteractionController {
    config: PlannerConfig,
    gesture: Option<Gesture>,
}

impl InteractionController {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config, gesture: None }
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.gesture.is_none()
    }

    /// Forget any gesture in progress without touching the store
    pub fn reset(&mut self) {
        self.gesture = None;
    }

    /// Handle a pointer press
    pub fn pointer_down(
        &mut self,
        store: &mut PlacementStore,
        selected_occupant: Option<usize>,
        p: PointerPos,
    ) -> Vec<LayoutEvent> {
        if let Some(active) = &self.gesture {
            tracing::debug!("Ignoring press during {} gesture", active.name());
            return Vec::new();
        }

        if let Some((enclosure, sides)) = find_resize_target(store, p.grid, self.config.edge_threshold) {
            if let Some(original) = store.enclosure(enclosure).map(|e| e.rect()) {
                tracing::debug!("Resize start on enclosure#{} sides {:?}", enclosure.0, sides);
                self.gesture = Some(Gesture::Resizing { enclosure, sides, original, down: p });
                return Vec::new();
            }
        }

        let cell = p.cell();
        if let Some(entity) = store.hit_test(cell.0, cell.1) {
            if let Some(rect) = store.rect_of(entity) {
                tracing::debug!("Move start on {} from ({}, {})", entity, rect.x, rect.y);
                self.gesture = Some(Gesture::Moving {
                    entity,
                    origin: (rect.x, rect.y),
                    offset: (cell.0 - rect.x, cell.1 - rect.y),
                    down: p,
                });
                return Vec::new();
            }
        }

        let n = store.grid_size();
        let Some(occupant_index) = selected_occupant else {
            return Vec::new();
        };
        if !(0..n).contains(&cell.0) || !(0..n).contains(&cell.1) {
            return Vec::new();
        }

        tracing::debug!("Draw start for occupant {} at {:?}", occupant_index, cell);
        let gesture = Gesture::Drawing { occupant_index, start: cell, current: cell };
        let preview = draw_preview(store, &gesture);
        self.gesture = Some(gesture);
        preview.into_iter().collect()
    }

    /// Handle pointer motion
    pub fn pointer_move(&mut self, store: &mut PlacementStore, catalog: &Catalog, p: PointerPos) -> Vec<LayoutEvent> {
        let n = store.grid_size();
        let cell = p.cell();
        let outside_margin = self.outside_drag_margin(p, n);

        match &mut self.gesture {
            None => Vec::new(),
            Some(gesture @ Gesture::Drawing { .. }) => {
                if let Gesture::Drawing { current, .. } = gesture {
                    *current = (clamp(cell.0, 0, n - 1), clamp(cell.1, 0, n - 1));
                }
                draw_preview(store, gesture).into_iter().collect()
            }
            Some(Gesture::Moving { entity, offset, .. }) => {
                let entity = *entity;
                let offset = *offset;
                if outside_margin {
                    return Vec::new();
                }
                let Some(current) = store.rect_of(entity) else {
                    return Vec::new();
                };
                let target = clamp_origin(&current.with_origin(cell.0 - offset.0, cell.1 - offset.1), n);
                if target == current {
                    return Vec::new();
                }
                match store.set_position(entity, target.x, target.y) {
                    Ok(rect) => {
                        let mut events = vec![updated(store, catalog, entity, rect)];
                        events.extend(neighbour_updates(store, catalog, entity, &[rect], Some(current)));
                        events
                    }
                    Err(error) => vec![LayoutEvent::Rejected { entity: Some(entity), error }],
                }
            }
            Some(Gesture::Resizing { enclosure, sides, .. }) => {
                let id = *enclosure;
                let sides = *sides;
                let entity = EntityRef::Enclosure(id);
                let Some(current) = store.rect_of(entity) else {
                    return Vec::new();
                };
                let candidate = resize_candidate(&current, sides, cell, n);
                if candidate == current {
                    return Vec::new();
                }
                match store.resize_enclosure(id, candidate) {
                    Ok(rect) => vec![updated(store, catalog, entity, rect)],
                    Err(error) => {
                        tracing::debug!("Resize candidate {:?} rejected: {}", candidate, error);
                        vec![LayoutEvent::Rejected { entity: Some(entity), error }]
                    }
                }
            }
        }
    }

    /// Handle pointer release, ending the active gesture
    pub fn pointer_up(
        &mut self,
        store: &mut PlacementStore,
        catalog: &Catalog,
        p: PointerPos,
        confirm: &mut dyn DeleteConfirmation,
    ) -> Vec<LayoutEvent> {
        let Some(gesture) = self.gesture.take() else {
            return Vec::new();
        };
        let n = store.grid_size();

        match gesture {
            Gesture::Drawing { occupant_index, start, .. } => {
                let cell = p.cell();
                let current = (clamp(cell.0, 0, n - 1), clamp(cell.1, 0, n - 1));
                let rect = Rect::spanning(start, current);
                let Some(animal) = catalog.animal(occupant_index) else {
                    let error = PlacementError::UnknownCatalogEntry { catalog: "animals", index: occupant_index };
                    return vec![LayoutEvent::Rejected { entity: None, error }];
                };
                match store.insert_enclosure(occupant_index, &animal.occupant_id, rect) {
                    Ok(enclosure) => {
                        let entity = enclosure.entity();
                        let status = ValidationEngine::status(store, catalog, enclosure.id);
                        vec![LayoutEvent::Created { entity, rect, status }]
                    }
                    Err(error) => {
                        tracing::debug!("Draw of {:?} rejected: {}", rect, error);
                        vec![LayoutEvent::Rejected { entity: None, error }]
                    }
                }
            }
            Gesture::Moving { entity, origin, down, .. } => {
                let preview = store.rect_of(entity);
                if self.is_click(&down, &p) {
                    let mut events = Vec::new();
                    if let Ok(rect) = store.set_position(entity, origin.0, origin.1) {
                        events.push(LayoutEvent::Reverted { entity, rect });
                        events.extend(neighbour_updates(store, catalog, entity, &[rect], preview));
                    }
                    events.extend(offer_delete(store, catalog, entity, confirm));
                    return events;
                }
                let mut events: Vec<LayoutEvent> = match store.commit_move(entity, origin) {
                    Ok(MoveOutcome::Committed) => store
                        .rect_of(entity)
                        .map(|rect| updated(store, catalog, entity, rect))
                        .into_iter()
                        .collect(),
                    Ok(MoveOutcome::Reverted) => store
                        .rect_of(entity)
                        .map(|rect| LayoutEvent::Reverted { entity, rect })
                        .into_iter()
                        .collect(),
                    Err(error) => vec![LayoutEvent::Rejected { entity: Some(entity), error }],
                };
                if let Some(settled) = store.rect_of(entity) {
                    events.extend(neighbour_updates(store, catalog, entity, &[settled], preview));
                }
                events
            }
            Gesture::Resizing { enclosure, original, down, .. } => {
                let entity = EntityRef::Enclosure(enclosure);
                if self.is_click(&down, &p) {
                    let mut events = Vec::new();
                    if store.restore_geometry(enclosure, original).is_ok() {
                        events.push(LayoutEvent::Reverted { entity, rect: original });
                    }
                    events.extend(offer_delete(store, catalog, entity, confirm));
                    return events;
                }
                store
                    .rect_of(entity)
                    .map(|rect| updated(store, catalog, entity, rect))
                    .into_iter()
                    .collect()
            }
        }
    }

    fn is_click(&self, down: &PointerPos, up: &PointerPos) -> bool {
        down.pixel_distance(up) < self.config.click_threshold_px
    }

    fn outside_drag_margin(&self, p: PointerPos, n: i32) -> bool {
        let margin = self.config.drag_margin_cells();
        let max = n as f32 + margin;
        p.grid.x < -margin || p.grid.y < -margin || p.grid.x > max || p.grid.y > max
    }
}

fn draw_preview(store: &PlacementStore, gesture: &Gesture) -> Option<LayoutEvent> {
    let rect = gesture.draw_rect()?;
    let valid = in_bounds(&rect, store.grid_size()) && !store.query_overlap(&rect, None);
    Some(LayoutEvent::DrawPreview { rect, valid })
}

/// Status refresh for enclosures under an entity's old or new footprint
fn neighbour_updates(
    store: &PlacementStore,
    catalog: &Catalog,
    mover: EntityRef,
    now: &[Rect],
    before: Option<Rect>,
) -> Vec<LayoutEvent> {
    store
        .enclosures()
        .iter()
        .filter(|e| e.entity() != mover)
        .filter(|e| {
            let rect = e.rect();
            now.iter().chain(before.iter()).any(|r| overlaps(r, &rect))
        })
        .map(|e| updated(store, catalog, e.entity(), e.rect()))
        .collect()
}

fn updated(store: &PlacementStore, catalog: &Catalog, entity: EntityRef, rect: Rect) -> LayoutEvent {
    let status = match entity {
        EntityRef::Enclosure(id) => ValidationEngine::status(store, catalog, id),
        EntityRef::Item(..) => None,
    };
    LayoutEvent::Updated { entity, rect, status }
}

fn describe(store: &PlacementStore, catalog: &Catalog, entity: EntityRef) -> String {
    match entity {
        EntityRef::Item(kind, id) => store
            .item(kind, id)
            .and_then(|item| catalog.entry(kind, item.catalog_index))
            .map(|entry| entry.label.clone())
            .unwrap_or_else(|| kind.label().to_string()),
        EntityRef::Enclosure(id) => store
            .enclosure(id)
            .and_then(|e| catalog.animal(e.occupant_index))
            .map(|animal| format!("{} enclosure", animal.label))
            .unwrap_or_else(|| "enclosure".to_string()),
    }
}

fn offer_delete(
    store: &mut PlacementStore,
    catalog: &Catalog,
    entity: EntityRef,
    confirm: &mut dyn DeleteConfirmation,
) -> Option<LayoutEvent> {
    let message = format!("Remove {}?", describe(store, catalog, entity));
    if confirm.confirm(&message) && store.remove(entity) {
        return Some(LayoutEvent::Removed(entity));
    }
    tracing::debug!("Delete of {} declined", entity);
    None
}
