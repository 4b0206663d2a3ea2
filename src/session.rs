//! A single planning session
//!
//! Owns the catalog, the store, the gesture controller and the UI selection.
//! Created when a planner opens, reset on "start over".

use crate::catalog::Catalog;
use crate::codec::{LayoutSnapshot, StateCodec};
use crate::core::config::PlannerConfig;
use crate::core::error::{CodecError, ConfigError, PlacementError};
use crate::core::types::{EnclosureId, EntityRef, ItemId, ItemKind, PointerPos};
use crate::interaction::{DeleteConfirmation, InteractionController, LayoutEvent};
use crate::placement::{Enclosure, PlacedItem, PlacementStore};
use crate::spatial::{in_bounds, Rect};
use crate::validation::{EnclosureReport, LayoutSummary, ValidationEngine};

#[derive(Debug, Clone)]
pub struct Session {
    config: PlannerConfig,
    catalog: Catalog,
    store: PlacementStore,
    controller: InteractionController,
    selected_occupant: Option<usize>,
    name: Option<String>,
}

impl Session {
    pub fn new(catalog: Catalog, config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: PlacementStore::new(config.grid_size),
            controller: InteractionController::new(config.clone()),
            config,
            catalog,
            selected_occupant: None,
            name: None,
        })
    }

    /// Session over the built-in catalog and reference configuration
    pub fn with_defaults() -> Self {
        let config = PlannerConfig::default();
        Self {
            store: PlacementStore::new(config.grid_size),
            controller: InteractionController::new(config.clone()),
            config,
            catalog: Catalog::with_defaults(),
            selected_occupant: None,
            name: None,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &PlacementStore {
        &self.store
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name.filter(|n| !n.trim().is_empty());
    }

    pub fn selected_occupant(&self) -> Option<usize> {
        self.selected_occupant
    }

    /// Choose which animal a press on empty ground will draw an enclosure for
    pub fn select_occupant(&mut self, occupant_index: Option<usize>) -> Result<(), PlacementError> {
        if let Some(index) = occupant_index {
            if self.catalog.animal(index).is_none() {
                return Err(PlacementError::UnknownCatalogEntry { catalog: "animals", index });
            }
        }
        self.selected_occupant = occupant_index;
        Ok(())
    }

    /// Place a building or decoration, at `at` or else the first free slot
    pub fn place_item(
        &mut self,
        kind: ItemKind,
        catalog_index: usize,
        at: Option<(i32, i32)>,
    ) -> Result<PlacedItem, PlacementError> {
        let entry = self
            .catalog
            .entry(kind, catalog_index)
            .ok_or(PlacementError::UnknownCatalogEntry { catalog: kind.label(), index: catalog_index })?;
        let (x, y) = match at {
            Some(pos) => pos,
            None => self.store.find_free_slot(entry.width, entry.height).ok_or(PlacementError::OutOfBounds {
                x: 0,
                y: 0,
                w: entry.width,
                h: entry.height,
            })?,
        };
        self.store.insert_item(kind, catalog_index, entry, x, y)
    }

    /// Create an enclosure directly, without a draw gesture
    pub fn place_enclosure(&mut self, occupant_index: usize, rect: Rect) -> Result<Enclosure, PlacementError> {
        let animal = self
            .catalog
            .animal(occupant_index)
            .ok_or(PlacementError::UnknownCatalogEntry { catalog: "animals", index: occupant_index })?;
        if !in_bounds(&rect, self.store.grid_size()) {
            return Err(PlacementError::OutOfBounds { x: rect.x, y: rect.y, w: rect.w, h: rect.h });
        }
        self.store.insert_enclosure(occupant_index, &animal.occupant_id, rect)
    }

    pub fn remove(&mut self, entity: EntityRef) -> bool {
        self.store.remove(entity)
    }

    pub fn remove_all_of_type(&mut self, kind: ItemKind, catalog_index: usize) -> Vec<ItemId> {
        self.store.remove_all_of_type(kind, catalog_index)
    }

    pub fn pointer_down(&mut self, p: PointerPos) -> Vec<LayoutEvent> {
        self.controller
            .pointer_down(&mut self.store, self.selected_occupant, p)
    }

    pub fn pointer_move(&mut self, p: PointerPos) -> Vec<LayoutEvent> {
        self.controller.pointer_move(&mut self.store, &self.catalog, p)
    }

    pub fn pointer_up(&mut self, p: PointerPos, confirm: &mut dyn DeleteConfirmation) -> Vec<LayoutEvent> {
        self.controller.pointer_up(&mut self.store, &self.catalog, p, confirm)
    }

    pub fn enclosure_report(&self, id: EnclosureId) -> Option<EnclosureReport> {
        ValidationEngine::report(&self.store, &self.catalog, id)
    }

    pub fn summary(&self) -> LayoutSummary {
        ValidationEngine::summarize(&self.store, &self.catalog)
    }

    /// Share string for the current layout
    pub fn encode(&self) -> Result<String, CodecError> {
        StateCodec::encode(&self.store)
    }

    /// Replace the layout with a decoded share string
    ///
    /// On any failure the current layout is left as it was.
    pub fn restore(&mut self, encoded: &str) -> Result<(), CodecError> {
        let store = StateCodec::decode(encoded)
            .and_then(|snapshot| build_store(&self.catalog, self.config.grid_size, &snapshot));
        match store {
            Ok(store) => {
                tracing::info!("Restored layout with {} entities", store.len());
                self.store = store;
                self.controller.reset();
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Ignoring saved layout: {}", e);
                Err(e)
            }
        }
    }

    /// Clear everything and begin a fresh layout
    pub fn start_over(&mut self) {
        tracing::info!("Starting over");
        self.store = PlacementStore::new(self.config.grid_size);
        self.controller.reset();
        self.selected_occupant = None;
        self.name = None;
    }
}

/// Rebuild a store from a snapshot, assigning fresh ids
///
/// Every record goes through the normal insert checks. Enclosures are also
/// bounds-checked here, since drawing clamps them before insertion.
pub fn build_store(catalog: &Catalog, grid_size: i32, snapshot: &LayoutSnapshot) -> Result<PlacementStore, CodecError> {
    let mut store = PlacementStore::new(grid_size);

    for (kind, records) in [
        (ItemKind::Building, &snapshot.buildings),
        (ItemKind::Decoration, &snapshot.decorations),
    ] {
        for record in records {
            let entry = catalog.entry(kind, record.catalog_index).ok_or(CodecError::UnknownCatalogIndex {
                catalog: kind.label(),
                index: record.catalog_index,
            })?;
            store.insert_item(kind, record.catalog_index, entry, record.x, record.y)?;
        }
    }

    for record in &snapshot.enclosures {
        let animal = catalog.animal(record.occupant_index).ok_or(CodecError::UnknownCatalogIndex {
            catalog: "animal",
            index: record.occupant_index,
        })?;
        let rect = Rect::new(record.x, record.y, record.w, record.h);
        if !in_bounds(&rect, grid_size) {
            return Err(CodecError::Rejected(PlacementError::OutOfBounds {
                x: rect.x,
                y: rect.y,
                w: rect.w,
                h: rect.h,
            }));
        }
        store.insert_enclosure(record.occupant_index, &animal.occupant_id, rect)?;
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_unknown_occupant_rejected() {
        let mut session = Session::with_defaults();
        assert!(session.select_occupant(Some(99)).is_err());
        assert_eq!(session.selected_occupant(), None);
        session.select_occupant(Some(1)).unwrap();
        assert_eq!(session.selected_occupant(), Some(1));
    }

    #[test]
    fn test_place_item_uses_first_free_slot() {
        let mut session = Session::with_defaults();
        let first = session.place_item(ItemKind::Building, 3, None).unwrap();
        let second = session.place_item(ItemKind::Building, 3, None).unwrap();
        assert_eq!((first.x, first.y), (0, 0));
        assert_eq!((second.x, second.y), (2, 0));
    }

    #[test]
    fn test_encode_example_building() {
        let mut session = Session::with_defaults();
        session.place_item(ItemKind::Building, 2, Some((5, 5))).unwrap();
        assert_eq!(session.encode().unwrap(), "255");
    }

    #[test]
    fn test_restore_assigns_fresh_ids() {
        let mut session = Session::with_defaults();
        session.place_item(ItemKind::Decoration, 0, Some((3, 3))).unwrap();
        let tree = session.place_item(ItemKind::Decoration, 0, Some((4, 3))).unwrap();
        session.remove(EntityRef::Item(ItemKind::Decoration, tree.id));
        session.place_item(ItemKind::Decoration, 0, Some((5, 3))).unwrap();
        let encoded = session.encode().unwrap();

        let mut restored = Session::with_defaults();
        restored.restore(&encoded).unwrap();
        let ids: Vec<u32> = restored.store().items(ItemKind::Decoration).iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(restored.encode().unwrap(), encoded);
    }

    #[test]
    fn test_failed_restore_keeps_current_layout() {
        let mut session = Session::with_defaults();
        session.place_item(ItemKind::Building, 0, Some((0, 0))).unwrap();
        let before = session.encode().unwrap();

        // Two copies of a unique building
        assert!(matches!(session.restore("000055"), Err(CodecError::Rejected(_))));
        // Catalog index beyond the catalog
        assert!(matches!(
            session.restore("z00"),
            Err(CodecError::UnknownCatalogIndex { .. })
        ));
        assert!(matches!(session.restore("0#0"), Err(CodecError::InvalidDigit { .. })));
        assert_eq!(session.encode().unwrap(), before);
    }

    #[test]
    fn test_restore_rejects_enclosure_past_grid_edge() {
        let mut session = Session::with_defaults();
        session.place_enclosure(1, Rect::new(0, 0, 4, 3)).unwrap();
        let before = session.encode().unwrap();

        let err = session.restore("..0tt99").unwrap_err();
        assert_eq!(
            err,
            CodecError::Rejected(PlacementError::OutOfBounds { x: 29, y: 29, w: 9, h: 9 })
        );
        assert_eq!(session.encode().unwrap(), before);

        assert!(session.place_enclosure(2, Rect::new(28, 0, 3, 3)).is_err());

        // Touching the far edge is still inside
        session.restore("..0tt11").unwrap();
        assert_eq!(session.store().enclosures()[0].rect(), Rect::new(29, 29, 1, 1));
    }

    #[test]
    fn test_full_width_enclosure_encodes_on_largest_grid() {
        let config = PlannerConfig { grid_size: crate::core::config::MAX_GRID_SIZE, ..Default::default() };
        let mut session = Session::new(Catalog::with_defaults(), config).unwrap();
        session.place_enclosure(0, Rect::new(0, 0, 35, 35)).unwrap();

        let encoded = session.encode().unwrap();
        assert_eq!(encoded, "..000zz");
        let mut copy = Session::new(Catalog::with_defaults(), session.config().clone()).unwrap();
        copy.restore(&encoded).unwrap();
        assert_eq!(copy.store().enclosures()[0].rect(), Rect::new(0, 0, 35, 35));
    }

    #[test]
    fn test_start_over_clears_everything() {
        let mut session = Session::with_defaults();
        session.place_item(ItemKind::Building, 0, None).unwrap();
        session.select_occupant(Some(0)).unwrap();
        session.set_name(Some("City Zoo".into()));

        session.start_over();
        assert!(session.store().is_empty());
        assert_eq!(session.selected_occupant(), None);
        assert_eq!(session.name(), None);
        assert!(session.controller().is_idle());
    }

    #[test]
    fn test_blank_name_is_none() {
        let mut session = Session::with_defaults();
        session.set_name(Some("   ".into()));
        assert_eq!(session.name(), None);
    }
}
