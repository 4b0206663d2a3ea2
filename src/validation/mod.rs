//! Enclosure grading - placement validity and animal space requirements

use serde::Serialize;

use crate::catalog::Catalog;
use crate::core::types::{EnclosureId, ItemKind};
use crate::placement::{Enclosure, PlacementStore};
use crate::spatial::{in_bounds, Rect};

/// Display status of an enclosure, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnclosureStatus {
    /// Off the grid or overlapping another entity
    Invalid,
    /// Placed correctly but too small for its occupant
    Warning,
    Ok,
}

/// Everything known about one enclosure's validity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnclosureReport {
    pub enclosure: EnclosureId,
    pub occupant_id: String,
    pub rect: Rect,
    pub area: i64,
    pub perimeter: i64,
    /// Requirement thresholds; absent if the occupant left the catalog
    pub min_area: Option<i64>,
    pub min_perimeter: Option<i64>,
    pub fits: bool,
    pub overlaps_others: bool,
    pub placement_valid: bool,
    pub meets_requirement: bool,
    pub status: EnclosureStatus,
}

/// Computes enclosure reports against the current store and catalog
pub struct ValidationEngine;

impl ValidationEngine {
    /// Grade a single enclosure
    pub fn evaluate(store: &PlacementStore, catalog: &Catalog, enclosure: &Enclosure) -> EnclosureReport {
        let rect = enclosure.rect();
        let fits = in_bounds(&rect, store.grid_size());
        let overlaps_others = store.query_overlap(&rect, Some(enclosure.entity()));
        let placement_valid = fits && !overlaps_others;

        let area = rect.area();
        let perimeter = rect.perimeter();
        let requirement = catalog.animal(enclosure.occupant_index);
        let meets_requirement = requirement
            .map(|r| area >= r.min_area && perimeter >= r.min_perimeter)
            .unwrap_or(true);

        let status = if !placement_valid {
            EnclosureStatus::Invalid
        } else if !meets_requirement {
            EnclosureStatus::Warning
        } else {
            EnclosureStatus::Ok
        };

        EnclosureReport {
            enclosure: enclosure.id,
            occupant_id: enclosure.occupant_id.clone(),
            rect,
            area,
            perimeter,
            min_area: requirement.map(|r| r.min_area),
            min_perimeter: requirement.map(|r| r.min_perimeter),
            fits,
            overlaps_others,
            placement_valid,
            meets_requirement,
            status,
        }
    }

    pub fn report(store: &PlacementStore, catalog: &Catalog, id: EnclosureId) -> Option<EnclosureReport> {
        store
            .enclosure(id)
            .map(|enclosure| Self::evaluate(store, catalog, enclosure))
    }

    pub fn status(store: &PlacementStore, catalog: &Catalog, id: EnclosureId) -> Option<EnclosureStatus> {
        Self::report(store, catalog, id).map(|r| r.status)
    }

    /// Summary of the whole layout, enclosures in insertion order
    pub fn summarize(store: &PlacementStore, catalog: &Catalog) -> LayoutSummary {
        let enclosures: Vec<EnclosureReport> = store
            .enclosures()
            .iter()
            .map(|e| Self::evaluate(store, catalog, e))
            .collect();
        let count = |status: EnclosureStatus| enclosures.iter().filter(|r| r.status == status).count();

        LayoutSummary {
            buildings: store.items(ItemKind::Building).len(),
            decorations: store.items(ItemKind::Decoration).len(),
            ok: count(EnclosureStatus::Ok),
            warnings: count(EnclosureStatus::Warning),
            invalid: count(EnclosureStatus::Invalid),
            enclosures,
        }
    }
}

/// Counts and per-enclosure reports for summary output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSummary {
    pub buildings: usize,
    pub decorations: usize,
    pub enclosures: Vec<EnclosureReport>,
    pub ok: usize,
    pub warnings: usize,
    pub invalid: usize,
}

impl LayoutSummary {
    /// True if every enclosure is placed correctly and big enough
    pub fn all_ok(&self) -> bool {
        self.warnings == 0 && self.invalid == 0
    }
}
