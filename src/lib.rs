//! Zoo Planner - grid layout engine for zoo designs
//!
//! Buildings and decorations have fixed catalog footprints; enclosures are
//! drawn freehand and graded against the space their animal needs. Whole
//! layouts round-trip through a compact base-36 share string.

pub mod catalog;
pub mod codec;
pub mod core;
pub mod interaction;
pub mod placement;
pub mod session;
pub mod spatial;
pub mod validation;

pub use catalog::{AnimalRequirement, Catalog, CatalogEntry};
pub use codec::{LayoutSnapshot, StateCodec};
pub use core::config::PlannerConfig;
pub use core::error::{CatalogError, CodecError, ConfigError, PlacementError, PlannerError, Result};
pub use core::types::{EnclosureId, EntityRef, ItemId, ItemKind, PointerPos};
pub use interaction::{DeleteConfirmation, InteractionController, LayoutEvent};
pub use placement::{Enclosure, PlacedItem, PlacementStore};
pub use session::Session;
pub use spatial::Rect;
pub use validation::{EnclosureReport, EnclosureStatus, LayoutSummary, ValidationEngine};
