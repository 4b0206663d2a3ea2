pub mod config;
pub mod error;
pub mod types;

pub use config::PlannerConfig;
pub use error::{CatalogError, CodecError, ConfigError, PlacementError, PlannerError};
pub use types::{EnclosureId, EntityRef, ItemId, ItemKind, PointerPos};
