//! Placed entities and the store that keeps them consistent

pub mod entity;
pub mod store;

pub use entity::{Enclosure, PlacedItem};
pub use store::{MoveOutcome, PlacementStore};
