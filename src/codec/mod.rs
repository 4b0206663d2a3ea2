//! Compact textual encoding of a layout for share links

pub mod base36;
pub mod state;

pub use state::{EnclosureRecord, ItemRecord, LayoutSnapshot, StateCodec};
