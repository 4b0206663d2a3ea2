use thiserror::Error;

use crate::core::types::EntityRef;

/// Why a placement mutation did not apply
///
/// All of these are local and recoverable: the store is left exactly as it
/// was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("Rectangle ({x}, {y}, {w}x{h}) leaves the grid")]
    OutOfBounds { x: i32, y: i32, w: i32, h: i32 },

    #[error("Rectangle overlaps {0}")]
    Overlap(EntityRef),

    #[error("Only one instance of '{0}' may be placed")]
    DuplicateUniqueType(String),

    #[error("Invalid dimension: {w}x{h}")]
    InvalidDimension { w: i32, h: i32 },

    #[error("Entity not found: {0}")]
    UnknownEntity(EntityRef),

    #[error("No catalog entry at index {index} for {catalog}")]
    UnknownCatalogEntry { catalog: &'static str, index: usize },
}

/// Share-string encode/decode failures
///
/// Any variant produced while decoding is the single "no saved state" signal;
/// callers never apply part of a failed decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid base-36 digit '{ch}' in {section} section")]
    InvalidDigit { section: &'static str, ch: char },

    #[error("Unknown {catalog} catalog index {index}")]
    UnknownCatalogIndex { catalog: &'static str, index: usize },

    #[error("Decoded layout rejected: {0}")]
    Rejected(#[from] PlacementError),

    #[error("Value {value} for {field} does not fit one base-36 digit")]
    FieldOutOfRange { field: &'static str, value: i64 },
}

/// Catalog loading failures
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
