//! Planner configuration with documented constants
//!
//! The grid size and gesture thresholds are fixed per deployment. They are
//! collected here rather than scattered through the interaction code.

use serde::Deserialize;
use std::path::Path;

use crate::core::error::ConfigError;

/// Largest grid the share-string codec can address
///
/// Every x, y, width and height must fit one base-36 digit, so a full-width
/// rectangle on this grid still encodes.
pub const MAX_GRID_SIZE: i32 = 35;

/// Configuration for the placement engine and gesture recognition
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Side length N of the square placement grid (grid units)
    ///
    /// Every rectangle must satisfy `x + w <= N` and `y + h <= N`.
    pub grid_size: i32,

    /// How close (grid units) the pointer must be to an enclosure side
    /// for a press to start a resize instead of a move
    pub edge_threshold: f32,

    /// Pointer travel (pixels) below which a gesture counts as a click
    ///
    /// Clicks on an entity are delete requests, never moves or resizes.
    pub click_threshold_px: f32,

    /// Distance (pixels) outside the grid beyond which a move stops
    /// tracking the pointer
    pub drag_margin_px: f32,

    /// On-screen size of one grid cell (pixels)
    ///
    /// Only used to express the drag margin in grid units.
    pub cell_size_px: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid_size: 30,
            edge_threshold: 0.3,
            click_threshold_px: 5.0,
            drag_margin_px: 50.0,
            cell_size_px: 20.0,
        }
    }
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 1 || self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::Invalid(format!(
                "grid_size ({}) must be within 1..={}",
                self.grid_size, MAX_GRID_SIZE
            )));
        }

        if self.edge_threshold <= 0.0 || self.edge_threshold >= 0.5 {
            return Err(ConfigError::Invalid(format!(
                "edge_threshold ({}) must be within (0, 0.5)",
                self.edge_threshold
            )));
        }

        if self.click_threshold_px <= 0.0 || self.drag_margin_px < 0.0 {
            return Err(ConfigError::Invalid(
                "click threshold must be positive and drag margin non-negative".into(),
            ));
        }

        if self.cell_size_px <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "cell_size_px ({}) must be positive",
                self.cell_size_px
            )));
        }

        Ok(())
    }

    /// Drag margin converted to grid units
    pub fn drag_margin_cells(&self) -> f32 {
        self.drag_margin_px / self.cell_size_px
    }
}
