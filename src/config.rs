//! Map size presets and generation configuration.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::city::buildings::{default_catalog, CatalogEntry};
use crate::error::CityError;

/// Largest grid accepted, in cells.
pub const MAX_CELLS: usize = 1 << 26;

/// Named bundle of map dimensions and generation budgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MapSizePreset {
    Small,
    Medium,
    Large,
}

impl MapSizePreset {
    pub fn all() -> &'static [MapSizePreset] {
        &[MapSizePreset::Small, MapSizePreset::Medium, MapSizePreset::Large]
    }

    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            MapSizePreset::Small => (100, 100),
            MapSizePreset::Medium => (200, 200),
            MapSizePreset::Large => (400, 400),
        }
    }

    /// Road-carving iteration budget.
    pub fn max_iterations(&self) -> usize {
        match self {
            MapSizePreset::Small => 3000,
            MapSizePreset::Medium => 6000,
            MapSizePreset::Large => 12000,
        }
    }

    pub fn police_count(&self) -> usize {
        match self {
            MapSizePreset::Small => 4,
            MapSizePreset::Medium => 5,
            MapSizePreset::Large => 7,
        }
    }

    pub fn min_police_distance(&self) -> f32 {
        match self {
            MapSizePreset::Small => 7.0,
            MapSizePreset::Medium => 10.0,
            MapSizePreset::Large => 15.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MapSizePreset::Small => "Small",
            MapSizePreset::Medium => "Medium",
            MapSizePreset::Large => "Large",
        }
    }
}

/// Full set of generation parameters.
///
/// Missing fields in a JSON config fall back to the Small preset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub width: usize,
    pub height: usize,

    /// Random-walk steps for road carving (the seed cell is extra).
    pub max_iterations: usize,

    /// Target number of police stations.
    pub police_count: usize,

    /// Minimum Euclidean distance between any two police stations.
    pub min_distance: f32,

    /// The road seed is drawn from `[margin, size - margin)` on both axes.
    pub seed_margin: usize,

    /// Maximum roads allowed in a candidate's 3x3 block before it is placed.
    pub max_road_neighbors: usize,

    /// Weighted filler building catalog.
    pub catalog: Vec<CatalogEntry>,
}

impl From<MapSizePreset> for CityConfig {
    fn from(preset: MapSizePreset) -> Self {
        let (width, height) = preset.dimensions();
        Self {
            width,
            height,
            max_iterations: preset.max_iterations(),
            police_count: preset.police_count(),
            min_distance: preset.min_police_distance(),
            seed_margin: 5,
            max_road_neighbors: 2,
            catalog: default_catalog(),
        }
    }
}

impl Default for CityConfig {
    fn default() -> Self {
        Self::from(MapSizePreset::Small)
    }
}

impl CityConfig {
    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, CityError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, CityError> {
        let config: CityConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot seed a road network.
    pub fn validate(&self) -> Result<(), CityError> {
        let invalid = CityError::InvalidDimensions {
            width: self.width,
            height: self.height,
            margin: self.seed_margin,
        };
        let min_side = match self.seed_margin.checked_mul(2) {
            Some(side) => side,
            None => return Err(invalid),
        };
        if self.width <= min_side || self.height <= min_side {
            return Err(invalid);
        }
        match self.width.checked_mul(self.height) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => return Err(invalid),
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(CityError::InvalidParameter(format!(
                "map {}x{} exceeds the coordinate range",
                self.width, self.height
            )));
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(CityError::InvalidParameter(format!(
                "min_distance must be a finite non-negative number, got {}",
                self.min_distance
            )));
        }
        Ok(())
    }
}
