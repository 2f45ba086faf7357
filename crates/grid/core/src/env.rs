//! Zone-owned inputs the grid consults but does not own.

use crate::config::GridConfig;
use crate::metric::MovementMetric;

/// Vision policy of the zone a grid belongs to.
pub trait ZoneOracle: Send + Sync {
    /// Game distance units per cell (e.g. feet per square).
    fn units_per_cell(&self) -> f64;

    /// Pixel radius used for vision without an explicit range.
    fn token_vision_pixels(&self) -> i32;

    fn movement_metric(&self) -> MovementMetric;
}

/// Plain-data [`ZoneOracle`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneSettings {
    pub units_per_cell: f64,
    pub token_vision_pixels: i32,
    pub movement_metric: MovementMetric,
}

impl ZoneSettings {
    pub fn new(units_per_cell: f64, movement_metric: MovementMetric) -> Self {
        Self {
            units_per_cell,
            movement_metric,
            ..Self::default()
        }
    }

    pub fn with_token_vision_pixels(mut self, pixels: i32) -> Self {
        self.token_vision_pixels = pixels;
        self
    }
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            units_per_cell: GridConfig::DEFAULT_UNITS_PER_CELL,
            token_vision_pixels: GridConfig::DEFAULT_GRID_SIZE * 10,
            movement_metric: MovementMetric::default(),
        }
    }
}

impl ZoneOracle for ZoneSettings {
    fn units_per_cell(&self) -> f64 {
        self.units_per_cell
    }

    fn token_vision_pixels(&self) -> i32 {
        self.token_vision_pixels
    }

    fn movement_metric(&self) -> MovementMetric {
        self.movement_metric
    }
}
