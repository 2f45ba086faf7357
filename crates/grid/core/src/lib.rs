//! Grid geometry for a virtual tabletop board.
//!
//! `grid-core` converts between pixel and cell coordinates for square, hex,
//! isometric and gridless boards, measures cell distances under the
//! configurable movement metrics, builds light and vision areas (memoizing
//! the grid-conforming ones), and gates player movement against fog of war.
//! [`Grid`] is the entry point; zone state reaches it through
//! [`ZoneOracle`] and [`FogArea`].
pub mod config;
pub mod env;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod kind;
pub mod metric;
pub mod movement;
pub mod settings;
pub mod vision;

pub use config::GridConfig;
pub use env::{ZoneOracle, ZoneSettings};
pub use error::{ErrorSeverity, GridError};
pub use geometry::{
    Area, Bounds, CellPoint, CellPolygon, CellPolygonSpec, Polygon, Rect, ZonePoint,
};
pub use grid::{Grid, GridChange, GridChanged, GridListener, alpha_label};
pub use kind::{CellAnchor, GridKind};
pub use metric::MovementMetric;
pub use movement::{ExposedRegion, FogArea, MovementValidator, SectorMask, check_region};
pub use settings::GridSettings;
pub use vision::{
    ArcParams, GridKindSignature, REFERENCE_SIZE, ShapeKind, TokenFootprint, VisionAreaCache,
};
