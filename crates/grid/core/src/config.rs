use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::kind::GridKind;

/// Grid engine constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Kind used for new boards.
    pub default_kind: GridKind,
    /// Pixels per cell for new boards; clamped into the supported range.
    pub default_size: i32,
    /// Tokens may face cell edges.
    pub face_edges: bool,
    /// Tokens may face cell vertices.
    pub face_vertices: bool,
    /// Rebuild grid-conforming areas on every request instead of reusing the
    /// vision cache. Developer toggle for checking cache behaviour.
    pub ignore_shape_cache: bool,
}

impl GridConfig {
    // ===== compile-time constants =====
    pub const MIN_GRID_SIZE_IN_PIXELS: i32 = 9;
    pub const MAX_GRID_SIZE_IN_PIXELS: i32 = 350;
    /// Segments used to approximate circles and arcs.
    pub const CIRCLE_SEGMENTS: usize = 60;
    /// Grid-conforming areas wider than this many cells fall back to circles.
    pub const MAX_VISION_RADIUS_IN_CELLS: i32 = 100;
    /// Grid-conforming builds slower than this are logged.
    pub const SLOW_BUILD_THRESHOLD: Duration = Duration::from_millis(50);

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GRID_SIZE: i32 = 100;
    pub const DEFAULT_UNITS_PER_CELL: f64 = 5.0;

    pub fn new() -> Self {
        Self {
            default_kind: GridKind::Square,
            default_size: Self::DEFAULT_GRID_SIZE,
            face_edges: true,
            face_vertices: true,
            ignore_shape_cache: false,
        }
    }

    /// Clamps a pixel size into `[MIN_GRID_SIZE_IN_PIXELS, MAX_GRID_SIZE_IN_PIXELS]`.
    pub fn constrain_size(size: i32) -> i32 {
        size.clamp(Self::MIN_GRID_SIZE_IN_PIXELS, Self::MAX_GRID_SIZE_IN_PIXELS)
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GRID_KIND` - Default grid kind, canonical or legacy name (default: square)
    /// - `GRID_SIZE` - Default pixels per cell (default: 100)
    /// - `GRID_FACE_EDGES` - Tokens may face edges (default: true)
    /// - `GRID_FACE_VERTICES` - Tokens may face vertices (default: true)
    /// - `GRID_IGNORE_SHAPE_CACHE` - Bypass the vision cache (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(name) = env::var("GRID_KIND") {
            match GridKind::resolve(&name) {
                Ok(kind) => config.default_kind = kind,
                Err(err) => tracing::warn!(%err, "ignoring GRID_KIND"),
            }
        }

        if let Some(size) = read_env::<i32>("GRID_SIZE") {
            config.default_size = Self::constrain_size(size);
        }

        if let Some(enable) = read_env::<bool>("GRID_FACE_EDGES") {
            config.face_edges = enable;
        }

        if let Some(enable) = read_env::<bool>("GRID_FACE_VERTICES") {
            config.face_vertices = enable;
        }

        if let Some(enable) = read_env::<bool>("GRID_IGNORE_SHAPE_CACHE") {
            config.ignore_shape_cache = enable;
        } else if env::var("GRID_IGNORE_SHAPE_CACHE").is_ok() {
            // Setting the variable without a value also counts as "true"
            config.ignore_shape_cache = true;
        }

        config
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.trim().parse().ok()
}
