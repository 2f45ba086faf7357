//! The coordinate and shape authority for one board.
//!
//! A [`Grid`] owns its pixel size, offset and kind. Everything derived from
//! them (the cell polygon, the cell shape, vision areas) is rebuilt or
//! rescaled here when they change, and registered [`GridListener`]s are told
//! about every effective change.

mod convert;
mod distance;
mod events;
mod facing;
mod labels;

use std::fmt;
use std::sync::Arc;

use glam::DVec2;

pub(crate) use convert::layout_center;
pub use events::{GridChange, GridChanged, GridListener};
pub use labels::alpha_label;

use crate::config::GridConfig;
use crate::error::GridError;
use crate::geometry::{Area, CellPoint, CellPolygon, Rect};
use crate::kind::{CellAnchor, GridKind};
use crate::settings::GridSettings;
use crate::vision::VisionAreaCache;

/// One board's grid.
#[derive(Clone)]
pub struct Grid {
    kind: GridKind,
    size: i32,
    offset_x: i32,
    offset_y: i32,
    polygon: CellPolygon,
    cell_shape: Area,
    face_edges: bool,
    face_vertices: bool,
    ignore_shape_cache: bool,
    vision: Arc<VisionAreaCache>,
    listeners: Vec<Arc<dyn GridListener>>,
}

impl Grid {
    /// Creates a grid of `kind` with `size` pixels per cell (clamped) and no offset.
    pub fn new(kind: GridKind, size: i32) -> Self {
        let size = GridConfig::constrain_size(size);
        let polygon = CellPolygon::new(kind.polygon_spec(size as f64));
        let cell_shape = shape_for(kind, size, &polygon);
        Self {
            kind,
            size,
            offset_x: 0,
            offset_y: 0,
            polygon,
            cell_shape,
            face_edges: true,
            face_vertices: true,
            ignore_shape_cache: false,
            vision: Arc::new(VisionAreaCache::new()),
            listeners: Vec::new(),
        }
    }

    /// Creates a grid from a kind name, accepting legacy aliases.
    pub fn from_name(name: &str, size: i32) -> Result<Self, GridError> {
        Ok(Self::new(GridKind::resolve(name)?, size))
    }

    /// Creates a grid with the configured defaults.
    pub fn from_config(config: &GridConfig) -> Self {
        let mut grid = Self::new(config.default_kind, config.default_size);
        grid.face_edges = config.face_edges;
        grid.face_vertices = config.face_vertices;
        grid.ignore_shape_cache = config.ignore_shape_cache;
        grid
    }

    /// Restores a persisted grid.
    pub fn from_settings(settings: &GridSettings, config: &GridConfig) -> Result<Self, GridError> {
        let kind = settings.validate()?;
        let mut grid = Self::from_config(config);
        grid.kind = kind;
        grid.size = GridConfig::constrain_size(settings.size);
        grid.offset_x = settings.offset_x;
        grid.offset_y = settings.offset_y;
        grid.rebuild_shape();
        Ok(grid)
    }

    pub fn settings(&self) -> GridSettings {
        GridSettings {
            kind: self.kind.to_string(),
            size: self.size,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        }
    }

    /// Shares a vision cache with other grids.
    pub fn with_vision_cache(mut self, cache: Arc<VisionAreaCache>) -> Self {
        self.vision = cache;
        self
    }

    pub fn kind(&self) -> GridKind {
        self.kind
    }

    pub fn size_in_pixels(&self) -> i32 {
        self.size
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    pub fn polygon(&self) -> &CellPolygon {
        &self.polygon
    }

    pub fn vision_cache(&self) -> &Arc<VisionAreaCache> {
        &self.vision
    }

    pub fn ignores_shape_cache(&self) -> bool {
        self.ignore_shape_cache
    }

    pub fn set_ignore_shape_cache(&mut self, ignore: bool) {
        self.ignore_shape_cache = ignore;
    }

    pub fn set_facings(&mut self, face_edges: bool, face_vertices: bool) {
        self.face_edges = face_edges;
        self.face_vertices = face_vertices;
    }

    /// Registers a change listener.
    pub fn subscribe(&mut self, listener: Arc<dyn GridListener>) {
        self.listeners.push(listener);
        self.listeners.sort_by_key(|l| l.priority());
    }

    /// Sets pixels per cell, clamped into the supported range.
    ///
    /// Cached vision areas are kept; they are rescaled on retrieval.
    pub fn set_size_in_pixels(&mut self, size: i32) {
        let size = GridConfig::constrain_size(size);
        if size == self.size {
            return;
        }
        self.size = size;
        self.rebuild_shape();
        self.notify(GridChange::Size);
    }

    pub fn set_offset(&mut self, x: i32, y: i32) {
        if (x, y) == (self.offset_x, self.offset_y) {
            return;
        }
        self.offset_x = x;
        self.offset_y = y;
        self.notify(GridChange::Offset);
    }

    /// Switches the board layout and drops every cached vision area.
    pub fn set_kind(&mut self, kind: GridKind) {
        if kind == self.kind {
            return;
        }
        self.kind = kind;
        self.rebuild_shape();
        self.vision.clear();
        self.notify(GridChange::Kind);
    }

    /// Cell outline relative to the point [`Grid::convert_cell_to_point`]
    /// returns. Empty on gridless boards.
    pub fn cell_shape(&self) -> &Area {
        &self.cell_shape
    }

    /// Cell outline for an arbitrary pixel size; reuses the current shape
    /// when `size` matches.
    pub fn create_cell_shape(&self, size: i32) -> Area {
        if size == self.size {
            return self.cell_shape.clone();
        }
        let polygon = CellPolygon::new(self.kind.polygon_spec(size as f64));
        shape_for(self.kind, size, &polygon)
    }

    pub fn cell_width(&self) -> f64 {
        let size = self.size as f64;
        match self.kind {
            GridKind::Gridless | GridKind::Square => size,
            GridKind::HexVertical => 2.0 * self.hex_edge_length(),
            GridKind::HexHorizontal => size,
            GridKind::Isometric => 2.0 * size,
        }
    }

    pub fn cell_height(&self) -> f64 {
        let size = self.size as f64;
        match self.kind {
            GridKind::HexHorizontal => 2.0 * self.hex_edge_length(),
            _ => size,
        }
    }

    /// Vector from a converted cell point to the top-left corner of the
    /// cell's bounding box. Zero on square and gridless boards.
    pub fn center_offset(&self) -> DVec2 {
        match self.kind.anchor() {
            CellAnchor::TopLeft => DVec2::ZERO,
            CellAnchor::Center => DVec2::new(-self.cell_width(), -self.cell_height()) / 2.0,
        }
    }

    /// Edge length of the square image box a 1×1 token is drawn in.
    pub fn token_space(&self) -> i32 {
        self.size
    }

    /// Pixel rectangle a renderer paints cell `cp` into.
    pub fn draw_bounds(&self, cp: CellPoint) -> Rect {
        let zp = self.convert_cell_to_point(cp);
        match self.cell_shape.bounds() {
            // polygon vertices carry trigonometry noise, so round rather than floor
            Some(bounds) => Rect::new(
                zp.x + bounds.min.x.round() as i32,
                zp.y + bounds.min.y.round() as i32,
                bounds.width().round() as i32,
                bounds.height().round() as i32,
            ),
            None => Rect::new(zp.x, zp.y, self.size, self.size),
        }
    }

    /// Hex circumradius: `size / 2` divided by `cos 30°`.
    pub(crate) fn hex_edge_length(&self) -> f64 {
        hex_edge_length(self.size as f64)
    }

    fn rebuild_shape(&mut self) {
        self.polygon = CellPolygon::new(self.kind.polygon_spec(self.size as f64));
        self.cell_shape = shape_for(self.kind, self.size, &self.polygon);
    }

    fn notify(&self, change: GridChange) {
        let event = GridChanged {
            change,
            kind: self.kind,
            size_in_pixels: self.size,
            offset: self.offset(),
        };
        tracing::debug!(
            change = %change,
            kind = %self.kind,
            size = self.size,
            offset_x = self.offset_x,
            offset_y = self.offset_y,
            listeners = self.listeners.len(),
            "grid changed"
        );
        for listener in &self.listeners {
            listener.grid_changed(&event);
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("kind", &self.kind)
            .field("size", &self.size)
            .field("offset", &self.offset())
            .field("ignore_shape_cache", &self.ignore_shape_cache)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

pub(crate) fn hex_edge_length(size: f64) -> f64 {
    (size / 2.0) / (3f64.sqrt() / 2.0)
}

/// Places the polygon so it lines up with the kind's converted cell point.
fn shape_for(kind: GridKind, size: i32, polygon: &CellPolygon) -> Area {
    let center = match kind.anchor() {
        CellAnchor::TopLeft => DVec2::splat(size as f64 / 2.0),
        CellAnchor::Center => DVec2::ZERO,
    };
    polygon.to_area_at(center)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<GridChanged>>,
    }

    impl GridListener for Recorder {
        fn grid_changed(&self, event: &GridChanged) {
            if let Ok(mut events) = self.events.lock() {
                events.push(*event);
            }
        }
    }

    #[test]
    fn size_is_clamped() {
        assert_eq!(Grid::new(GridKind::Square, 1).size_in_pixels(), 9);
        let mut grid = Grid::new(GridKind::Square, 50);
        grid.set_size_in_pixels(5000);
        assert_eq!(grid.size_in_pixels(), 350);
    }

    #[test]
    fn square_cell_shape_starts_at_the_corner() {
        let grid = Grid::new(GridKind::Square, 50);
        let bounds = grid.cell_shape().bounds().expect("square cells have a shape");
        assert!(bounds.min.abs_diff_eq(DVec2::ZERO, 1e-9));
        assert!(bounds.max.abs_diff_eq(DVec2::splat(50.0), 1e-9));
    }

    #[test]
    fn hex_and_isometric_shapes_are_centred() {
        for kind in [GridKind::HexVertical, GridKind::HexHorizontal, GridKind::Isometric] {
            let grid = Grid::new(kind, 60);
            let bounds = grid.cell_shape().bounds().expect("cells have a shape");
            assert!(bounds.center().abs_diff_eq(DVec2::ZERO, 1e-9), "{kind}");
            assert!((bounds.width() - grid.cell_width()).abs() < 1e-9, "{kind}");
            assert!((bounds.height() - grid.cell_height()).abs() < 1e-9, "{kind}");
        }
    }

    #[test]
    fn gridless_has_no_cell_shape() {
        let grid = Grid::new(GridKind::Gridless, 50);
        assert!(grid.cell_shape().is_empty());
        assert_eq!(grid.draw_bounds(CellPoint::new(1, 2)), Rect::new(50, 100, 50, 50));
    }

    #[test]
    fn create_cell_shape_uses_requested_size() {
        let grid = Grid::new(GridKind::Square, 50);
        let big = grid.create_cell_shape(100);
        assert!((big.measure() - 10_000.0).abs() < 1e-6);
        assert_eq!(&grid.create_cell_shape(50), grid.cell_shape());
    }

    #[test]
    fn draw_bounds_cover_the_cell() {
        let mut grid = Grid::new(GridKind::Square, 50);
        grid.set_offset(5, 7);
        assert_eq!(grid.draw_bounds(CellPoint::new(2, 3)), Rect::new(105, 157, 50, 50));

        let iso = Grid::new(GridKind::Isometric, 50);
        assert_eq!(iso.draw_bounds(CellPoint::ORIGIN), Rect::new(-50, 0, 100, 50));
    }

    #[test]
    fn mutations_notify_listeners_once() {
        let recorder = Arc::new(Recorder::default());
        let mut grid = Grid::new(GridKind::Square, 50);
        grid.subscribe(recorder.clone());

        grid.set_size_in_pixels(50);
        grid.set_size_in_pixels(60);
        grid.set_offset(0, 0);
        grid.set_offset(3, 4);
        grid.set_kind(GridKind::Square);
        grid.set_kind(GridKind::HexVertical);

        let events = recorder.events.lock().expect("recorder lock");
        let changes: Vec<GridChange> = events.iter().map(|e| e.change).collect();
        assert_eq!(changes, [GridChange::Size, GridChange::Offset, GridChange::Kind]);
        assert_eq!(events[2].kind, GridKind::HexVertical);
        assert_eq!(events[2].size_in_pixels, 60);
        assert_eq!(events[2].offset, (3, 4));
    }

    #[test]
    fn unknown_names_are_reported() {
        let err = Grid::from_name("Triangles", 50).expect_err("unknown kind");
        assert_eq!(err, GridError::UnknownGridKind("Triangles".into()));
        assert_eq!(
            Grid::from_name("Horizontal Hex", 50).map(|g| g.kind()),
            Ok(GridKind::HexHorizontal)
        );
    }
}
