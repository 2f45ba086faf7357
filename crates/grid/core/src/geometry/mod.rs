//! Plain geometry: board coordinates, rectangles, polygonal areas and the
//! regular polygons that cells are made of.

mod area;
mod point;
mod polygon;

pub use area::{Area, Polygon};
pub use point::{Bounds, CellPoint, Rect, ZonePoint};
pub use polygon::{CellPolygon, CellPolygonSpec, MAX_VERTICES};
