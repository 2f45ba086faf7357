//! Pixel ⇄ cell conversion for every grid kind.
//!
//! Hex boards are handled in a "vertical" frame where `u` runs across
//! columns and `v` down rows; horizontal hex swaps the axes on the way in
//! and out. Odd columns (vertical) or odd rows (horizontal) sit half a cell
//! further along the other axis.

use glam::DVec2;

use super::{Grid, hex_edge_length};
use crate::geometry::{CellPoint, ZonePoint};
use crate::kind::GridKind;

impl Grid {
    /// Square and gridless boards return the cell's top-left corner; hex
    /// and isometric boards return the cell's centre.
    pub fn convert_cell_to_point(&self, cp: CellPoint) -> ZonePoint {
        let size = self.size;
        match self.kind {
            GridKind::Gridless | GridKind::Square => {
                ZonePoint::new(cp.x * size + self.offset_x, cp.y * size + self.offset_y)
            }
            GridKind::HexVertical => {
                let (u, v) = hex_cell_to_frame(cp.x, cp.y, size as f64);
                ZonePoint::new(u + self.offset_x, v + self.offset_y)
            }
            GridKind::HexHorizontal => {
                let (u, v) = hex_cell_to_frame(cp.y, cp.x, size as f64);
                ZonePoint::new(v + self.offset_x, u + self.offset_y)
            }
            GridKind::Isometric => {
                let center = layout_center(self.kind, size as f64, cp);
                ZonePoint::new(
                    center.x as i32 + self.offset_x,
                    center.y as i32 + self.offset_y,
                )
            }
        }
    }

    pub fn convert_point_to_cell(&self, zp: ZonePoint) -> CellPoint {
        let x = zp.x - self.offset_x;
        let y = zp.y - self.offset_y;
        let size = self.size;
        match self.kind {
            GridKind::Gridless | GridKind::Square => {
                CellPoint::new(x.div_euclid(size), y.div_euclid(size))
            }
            GridKind::HexVertical => {
                let (col, row) = hex_frame_to_cell(x as f64, y as f64, size as f64);
                CellPoint::new(col, row)
            }
            GridKind::HexHorizontal => {
                let (row, col) = hex_frame_to_cell(y as f64, x as f64, size as f64);
                CellPoint::new(col, row)
            }
            GridKind::Isometric => {
                let half_width = size as f64;
                let half_height = size as f64 / 2.0;
                let along = x as f64 / half_width;
                let down = y as f64 / half_height;
                CellPoint::new(
                    ((down + along) / 2.0).floor() as i32,
                    ((down - along) / 2.0).floor() as i32,
                )
            }
        }
    }

    /// Exact centre of a cell in board pixels.
    pub fn cell_center(&self, cp: CellPoint) -> DVec2 {
        layout_center(self.kind, self.size as f64, cp)
            + DVec2::new(self.offset_x as f64, self.offset_y as f64)
    }

    /// Snap point for tokens that face edges or vertices.
    pub fn nearest_vertex(&self, zp: ZonePoint) -> ZonePoint {
        match self.kind {
            GridKind::Gridless | GridKind::Square => {
                let size = self.size as f64;
                let column = ((zp.x - self.offset_x) as f64 / size).round();
                let row = ((zp.y - self.offset_y) as f64 / size).round();
                ZonePoint::new(
                    (column * size) as i32 + self.offset_x,
                    (row * size) as i32 + self.offset_y,
                )
            }
            GridKind::HexVertical | GridKind::HexHorizontal => {
                let point = zp.as_dvec2();
                let center = self.cell_center(self.convert_point_to_cell(zp));
                let nearest = self
                    .polygon
                    .vertices()
                    .iter()
                    .map(|v| *v + center)
                    .min_by(|a, b| a.distance_squared(point).total_cmp(&b.distance_squared(point)))
                    .unwrap_or(center);
                ZonePoint::from_dvec2_rounded(nearest)
            }
            GridKind::Isometric => {
                // the top vertex of the diamond half a cell below the point
                let half_height = self.size as f64 / 2.0;
                let probe = ZonePoint::new(zp.x, zp.y + half_height as i32);
                let center = self.cell_center(self.convert_point_to_cell(probe));
                ZonePoint::from_dvec2_rounded(center - DVec2::new(0.0, half_height))
            }
        }
    }
}

/// Cell centre for a board of `size` pixels with no offset.
pub(crate) fn layout_center(kind: GridKind, size: f64, cp: CellPoint) -> DVec2 {
    match kind {
        GridKind::Gridless | GridKind::Square => {
            DVec2::new(cp.x as f64 + 0.5, cp.y as f64 + 0.5) * size
        }
        GridKind::HexVertical => {
            let (u, v) = hex_frame_center(cp.x, cp.y, size);
            DVec2::new(u, v)
        }
        GridKind::HexHorizontal => {
            let (u, v) = hex_frame_center(cp.y, cp.x, size);
            DVec2::new(v, u)
        }
        GridKind::Isometric => DVec2::new(
            (cp.x - cp.y) as f64 * size,
            (cp.x + cp.y) as f64 * size / 2.0 + size / 2.0,
        ),
    }
}

/// Cell centre in the vertical frame: columns step `1.5 R`, rows step the
/// cell height, odd columns drop by half a row.
fn hex_frame_center(column: i32, row: i32, size: f64) -> (f64, f64) {
    let minor = size / 2.0;
    let edge = hex_edge_length(size);
    let drop = if column.rem_euclid(2) == 0 { 1.0 } else { 2.0 };
    (
        column as f64 * 1.5 * edge + edge,
        row as f64 * 2.0 * minor + drop * minor,
    )
}

/// Integer pixel for a cell centre: `u` rounds, `v` truncates.
fn hex_cell_to_frame(column: i32, row: i32, size: f64) -> (i32, i32) {
    let (u, v) = hex_frame_center(column, row, size);
    (u.round() as i32, v as i32)
}

/// Cell under a pixel in the vertical frame, via axial cube rounding.
fn hex_frame_to_cell(u: f64, v: f64, size: f64) -> (i32, i32) {
    let edge = hex_edge_length(size);
    let x = u - edge;
    let y = v - size / 2.0;

    let q = (2.0 / 3.0 * x) / edge;
    let r = (-x / 3.0 + 3f64.sqrt() / 3.0 * y) / edge;
    let s = -q - r;

    let (mut rq, mut rr, rs) = (q.round(), r.round(), s.round());
    let (dq, dr, ds) = ((rq - q).abs(), (rr - r).abs(), (rs - s).abs());
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }

    let column = rq as i32;
    (column, rr as i32 + column.div_euclid(2))
}
