use super::Grid;
use crate::geometry::CellPoint;
use crate::kind::GridKind;
use crate::metric::MovementMetric;

impl Grid {
    /// Walking distance between two cells, in cells.
    ///
    /// Square and isometric boards use `metric`. Hex boards count hex steps
    /// and gridless boards measure straight-line distance; both ignore it.
    pub fn cell_distance(&self, a: CellPoint, b: CellPoint, metric: MovementMetric) -> f64 {
        match self.kind {
            GridKind::Square | GridKind::Isometric => metric.distance(a, b) as f64,
            GridKind::HexVertical => hex_steps(a, b) as f64,
            GridKind::HexHorizontal => {
                hex_steps(CellPoint::new(a.y, a.x), CellPoint::new(b.y, b.x)) as f64
            }
            GridKind::Gridless => {
                let dx = (a.x - b.x) as f64;
                let dy = (a.y - b.y) as f64;
                dx.hypot(dy)
            }
        }
    }

    /// Cells whose distance from `origin` lies in `[min_radius, max_radius]`,
    /// in row-major order.
    pub fn cells_within(
        &self,
        origin: CellPoint,
        min_radius: i32,
        max_radius: i32,
        metric: MovementMetric,
    ) -> Vec<CellPoint> {
        if max_radius < 0 || min_radius > max_radius {
            return Vec::new();
        }
        // every supported distance is at least the larger axis offset
        (-max_radius..=max_radius)
            .flat_map(|dy| (-max_radius..=max_radius).map(move |dx| origin.offset(dx, dy)))
            .filter(|&cell| {
                let distance = self.cell_distance(origin, cell, metric);
                distance >= min_radius as f64 && distance <= max_radius as f64
            })
            .collect()
    }
}

/// Hex steps between two cells of a vertical (odd columns dropped) board.
fn hex_steps(a: CellPoint, b: CellPoint) -> i32 {
    let ar = a.y - a.x.div_euclid(2);
    let br = b.y - b.x.div_euclid(2);
    let dq = b.x - a.x;
    let dr = br - ar;
    if dq.signum() == dr.signum() {
        (dq + dr).abs()
    } else {
        dq.abs().max(dr.abs())
    }
}
