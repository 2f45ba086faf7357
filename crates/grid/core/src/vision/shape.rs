//! Light and vision shapes around a token.
//!
//! Every area returned here is relative to the token's centre; callers
//! translate it to the token's position on the board.

use std::collections::BTreeSet;
use std::f64::consts::{FRAC_PI_4, SQRT_2, TAU};
use std::time::Instant;

use glam::{DAffine2, DVec2};

use super::cache::{GridKindSignature, REFERENCE_SIZE};
use super::footprint::TokenFootprint;
use crate::config::GridConfig;
use crate::env::ZoneOracle;
use crate::geometry::{Area, CellPoint, CellPolygon, ZonePoint};
use crate::grid::Grid;
use crate::metric::MovementMetric;

/// Outline of a light or vision source.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShapeKind {
    Circle,
    Square,
    Cone,
    Hex,
    /// Union of the cells within range, following the board's cell shape.
    GridConforming,
}

/// Width and direction of a cone relative to the token's facing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcParams {
    pub arc_degrees: f64,
    pub offset_degrees: f64,
}

impl ArcParams {
    pub const fn new(arc_degrees: f64, offset_degrees: f64) -> Self {
        Self {
            arc_degrees,
            offset_degrees,
        }
    }
}

impl Default for ArcParams {
    fn default() -> Self {
        Self::new(90.0, 0.0)
    }
}

impl Grid {
    /// Area lit or seen by a token.
    ///
    /// `range` is in zone distance units; zero means the zone's default
    /// token vision. With `scale_with_token` the shape grows with the
    /// token: closed-form shapes gain half the token's short side, and
    /// grid-conforming areas are repeated around every occupied cell.
    pub fn shaped_area(
        &self,
        zone: &dyn ZoneOracle,
        shape: ShapeKind,
        token: &TokenFootprint,
        range: f64,
        arc: ArcParams,
        scale_with_token: bool,
    ) -> Area {
        let started = Instant::now();
        let units_per_cell = zone.units_per_cell();
        if units_per_cell.is_nan() || units_per_cell <= 0.0 {
            tracing::debug!(units_per_cell, "zone has no usable distance unit");
            return Area::new();
        }

        let size = self.size_in_pixels() as f64;
        let mut vision_range = if range == 0.0 {
            zone.token_vision_pixels() as f64
        } else {
            range * size / units_per_cell
        };
        if scale_with_token {
            let bounds = token.bounds();
            vision_range += if self.kind().is_gridless() {
                bounds.width as f64 / 2.0
            } else {
                bounds.width.min(bounds.height) as f64 / 2.0
            };
        }
        if !(vision_range.is_finite() && vision_range > 0.0) {
            return Area::new();
        }

        let grid_radius = (range / units_per_cell).floor();
        let max_radius = GridConfig::MAX_VISION_RADIUS_IN_CELLS;
        if shape == ShapeKind::GridConforming && grid_radius > max_radius as f64 {
            tracing::debug!(grid_radius, max_radius, "range too large for grid cells, using a circle");
        }

        let area = match shape {
            ShapeKind::GridConforming
                if range > 0.0 && !self.kind().is_gridless() && grid_radius <= max_radius as f64 =>
            {
                self.grid_area(zone, grid_radius as i32, token, scale_with_token)
            }
            ShapeKind::GridConforming | ShapeKind::Circle => self.project(circle(vision_range)),
            ShapeKind::Square => self.project(Area::rectangle(
                -vision_range,
                -vision_range,
                2.0 * vision_range,
                2.0 * vision_range,
            )),
            ShapeKind::Cone => {
                let wedge = cone(vision_range, arc, token.facing_degrees());
                let bounds = token.bounds();
                let footprint = Area::rectangle(
                    -bounds.width as f64 / 2.0,
                    -bounds.height as f64 / 2.0,
                    bounds.width as f64,
                    bounds.height as f64,
                );
                self.project(wedge).union(footprint)
            }
            ShapeKind::Hex => {
                let inradius = vision_range * 3f64.sqrt() / 2.0;
                self.project(CellPolygon::build(6, inradius, 0.0).to_area())
            }
        };

        let elapsed = started.elapsed();
        if elapsed > GridConfig::SLOW_BUILD_THRESHOLD {
            tracing::debug!(
                %shape,
                range,
                elapsed_ms = elapsed.as_millis() as u64,
                "slow shaped area"
            );
        }
        area
    }

    /// Cells within `radius` of the origin cell at the current pixel size,
    /// centred on the origin cell's centre.
    pub fn radius_area(&self, radius: i32, metric: MovementMetric) -> Area {
        let scale = DAffine2::from_scale(DVec2::splat(self.size_in_pixels() as f64 / REFERENCE_SIZE));
        if self.ignores_shape_cache() {
            return self.build_radius_area(radius, metric).transformed(&scale);
        }
        let signature = GridKindSignature::of(self.kind(), metric);
        let reference = self
            .vision_cache()
            .get_or_build(signature, radius, || self.build_radius_area(radius, metric));
        reference.transformed(&scale)
    }

    /// Uncached radius area at the reference scale.
    pub fn build_radius_area(&self, radius: i32, metric: MovementMetric) -> Area {
        let kind = self.kind();
        if kind.is_gridless() || radius < 0 {
            return Area::new();
        }
        let polygon = CellPolygon::new(kind.polygon_spec(REFERENCE_SIZE));
        let origin = crate::grid::layout_center(kind, REFERENCE_SIZE, CellPoint::ORIGIN);
        let tiles = self
            .cells_within(CellPoint::ORIGIN, 0, radius, metric)
            .into_iter()
            .map(|cell| {
                let center = crate::grid::layout_center(kind, REFERENCE_SIZE, cell) - origin;
                polygon.vertices().iter().map(|v| *v + center).collect()
            });
        let area = Area::merge_tiles(tiles);
        if !area.is_singular() {
            tracing::warn!(
                %kind,
                radius,
                %metric,
                regions = area.polygons().len(),
                "radius area is not a single region"
            );
        }
        area
    }

    fn grid_area(
        &self,
        zone: &dyn ZoneOracle,
        radius: i32,
        token: &TokenFootprint,
        scale_with_token: bool,
    ) -> Area {
        let metric = zone.movement_metric();
        let center = token.center();

        if scale_with_token && !token.cells().is_empty() {
            // the union of one radius area per occupied cell is every cell in reach of any of them
            let reach: BTreeSet<CellPoint> = token
                .cells()
                .iter()
                .flat_map(|&cell| self.cells_within(cell, 0, radius, metric))
                .collect();
            let polygon = self.polygon();
            return Area::merge_tiles(reach.into_iter().map(|cell| {
                let offset = self.cell_center(cell) - center;
                polygon.vertices().iter().map(|v| *v + offset).collect()
            }));
        }

        let template = self.radius_area(radius, metric);
        // even-sized tokens are centred on a cell corner; hug the cell below-right
        let anchor = self.convert_point_to_cell(ZonePoint::from_dvec2_truncated(center));
        template.translated(self.cell_center(anchor) - center)
    }

    /// Isometric boards draw closed-form shapes in diamond space.
    fn project(&self, area: Area) -> Area {
        if self.kind().is_isometric() {
            area.transformed(&isometric_projection())
        } else {
            area
        }
    }
}

/// Rotate a quarter turn's half, then stretch to the 2:1 diamond.
fn isometric_projection() -> DAffine2 {
    DAffine2::from_scale(DVec2::new(SQRT_2, SQRT_2 / 2.0)) * DAffine2::from_angle(FRAC_PI_4)
}

fn circle(radius: f64) -> Area {
    let segments = GridConfig::CIRCLE_SEGMENTS;
    Area::from_ring(
        (0..segments)
            .map(|k| {
                let angle = TAU * k as f64 / segments as f64;
                DVec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect(),
    )
}

/// Pie wedge centred on the token facing plus the arc offset. Angles run
/// counter-clockwise on screen, so y is flipped.
fn cone(radius: f64, arc: ArcParams, facing_degrees: f64) -> Area {
    if arc.arc_degrees >= 360.0 {
        return circle(radius);
    }
    if arc.arc_degrees <= 0.0 {
        return Area::new();
    }
    let middle = facing_degrees + arc.offset_degrees;
    let start = (middle - arc.arc_degrees / 2.0).to_radians();
    let sweep = arc.arc_degrees.to_radians();
    let steps = ((arc.arc_degrees / 360.0) * GridConfig::CIRCLE_SEGMENTS as f64)
        .ceil()
        .max(1.0) as usize;

    let mut ring = Vec::with_capacity(steps + 2);
    ring.push(DVec2::ZERO);
    ring.extend((0..=steps).map(|k| {
        let angle = start + sweep * k as f64 / steps as f64;
        DVec2::new(angle.cos(), -angle.sin()) * radius
    }));
    Area::from_ring(ring)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::env::ZoneSettings;
    use crate::geometry::Rect;
    use crate::kind::GridKind;

    fn zone(metric: MovementMetric) -> ZoneSettings {
        ZoneSettings::new(5.0, metric).with_token_vision_pixels(400)
    }

    #[test]
    fn circle_has_sixty_segments_and_the_right_radius() {
        let grid = Grid::new(GridKind::Square, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::ORIGIN]);
        let area = grid.shaped_area(
            &zone(MovementMetric::OneTwoOne),
            ShapeKind::Circle,
            &token,
            10.0,
            ArcParams::default(),
            false,
        );
        assert_eq!(area.vertex_count(), 60);
        let bounds = area.bounds().expect("circle has bounds");
        // 10 units at 5 units per cell is two cells
        assert!((bounds.width() - 200.0).abs() < 1e-6);
        assert!((area.measure() - PI * 100.0 * 100.0).abs() / (PI * 10_000.0) < 0.01);
    }

    #[test]
    fn zero_range_uses_token_vision() {
        let grid = Grid::new(GridKind::Square, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::ORIGIN]);
        let area = grid.shaped_area(
            &zone(MovementMetric::OneTwoOne),
            ShapeKind::Square,
            &token,
            0.0,
            ArcParams::default(),
            false,
        );
        assert!(area.approx_eq(&Area::rectangle(-400.0, -400.0, 800.0, 800.0), 1e-9));
    }

    #[test]
    fn zero_vision_is_empty() {
        let grid = Grid::new(GridKind::Square, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::ORIGIN]);
        let blind = ZoneSettings::new(5.0, MovementMetric::OneTwoOne).with_token_vision_pixels(0);
        let area = grid.shaped_area(&blind, ShapeKind::Circle, &token, 0.0, ArcParams::default(), false);
        assert!(area.is_empty());
    }

    #[test]
    fn scale_with_token_grows_closed_shapes() {
        let grid = Grid::new(GridKind::Square, 50);
        let token = TokenFootprint::block(&grid, CellPoint::ORIGIN, 2, 2);
        let area = grid.shaped_area(
            &zone(MovementMetric::OneTwoOne),
            ShapeKind::Square,
            &token,
            5.0,
            ArcParams::default(),
            true,
        );
        // one cell of range plus half the 100 pixel footprint
        assert!(area.approx_eq(&Area::rectangle(-100.0, -100.0, 200.0, 200.0), 1e-9));
    }

    #[test]
    fn cone_points_along_the_facing() {
        let grid = Grid::new(GridKind::Square, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::ORIGIN]).with_facing(90.0);
        let area = grid.shaped_area(
            &zone(MovementMetric::OneTwoOne),
            ShapeKind::Cone,
            &token,
            20.0,
            ArcParams::new(60.0, 0.0),
            false,
        );
        // facing 90 is "up" on screen
        assert!(area.contains_point(DVec2::new(0.0, -150.0)));
        assert!(!area.contains_point(DVec2::new(0.0, 150.0)));
        assert!(!area.contains_point(DVec2::new(150.0, 0.0)));
        // the footprint itself is always included
        assert!(area.contains_point(DVec2::new(0.0, 20.0)));
    }

    #[test]
    fn hex_shape_is_flat_topped() {
        let grid = Grid::new(GridKind::HexVertical, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::ORIGIN]);
        let area = grid.shaped_area(
            &zone(MovementMetric::OneTwoOne),
            ShapeKind::Hex,
            &token,
            10.0,
            ArcParams::default(),
            false,
        );
        let bounds = area.bounds().expect("hex has bounds");
        assert!((bounds.width() - 200.0).abs() < 1e-6);
        assert!((bounds.height() - 200.0 * 3f64.sqrt() / 2.0).abs() < 1e-6);
    }

    #[test]
    fn isometric_squares_become_diamonds() {
        let grid = Grid::new(GridKind::Isometric, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::ORIGIN]);
        let area = grid.shaped_area(
            &zone(MovementMetric::OneTwoOne),
            ShapeKind::Square,
            &token,
            5.0,
            ArcParams::default(),
            false,
        );
        let bounds = area.bounds().expect("diamond has bounds");
        assert!((bounds.width() - 200.0).abs() < 1e-6);
        assert!((bounds.height() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn grid_conforming_square_radius_one_is_three_by_three() {
        let grid = Grid::new(GridKind::Square, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::new(4, 4)]);
        let area = grid.shaped_area(
            &zone(MovementMetric::Chebyshev),
            ShapeKind::GridConforming,
            &token,
            5.0,
            ArcParams::default(),
            false,
        );
        assert!(area.is_singular());
        assert!((area.measure() - 9.0 * 2500.0).abs() < 1e-6);
        assert!(area.contains_rect(&Rect::new(-75, -75, 150, 150)));
        assert!(!area.intersects_rect(&Rect::new(75, -75, 10, 150)));
    }

    #[test]
    fn grid_conforming_follows_the_metric() {
        let grid = Grid::new(GridKind::Square, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::ORIGIN]);
        let measure = |metric| {
            grid.shaped_area(
                &zone(metric),
                ShapeKind::GridConforming,
                &token,
                10.0,
                ArcParams::default(),
                false,
            )
            .measure()
                / 2500.0
        };
        assert!((measure(MovementMetric::NoDiagonals) - 13.0).abs() < 1e-6);
        assert!((measure(MovementMetric::Chebyshev) - 25.0).abs() < 1e-6);
        assert!((measure(MovementMetric::OneTwoOne) - 21.0).abs() < 1e-6);
    }

    #[test]
    fn grid_conforming_hex_radius_one_is_seven_cells() {
        let grid = Grid::new(GridKind::HexHorizontal, 60);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::new(1, 1)]);
        let area = grid.shaped_area(
            &zone(MovementMetric::OneTwoOne),
            ShapeKind::GridConforming,
            &token,
            5.0,
            ArcParams::default(),
            false,
        );
        assert!(area.is_singular());
        let cell = grid.cell_shape().measure();
        assert!((area.measure() - 7.0 * cell).abs() < 1e-6 * cell);
    }

    #[test]
    fn gridless_grid_conforming_falls_back_to_a_circle() {
        let grid = Grid::new(GridKind::Gridless, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::ORIGIN]);
        let area = grid.shaped_area(
            &zone(MovementMetric::OneTwoOne),
            ShapeKind::GridConforming,
            &token,
            10.0,
            ArcParams::default(),
            false,
        );
        assert_eq!(area.vertex_count(), GridConfig::CIRCLE_SEGMENTS);
    }

    #[test]
    fn scale_with_token_hugs_every_occupied_cell() {
        let grid = Grid::new(GridKind::Square, 50);
        let token = TokenFootprint::block(&grid, CellPoint::ORIGIN, 2, 2);
        let area = grid.shaped_area(
            &zone(MovementMetric::Chebyshev),
            ShapeKind::GridConforming,
            &token,
            5.0,
            ArcParams::default(),
            true,
        );
        // one 4x4 block around the 2x2 token
        assert!(area.is_singular());
        assert!((area.measure() - 16.0 * 2500.0).abs() < 1e-6);
        assert!(area.contains_rect(&Rect::new(-90, -90, 180, 180)));
        assert!(area.contains_rect(&Rect::new(-100, -100, 200, 200)));
        assert!(!area.intersects_rect(&Rect::new(100, -100, 10, 200)));
    }

    #[test]
    fn scale_with_token_on_hex_merges_neighbourhoods() {
        let grid = Grid::new(GridKind::HexVertical, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::new(0, 0), CellPoint::new(0, 1)]);
        let area = grid.shaped_area(
            &zone(MovementMetric::OneTwoOne),
            ShapeKind::GridConforming,
            &token,
            5.0,
            ArcParams::default(),
            true,
        );
        assert!(area.is_singular());
        // each hex and its six neighbours; the pair and their two shared neighbours count twice
        let cell = grid.cell_shape().measure();
        assert!((area.measure() - 10.0 * cell).abs() < 1e-6 * cell);
    }

    #[test]
    fn cone_and_footprint_form_one_region() {
        let grid = Grid::new(GridKind::Square, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::ORIGIN]);
        let area = grid.shaped_area(
            &zone(MovementMetric::OneTwoOne),
            ShapeKind::Cone,
            &token,
            20.0,
            ArcParams::new(90.0, 0.0),
            false,
        );
        assert!(area.is_singular());
        // straddles the footprint's right edge into the wedge
        assert!(area.contains_rect(&Rect::new(0, -10, 30, 20)));
        let wedge = PI * 200.0 * 200.0 / 4.0;
        assert!(area.measure() < wedge + 2500.0);
        assert!(area.measure() > wedge);
    }

    #[test]
    fn oversized_grid_conforming_range_falls_back_to_a_circle() {
        let grid = Grid::new(GridKind::Square, 50);
        let token = TokenFootprint::occupying(&grid, vec![CellPoint::ORIGIN]);
        let area = grid.shaped_area(
            &zone(MovementMetric::OneTwoOne),
            ShapeKind::GridConforming,
            &token,
            1e12,
            ArcParams::default(),
            false,
        );
        assert_eq!(area.vertex_count(), GridConfig::CIRCLE_SEGMENTS);
        assert!(grid.vision_cache().is_empty());

        let widest = 5.0 * GridConfig::MAX_VISION_RADIUS_IN_CELLS as f64;
        let area = grid.shaped_area(
            &zone(MovementMetric::NoDiagonals),
            ShapeKind::GridConforming,
            &token,
            widest,
            ArcParams::default(),
            false,
        );
        assert!(area.is_singular());
        assert_eq!(grid.vision_cache().len(), 1);
    }
}
