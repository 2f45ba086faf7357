//! Regular cell polygons built from their inscribed radius.

use std::f64::consts::PI;

use arrayvec::ArrayVec;
use glam::{DAffine2, DVec2};

use super::{Area, Bounds};
use crate::error::GridError;

/// Largest vertex count a cell polygon can have.
pub const MAX_VERTICES: usize = 6;

/// Validated template for a cell polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPolygonSpec {
    vertex_count: u8,
    inradius: f64,
    rotation_degrees: f64,
    isometric: bool,
}

impl CellPolygonSpec {
    pub fn try_new(
        vertex_count: u8,
        inradius: f64,
        rotation_degrees: f64,
        isometric: bool,
    ) -> Result<Self, GridError> {
        if !matches!(vertex_count, 0 | 3 | 4 | 6) {
            return Err(GridError::InvalidCellPolygon(vertex_count));
        }
        Ok(Self {
            vertex_count,
            inradius,
            rotation_degrees,
            isometric,
        })
    }

    /// Template for kinds whose vertex count is known to be valid.
    pub(crate) const fn known(
        vertex_count: u8,
        inradius: f64,
        rotation_degrees: f64,
        isometric: bool,
    ) -> Self {
        Self {
            vertex_count,
            inradius,
            rotation_degrees,
            isometric,
        }
    }

    pub const fn vertex_count(&self) -> u8 {
        self.vertex_count
    }

    pub const fn inradius(&self) -> f64 {
        self.inradius
    }

    pub const fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub const fn is_isometric(&self) -> bool {
        self.isometric
    }

    pub const fn is_gridless(&self) -> bool {
        self.vertex_count == 0
    }
}

/// A regular polygon centred on the origin, optionally projected isometrically.
///
/// Metrics are kept alongside the vertices. After an isometric projection a
/// triangle or hexagon is no longer regular, so its per-edge lengths are
/// measured from the projected vertices instead.
#[derive(Clone, Debug, PartialEq)]
pub struct CellPolygon {
    spec: CellPolygonSpec,
    vertices: ArrayVec<DVec2, MAX_VERTICES>,
    side_lengths: ArrayVec<f64, MAX_VERTICES>,
    circumradius: f64,
    side_length: f64,
    irregular: bool,
}

impl CellPolygon {
    /// Builds the polygon described by `spec`, applying the isometric
    /// projection when the template asks for one.
    pub fn new(spec: CellPolygonSpec) -> Self {
        let mut polygon = Self::build(spec.vertex_count, spec.inradius, spec.rotation_degrees);
        polygon.spec = spec;
        if spec.isometric {
            polygon.isometricize_default();
        }
        polygon
    }

    /// Builds a regular polygon with vertices at `rotation + k * 360 / n`.
    ///
    /// # Panics
    ///
    /// Panics when `vertex_count` is not one of 0, 3, 4 or 6.
    pub fn build(vertex_count: u8, inradius: f64, rotation_degrees: f64) -> Self {
        assert!(
            matches!(vertex_count, 0 | 3 | 4 | 6),
            "cell polygons need 0, 3, 4 or 6 vertices, got {vertex_count}"
        );
        let spec = CellPolygonSpec::known(vertex_count, inradius, rotation_degrees, false);
        if vertex_count == 0 {
            return Self {
                spec,
                vertices: ArrayVec::new(),
                side_lengths: ArrayVec::new(),
                circumradius: 0.0,
                side_length: 0.0,
                irregular: false,
            };
        }

        let n = vertex_count as f64;
        let circumradius = inradius / (PI / n).cos();
        let side_length = 2.0 * inradius * (PI / n).tan();
        let rotation = rotation_degrees.to_radians();
        let vertices = (0..vertex_count)
            .map(|k| {
                let angle = rotation + k as f64 * (2.0 * PI / n);
                DVec2::new(angle.cos(), angle.sin()) * circumradius
            })
            .collect();
        let side_lengths = (0..vertex_count).map(|_| side_length).collect();

        Self {
            spec,
            vertices,
            side_lengths,
            circumradius,
            side_length,
            irregular: false,
        }
    }

    pub fn spec(&self) -> &CellPolygonSpec {
        &self.spec
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    pub fn inradius(&self) -> f64 {
        self.spec.inradius
    }

    pub fn circumradius(&self) -> f64 {
        self.circumradius
    }

    /// Length of one edge. Projected triangles and hexagons keep the edge
    /// length of their regular template; see [`CellPolygon::side_lengths`].
    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    pub fn side_lengths(&self) -> &[f64] {
        &self.side_lengths
    }

    pub fn perimeter(&self) -> f64 {
        self.side_lengths.iter().sum()
    }

    pub fn is_irregular(&self) -> bool {
        self.irregular
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.vertices.iter().copied())
    }

    /// Width over height of the bounding box; zero for the gridless polygon.
    pub fn aspect_ratio(&self) -> f64 {
        match self.bounds() {
            Some(b) if b.height() > 0.0 => b.width() / b.height(),
            _ => 0.0,
        }
    }

    /// Closed outline: every vertex followed by the first one again.
    pub fn path(&self) -> Vec<DVec2> {
        let mut path: Vec<DVec2> = self.vertices.to_vec();
        if let Some(&first) = self.vertices.first() {
            path.push(first);
        }
        path
    }

    /// Open polyline through the first `ceil(n / 2)` vertices.
    pub fn half_path(&self) -> Vec<DVec2> {
        let halfway = self.vertices.len().div_ceil(2);
        self.vertices[..halfway].to_vec()
    }

    /// Rotates by `shear_degrees`, then squashes the y axis by half.
    pub fn isometricize(&mut self, shear_degrees: f64) {
        let transform = DAffine2::from_scale(DVec2::new(1.0, 0.5))
            * DAffine2::from_angle(shear_degrees.to_radians());
        for vertex in self.vertices.iter_mut() {
            *vertex = transform.transform_point2(*vertex);
        }
        self.spec.isometric = true;
        // squashed triangles and hexagons lose their equal edges; squares only rescale
        self.irregular = matches!(self.vertices.len(), 3 | 6);
        let n = self.vertices.len();
        self.side_lengths = (0..n)
            .map(|i| self.vertices[i].distance(self.vertices[(i + 1) % n]))
            .collect();
        if !self.irregular {
            if let Some(&length) = self.side_lengths.first() {
                self.side_length = length;
            }
        }
    }

    /// Isometric projection with the customary shear for each vertex count.
    pub fn isometricize_default(&mut self) {
        let shear = match self.vertices.len() {
            3 => 60.0,
            6 => 15.0,
            _ => 45.0,
        };
        self.isometricize(shear);
    }

    /// Outline as an area, translated so its centre sits at `center`.
    pub fn to_area_at(&self, center: DVec2) -> Area {
        Area::from_ring(self.vertices.iter().map(|v| *v + center).collect())
    }

    pub fn to_area(&self) -> Area {
        self.to_area_at(DVec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn square_metrics() {
        let square = CellPolygon::build(4, 25.0, 45.0);
        assert_eq!(square.vertex_count(), 4);
        assert!((square.side_length() - 50.0).abs() < TOLERANCE);
        assert!((square.perimeter() - 200.0).abs() < TOLERANCE);
        assert!((square.circumradius() - 25.0 * 2f64.sqrt()).abs() < TOLERANCE);
        assert!((square.aspect_ratio() - 1.0).abs() < TOLERANCE);
        let bounds = square.bounds().expect("square has vertices");
        assert!((bounds.width() - 50.0).abs() < TOLERANCE);
    }

    #[test]
    fn hex_metrics() {
        let hex = CellPolygon::build(6, 25.0, 0.0);
        assert_eq!(hex.vertex_count(), 6);
        let expected = 2.0 * 25.0 * (PI / 6.0).tan();
        assert!((hex.side_length() - expected).abs() < TOLERANCE);
        assert!((hex.side_length() - 28.8675).abs() < 1e-3);
        // flat-topped: width is twice the circumradius, height twice the inradius
        let bounds = hex.bounds().expect("hex has vertices");
        assert!((bounds.width() - 2.0 * hex.circumradius()).abs() < TOLERANCE);
        assert!((bounds.height() - 50.0).abs() < TOLERANCE);
    }

    #[test]
    fn gridless_polygon_is_empty() {
        let none = CellPolygon::build(0, 25.0, 0.0);
        assert_eq!(none.vertex_count(), 0);
        assert!(none.path().is_empty());
        assert!(none.to_area().is_empty());
        assert_eq!(none.aspect_ratio(), 0.0);
    }

    #[test]
    fn path_closes_and_half_path_stops_midway() {
        let hex = CellPolygon::build(6, 10.0, 0.0);
        let path = hex.path();
        assert_eq!(path.len(), 7);
        assert_eq!(path.first(), path.last());
        assert_eq!(hex.half_path().len(), 3);
        assert_eq!(CellPolygon::build(3, 10.0, 0.0).half_path().len(), 2);
    }

    #[test]
    fn isometric_square_becomes_a_two_to_one_diamond() {
        let mut square = CellPolygon::build(4, 25.0 * 2f64.sqrt(), 45.0);
        square.isometricize(45.0);
        let bounds = square.bounds().expect("square has vertices");
        assert!((bounds.width() - 100.0).abs() < 1e-6);
        assert!((bounds.height() - 50.0).abs() < 1e-6);
        assert!((square.aspect_ratio() - 2.0).abs() < 1e-6);
        assert!(!square.is_irregular());
        // the diamond's four edges are equal and shorter than the square's
        let edge = 50.0 * 5f64.sqrt() / 2.0;
        assert!((square.side_length() - edge).abs() < 1e-6);
        assert!((square.perimeter() - 4.0 * square.side_length()).abs() < 1e-6);
    }

    #[test]
    fn isometric_hex_recomputes_edges() {
        let mut hex = CellPolygon::build(6, 25.0, 0.0);
        hex.isometricize_default();
        assert!(hex.is_irregular());
        let lengths = hex.side_lengths();
        assert!(lengths.iter().any(|l| (l - lengths[0]).abs() > 1e-3));
    }

    #[test]
    fn spec_rejects_unsupported_counts() {
        assert_eq!(
            CellPolygonSpec::try_new(5, 1.0, 0.0, false),
            Err(GridError::InvalidCellPolygon(5))
        );
        let spec = CellPolygonSpec::try_new(6, 1.0, 30.0, true).expect("hex is valid");
        assert!(CellPolygon::new(spec).is_irregular());
    }

    #[test]
    #[should_panic(expected = "got 5")]
    fn build_asserts_vertex_count() {
        let _ = CellPolygon::build(5, 1.0, 0.0);
    }
}
