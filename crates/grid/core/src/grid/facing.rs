use super::Grid;
use crate::kind::GridKind;

const EIGHT_WAY: &[i32] = &[-135, -90, -45, 0, 45, 90, 135, 180];
const DIAGONALS: &[i32] = &[-135, -45, 45, 135];
const ORTHOGONALS: &[i32] = &[-90, 0, 90, 180];
const TWELVE_WAY: &[i32] = &[-150, -120, -90, -60, -30, 0, 30, 60, 90, 120, 150, 180];
const HEX_FLAT_SIDES: &[i32] = &[-150, -90, -30, 30, 90, 150];
const HEX_POINTS: &[i32] = &[-120, -60, 0, 60, 120, 180];
const FACING_UNSUPPORTED: &[i32] = &[90];

impl Grid {
    /// Facings a token may take, in degrees within `(-180, 180]`.
    pub fn facing_angles(&self) -> &'static [i32] {
        facing_angles(self.kind, self.face_edges, self.face_vertices)
    }

    /// Snaps `degrees` to the closest allowed facing.
    pub fn nearest_facing(&self, degrees: i32) -> i32 {
        let angles = self.facing_angles();
        angles
            .iter()
            .copied()
            .min_by_key(|&angle| {
                let diff = (degrees - angle).rem_euclid(360);
                diff.min(360 - diff)
            })
            .unwrap_or(90)
    }
}

pub(crate) fn facing_angles(kind: GridKind, face_edges: bool, face_vertices: bool) -> &'static [i32] {
    match (kind, face_edges, face_vertices) {
        (_, false, false) => FACING_UNSUPPORTED,
        (GridKind::Gridless, ..) => EIGHT_WAY,
        (GridKind::Square | GridKind::Isometric, true, true) => EIGHT_WAY,
        (GridKind::Square, false, true) => DIAGONALS,
        (GridKind::Square, true, false) => ORTHOGONALS,
        // diamond edges run diagonally, so the roles swap
        (GridKind::Isometric, false, true) => ORTHOGONALS,
        (GridKind::Isometric, true, false) => DIAGONALS,
        (GridKind::HexVertical | GridKind::HexHorizontal, true, true) => TWELVE_WAY,
        (GridKind::HexVertical, false, true) => HEX_POINTS,
        (GridKind::HexVertical, true, false) => HEX_FLAT_SIDES,
        (GridKind::HexHorizontal, false, true) => HEX_FLAT_SIDES,
        (GridKind::HexHorizontal, true, false) => HEX_POINTS,
    }
}
