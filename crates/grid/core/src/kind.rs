//! The closed set of grid kinds and their fixed properties.
//!
//! Every per-kind fact (edge count, rotation, isometric projection, where a
//! converted cell point lands) is a `match` on [`GridKind`], so there is no
//! separate lookup table to drift out of sync.

use std::f64::consts::SQRT_2;

use crate::error::GridError;
use crate::geometry::CellPolygonSpec;

/// Board layout.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GridKind {
    Gridless,
    Square,
    /// Flat-topped hexes in columns; odd columns sit half a cell lower.
    HexVertical,
    /// Pointy-topped hexes in rows; odd rows sit half a cell to the right.
    HexHorizontal,
    /// Square cells projected to 2:1 diamonds.
    Isometric,
}

/// Names older saved zones and menus use for each kind.
const LEGACY_NAMES: &[(&str, GridKind)] = &[
    ("None", GridKind::Gridless),
    ("No Grid", GridKind::Gridless),
    ("GridlessGrid", GridKind::Gridless),
    ("SquareGrid", GridKind::Square),
    ("Vertical Hex", GridKind::HexVertical),
    ("HexGridVertical", GridKind::HexVertical),
    ("Horizontal Hex", GridKind::HexHorizontal),
    ("HexGridHorizontal", GridKind::HexHorizontal),
    ("IsometricGrid", GridKind::Isometric),
];

/// Where [`crate::Grid::convert_cell_to_point`] lands inside a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellAnchor {
    TopLeft,
    Center,
}

impl GridKind {
    pub const ALL: [GridKind; 5] = [
        GridKind::Gridless,
        GridKind::Square,
        GridKind::HexVertical,
        GridKind::HexHorizontal,
        GridKind::Isometric,
    ];

    /// Resolves a canonical name (`"hex_vertical"`) or a legacy one
    /// (`"Vertical Hex"`), ignoring ASCII case and surrounding whitespace.
    pub fn resolve(name: &str) -> Result<GridKind, GridError> {
        let trimmed = name.trim();
        if let Ok(kind) = trimmed.parse::<GridKind>() {
            return Ok(kind);
        }
        LEGACY_NAMES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
            .map(|&(_, kind)| kind)
            .ok_or_else(|| GridError::UnknownGridKind(name.to_string()))
    }

    /// Menu label used by older zone files.
    pub const fn legacy_name(self) -> &'static str {
        match self {
            Self::Gridless => "None",
            Self::Square => "Square",
            Self::HexVertical => "Vertical Hex",
            Self::HexHorizontal => "Horizontal Hex",
            Self::Isometric => "Isometric",
        }
    }

    pub const fn edge_count(self) -> u8 {
        match self {
            Self::Gridless => 0,
            Self::Square | Self::Isometric => 4,
            Self::HexVertical | Self::HexHorizontal => 6,
        }
    }

    pub const fn is_isometric(self) -> bool {
        matches!(self, Self::Isometric)
    }

    pub const fn is_hex(self) -> bool {
        matches!(self, Self::HexVertical | Self::HexHorizontal)
    }

    pub const fn is_gridless(self) -> bool {
        matches!(self, Self::Gridless)
    }

    pub const fn default_rotation_degrees(self) -> f64 {
        match self {
            Self::Square | Self::Isometric => 45.0,
            Self::HexHorizontal => 30.0,
            Self::Gridless | Self::HexVertical => 0.0,
        }
    }

    pub const fn anchor(self) -> CellAnchor {
        match self {
            Self::Gridless | Self::Square => CellAnchor::TopLeft,
            Self::HexVertical | Self::HexHorizontal | Self::Isometric => CellAnchor::Center,
        }
    }

    /// Square and isometric boards measure with the zone's movement metric;
    /// hex and gridless boards have their own distance.
    pub const fn uses_movement_metric(self) -> bool {
        matches!(self, Self::Square | Self::Isometric)
    }

    /// Cell polygon template for a board with `size` pixels per cell.
    pub fn polygon_spec(self, size: f64) -> CellPolygonSpec {
        let inradius = match self {
            Self::Isometric => size / SQRT_2,
            _ => size / 2.0,
        };
        CellPolygonSpec::known(
            self.edge_count(),
            inradius,
            self.default_rotation_degrees(),
            self.is_isometric(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_round_trip() {
        for kind in GridKind::ALL {
            assert_eq!(GridKind::resolve(kind.as_ref()), Ok(kind));
            assert_eq!(GridKind::resolve(&kind.to_string().to_uppercase()), Ok(kind));
        }
        assert_eq!(GridKind::HexVertical.to_string(), "hex_vertical");
    }

    #[test]
    fn legacy_names_resolve() {
        assert_eq!(GridKind::resolve("Vertical Hex"), Ok(GridKind::HexVertical));
        assert_eq!(GridKind::resolve("horizontal hex"), Ok(GridKind::HexHorizontal));
        assert_eq!(GridKind::resolve(" None "), Ok(GridKind::Gridless));
        assert_eq!(GridKind::resolve("SquareGrid"), Ok(GridKind::Square));
        for kind in GridKind::ALL {
            assert_eq!(GridKind::resolve(kind.legacy_name()), Ok(kind));
        }
    }

    #[test]
    fn unknown_names_fail() {
        assert_eq!(
            GridKind::resolve("Octagonal"),
            Err(GridError::UnknownGridKind("Octagonal".into()))
        );
    }

    #[test]
    fn edge_counts_and_anchors() {
        assert_eq!(GridKind::Gridless.edge_count(), 0);
        assert_eq!(GridKind::Square.edge_count(), 4);
        assert_eq!(GridKind::Isometric.edge_count(), 4);
        assert_eq!(GridKind::HexHorizontal.edge_count(), 6);
        assert!(GridKind::Isometric.is_isometric());
        assert!(!GridKind::Square.is_isometric());
        assert_eq!(GridKind::Square.anchor(), CellAnchor::TopLeft);
        assert_eq!(GridKind::HexVertical.anchor(), CellAnchor::Center);
    }

    #[test]
    fn polygon_specs_follow_the_kind() {
        let spec = GridKind::Isometric.polygon_spec(50.0);
        assert_eq!(spec.vertex_count(), 4);
        assert!(spec.is_isometric());
        assert!(GridKind::Gridless.polygon_spec(50.0).is_gridless());
        assert_eq!(GridKind::HexHorizontal.polygon_spec(50.0).rotation_degrees(), 30.0);
    }
}
