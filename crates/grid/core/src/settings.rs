//! Persisted description of a board's grid.

use crate::error::GridError;
use crate::kind::GridKind;

/// What a zone stores about its grid. The kind is kept as a name so files
/// written with legacy names ("Vertical Hex") still load.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSettings {
    pub kind: String,
    pub size: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset_x: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset_y: i32,
}

impl GridSettings {
    pub fn new(kind: GridKind, size: i32) -> Self {
        Self {
            kind: kind.to_string(),
            size,
            offset_x: 0,
            offset_y: 0,
        }
    }

    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Resolves the kind name and checks the size is usable.
    ///
    /// Positive sizes outside the supported range are accepted and clamped
    /// when the grid is built.
    pub fn validate(&self) -> Result<GridKind, GridError> {
        let kind = GridKind::resolve(&self.kind)?;
        if self.size <= 0 {
            return Err(GridError::InvalidSettings {
                field: "size",
                reason: "must be positive",
            });
        }
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::grid::Grid;

    #[test]
    fn legacy_settings_load() {
        let settings = GridSettings {
            kind: "Horizontal Hex".into(),
            size: 500,
            offset_x: 4,
            offset_y: -2,
        };
        let grid = Grid::from_settings(&settings, &GridConfig::default()).expect("valid settings");
        assert_eq!(grid.kind(), GridKind::HexHorizontal);
        assert_eq!(grid.size_in_pixels(), 350);
        assert_eq!(grid.offset(), (4, -2));
        assert_eq!(grid.settings().kind, "hex_horizontal");
    }

    #[test]
    fn bad_settings_are_rejected() {
        let zero = GridSettings::new(GridKind::Square, 0);
        assert!(matches!(
            zero.validate(),
            Err(GridError::InvalidSettings { field: "size", .. })
        ));
        let unknown = GridSettings {
            kind: "Octagon".into(),
            ..GridSettings::new(GridKind::Square, 50)
        };
        assert_eq!(unknown.validate(), Err(GridError::UnknownGridKind("Octagon".into())));
    }

    #[test]
    fn settings_round_trip_through_grid() {
        let settings = GridSettings::new(GridKind::Isometric, 64).with_offset(10, 20);
        let grid = Grid::from_settings(&settings, &GridConfig::default()).expect("valid settings");
        assert_eq!(grid.settings(), settings);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn settings_serialize_to_json() {
        let settings = GridSettings::new(GridKind::HexVertical, 50);
        let json = serde_json::to_string(&settings).expect("serialize");
        let back: GridSettings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, settings);
        let legacy: GridSettings =
            serde_json::from_str(r#"{"kind":"Vertical Hex","size":50}"#).expect("deserialize");
        assert_eq!(legacy.validate(), Ok(GridKind::HexVertical));
    }
}
