use crate::geometry::CellPoint;

/// How a two-dimensional cell offset becomes a walking distance on square
/// and isometric boards.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MovementMetric {
    /// Orthogonal steps only: `|dx| + |dy|`.
    #[strum(to_string = "no_diagonals", serialize = "manhattan")]
    NoDiagonals,
    /// Diagonals cost the same as orthogonal steps: `max(|dx|, |dy|)`.
    #[strum(to_string = "chebyshev", serialize = "one_one_one")]
    Chebyshev,
    /// Every second diagonal costs double: `max + min / 2`, truncated.
    #[default]
    #[strum(to_string = "one_two_one")]
    OneTwoOne,
}

impl MovementMetric {
    /// Distance between two cells. `min / 2` uses integer division.
    pub fn distance(self, a: CellPoint, b: CellPoint) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        match self {
            Self::NoDiagonals => dx + dy,
            Self::Chebyshev => dx.max(dy),
            Self::OneTwoOne => dx.max(dy) + dx.min(dy) / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_by_one_offsets() {
        let (a, b) = (CellPoint::new(0, 0), CellPoint::new(3, 1));
        assert_eq!(MovementMetric::NoDiagonals.distance(a, b), 4);
        assert_eq!(MovementMetric::Chebyshev.distance(a, b), 3);
        assert_eq!(MovementMetric::OneTwoOne.distance(a, b), 3);
    }

    #[test]
    fn one_two_one_truncates() {
        let origin = CellPoint::ORIGIN;
        assert_eq!(MovementMetric::OneTwoOne.distance(origin, CellPoint::new(2, 2)), 3);
        assert_eq!(MovementMetric::OneTwoOne.distance(origin, CellPoint::new(-3, 3)), 4);
        assert_eq!(MovementMetric::OneTwoOne.distance(origin, CellPoint::new(4, -4)), 6);
    }

    #[test]
    fn names_and_aliases_parse() {
        assert_eq!("manhattan".parse::<MovementMetric>(), Ok(MovementMetric::NoDiagonals));
        assert_eq!("ONE_ONE_ONE".parse::<MovementMetric>(), Ok(MovementMetric::Chebyshev));
        assert_eq!("one_two_one".parse::<MovementMetric>(), Ok(MovementMetric::OneTwoOne));
        assert_eq!(MovementMetric::Chebyshev.to_string(), "chebyshev");
    }
}
