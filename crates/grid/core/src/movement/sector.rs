use bitflags::bitflags;

bitflags! {
    /// Pieces of a rectangle split 3×3, one bit per piece in row-major order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SectorMask: u16 {
        const NW     = 1 << 0;
        const N      = 1 << 1;
        const NE     = 1 << 2;
        const W      = 1 << 3;
        const CENTER = 1 << 4;
        const E      = 1 << 5;
        const SW     = 1 << 6;
        const S      = 1 << 7;
        const SE     = 1 << 8;

        const TOP_ROW   = Self::NW.bits() | Self::N.bits() | Self::NE.bits();
        const MID_ROW   = Self::W.bits() | Self::CENTER.bits() | Self::E.bits();
        const BOTTOM_ROW = Self::SW.bits() | Self::S.bits() | Self::SE.bits();

        const LEFT_COLUMN  = Self::NW.bits() | Self::W.bits() | Self::SW.bits();
        const MID_COLUMN   = Self::N.bits() | Self::CENTER.bits() | Self::S.bits();
        const RIGHT_COLUMN = Self::NE.bits() | Self::E.bits() | Self::SE.bits();

        /// Every piece except the centre.
        const RIM = Self::TOP_ROW.bits() | Self::W.bits() | Self::E.bits() | Self::BOTTOM_ROW.bits();
    }
}

impl SectorMask {
    /// Pieces on the side a token travelling along `(dx, dy)` enters through.
    ///
    /// Moving right enters through the left column, moving down through the
    /// top row. A purely horizontal move drops the middle column and a purely
    /// vertical one drops the middle row, leaving a single edge strip.
    pub fn facing(dx: i32, dy: i32) -> Self {
        let mut mask = Self::TOP_ROW | Self::MID_ROW | Self::BOTTOM_ROW;

        if dx > 0 {
            mask &= Self::LEFT_COLUMN | Self::MID_COLUMN;
        }
        if dx < 0 {
            mask &= Self::MID_COLUMN | Self::RIGHT_COLUMN;
        }
        if dy > 0 {
            mask &= Self::TOP_ROW | Self::MID_ROW;
        }
        if dy < 0 {
            mask &= Self::MID_ROW | Self::BOTTOM_ROW;
        }

        if dx == 0 {
            mask -= Self::MID_ROW;
        }
        if dy == 0 {
            mask -= Self::MID_COLUMN;
        }

        mask - Self::CENTER
    }

    /// `(column, row)` of every selected piece, rows first.
    pub fn pieces(self) -> impl Iterator<Item = (i32, i32)> {
        (0..9u16).filter_map(move |index| {
            self.contains(Self::from_bits_retain(1 << index))
                .then_some((i32::from(index % 3), i32::from(index / 3)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_moves_select_the_entry_edge() {
        assert_eq!(SectorMask::facing(1, 0), SectorMask::LEFT_COLUMN);
        assert_eq!(SectorMask::facing(-1, 0), SectorMask::RIGHT_COLUMN);
        assert_eq!(SectorMask::facing(0, 1), SectorMask::TOP_ROW);
        assert_eq!(SectorMask::facing(0, -1), SectorMask::BOTTOM_ROW);
    }

    #[test]
    fn diagonal_moves_select_the_entry_corner() {
        assert_eq!(
            SectorMask::facing(1, 1),
            SectorMask::NW | SectorMask::N | SectorMask::W
        );
        assert_eq!(
            SectorMask::facing(-3, -2),
            SectorMask::E | SectorMask::S | SectorMask::SE
        );
    }

    #[test]
    fn centre_is_never_selected() {
        for dx in -1..=1 {
            for dy in -1..=1 {
                assert!(!SectorMask::facing(dx, dy).contains(SectorMask::CENTER));
            }
        }
        assert_eq!(SectorMask::RIM.bits().count_ones(), 8);
    }

    #[test]
    fn pieces_follow_bit_order() {
        let pieces: Vec<_> = SectorMask::RIGHT_COLUMN.pieces().collect();
        assert_eq!(pieces, vec![(2, 0), (2, 1), (2, 2)]);
        let pieces: Vec<_> = (SectorMask::N | SectorMask::W).pieces().collect();
        assert_eq!(pieces, vec![(1, 0), (0, 1)]);
    }
}
