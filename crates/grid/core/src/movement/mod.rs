//! Fog-of-war gate for player-initiated token moves.
//!
//! The check samples the destination on a 3×3 lattice: at least one piece on
//! the entry side must already be revealed, and then the centre of the
//! destination must be mostly revealed. Terrain and line of sight are not
//! consulted here.

mod fog;
mod sector;

pub use fog::{ExposedRegion, FogArea};
pub use sector::SectorMask;

use crate::geometry::Rect;

/// Narrower destinations are sampled on every rim piece whatever the direction.
const MIN_DIRECTIONAL_WIDTH: i32 = 9;

/// Closed centre pieces tolerated before a move is denied.
const MAX_CLOSED_CENTER_PIECES: u32 = 3;

/// Open centre pieces needed to accept a move outright.
const MIN_OPEN_CENTER_PIECES: u32 = 6;

/// Decides whether a player may move a token into a fogged region.
#[derive(Clone, Copy, Debug, Default)]
pub struct MovementValidator;

impl MovementValidator {
    pub fn new() -> Self {
        Self
    }

    /// Returns whether a token travelling along `direction` may enter
    /// `destination` given the revealed area `fog`.
    pub fn can_enter<F>(&self, destination: &Rect, direction: (i32, i32), fog: &F) -> bool
    where
        F: FogArea + ?Sized,
    {
        if destination.is_empty() {
            return false;
        }

        let (dx, dy) = direction;
        let mask = if destination.width < MIN_DIRECTIONAL_WIDTH || (dx == 0 && dy == 0) {
            SectorMask::RIM
        } else {
            SectorMask::facing(dx, dy)
        };

        for (column, row) in mask.pieces() {
            let piece = destination.ninth(column, row);
            if piece.is_empty() || !fog.contains(&piece) {
                continue;
            }
            return self.check_center_region(destination, fog);
        }

        tracing::trace!(?destination, dx, dy, "entry edge is fogged");
        false
    }

    /// Samples the centre ninth of `region` on its own 3×3 lattice.
    ///
    /// Four closed pieces deny the move and six open pieces allow it,
    /// whichever is reached first in row-major order.
    pub fn check_center_region<F>(&self, region: &Rect, fog: &F) -> bool
    where
        F: FogArea + ?Sized,
    {
        let center = region.ninth(1, 1);
        let mut closed = 0;
        let mut open = 0;

        for (column, row) in SectorMask::all().pieces() {
            let piece = center.ninth(column, row);
            if piece.is_empty() {
                continue;
            }
            if fog.intersects(&piece) {
                open += 1;
                if open >= MIN_OPEN_CENTER_PIECES {
                    return true;
                }
            } else {
                closed += 1;
                if closed > MAX_CLOSED_CENTER_PIECES {
                    return false;
                }
            }
        }

        tracing::info!(
            width = region.width,
            height = region.height,
            open,
            closed,
            "centre region reached neither threshold"
        );
        open >= closed
    }
}

/// Samples `region` on a 3×3 lattice and accepts it once more than
/// `tolerance` pieces are revealed.
///
/// More than `9 - tolerance` closed pieces reject it; otherwise the majority
/// wins with ties going to open.
pub fn check_region<F>(region: &Rect, fog: &F, tolerance: u32) -> bool
where
    F: FogArea + ?Sized,
{
    let max_closed = 9u32.saturating_sub(tolerance);
    let mut closed = 0;
    let mut open = 0;

    for (column, row) in SectorMask::all().pieces() {
        let piece = region.ninth(column, row);
        if piece.is_empty() {
            continue;
        }
        if fog.intersects(&piece) {
            open += 1;
            if open > tolerance {
                return true;
            }
        } else {
            closed += 1;
            if closed > max_closed {
                return false;
            }
        }
    }
    open >= closed
}
