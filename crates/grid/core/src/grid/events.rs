//! Change notifications for renderers and lighting.

use crate::kind::GridKind;

/// Which grid property changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum GridChange {
    Size,
    Offset,
    Kind,
}

/// Snapshot of the grid after a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridChanged {
    pub change: GridChange,
    pub kind: GridKind,
    pub size_in_pixels: i32,
    pub offset: (i32, i32),
}

/// Receives [`GridChanged`] notifications.
///
/// Listeners run synchronously on the mutating thread, in priority order
/// (lower values first), after the grid and its caches are updated.
pub trait GridListener: Send + Sync {
    /// Returns the priority of this listener. Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    fn grid_changed(&self, event: &GridChanged);
}
