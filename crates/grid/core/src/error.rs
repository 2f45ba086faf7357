//! Common error infrastructure for grid-core.
//!
//! Configuration problems (an unknown grid kind name, out-of-range persisted
//! settings) surface as [`GridError`] so zone setup code can pick a fallback.
//! Degenerate geometry is never an error: empty rectangles and zero radii are
//! absorbed by returning empty areas or denying movement.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller can fall back (e.g. to a gridless board)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: a broken invariant inside the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Errors raised while configuring a grid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("unknown grid kind `{0}`")]
    UnknownGridKind(String),

    #[error("cell polygons need 0, 3, 4 or 6 vertices, got {0}")]
    InvalidCellPolygon(u8),

    #[error("invalid grid setting `{field}`: {reason}")]
    InvalidSettings {
        field: &'static str,
        reason: &'static str,
    },
}

impl GridError {
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownGridKind(_) => ErrorSeverity::Recoverable,
            Self::InvalidSettings { .. } => ErrorSeverity::Validation,
            Self::InvalidCellPolygon(_) => ErrorSeverity::Internal,
        }
    }
}
