//! Light and vision areas, including the grid-conforming radius cache.

mod cache;
mod footprint;
mod shape;

pub use cache::{GridKindSignature, REFERENCE_SIZE, VisionAreaCache};
pub use footprint::TokenFootprint;
pub use shape::{ArcParams, ShapeKind};
