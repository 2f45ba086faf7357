//! Memoized grid-conforming radius areas.
//!
//! Entries are stored at [`GridConfig::MAX_GRID_SIZE_IN_PIXELS`] and keyed by
//! everything that changes their outline, so a pixel size change only
//! changes the rescale factor applied on the way out.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::GridConfig;
use crate::geometry::Area;
use crate::kind::GridKind;
use crate::metric::MovementMetric;

/// Scale every cached area is built at.
pub const REFERENCE_SIZE: f64 = GridConfig::MAX_GRID_SIZE_IN_PIXELS as f64;

/// The inputs that decide a radius area's outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridKindSignature {
    pub vertex_count: u8,
    pub rotation_millidegrees: i32,
    pub isometric: bool,
    /// `None` for kinds with their own distance function.
    pub metric: Option<MovementMetric>,
}

impl GridKindSignature {
    pub fn of(kind: GridKind, metric: MovementMetric) -> Self {
        Self {
            vertex_count: kind.edge_count(),
            rotation_millidegrees: (kind.default_rotation_degrees() * 1000.0).round() as i32,
            isometric: kind.is_isometric(),
            metric: kind.uses_movement_metric().then_some(metric),
        }
    }
}

type CacheKey = (GridKindSignature, i32);

/// Thread-safe `(signature, radius) -> Area` map.
///
/// Readers never see a half-built entry: areas are built outside the lock
/// and published whole. When two threads build the same key the first
/// published area is kept and both callers receive it.
#[derive(Debug, Default)]
pub struct VisionAreaCache {
    entries: RwLock<HashMap<CacheKey, Arc<Area>>>,
    builds: AtomicU64,
}

impl VisionAreaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, signature: GridKindSignature, radius: i32) -> Option<Arc<Area>> {
        // entries are immutable once published, so a poisoned lock is still readable
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&(signature, radius)).cloned()
    }

    pub fn contains(&self, signature: GridKindSignature, radius: i32) -> bool {
        self.get(signature, radius).is_some()
    }

    /// Returns the cached area, building and publishing it on a miss.
    pub fn get_or_build<F>(&self, signature: GridKindSignature, radius: i32, build: F) -> Arc<Area>
    where
        F: FnOnce() -> Area,
    {
        if let Some(area) = self.get(signature, radius) {
            return area;
        }

        let built = Arc::new(build());
        self.builds.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            radius,
            vertices = built.vertex_count(),
            ?signature,
            "built radius area"
        );

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.entry((signature, radius)).or_insert(built).clone()
    }

    /// Drops every entry whose outline was built for another signature.
    pub fn retain_signature(&self, signature: GridKindSignature) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|(sig, _), _| *sig == signature);
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of radius areas built through this cache.
    pub fn build_count(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn signature() -> GridKindSignature {
        GridKindSignature::of(GridKind::Square, MovementMetric::OneTwoOne)
    }

    #[test]
    fn second_lookup_reuses_the_entry() {
        let cache = VisionAreaCache::new();
        let first = cache.get_or_build(signature(), 2, || Area::rectangle(0.0, 0.0, 1.0, 1.0));
        let second = cache.get_or_build(signature(), 2, || panic!("should be cached"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.build_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn signatures_separate_entries() {
        let hex = GridKindSignature::of(GridKind::HexVertical, MovementMetric::OneTwoOne);
        assert_eq!(hex, GridKindSignature::of(GridKind::HexVertical, MovementMetric::Chebyshev));
        assert_ne!(
            signature(),
            GridKindSignature::of(GridKind::Square, MovementMetric::Chebyshev)
        );
        assert_ne!(hex, GridKindSignature::of(GridKind::HexHorizontal, MovementMetric::OneTwoOne));

        let cache = VisionAreaCache::new();
        cache.get_or_build(signature(), 1, Area::new);
        cache.get_or_build(hex, 1, Area::new);
        assert_eq!(cache.len(), 2);
        cache.retain_signature(hex);
        assert!(cache.contains(hex, 1));
        assert!(!cache.contains(signature(), 1));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_builders_agree() {
        let cache = Arc::new(VisionAreaCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    cache.get_or_build(signature(), 4, || Area::rectangle(0.0, 0.0, 4.0, 4.0))
                })
            })
            .collect();
        let areas: Vec<Arc<Area>> = handles
            .into_iter()
            .map(|h| h.join().expect("builder thread"))
            .collect();
        assert!(areas.iter().all(|a| Arc::ptr_eq(a, &areas[0])));
        assert_eq!(cache.len(), 1);
        assert!(cache.build_count() >= 1);
    }
}
