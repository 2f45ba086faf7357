//! Revealed-area queries used to gate player movement.

use crate::geometry::{Area, Rect};

/// The part of a zone already revealed to players.
pub trait FogArea {
    /// True when `rect` lies entirely inside revealed area.
    fn contains(&self, rect: &Rect) -> bool;

    /// True when any part of `rect`'s interior is revealed.
    fn intersects(&self, rect: &Rect) -> bool;
}

impl FogArea for Area {
    fn contains(&self, rect: &Rect) -> bool {
        self.contains_rect(rect)
    }

    fn intersects(&self, rect: &Rect) -> bool {
        self.intersects_rect(rect)
    }
}

/// Revealed area made of axis-aligned rectangles, typically exposed cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExposedRegion {
    rects: Vec<Rect>,
}

impl ExposedRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rects(rects: impl IntoIterator<Item = Rect>) -> Self {
        let mut region = Self::new();
        region.extend(rects);
        region
    }

    pub fn expose(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl Extend<Rect> for ExposedRegion {
    fn extend<T: IntoIterator<Item = Rect>>(&mut self, iter: T) {
        for rect in iter {
            self.expose(rect);
        }
    }
}

impl FogArea for ExposedRegion {
    /// Splits `rect` along every exposed edge that crosses it and checks
    /// each resulting piece is covered.
    fn contains(&self, rect: &Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        let overlapping: Vec<&Rect> = self.rects.iter().filter(|r| r.overlaps(rect)).collect();
        if overlapping.iter().any(|r| r.contains_rect(rect)) {
            return true;
        }

        let cuts = |lo: i32, hi: i32, edges: &mut dyn Iterator<Item = i32>| {
            let mut cuts: Vec<i32> = edges.filter(|&e| e > lo && e < hi).collect();
            cuts.push(lo);
            cuts.push(hi);
            cuts.sort_unstable();
            cuts.dedup();
            cuts
        };
        let xs = cuts(
            rect.x,
            rect.right(),
            &mut overlapping.iter().flat_map(|r| [r.x, r.right()]),
        );
        let ys = cuts(
            rect.y,
            rect.bottom(),
            &mut overlapping.iter().flat_map(|r| [r.y, r.bottom()]),
        );

        xs.windows(2).all(|xw| {
            ys.windows(2).all(|yw| {
                let piece = Rect::new(xw[0], yw[0], xw[1] - xw[0], yw[1] - yw[0]);
                overlapping.iter().any(|r| r.contains_rect(&piece))
            })
        })
    }

    fn intersects(&self, rect: &Rect) -> bool {
        self.rects.iter().any(|r| r.overlaps(rect))
    }
}
