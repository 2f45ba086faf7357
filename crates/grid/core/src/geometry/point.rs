use glam::DVec2;

/// Pixel-space coordinate on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZonePoint {
    pub x: i32,
    pub y: i32,
}

impl ZonePoint {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(self) -> DVec2 {
        DVec2::new(self.x as f64, self.y as f64)
    }

    /// Truncates toward zero, matching integer pixel casts.
    pub fn from_dvec2_truncated(v: DVec2) -> Self {
        Self::new(v.x as i32, v.y as i32)
    }

    pub fn from_dvec2_rounded(v: DVec2) -> Self {
        Self::new(v.x.round() as i32, v.y.round() as i32)
    }
}

/// Logical cell coordinate (column, row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPoint {
    pub x: i32,
    pub y: i32,
}

impl CellPoint {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Integer axis-aligned rectangle in board pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// A rectangle with no interior.
    pub const fn is_empty(&self) -> bool {
        self.width < 1 || self.height < 1
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// True when the interiors overlap; shared edges do not count.
    pub const fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// One of the nine pieces of a 3×3 split, `column` and `row` in `0..3`.
    ///
    /// Piece edges are `extent * k / 3` so the three pieces always add up to
    /// the full extent even when it is not divisible by three.
    pub const fn ninth(&self, column: i32, row: i32) -> Rect {
        let left = self.width * column / 3;
        let right = self.width * (column + 1) / 3;
        let top = self.height * row / 3;
        let bottom = self.height * (row + 1) / 3;
        Rect::new(self.x + left, self.y + top, right - left, bottom - top)
    }
}

/// Floating point bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Smallest integer rectangle enclosing these bounds.
    pub fn to_rect(&self) -> Rect {
        let x = self.min.x.floor() as i32;
        let y = self.min.y.floor() as i32;
        Rect::new(
            x,
            y,
            self.max.x.ceil() as i32 - x,
            self.max.y.ceil() as i32 - y,
        )
    }
}
