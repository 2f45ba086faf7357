//! Polygonal regions with union semantics.
//!
//! An [`Area`] is a list of polygons, each an exterior ring with optional
//! holes. The area covers every point covered by any of its polygons. Rings
//! are stored open (the closing edge back to the first vertex is implicit).
//!
//! [`Area::merge_tiles`] produces a canonical area for edge-adjacent tiles by
//! cancelling shared edges, which is how grid-conforming vision shapes become
//! a single outline. [`Area::union`] handles arbitrary overlaps by splitting
//! every edge where it meets another polygon and keeping the pieces that have
//! covered ground on exactly one side.

use std::collections::{BTreeMap, BTreeSet};

use arrayvec::ArrayVec;
use glam::{DAffine2, DVec2};

use super::{Bounds, Rect};

const QUANTUM: f64 = 1e6;
const EPSILON: f64 = 1e-9;
/// Points closer than this to a segment lie on it.
const SNAP: f64 = 1e-7;
/// Distance either side of an edge at which coverage is sampled.
const NUDGE: f64 = 1e-6;

/// One simple region: an exterior ring minus zero or more holes.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polygon {
    exterior: Vec<DVec2>,
    holes: Vec<Vec<DVec2>>,
}

impl Polygon {
    pub fn new(exterior: Vec<DVec2>) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    pub fn exterior(&self) -> &[DVec2] {
        &self.exterior
    }

    pub fn holes(&self) -> &[Vec<DVec2>] {
        &self.holes
    }

    fn rings(&self) -> impl Iterator<Item = &[DVec2]> {
        std::iter::once(self.exterior.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.rings().flat_map(ring_edges)
    }

    /// Enclosed area: exterior minus holes.
    pub fn measure(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area(h).abs()).sum();
        signed_area(&self.exterior).abs() - holes
    }

    /// Even-odd test over every ring.
    pub fn contains_point(&self, point: DVec2) -> bool {
        self.rings()
            .filter(|ring| ring_crossings_odd(ring, point))
            .count()
            % 2
            == 1
    }

    fn transform(&mut self, transform: &DAffine2) {
        for ring in std::iter::once(&mut self.exterior).chain(self.holes.iter_mut()) {
            for p in ring.iter_mut() {
                *p = transform.transform_point2(*p);
            }
        }
    }
}

/// A region of the board built from polygons.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Area {
    polygons: Vec<Polygon>,
}

impl Area {
    pub const fn new() -> Self {
        Self {
            polygons: Vec::new(),
        }
    }

    pub fn from_ring(ring: Vec<DVec2>) -> Self {
        if ring.len() < 3 {
            return Self::new();
        }
        Self {
            polygons: vec![Polygon::new(ring)],
        }
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::new();
        }
        Self::from_ring(vec![
            DVec2::new(x, y),
            DVec2::new(x + width, y),
            DVec2::new(x + width, y + height),
            DVec2::new(x, y + height),
        ])
    }

    pub fn from_rect(rect: &Rect) -> Self {
        Self::rectangle(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        )
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// True when the area is one connected outline (or nothing at all).
    pub fn is_singular(&self) -> bool {
        self.polygons.len() <= 1
    }

    pub fn vertex_count(&self) -> usize {
        self.polygons
            .iter()
            .flat_map(Polygon::rings)
            .map(<[DVec2]>::len)
            .sum()
    }

    /// Everything covered by either area.
    pub fn union(self, other: Area) -> Area {
        let mut polygons = self.polygons;
        polygons.extend(other.polygons);
        dissolve(polygons)
    }

    /// Everything covered by any of `areas`, merged in one pass.
    pub fn union_all<I>(areas: I) -> Area
    where
        I: IntoIterator<Item = Area>,
    {
        dissolve(areas.into_iter().flat_map(|area| area.polygons).collect())
    }

    pub fn transform(&mut self, transform: &DAffine2) {
        for polygon in &mut self.polygons {
            polygon.transform(transform);
        }
    }

    pub fn transformed(&self, transform: &DAffine2) -> Area {
        let mut area = self.clone();
        area.transform(transform);
        area
    }

    pub fn translated(&self, offset: DVec2) -> Area {
        self.transformed(&DAffine2::from_translation(offset))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.polygons.iter().flat_map(|p| p.exterior.iter().copied()))
    }

    /// Sum of the polygon areas.
    pub fn measure(&self) -> f64 {
        self.polygons.iter().map(Polygon::measure).sum()
    }

    pub fn contains_point(&self, point: DVec2) -> bool {
        self.polygons.iter().any(|p| p.contains_point(point))
    }

    /// True when the rectangle's interior overlaps the area's interior.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        let (min, max) = rect_corners(rect);
        let center = rect.center();
        self.polygons.iter().any(|polygon| {
            polygon.edges().any(|(a, b)| {
                strictly_inside(a, min, max) || segment_crosses_interior(a, b, min, max)
            }) || polygon.contains_point(center)
        })
    }

    /// True when the rectangle lies entirely inside the area.
    ///
    /// Seams where polygons touch or overlap are not boundary. Every edge
    /// piece inside the rectangle, and every piece of the rectangle's own
    /// outline, must have covered ground on both of its inner sides.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        if rect.is_empty() {
            return false;
        }
        let (min, max) = rect_corners(rect);
        let mut segments: Vec<(DVec2, DVec2)> = self
            .polygons
            .iter()
            .flat_map(Polygon::edges)
            .filter_map(|(a, b)| clip_segment(a, b, min, max))
            .collect();
        if segments.is_empty() {
            return self.contains_point(rect.center());
        }
        let outline = [min, DVec2::new(max.x, min.y), max, DVec2::new(min.x, max.y)];
        segments.extend(ring_edges(&outline));

        let cuts = contact_points(&segments, |_, _| true);
        segments.iter().zip(cuts).all(|(&(a, b), cuts)| {
            split_segment(a, b, cuts).into_iter().all(|(p, q)| {
                side_samples(p, q)
                    .into_iter()
                    .all(|sample| !strictly_inside(sample, min, max) || self.contains_point(sample))
            })
        })
    }

    /// Compares two areas vertex by vertex within `tolerance`.
    pub fn approx_eq(&self, other: &Area, tolerance: f64) -> bool {
        self.polygons.len() == other.polygons.len()
            && self.polygons.iter().zip(&other.polygons).all(|(a, b)| {
                a.holes.len() == b.holes.len()
                    && a.rings().zip(b.rings()).all(|(ra, rb)| {
                        ra.len() == rb.len()
                            && ra.iter().zip(rb).all(|(p, q)| p.distance(*q) <= tolerance)
                    })
            })
    }

    /// Unions tiles that meet along whole shared edges.
    ///
    /// Every ring is oriented the same way, edges shared by two tiles cancel,
    /// and the surviving edges are stitched back into rings. Rings keeping the
    /// tile orientation become exteriors; reversed rings are holes.
    pub fn merge_tiles<I>(tiles: I) -> Area
    where
        I: IntoIterator<Item = Vec<DVec2>>,
    {
        let mut points: BTreeMap<Key, DVec2> = BTreeMap::new();
        let mut edges: BTreeMap<(Key, Key), usize> = BTreeMap::new();

        for mut ring in tiles {
            if ring.len() < 3 {
                continue;
            }
            if signed_area(&ring) < 0.0 {
                ring.reverse();
            }
            let keys: Vec<Key> = ring
                .iter()
                .map(|p| {
                    let key = Key::of(*p);
                    points.entry(key).or_insert(*p);
                    key
                })
                .collect();
            for i in 0..keys.len() {
                let (a, b) = (keys[i], keys[(i + 1) % keys.len()]);
                if a == b {
                    continue;
                }
                match edges.get_mut(&(b, a)) {
                    Some(count) if *count > 1 => *count -= 1,
                    Some(_) => {
                        edges.remove(&(b, a));
                    }
                    None => *edges.entry((a, b)).or_insert(0) += 1,
                }
            }
        }

        trace_rings(&points, edges)
    }
}

/// Stitches directed boundary edges back into rings. Rings with positive
/// area are exteriors; the others are holes of the smallest exterior
/// around them.
fn trace_rings<I>(points: &BTreeMap<Key, DVec2>, edges: I) -> Area
where
    I: IntoIterator<Item = ((Key, Key), usize)>,
{
    let mut outgoing: BTreeMap<Key, Vec<Key>> = BTreeMap::new();
    for ((a, b), count) in edges {
        for _ in 0..count {
            outgoing.entry(a).or_default().push(b);
        }
    }

    let mut exteriors = Vec::new();
    let mut holes = Vec::new();
    loop {
        let Some(start) = outgoing
            .iter()
            .find(|(_, ends)| !ends.is_empty())
            .map(|(&key, _)| key)
        else {
            break;
        };
        let mut ring = Vec::new();
        let mut current = start;
        loop {
            ring.push(points[&current]);
            let Some(next) = outgoing.get_mut(&current).and_then(Vec::pop) else {
                break;
            };
            current = next;
            if current == start {
                break;
            }
        }
        let ring = drop_collinear(ring);
        if ring.len() < 3 {
            continue;
        }
        if signed_area(&ring) > 0.0 {
            exteriors.push(ring);
        } else {
            holes.push(ring);
        }
    }

    let mut polygons: Vec<Polygon> = exteriors.into_iter().map(Polygon::new).collect();
    for hole in holes {
        let inner = (hole[0] + hole[1]) * 0.5;
        let owner = polygons
            .iter_mut()
            .filter(|p| ring_crossings_odd(&p.exterior, inner))
            .min_by(|a, b| {
                signed_area(&a.exterior)
                    .abs()
                    .total_cmp(&signed_area(&b.exterior).abs())
            });
        if let Some(owner) = owner {
            owner.holes.push(hole);
        }
    }
    Area { polygons }
}

/// Unions polygons that may overlap or touch.
fn dissolve(polygons: Vec<Polygon>) -> Area {
    if polygons.len() <= 1 {
        return Area { polygons };
    }
    let owned: Vec<(usize, (DVec2, DVec2))> = polygons
        .iter()
        .enumerate()
        .flat_map(|(owner, polygon)| polygon.edges().map(move |edge| (owner, edge)))
        .filter(|(_, (a, b))| a.distance(*b) > EPSILON)
        .collect();
    let segments: Vec<(DVec2, DVec2)> = owned.iter().map(|&(_, edge)| edge).collect();
    // a simple ring never crosses itself
    let cuts = contact_points(&segments, |i, j| owned[i].0 != owned[j].0);

    let covered = |p: DVec2| polygons.iter().any(|polygon| polygon.contains_point(p));
    let mut points = BTreeMap::new();
    let mut boundary = BTreeSet::new();
    for (&(a, b), cuts) in segments.iter().zip(cuts) {
        for (p, q) in split_segment(a, b, cuts) {
            let [left, right] = side_samples(p, q);
            // keep the covered side on the left, like a positive tile
            let (from, to) = match (covered(left), covered(right)) {
                (true, false) => (p, q),
                (false, true) => (q, p),
                _ => continue,
            };
            let (from_key, to_key) = (Key::of(from), Key::of(to));
            if from_key == to_key {
                continue;
            }
            points.entry(from_key).or_insert(from);
            points.entry(to_key).or_insert(to);
            boundary.insert((from_key, to_key));
        }
    }
    trace_rings(&points, boundary.into_iter().map(|edge| (edge, 1)))
}

/// For every segment, the points where it meets the others. `pairs`
/// filters which pairs are compared.
fn contact_points<F>(segments: &[(DVec2, DVec2)], pairs: F) -> Vec<Vec<DVec2>>
where
    F: Fn(usize, usize) -> bool,
{
    let mut cuts = vec![Vec::new(); segments.len()];
    for i in 0..segments.len() {
        for j in i + 1..segments.len() {
            if !pairs(i, j) {
                continue;
            }
            let ((a0, a1), (b0, b1)) = (segments[i], segments[j]);
            for point in segment_contacts(a0, a1, b0, b1) {
                cuts[i].push(point);
                cuts[j].push(point);
            }
        }
    }
    cuts
}

/// Points two segments share: where they cross, or the ends of their
/// overlap when they are collinear.
fn segment_contacts(a0: DVec2, a1: DVec2, b0: DVec2, b1: DVec2) -> ArrayVec<DVec2, 4> {
    let mut contacts = ArrayVec::new();
    if a0.min(a1).cmpgt(b0.max(b1) + SNAP).any() || b0.min(b1).cmpgt(a0.max(a1) + SNAP).any() {
        return contacts;
    }
    let (d, e) = (a1 - a0, b1 - b0);
    let denom = d.perp_dot(e);
    if denom.abs() > EPSILON * d.length() * e.length() {
        let w = b0 - a0;
        let t = w.perp_dot(e) / denom;
        let u = w.perp_dot(d) / denom;
        let span = -EPSILON..=1.0 + EPSILON;
        if span.contains(&t) && span.contains(&u) {
            contacts.push(a0 + d * t);
        }
        return contacts;
    }
    if (b0 - a0).perp_dot(d).abs() / d.length() > SNAP {
        return contacts;
    }
    for p in [b0, b1] {
        let t = (p - a0).dot(d) / d.length_squared();
        if (0.0..=1.0).contains(&t) {
            contacts.push(p);
        }
    }
    for p in [a0, a1] {
        let u = (p - b0).dot(e) / e.length_squared();
        if (0.0..=1.0).contains(&u) {
            contacts.push(p);
        }
    }
    contacts
}

/// Splits `a -> b` at every cut strictly between its ends.
fn split_segment(a: DVec2, b: DVec2, mut cuts: Vec<DVec2>) -> Vec<(DVec2, DVec2)> {
    let d = b - a;
    let along = |p: DVec2| (p - a).dot(d) / d.length_squared();
    cuts.retain(|&p| (EPSILON..1.0 - EPSILON).contains(&along(p)));
    cuts.sort_by(|&p, &q| along(p).total_cmp(&along(q)));

    let mut stops = Vec::with_capacity(cuts.len() + 2);
    stops.push(a);
    stops.extend(cuts);
    stops.push(b);
    stops.dedup_by(|p, q| Key::of(*p) == Key::of(*q));
    stops.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Sample points just left and just right of the middle of `p -> q`.
fn side_samples(p: DVec2, q: DVec2) -> [DVec2; 2] {
    let middle = (p + q) * 0.5;
    let normal = (q - p).normalize_or_zero().perp() * NUDGE;
    [middle + normal, middle - normal]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Key(i64, i64);

impl Key {
    fn of(p: DVec2) -> Self {
        Key((p.x * QUANTUM).round() as i64, (p.y * QUANTUM).round() as i64)
    }
}

fn ring_edges(ring: &[DVec2]) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
    (0..ring.len()).map(move |i| (ring[i], ring[(i + 1) % ring.len()]))
}

/// Shoelace sum; positive for rings that run clockwise on a y-down board.
pub(crate) fn signed_area(ring: &[DVec2]) -> f64 {
    ring_edges(ring).map(|(a, b)| a.perp_dot(b)).sum::<f64>() / 2.0
}

fn ring_crossings_odd(ring: &[DVec2], point: DVec2) -> bool {
    let mut inside = false;
    for (a, b) in ring_edges(ring) {
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

fn drop_collinear(ring: Vec<DVec2>) -> Vec<DVec2> {
    let n = ring.len();
    if n < 3 {
        return ring;
    }
    (0..n)
        .filter(|&i| {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            let cross = (ring[i] - prev).perp_dot(next - ring[i]);
            cross.abs() > EPSILON * (1.0 + (ring[i] - prev).length() * (next - ring[i]).length())
        })
        .map(|i| ring[i])
        .collect()
}

fn rect_corners(rect: &Rect) -> (DVec2, DVec2) {
    (
        DVec2::new(rect.x as f64, rect.y as f64),
        DVec2::new(rect.right() as f64, rect.bottom() as f64),
    )
}

fn strictly_inside(p: DVec2, min: DVec2, max: DVec2) -> bool {
    p.x > min.x + EPSILON && p.x < max.x - EPSILON && p.y > min.y + EPSILON && p.y < max.y - EPSILON
}

/// Liang-Barsky clip of `a -> b` to the closed rectangle; `None` unless a
/// piece of positive length survives.
fn clip_segment(a: DVec2, b: DVec2, min: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    let d = b - a;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    if (t1 - t0) * d.length() <= EPSILON {
        return None;
    }
    Some((a + d * t0, a + d * t1))
}

/// A chord of the rectangle whose midpoint is strictly inside passes
/// through the interior.
fn segment_crosses_interior(a: DVec2, b: DVec2, min: DVec2, max: DVec2) -> bool {
    clip_segment(a, b, min, max).is_some_and(|(p, q)| strictly_inside((p + q) * 0.5, min, max))
}
