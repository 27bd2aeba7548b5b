//! Polyline vertex with segment curvature

use super::{BoundingBox2D, Transform, Vector2, Vector3};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};

/// A polyline vertex: a 3D point plus the bulge of the segment that
/// starts at it.
///
/// Bulge is `tan(θ/4)` of the included angle θ of the arc segment.
/// 0 = straight segment, positive = counter-clockwise arc, negative =
/// clockwise arc.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolyPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub bulge: f64,
}

impl PolyPoint {
    /// Create a new poly-point
    pub const fn new(x: f64, y: f64, z: f64, bulge: f64) -> Self {
        PolyPoint { x, y, z, bulge }
    }

    /// Create a poly-point from a location and a bulge
    pub fn from_point(point: Vector3, bulge: f64) -> Self {
        PolyPoint::new(point.x, point.y, point.z, bulge)
    }

    /// Location of the vertex
    pub fn point(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Location projected onto the XY plane
    pub fn xy(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// True when the segment starting here is a straight line
    pub fn is_straight(&self) -> bool {
        self.bulge == 0.0
    }

    pub fn flip_x(&mut self) {
        self.x = -self.x;
        self.bulge = -self.bulge;
    }

    pub fn flip_y(&mut self) {
        self.y = -self.y;
        self.bulge = -self.bulge;
    }

    pub fn flip_z(&mut self) {
        self.z = -self.z;
    }

    /// Move the vertex through `transform`; a mirroring transform reverses
    /// the arc direction.
    pub fn transform(&mut self, transform: &Transform, right_handed: bool) {
        let p = transform.apply(self.point());
        self.x = p.x;
        self.y = p.y;
        self.z = p.z;
        if !right_handed {
            self.bulge = -self.bulge;
        }
    }
}

impl Persist for PolyPoint {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        ar.double(&mut self.x)?;
        ar.double(&mut self.y)?;
        ar.double(&mut self.z)?;
        ar.double(&mut self.bulge)
    }
}

/// Center, radius and CCW start/end angles of the arc a bulged segment
/// describes. `None` for straight or zero-length segments.
pub fn bulge_arc(from: &PolyPoint, to: &PolyPoint) -> Option<(Vector2, f64, f64, f64)> {
    let b = from.bulge;
    let a = from.xy();
    let e = to.xy();
    let chord = e - a;
    let c = chord.length();
    if b == 0.0 || c == 0.0 {
        return None;
    }

    let mid = (a + e) * 0.5;
    let left = Vector2::new(-chord.y, chord.x) / c;
    let center = mid + left * (c * (1.0 - b * b) / (4.0 * b));
    let radius = c * (1.0 + b * b) / (4.0 * b.abs());

    let start = (a - center).angle();
    let end = (e - center).angle();
    if b > 0.0 {
        Some((center, radius, start, end))
    } else {
        Some((center, radius, end, start))
    }
}

/// Bounding rectangle of a run of poly-points, including the extent of
/// bulged segments. `None` when there are no vertices.
pub fn poly_bounds(vertices: &[PolyPoint], closed: bool) -> Option<BoundingBox2D> {
    let first = vertices.first()?;
    let mut bbox = BoundingBox2D::from_point(first.xy());

    let segment_count = if closed { vertices.len() } else { vertices.len() - 1 };
    for i in 0..vertices.len() {
        bbox.expand_to_include(vertices[i].xy());
        if i < segment_count {
            let next = &vertices[(i + 1) % vertices.len()];
            if let Some((center, radius, start, end)) = bulge_arc(&vertices[i], next) {
                bbox.expand_to_include_arc(center, radius, start, end);
            }
        }
    }
    Some(bbox)
}
