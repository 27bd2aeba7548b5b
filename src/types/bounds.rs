//! Axis-aligned bounding rectangles

use super::Vector2;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

/// Axis-aligned rectangle in the XY plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2D {
    /// Lower-left corner
    pub min: Vector2,
    /// Upper-right corner
    pub max: Vector2,
}

impl BoundingBox2D {
    /// Create a new bounding box from min and max points
    pub fn new(min: Vector2, max: Vector2) -> Self {
        BoundingBox2D { min, max }
    }

    /// Zero-size box at a single point
    pub fn from_point(point: Vector2) -> Self {
        BoundingBox2D {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing every point; `None` for an empty slice
    pub fn from_points(points: &[Vector2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = BoundingBox2D::from_point(*first);
        for point in rest {
            bbox.expand_to_include(*point);
        }
        Some(bbox)
    }

    /// Box of a circle
    pub fn from_circle(center: Vector2, radius: f64) -> Self {
        let r = radius.abs();
        BoundingBox2D {
            min: Vector2::new(center.x - r, center.y - r),
            max: Vector2::new(center.x + r, center.y + r),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// True when every edge of `other` lies inside this box
    pub fn contains_box(&self, other: &BoundingBox2D) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Expand the bounding box to include another point
    pub fn expand_to_include(&mut self, point: Vector2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Expand to include a circular arc swept counter-clockwise from
    /// `start_angle` to `end_angle` (radians). Equal angles describe a
    /// single point.
    pub fn expand_to_include_arc(
        &mut self,
        center: Vector2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) {
        let r = radius.abs();
        self.expand_to_include(center + Vector2::from_angle(start_angle) * r);
        self.expand_to_include(center + Vector2::from_angle(end_angle) * r);

        let sweep = (end_angle - start_angle).rem_euclid(TAU);
        let quadrants = [
            Vector2::new(r, 0.0),
            Vector2::new(0.0, r),
            Vector2::new(-r, 0.0),
            Vector2::new(0.0, -r),
        ];
        for (k, offset) in quadrants.iter().enumerate() {
            let rel = (k as f64 * FRAC_PI_2 - start_angle).rem_euclid(TAU);
            if rel <= sweep {
                self.expand_to_include(center + *offset);
            }
        }
    }

    /// Expand to include an elliptical arc, `major` being the center to
    /// major-axis-end vector and `start_param`/`end_param` the parametric
    /// angles swept counter-clockwise.
    pub fn expand_to_include_ellipse(
        &mut self,
        center: Vector2,
        major: Vector2,
        ratio: f64,
        start_param: f64,
        end_param: f64,
    ) {
        let minor = Vector2::new(-major.y, major.x) * ratio;
        let at = |t: f64| center + major * t.cos() + minor * t.sin();

        self.expand_to_include(at(start_param));
        self.expand_to_include(at(end_param));

        let full = (end_param - start_param).abs() >= TAU;
        let sweep = (end_param - start_param).rem_euclid(TAU);

        // x(t) and y(t) extremes: derivative zero at atan2(minor, major) + kπ
        let tx = minor.x.atan2(major.x);
        let ty = minor.y.atan2(major.y);
        for base in [tx, ty] {
            for k in 0..2 {
                let t = base + k as f64 * std::f64::consts::PI;
                let rel = (t - start_param).rem_euclid(TAU);
                if full || rel <= sweep {
                    self.expand_to_include(at(t));
                }
            }
        }
    }

    /// Merge with another bounding box
    pub fn merge(&self, other: &BoundingBox2D) -> BoundingBox2D {
        BoundingBox2D {
            min: Vector2::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
            ),
            max: Vector2::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
            ),
        }
    }

    /// Union of two optional boxes
    pub fn union(a: Option<BoundingBox2D>, b: Option<BoundingBox2D>) -> Option<BoundingBox2D> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.merge(&b)),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

impl fmt::Display for BoundingBox2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox2D[{} -> {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn approx(a: Vector2, b: Vector2) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_bbox2d_from_points() {
        let points = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 5.0),
            Vector2::new(-5.0, 3.0),
        ];
        let bbox = BoundingBox2D::from_points(&points).unwrap();
        assert_eq!(bbox.min, Vector2::new(-5.0, 0.0));
        assert_eq!(bbox.max, Vector2::new(10.0, 5.0));
        assert!(BoundingBox2D::from_points(&[]).is_none());
    }

    #[test]
    fn test_bbox2d_dimensions() {
        let bbox = BoundingBox2D::new(Vector2::new(0.0, 0.0), Vector2::new(10.0, 5.0));
        assert_eq!(bbox.width(), 10.0);
        assert_eq!(bbox.height(), 5.0);
        assert_eq!(bbox.center(), Vector2::new(5.0, 2.5));
    }

    #[test]
    fn test_quarter_arc_extent() {
        let mut bbox = BoundingBox2D::from_point(Vector2::new(1.0, 0.0));
        bbox.expand_to_include_arc(Vector2::ZERO, 1.0, 0.0, PI / 2.0);
        assert!(approx(bbox.min, Vector2::new(0.0, 0.0)));
        assert!(approx(bbox.max, Vector2::new(1.0, 1.0)));
    }

    #[test]
    fn test_arc_crossing_zero() {
        // from 315° to 45° passes through +X only
        let mut bbox = BoundingBox2D::from_point(Vector2::new(1.0, 0.0));
        bbox.expand_to_include_arc(Vector2::ZERO, 2.0, -PI / 4.0, PI / 4.0);
        assert!((bbox.max.x - 2.0).abs() < 1e-12);
        assert!(bbox.min.x > 1.0 - 1e-12);
    }

    #[test]
    fn test_full_ellipse_extent() {
        let mut bbox = BoundingBox2D::from_point(Vector2::ZERO);
        bbox.expand_to_include_ellipse(Vector2::ZERO, Vector2::new(4.0, 0.0), 0.5, 0.0, 2.0 * PI);
        assert!(approx(bbox.min, Vector2::new(-4.0, -2.0)));
        assert!(approx(bbox.max, Vector2::new(4.0, 2.0)));
    }

    #[test]
    fn test_union() {
        let a = BoundingBox2D::from_point(Vector2::new(1.0, 1.0));
        let b = BoundingBox2D::from_point(Vector2::new(-1.0, 3.0));
        let u = BoundingBox2D::union(Some(a), Some(b)).unwrap();
        assert_eq!(u.min, Vector2::new(-1.0, 1.0));
        assert_eq!(u.max, Vector2::new(1.0, 3.0));
        assert_eq!(BoundingBox2D::union(None, Some(a)), Some(a));
        assert_eq!(BoundingBox2D::union(None, None), None);
    }
}
