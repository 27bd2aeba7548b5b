//! Circle shape

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector3};
use std::f64::consts::PI;

/// A full circle
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub common: AttributeSet,
    pub center: Vector3,
    pub radius: f64,
    pub thickness: f64,
}

impl Circle {
    pub fn new() -> Self {
        Circle {
            common: AttributeSet::new(),
            center: Vector3::ZERO,
            radius: 1.0,
            thickness: 0.0,
        }
    }

    pub fn from_center_radius(center: Vector3, radius: f64) -> Self {
        Circle {
            center,
            radius,
            ..Self::new()
        }
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for Circle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.center.x = -self.center.x;
    }

    fn flip_y(&mut self) {
        self.center.y = -self.center.y;
    }

    fn flip_z(&mut self) {
        self.center.z = -self.center.z;
    }

    fn transform(&mut self, transform: &Transform, _right_handed: bool) {
        self.center = transform.apply(self.center);
        self.radius *= transform.scale_factor_xy();
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        Some(BoundingBox2D::from_circle(self.center.xy(), self.radius))
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Circle {
                center: self.center,
                radius: self.radius,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.center = json.point("center")?;
        self.radius = json.f64("radius")?;
        self.thickness = json.f64_or("thickness", 0.0)?;
        Ok(())
    }
}

impl Persist for Circle {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.center.persist(ar)?;
        ar.double(&mut self.radius)?;
        ar.double(&mut self.thickness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector2;
    use serde_json::json;

    #[test]
    fn test_circle_area() {
        let circle = Circle::from_center_radius(Vector3::ZERO, 2.0);
        assert!((circle.area() - 4.0 * PI).abs() < 1e-12);
        assert!((circle.circumference() - 4.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::from_center_radius(Vector3::new(1.0, 1.0, 0.0), 2.0);
        let rect = circle.bounding_rect().unwrap();
        assert_eq!(rect.min, Vector2::new(-1.0, -1.0));
        assert_eq!(rect.max, Vector2::new(3.0, 3.0));
    }

    #[test]
    fn test_uniform_scale_scales_radius() {
        let mut circle = Circle::from_center_radius(Vector3::new(1.0, 0.0, 0.0), 1.5);
        circle.transform(&Transform::from_scale(2.0), true);
        assert_eq!(circle.center, Vector3::new(2.0, 0.0, 0.0));
        assert!((circle.radius - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_flip_y_keeps_radius() {
        let mut circle = Circle::from_center_radius(Vector3::new(1.0, 2.0, 0.0), 1.5);
        circle.flip_y();
        assert_eq!(circle.center, Vector3::new(1.0, -2.0, 0.0));
        assert_eq!(circle.radius, 1.5);
    }

    #[test]
    fn test_load_requires_radius() {
        let value = json!({"type": "CIRCLE", "center": [0, 0]});
        let obj = CadJsonObject::new("CIRCLE", &value).unwrap();
        assert!(Circle::new().load_from_cad_json(&obj).is_err());

        let value = json!({"type": "CIRCLE", "center": [1, 2], "radius": 4});
        let obj = CadJsonObject::new("CIRCLE", &value).unwrap();
        let mut circle = Circle::new();
        circle.load_from_cad_json(&obj).unwrap();
        assert_eq!(circle.radius, 4.0);
    }
}
