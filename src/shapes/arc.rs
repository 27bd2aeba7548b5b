//! Arc shape

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector2, Vector3};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::mem;

/// A circular arc swept counter-clockwise from `start_direction` to
/// `end_direction`
///
/// The end angles are kept as direction vectors so that mirroring is a
/// sign change on one component. The vectors need not be unit length.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub common: AttributeSet,
    pub center: Vector3,
    pub radius: f64,
    pub start_direction: Vector2,
    pub end_direction: Vector2,
    pub thickness: f64,
}

impl Arc {
    /// Quarter arc of radius 1 at the origin
    pub fn new() -> Self {
        Arc {
            common: AttributeSet::new(),
            center: Vector3::ZERO,
            radius: 1.0,
            start_direction: Vector2::UNIT_X,
            end_direction: Vector2::UNIT_Y,
            thickness: 0.0,
        }
    }

    /// Arc from angles in radians
    pub fn from_angles(center: Vector3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Arc {
            center,
            radius,
            start_direction: Vector2::from_angle(start_angle),
            end_direction: Vector2::from_angle(end_angle),
            ..Self::new()
        }
    }

    /// Start angle in radians
    pub fn start_angle(&self) -> f64 {
        self.start_direction.angle()
    }

    /// End angle in radians
    pub fn end_angle(&self) -> f64 {
        self.end_direction.angle()
    }

    /// Counter-clockwise sweep in `[0, 2π)`
    pub fn sweep_angle(&self) -> f64 {
        (self.end_angle() - self.start_angle()).rem_euclid(TAU)
    }

    pub fn start_point(&self) -> Vector3 {
        self.point_at(self.start_angle())
    }

    pub fn end_point(&self) -> Vector3 {
        self.point_at(self.end_angle())
    }

    fn point_at(&self, angle: f64) -> Vector3 {
        let offset = Vector2::from_angle(angle) * self.radius;
        Vector3::new(self.center.x + offset.x, self.center.y + offset.y, self.center.z)
    }

    fn reverse(&mut self) {
        mem::swap(&mut self.start_direction, &mut self.end_direction);
    }
}

impl Default for Arc {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for Arc {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Arc
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.center.x = -self.center.x;
        self.start_direction.x = -self.start_direction.x;
        self.end_direction.x = -self.end_direction.x;
        self.reverse();
    }

    fn flip_y(&mut self) {
        self.center.y = -self.center.y;
        self.start_direction.y = -self.start_direction.y;
        self.end_direction.y = -self.end_direction.y;
        self.reverse();
    }

    fn flip_z(&mut self) {
        self.center.z = -self.center.z;
    }

    fn transform(&mut self, transform: &Transform, right_handed: bool) {
        self.center = transform.apply(self.center);
        self.start_direction = transform.apply_direction_2d(self.start_direction);
        self.end_direction = transform.apply_direction_2d(self.end_direction);
        self.radius *= transform.scale_factor_xy();
        if !right_handed {
            self.reverse();
        }
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        let start = self.start_angle();
        let end = self.end_angle();
        let mut rect = BoundingBox2D::from_point(self.start_point().xy());
        if start != end {
            rect.expand_to_include_arc(self.center.xy(), self.radius, start, end);
        }
        Some(rect)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Arc {
                center: self.center,
                radius: self.radius,
                start_angle: self.start_angle(),
                end_angle: self.end_angle(),
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.center = json.point("center")?;
        self.radius = json.f64("radius")?;
        self.start_direction = Vector2::from_angle(json.f64("startAngle")?.to_radians());
        self.end_direction = Vector2::from_angle(json.f64("endAngle")?.to_radians());
        self.thickness = json.f64_or("thickness", 0.0)?;
        Ok(())
    }
}

impl Persist for Arc {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.center.persist(ar)?;
        ar.double(&mut self.radius)?;
        self.start_direction.persist(ar)?;
        self.end_direction.persist(ar)?;
        ar.double(&mut self.thickness)
    }
}
