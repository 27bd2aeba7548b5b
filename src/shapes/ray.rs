//! Ray shape (semi-infinite line)

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector3};

/// A line starting at `base_point` and running forever along `direction`
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub common: AttributeSet,
    pub base_point: Vector3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(base_point: Vector3, direction: Vector3) -> Self {
        Ray {
            common: AttributeSet::new(),
            base_point,
            direction,
        }
    }

    /// Point at parameter `t` along the ray
    pub fn point_at(&self, t: f64) -> Vector3 {
        self.base_point + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::UNIT_X)
    }
}

impl Shape for Ray {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ray
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.base_point.x = -self.base_point.x;
        self.direction.x = -self.direction.x;
    }

    fn flip_y(&mut self) {
        self.base_point.y = -self.base_point.y;
        self.direction.y = -self.direction.y;
    }

    fn flip_z(&mut self) {
        self.base_point.z = -self.base_point.z;
        self.direction.z = -self.direction.z;
    }

    fn transform(&mut self, transform: &Transform, _right_handed: bool) {
        self.base_point = transform.apply(self.base_point);
        self.direction = transform.apply_direction(self.direction);
    }

    /// An unbounded construction bounds to its base point
    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        Some(BoundingBox2D::from_point(self.base_point.xy()))
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Ray {
                origin: self.base_point,
                direction: self.direction,
                bidirectional: false,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.base_point = json.point("basePoint")?;
        self.direction = json.point("direction")?;
        Ok(())
    }
}

impl Persist for Ray {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.base_point.persist(ar)?;
        self.direction.persist(ar)
    }
}
