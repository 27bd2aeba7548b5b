//! Construction line (infinite in both directions)

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct XLine {
    pub common: AttributeSet,
    pub base_point: Vector3,
    pub direction: Vector3,
}

impl XLine {
    pub fn new(base_point: Vector3, direction: Vector3) -> Self {
        XLine {
            common: AttributeSet::new(),
            base_point,
            direction,
        }
    }
}

impl Default for XLine {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::UNIT_X)
    }
}

impl Shape for XLine {
    fn kind(&self) -> ShapeKind {
        ShapeKind::XLine
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

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        Some(BoundingBox2D::from_point(self.base_point.xy()))
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Ray {
                origin: self.base_point,
                direction: self.direction,
                bidirectional: true,
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

impl Persist for XLine {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.base_point.persist(ar)?;
        self.direction.persist(ar)
    }
}
