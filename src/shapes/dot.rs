//! Point shape (the `POINT` entity)

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector3};

/// A single marked location
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dot {
    pub common: AttributeSet,
    pub location: Vector3,
    pub thickness: f64,
}

impl Dot {
    pub fn new(location: Vector3) -> Self {
        Dot {
            location,
            ..Self::default()
        }
    }
}

impl Shape for Dot {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Dot
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.location.x = -self.location.x;
    }

    fn flip_y(&mut self) {
        self.location.y = -self.location.y;
    }

    fn flip_z(&mut self) {
        self.location.z = -self.location.z;
    }

    fn transform(&mut self, transform: &Transform, _right_handed: bool) {
        self.location = transform.apply(self.location);
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        Some(BoundingBox2D::from_point(self.location.xy()))
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Point {
                position: self.location,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.location = json.point("position")?;
        self.thickness = json.f64_or("thickness", 0.0)?;
        Ok(())
    }
}

impl Persist for Dot {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.location.persist(ar)?;
        ar.double(&mut self.thickness)
    }
}
