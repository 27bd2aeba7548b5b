//! Line shape

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector3};

/// A straight segment between two points
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub common: AttributeSet,
    pub start: Vector3,
    pub end: Vector3,
    /// Extrusion along Z
    pub thickness: f64,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        Line {
            start,
            end,
            ..Self::default()
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    pub fn midpoint(&self) -> Vector3 {
        (self.start + self.end) * 0.5
    }
}

impl Shape for Line {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.start.x = -self.start.x;
        self.end.x = -self.end.x;
    }

    fn flip_y(&mut self) {
        self.start.y = -self.start.y;
        self.end.y = -self.end.y;
    }

    fn flip_z(&mut self) {
        self.start.z = -self.start.z;
        self.end.z = -self.end.z;
    }

    fn transform(&mut self, transform: &Transform, _right_handed: bool) {
        self.start = transform.apply(self.start);
        self.end = transform.apply(self.end);
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&[self.start.xy(), self.end.xy()])
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Line {
                start: self.start,
                end: self.end,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.start = json.point("startPoint")?;
        self.end = json.point("endPoint")?;
        self.thickness = json.f64_or("thickness", 0.0)?;
        Ok(())
    }
}

impl Persist for Line {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.start.persist(ar)?;
        self.end.persist(ar)?;
        ar.double(&mut self.thickness)
    }
}
