//! Wide line segment (`TRACE`)

use super::solid::{corner_bounds, flip_corners, load_corners, outline};
use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector3};

/// Four-corner trace, laid out like [`super::Solid`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub common: AttributeSet,
    pub corners: [Vector3; 4],
    pub thickness: f64,
}

impl Trace {
    pub fn new(corners: [Vector3; 4]) -> Self {
        Trace {
            corners,
            ..Self::default()
        }
    }
}

impl Shape for Trace {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Trace
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        flip_corners(&mut self.corners, 0);
    }

    fn flip_y(&mut self) {
        flip_corners(&mut self.corners, 1);
    }

    fn flip_z(&mut self) {
        flip_corners(&mut self.corners, 2);
    }

    fn transform(&mut self, transform: &Transform, _right_handed: bool) {
        for corner in self.corners.iter_mut() {
            *corner = transform.apply(*corner);
        }
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        corner_bounds(&self.corners)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let points = outline(&self.corners);
        canvas.render(
            Primitive::Path {
                points: &points,
                closed: true,
                filled: true,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.corners = load_corners(json)?;
        self.thickness = json.f64_or("thickness", 0.0)?;
        Ok(())
    }
}

impl Persist for Trace {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.corners.persist(ar)?;
        ar.double(&mut self.thickness)
    }
}
