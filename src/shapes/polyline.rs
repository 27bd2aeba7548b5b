//! Polyline shape built from vertex objects

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::{poly_point_from_vertex, CadJsonObject};
use crate::types::poly_point::poly_bounds;
use crate::types::{BoundingBox2D, PolyPoint, Transform};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub common: AttributeSet,
    pub vertices: Vec<PolyPoint>,
    pub closed: bool,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vertices(vertices: Vec<PolyPoint>, closed: bool) -> Self {
        Polyline {
            vertices,
            closed,
            ..Self::default()
        }
    }
}

impl Shape for Polyline {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polyline
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.vertices.iter_mut().for_each(PolyPoint::flip_x);
    }

    fn flip_y(&mut self) {
        self.vertices.iter_mut().for_each(PolyPoint::flip_y);
    }

    fn flip_z(&mut self) {
        self.vertices.iter_mut().for_each(PolyPoint::flip_z);
    }

    fn transform(&mut self, transform: &Transform, right_handed: bool) {
        for vertex in self.vertices.iter_mut() {
            vertex.transform(transform, right_handed);
        }
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        poly_bounds(&self.vertices, self.closed)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Polyline {
                vertices: &self.vertices,
                closed: self.closed,
                filled: false,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.vertices = json
            .array("vertices")?
            .iter()
            .map(|v| poly_point_from_vertex(v, json.entity()))
            .collect::<Result<_>>()?;
        self.closed = json.bool_or("closed", false)?;
        Ok(())
    }
}

impl Persist for Polyline {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.vertices.persist(ar)?;
        ar.boolean(&mut self.closed)
    }
}
