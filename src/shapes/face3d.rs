//! Face3D shape (3D face)

use super::solid::{corner_bounds, flip_corners, load_corners};
use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{persist_flags, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Edges drawn invisible, numbered from the first corner
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InvisibleEdgeFlags: i32 {
        const FIRST = 1;
        const SECOND = 2;
        const THIRD = 4;
        const FOURTH = 8;
    }
}

/// A 3D face with 3 or 4 corners; a triangle repeats its third corner
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Face3D {
    pub common: AttributeSet,
    pub corners: [Vector3; 4],
    pub invisible_edges: InvisibleEdgeFlags,
}

impl Face3D {
    pub fn new(corners: [Vector3; 4]) -> Self {
        Face3D {
            corners,
            ..Self::default()
        }
    }

    pub fn triangle(first: Vector3, second: Vector3, third: Vector3) -> Self {
        Self::new([first, second, third, third])
    }

    pub fn is_triangle(&self) -> bool {
        (self.corners[2] - self.corners[3]).length() < 1e-10
    }
}

impl Shape for Face3D {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Face3D
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
        let count = if self.is_triangle() { 3 } else { 4 };
        canvas.render(
            Primitive::Path {
                points: &self.corners[..count],
                closed: true,
                filled: false,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.corners = load_corners(json)?;
        self.invisible_edges = InvisibleEdgeFlags::from_bits_retain(json.i32_or("invisibleEdges", 0)?);
        Ok(())
    }
}

impl Persist for Face3D {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.corners.persist(ar)?;
        persist_flags(ar, &mut self.invisible_edges)
    }
}
