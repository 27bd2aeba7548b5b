//! Filled quadrilateral (`SOLID`)

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::{Result, ShapeError};
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector2, Vector3};

/// A solid-filled triangle or quadrilateral
///
/// Corners follow the DXF order: the outline runs 0, 1, 3, 2.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    pub common: AttributeSet,
    pub corners: [Vector3; 4],
    pub thickness: f64,
}

impl Solid {
    pub fn new(corners: [Vector3; 4]) -> Self {
        Solid {
            corners,
            ..Self::default()
        }
    }

    pub fn is_triangle(&self) -> bool {
        self.corners[2] == self.corners[3]
    }
}

/// Read `corners`: three or four points, a triangle repeating its last
/// corner.
pub(super) fn load_corners(json: &CadJsonObject) -> Result<[Vector3; 4]> {
    let points = json.points("corners")?;
    match points.as_slice() {
        [a, b, c] => Ok([*a, *b, *c, *c]),
        [a, b, c, d] => Ok([*a, *b, *c, *d]),
        _ => Err(ShapeError::invalid(json.entity(), "corners", "3 or 4 points")),
    }
}

pub(super) fn corner_bounds(corners: &[Vector3; 4]) -> Option<BoundingBox2D> {
    let xy: Vec<Vector2> = corners.iter().map(Vector3::xy).collect();
    BoundingBox2D::from_points(&xy)
}

pub(super) fn flip_corners(corners: &mut [Vector3; 4], axis: usize) {
    for corner in corners.iter_mut() {
        match axis {
            0 => corner.x = -corner.x,
            1 => corner.y = -corner.y,
            _ => corner.z = -corner.z,
        }
    }
}

/// Outline in drawing order
pub(super) fn outline(corners: &[Vector3; 4]) -> [Vector3; 4] {
    [corners[0], corners[1], corners[3], corners[2]]
}

impl Shape for Solid {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Solid
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

impl Persist for Solid {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.corners.persist(ar)?;
        ar.double(&mut self.thickness)
    }
}
