//! Leader shape

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector2, Vector3};

/// Annotation leader: a path of vertices, optionally with an arrowhead at
/// the first vertex
#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    pub common: AttributeSet,
    pub vertices: Vec<Vector3>,
    pub arrowhead: bool,
    /// Path is a spline through the vertices rather than straight segments
    pub spline_path: bool,
    pub style_name: String,
}

impl Leader {
    pub fn new() -> Self {
        Leader {
            common: AttributeSet::new(),
            vertices: Vec::new(),
            arrowhead: true,
            spline_path: false,
            style_name: "STANDARD".to_string(),
        }
    }
}

impl Default for Leader {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for Leader {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Leader
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.vertices.iter_mut().for_each(|v| v.x = -v.x);
    }

    fn flip_y(&mut self) {
        self.vertices.iter_mut().for_each(|v| v.y = -v.y);
    }

    fn flip_z(&mut self) {
        self.vertices.iter_mut().for_each(|v| v.z = -v.z);
    }

    fn transform(&mut self, transform: &Transform, _right_handed: bool) {
        self.vertices
            .iter_mut()
            .for_each(|v| *v = transform.apply(*v));
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        let xy: Vec<Vector2> = self.vertices.iter().map(Vector3::xy).collect();
        BoundingBox2D::from_points(&xy)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Path {
                points: &self.vertices,
                closed: false,
                filled: false,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.vertices = json.points("vertices")?;
        self.arrowhead = json.bool_or("arrowhead", true)?;
        self.spline_path = json.bool_or("splinePath", false)?;
        self.style_name = json.string_or("style", "STANDARD")?;
        Ok(())
    }
}

impl Persist for Leader {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.vertices.persist(ar)?;
        ar.boolean(&mut self.arrowhead)?;
        ar.boolean(&mut self.spline_path)?;
        ar.string(&mut self.style_name)
    }
}
