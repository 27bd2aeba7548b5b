//! Hatch shape

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::{Result, ShapeError};
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::{poly_point_from, CadJsonObject};
use crate::types::poly_point::poly_bounds;
use crate::types::{BoundingBox2D, PolyPoint, Transform, Vector2};

/// One boundary loop of a hatch
#[derive(Debug, Clone, PartialEq)]
pub struct HatchBoundary {
    pub closed: bool,
    pub vertices: Vec<PolyPoint>,
}

impl HatchBoundary {
    pub fn new(vertices: Vec<PolyPoint>) -> Self {
        HatchBoundary {
            closed: true,
            vertices,
        }
    }
}

impl Default for HatchBoundary {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Persist for HatchBoundary {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        ar.boolean(&mut self.closed)?;
        self.vertices.persist(ar)
    }
}

/// An area filled with a pattern or a solid fill
#[derive(Debug, Clone, PartialEq)]
pub struct Hatch {
    pub common: AttributeSet,
    pub pattern_name: String,
    pub solid_fill: bool,
    /// Unit direction of the pattern's X axis
    pub pattern_direction: Vector2,
    pub pattern_scale: f64,
    pub boundaries: Vec<HatchBoundary>,
}

impl Hatch {
    pub fn new() -> Self {
        Hatch {
            common: AttributeSet::new(),
            pattern_name: "ANSI31".to_string(),
            solid_fill: false,
            pattern_direction: Vector2::UNIT_X,
            pattern_scale: 1.0,
            boundaries: Vec::new(),
        }
    }

    /// Pattern angle in radians
    pub fn pattern_angle(&self) -> f64 {
        self.pattern_direction.angle()
    }

    pub fn solid() -> Self {
        Hatch {
            pattern_name: "SOLID".to_string(),
            solid_fill: true,
            ..Self::new()
        }
    }

    pub fn add_boundary(&mut self, boundary: HatchBoundary) {
        self.boundaries.push(boundary);
    }

    fn vertices_mut(&mut self) -> impl Iterator<Item = &mut PolyPoint> {
        self.boundaries.iter_mut().flat_map(|b| b.vertices.iter_mut())
    }
}

impl Default for Hatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for Hatch {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Hatch
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.vertices_mut().for_each(PolyPoint::flip_x);
        self.pattern_direction.x = -self.pattern_direction.x;
    }

    fn flip_y(&mut self) {
        self.vertices_mut().for_each(PolyPoint::flip_y);
        self.pattern_direction.y = -self.pattern_direction.y;
    }

    fn flip_z(&mut self) {
        self.vertices_mut().for_each(PolyPoint::flip_z);
    }

    fn transform(&mut self, transform: &Transform, right_handed: bool) {
        self.vertices_mut()
            .for_each(|v| v.transform(transform, right_handed));
        self.pattern_direction = transform
            .apply_direction_2d(self.pattern_direction)
            .normalize();
        self.pattern_scale *= transform.scale_factor_xy();
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        self.boundaries
            .iter()
            .fold(None, |acc, b| BoundingBox2D::union(acc, poly_bounds(&b.vertices, b.closed)))
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        for boundary in &self.boundaries {
            canvas.render(
                Primitive::Polyline {
                    vertices: &boundary.vertices,
                    closed: boundary.closed,
                    filled: self.solid_fill,
                },
                &self.common,
            );
        }
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        let entity = json.entity();
        self.boundaries = json
            .array("boundaries")?
            .iter()
            .map(|path| {
                let points = path
                    .as_array()
                    .ok_or_else(|| ShapeError::invalid(entity, "boundaries", "array of loops"))?;
                points
                    .iter()
                    .map(|p| poly_point_from(p, entity, "boundaries"))
                    .collect::<Result<Vec<_>>>()
                    .map(HatchBoundary::new)
            })
            .collect::<Result<_>>()?;
        self.pattern_name = json.string_or("patternName", "SOLID")?;
        self.solid_fill = json.bool_or("solid", self.pattern_name == "SOLID")?;
        self.pattern_direction = Vector2::from_angle(json.degrees_or("patternAngle", 0.0)?);
        self.pattern_scale = json.f64_or("patternScale", 1.0)?;
        Ok(())
    }
}

impl Persist for Hatch {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        ar.string(&mut self.pattern_name)?;
        ar.boolean(&mut self.solid_fill)?;
        self.pattern_direction.persist(ar)?;
        ar.double(&mut self.pattern_scale)?;
        self.boundaries.persist(ar)
    }
}
