//! Block definition: a named, reusable group of shapes

use super::{persist_shapes, union_bounds, AttributeSet, Shape, ShapeKind, ShapeType};
use crate::canvas::Canvas;
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::{shape_from_cad_json, CadJsonObject};
use crate::types::{BoundingBox2D, Transform, Vector3};

/// A block definition owning its child shapes
///
/// Inserts refer to a block by name; the base point is the block-space
/// origin an insert places at its insertion point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub common: AttributeSet,
    pub name: String,
    pub base_point: Vector3,
    pub description: String,
    pub shapes: Vec<ShapeType>,
}

impl Block {
    pub fn new(name: impl Into<String>, base_point: Vector3) -> Self {
        Block {
            name: name.into(),
            base_point,
            ..Self::default()
        }
    }

    /// Builder: Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn add_shape(&mut self, shape: ShapeType) {
        self.shapes.push(shape);
    }
}

impl Shape for Block {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Block
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.base_point.x = -self.base_point.x;
        self.shapes.iter_mut().for_each(ShapeType::flip_x);
    }

    fn flip_y(&mut self) {
        self.base_point.y = -self.base_point.y;
        self.shapes.iter_mut().for_each(ShapeType::flip_y);
    }

    fn flip_z(&mut self) {
        self.base_point.z = -self.base_point.z;
        self.shapes.iter_mut().for_each(ShapeType::flip_z);
    }

    fn transform(&mut self, transform: &Transform, right_handed: bool) {
        self.base_point = transform.apply(self.base_point);
        for shape in self.shapes.iter_mut() {
            shape.transform(transform, right_handed);
        }
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        union_bounds(&self.shapes)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.begin_block(&self.name, self.base_point);
        for shape in &self.shapes {
            shape.draw(canvas);
        }
        canvas.end_block();
    }

    /// Nested `entities` load through the registry; any malformed child
    /// fails the whole block.
    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.name = json.str("name")?.to_string();
        self.base_point = json.point_or("basePoint", Vector3::ZERO)?;
        self.description = json.string_or("description", "")?;
        self.shapes = json
            .array_or_empty("entities")?
            .iter()
            .map(shape_from_cad_json)
            .collect::<Result<_>>()?;
        Ok(())
    }
}

impl Persist for Block {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        ar.string(&mut self.name)?;
        self.base_point.persist(ar)?;
        ar.string(&mut self.description)?;
        persist_shapes(ar, &mut self.shapes)
    }
}
