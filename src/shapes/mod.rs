//! Shape types and traits

use crate::canvas::Canvas;
use crate::error::Result;
use crate::io::archive::{persist_count, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform};
use std::fmt;

pub mod attributes;
pub mod kind;
pub mod registry;

pub mod arc;
pub mod block;
pub mod circle;
pub mod dimension;
pub mod dot;
pub mod ellipse;
pub mod face3d;
pub mod hatch;
pub mod image;
pub mod insert;
pub mod leader;
pub mod line;
pub mod lwpolyline;
pub mod mtext;
pub mod polyline;
pub mod ray;
pub mod solid;
pub mod spline;
pub mod text;
pub mod trace;
pub mod underlay;
pub mod vertex;
pub mod viewport;
pub mod xline;

pub use attributes::AttributeSet;
pub use kind::ShapeKind;
pub use registry::{create_shape, create_shape_from_entity_name, entity_name};

pub use arc::Arc;
pub use block::Block;
pub use circle::Circle;
pub use dimension::{Dimension, DimensionType};
pub use dot::Dot;
pub use ellipse::Ellipse;
pub use face3d::{Face3D, InvisibleEdgeFlags};
pub use hatch::{Hatch, HatchBoundary};
pub use image::{Image, ImageDisplayFlags};
pub use insert::Insert;
pub use leader::Leader;
pub use line::Line;
pub use lwpolyline::LwPolyline;
pub use mtext::{AttachmentPoint, MText};
pub use polyline::Polyline;
pub use ray::Ray;
pub use solid::Solid;
pub use spline::{Spline, SplineFlags};
pub use text::{Text, TextGenerationFlags, TextHorizontalAlignment, TextVerticalAlignment};
pub use trace::Trace;
pub use underlay::{Underlay, UnderlayFlags};
pub use vertex::{Vertex, VertexFlags};
pub use viewport::Viewport;
pub use xline::XLine;

/// Behavior every shape kind implements
pub trait Shape: Persist {
    /// Kind of this shape
    fn kind(&self) -> ShapeKind;

    /// Shared display attributes
    fn common(&self) -> &AttributeSet;

    fn common_mut(&mut self) -> &mut AttributeSet;

    /// Mirror about the YZ plane (x → -x)
    fn flip_x(&mut self);

    /// Mirror about the XZ plane (y → -y)
    fn flip_y(&mut self);

    /// Mirror about the XY plane (z → -z)
    fn flip_z(&mut self);

    /// Apply an affine map in place. `right_handed` is false when the map
    /// reverses orientation; direction-sensitive fields are corrected the
    /// same way a flip corrects them.
    fn transform(&mut self, transform: &Transform, right_handed: bool);

    /// Axis-aligned bounds of the current geometry; `None` when there is
    /// nothing to bound
    fn bounding_rect(&self) -> Option<BoundingBox2D>;

    /// Describe the shape to a canvas
    fn draw(&self, canvas: &mut dyn Canvas);

    /// Populate geometry and attributes from a CAD-JSON entity object
    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()>;
}

/// Closed sum over every registered shape kind
///
/// The eight dimension kinds share [`Dimension`]; its `dimension_type`
/// decides the kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeType {
    Face3D(Face3D),
    Arc(Arc),
    Block(Block),
    Circle(Circle),
    Dimension(Dimension),
    Ellipse(Ellipse),
    Hatch(Hatch),
    Image(Image),
    Insert(Insert),
    Leader(Leader),
    Line(Line),
    LwPolyline(LwPolyline),
    MText(MText),
    Dot(Dot),
    Polyline(Polyline),
    Ray(Ray),
    Solid(Solid),
    Spline(Spline),
    Text(Text),
    Trace(Trace),
    Underlay(Underlay),
    Vertex(Vertex),
    Viewport(Viewport),
    XLine(XLine),
}

impl ShapeType {
    /// Get a reference to the shape trait object
    pub fn as_shape(&self) -> &dyn Shape {
        match self {
            ShapeType::Face3D(s) => s,
            ShapeType::Arc(s) => s,
            ShapeType::Block(s) => s,
            ShapeType::Circle(s) => s,
            ShapeType::Dimension(s) => s,
            ShapeType::Ellipse(s) => s,
            ShapeType::Hatch(s) => s,
            ShapeType::Image(s) => s,
            ShapeType::Insert(s) => s,
            ShapeType::Leader(s) => s,
            ShapeType::Line(s) => s,
            ShapeType::LwPolyline(s) => s,
            ShapeType::MText(s) => s,
            ShapeType::Dot(s) => s,
            ShapeType::Polyline(s) => s,
            ShapeType::Ray(s) => s,
            ShapeType::Solid(s) => s,
            ShapeType::Spline(s) => s,
            ShapeType::Text(s) => s,
            ShapeType::Trace(s) => s,
            ShapeType::Underlay(s) => s,
            ShapeType::Vertex(s) => s,
            ShapeType::Viewport(s) => s,
            ShapeType::XLine(s) => s,
        }
    }

    /// Get a mutable reference to the shape trait object
    pub fn as_shape_mut(&mut self) -> &mut dyn Shape {
        match self {
            ShapeType::Face3D(s) => s,
            ShapeType::Arc(s) => s,
            ShapeType::Block(s) => s,
            ShapeType::Circle(s) => s,
            ShapeType::Dimension(s) => s,
            ShapeType::Ellipse(s) => s,
            ShapeType::Hatch(s) => s,
            ShapeType::Image(s) => s,
            ShapeType::Insert(s) => s,
            ShapeType::Leader(s) => s,
            ShapeType::Line(s) => s,
            ShapeType::LwPolyline(s) => s,
            ShapeType::MText(s) => s,
            ShapeType::Dot(s) => s,
            ShapeType::Polyline(s) => s,
            ShapeType::Ray(s) => s,
            ShapeType::Solid(s) => s,
            ShapeType::Spline(s) => s,
            ShapeType::Text(s) => s,
            ShapeType::Trace(s) => s,
            ShapeType::Underlay(s) => s,
            ShapeType::Vertex(s) => s,
            ShapeType::Viewport(s) => s,
            ShapeType::XLine(s) => s,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.as_shape().kind()
    }

    pub fn common(&self) -> &AttributeSet {
        self.as_shape().common()
    }

    pub fn common_mut(&mut self) -> &mut AttributeSet {
        self.as_shape_mut().common_mut()
    }

    pub fn flip_x(&mut self) {
        self.as_shape_mut().flip_x();
    }

    pub fn flip_y(&mut self) {
        self.as_shape_mut().flip_y();
    }

    pub fn flip_z(&mut self) {
        self.as_shape_mut().flip_z();
    }

    /// Apply an affine map. The identity leaves the shape untouched.
    pub fn transform(&mut self, transform: &Transform, right_handed: bool) {
        if right_handed && transform.is_identity() {
            return;
        }
        self.as_shape_mut().transform(transform, right_handed);
    }

    pub fn bounding_rect(&self) -> Option<BoundingBox2D> {
        self.as_shape().bounding_rect()
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.as_shape().draw(canvas);
    }

    pub fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.as_shape_mut().load_from_cad_json(json)
    }

    /// The block definition, when this shape is one
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            ShapeType::Block(b) => Some(b),
            _ => None,
        }
    }
}

impl Persist for ShapeType {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.as_shape_mut().persist(ar)
    }
}

/// Diagnostic one-liner: type, color, visibility, line type and weight
impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attrs = self.common();
        write!(
            f,
            "Type:{} - Color({:02x},{:02x},{:02x}), {}{}lineType:{}, lineWeight:{}",
            self.kind().name(),
            attrs.color.r,
            attrs.color.g,
            attrs.color.b,
            if attrs.visible { "" } else { "Invisible " },
            if attrs.transparent { "Transparent " } else { "" },
            attrs.line_type_name,
            attrs.line_weight,
        )
    }
}

/// Persist an owned shape list: a count, then per shape its kind tag and
/// record. Loading instantiates each shape through the registry.
pub fn persist_shapes(ar: &mut dyn Archive, shapes: &mut Vec<ShapeType>) -> Result<()> {
    let mut count = persist_count(ar, shapes.len())?;
    if ar.is_saving() {
        for shape in shapes.iter_mut() {
            let mut tag = shape.kind().tag();
            ar.int(&mut tag)?;
            shape.persist(ar)?;
        }
    } else {
        shapes.clear();
        while count > 0 {
            let mut tag = 0;
            ar.int(&mut tag)?;
            let mut shape = create_shape(ShapeKind::try_from(tag)?)?;
            shape.persist(ar)?;
            shapes.push(shape);
            count -= 1;
        }
    }
    Ok(())
}

/// Union of the bounds of several shapes
pub(crate) fn union_bounds<'a>(shapes: impl IntoIterator<Item = &'a ShapeType>) -> Option<BoundingBox2D> {
    shapes
        .into_iter()
        .fold(None, |acc, shape| BoundingBox2D::union(acc, shape.bounding_rect()))
}
