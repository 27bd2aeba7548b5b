//! Entity name registry
//!
//! Maps CAD entity names to shape constructors. Built once on first use and
//! read-only afterwards.

use super::*;
use crate::error::{Result, ShapeError};
use ahash::AHashMap;
use once_cell::sync::Lazy;

type Constructor = fn() -> ShapeType;

/// Every registered entity name, its kind and constructor
static REGISTRY: [(&str, ShapeKind, Constructor); 31] = [
    ("3DFACE", ShapeKind::Face3D, || ShapeType::Face3D(Face3D::default())),
    ("ARC", ShapeKind::Arc, || ShapeType::Arc(Arc::default())),
    ("BLOCK", ShapeKind::Block, || ShapeType::Block(Block::default())),
    ("CIRCLE", ShapeKind::Circle, || ShapeType::Circle(Circle::default())),
    ("DIMENSION", ShapeKind::Dimension, || {
        ShapeType::Dimension(Dimension::new(DimensionType::Generic))
    }),
    ("AcDbAlignedDimension", ShapeKind::DimAligned, || {
        ShapeType::Dimension(Dimension::new(DimensionType::Aligned))
    }),
    ("AcDbRotatedDimension", ShapeKind::DimLinear, || {
        ShapeType::Dimension(Dimension::new(DimensionType::Linear))
    }),
    ("AcDbRadialDimension", ShapeKind::DimRadial, || {
        ShapeType::Dimension(Dimension::new(DimensionType::Radial))
    }),
    ("AcDbDiametricDimension", ShapeKind::DimDiametric, || {
        ShapeType::Dimension(Dimension::new(DimensionType::Diametric))
    }),
    ("AcDb2LineAngularDimension", ShapeKind::DimAngular, || {
        ShapeType::Dimension(Dimension::new(DimensionType::Angular))
    }),
    ("AcDb3PointAngularDimension", ShapeKind::DimAngular3P, || {
        ShapeType::Dimension(Dimension::new(DimensionType::Angular3Point))
    }),
    ("AcDbOrdinateDimension", ShapeKind::DimOrdinate, || {
        ShapeType::Dimension(Dimension::new(DimensionType::Ordinate))
    }),
    ("ELLIPSE", ShapeKind::Ellipse, || ShapeType::Ellipse(Ellipse::default())),
    ("HATCH", ShapeKind::Hatch, || ShapeType::Hatch(Hatch::default())),
    ("IMAGE", ShapeKind::Image, || ShapeType::Image(Image::default())),
    ("INSERT", ShapeKind::Insert, || ShapeType::Insert(Insert::default())),
    ("LEADER", ShapeKind::Leader, || ShapeType::Leader(Leader::default())),
    ("LINE", ShapeKind::Line, || ShapeType::Line(Line::default())),
    ("LWPOLYLINE", ShapeKind::LwPolyline, || ShapeType::LwPolyline(LwPolyline::default())),
    ("MTEXT", ShapeKind::MText, || ShapeType::MText(MText::default())),
    ("POINT", ShapeKind::Dot, || ShapeType::Dot(Dot::default())),
    ("POLYLINE", ShapeKind::Polyline, || ShapeType::Polyline(Polyline::default())),
    ("RAY", ShapeKind::Ray, || ShapeType::Ray(Ray::default())),
    ("SOLID", ShapeKind::Solid, || ShapeType::Solid(Solid::default())),
    ("SPLINE", ShapeKind::Spline, || ShapeType::Spline(Spline::default())),
    ("TEXT", ShapeKind::Text, || ShapeType::Text(Text::default())),
    ("TRACE", ShapeKind::Trace, || ShapeType::Trace(Trace::default())),
    ("UNDERLAY", ShapeKind::Underlay, || ShapeType::Underlay(Underlay::default())),
    ("VERTEX", ShapeKind::Vertex, || ShapeType::Vertex(Vertex::default())),
    ("VIEWPORT", ShapeKind::Viewport, || ShapeType::Viewport(Viewport::default())),
    ("XLINE", ShapeKind::XLine, || ShapeType::XLine(XLine::default())),
];

static BY_NAME: Lazy<AHashMap<&'static str, Constructor>> = Lazy::new(|| {
    REGISTRY
        .iter()
        .map(|(name, _, ctor)| (*name, *ctor))
        .collect()
});

static BY_KIND: Lazy<AHashMap<ShapeKind, (&'static str, Constructor)>> = Lazy::new(|| {
    REGISTRY
        .iter()
        .map(|(name, kind, ctor)| (*kind, (*name, *ctor)))
        .collect()
});

/// Instantiate the shape registered under a case-sensitive entity name
pub fn create_shape_from_entity_name(name: &str) -> Result<ShapeType> {
    tracing::trace!(entity = name, "registry lookup");
    BY_NAME
        .get(name)
        .map(|ctor| ctor())
        .ok_or_else(|| ShapeError::NotFound(name.to_string()))
}

/// Instantiate a shape from its kind, as deserialization does
pub fn create_shape(kind: ShapeKind) -> Result<ShapeType> {
    BY_KIND
        .get(&kind)
        .map(|(_, ctor)| ctor())
        .ok_or(ShapeError::UnknownShapeKind(kind.tag()))
}

/// Entity name registered for a kind; `None` for the sentinel and the
/// container kinds
pub fn entity_name(kind: ShapeKind) -> Option<&'static str> {
    BY_KIND.get(&kind).map(|(name, _)| *name)
}

/// All registered entity names with their kinds, in registry order
pub fn registered() -> impl Iterator<Item = (&'static str, ShapeKind)> {
    REGISTRY.iter().map(|(name, kind, _)| (*name, *kind))
}
