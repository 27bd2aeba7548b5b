//! Shape kinds and their stable persisted tags

use crate::error::{Result, ShapeError};
use std::fmt;

/// Closed enumeration of shape kinds
///
/// Discriminants are the persisted kind tag and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ShapeKind {
    None = -1,
    Face3D = 0,
    Arc = 1,
    Block = 2,
    Circle = 3,
    Dimension = 4,
    DimAligned = 5,
    DimLinear = 6,
    DimRadial = 7,
    DimDiametric = 8,
    DimAngular = 9,
    DimAngular3P = 10,
    DimOrdinate = 11,
    Ellipse = 12,
    Hatch = 13,
    Image = 14,
    Insert = 15,
    Leader = 16,
    Line = 17,
    LwPolyline = 18,
    MText = 19,
    Dot = 20,
    Polyline = 21,
    Ray = 22,
    Solid = 23,
    Spline = 24,
    Text = 25,
    Trace = 26,
    Underlay = 27,
    Vertex = 28,
    Viewport = 29,
    XLine = 30,
    Layer = 127,
    Drawing = 128,
}

impl ShapeKind {
    /// Number of entity kinds (`Face3D` through `XLine`)
    pub const COUNT: i32 = 31;

    /// Every kind, sentinel included
    pub const ALL: [ShapeKind; 34] = [
        ShapeKind::None,
        ShapeKind::Face3D,
        ShapeKind::Arc,
        ShapeKind::Block,
        ShapeKind::Circle,
        ShapeKind::Dimension,
        ShapeKind::DimAligned,
        ShapeKind::DimLinear,
        ShapeKind::DimRadial,
        ShapeKind::DimDiametric,
        ShapeKind::DimAngular,
        ShapeKind::DimAngular3P,
        ShapeKind::DimOrdinate,
        ShapeKind::Ellipse,
        ShapeKind::Hatch,
        ShapeKind::Image,
        ShapeKind::Insert,
        ShapeKind::Leader,
        ShapeKind::Line,
        ShapeKind::LwPolyline,
        ShapeKind::MText,
        ShapeKind::Dot,
        ShapeKind::Polyline,
        ShapeKind::Ray,
        ShapeKind::Solid,
        ShapeKind::Spline,
        ShapeKind::Text,
        ShapeKind::Trace,
        ShapeKind::Underlay,
        ShapeKind::Vertex,
        ShapeKind::Viewport,
        ShapeKind::XLine,
        ShapeKind::Layer,
        ShapeKind::Drawing,
    ];

    /// Raw persisted tag
    pub fn tag(self) -> i32 {
        self as i32
    }

    /// Display name; total over every kind
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::None => "none",
            ShapeKind::Face3D => "3dface",
            ShapeKind::Arc => "arc",
            ShapeKind::Block => "block",
            ShapeKind::Circle => "circle",
            ShapeKind::Dimension => "dimension",
            ShapeKind::DimAligned => "dim_aligned",
            ShapeKind::DimLinear => "dim_linear",
            ShapeKind::DimRadial => "dim_radial",
            ShapeKind::DimDiametric => "dim_diametric",
            ShapeKind::DimAngular => "dim_angular",
            ShapeKind::DimAngular3P => "dim_angular_3p",
            ShapeKind::DimOrdinate => "dim_ordinate",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Hatch => "hatch",
            ShapeKind::Image => "image",
            ShapeKind::Insert => "insert",
            ShapeKind::Leader => "leader",
            ShapeKind::Line => "line",
            ShapeKind::LwPolyline => "lwpolyline",
            ShapeKind::MText => "mtext",
            ShapeKind::Dot => "dot",
            ShapeKind::Polyline => "polyline",
            ShapeKind::Ray => "ray",
            ShapeKind::Solid => "solid",
            ShapeKind::Spline => "spline",
            ShapeKind::Text => "text",
            ShapeKind::Trace => "trace",
            ShapeKind::Underlay => "underlay",
            ShapeKind::Vertex => "vertex",
            ShapeKind::Viewport => "viewport",
            ShapeKind::XLine => "xline",
            ShapeKind::Layer => "layer",
            ShapeKind::Drawing => "drawing",
        }
    }

    /// True for the eight dimension kinds
    pub fn is_dimension(self) -> bool {
        (ShapeKind::Dimension.tag()..=ShapeKind::DimOrdinate.tag()).contains(&self.tag())
    }
}

impl TryFrom<i32> for ShapeKind {
    type Error = ShapeError;

    fn try_from(tag: i32) -> Result<Self> {
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == tag)
            .ok_or(ShapeError::UnknownShapeKind(tag))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
