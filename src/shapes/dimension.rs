//! Dimension shapes
//!
//! All eight dimension kinds share [`Dimension`]; the [`DimensionType`]
//! decides which kind it reports and which entity name it was created
//! from.

use super::mtext::AttachmentPoint;
use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::{Result, ShapeError};
use crate::io::archive::{persist_enum, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector2, Vector3};
use std::mem;

/// Text height used to draw the measurement
pub const DIMENSION_TEXT_HEIGHT: f64 = 2.5;

/// Dimension subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimensionType {
    /// Plain `DIMENSION` entity with no subclass
    #[default]
    Generic,
    Aligned,
    /// Rotated linear dimension
    Linear,
    Radial,
    Diametric,
    /// Angle between two lines
    Angular,
    /// Angle given by a vertex and two points
    Angular3Point,
    Ordinate,
}

impl DimensionType {
    pub fn kind(self) -> ShapeKind {
        match self {
            DimensionType::Generic => ShapeKind::Dimension,
            DimensionType::Aligned => ShapeKind::DimAligned,
            DimensionType::Linear => ShapeKind::DimLinear,
            DimensionType::Radial => ShapeKind::DimRadial,
            DimensionType::Diametric => ShapeKind::DimDiametric,
            DimensionType::Angular => ShapeKind::DimAngular,
            DimensionType::Angular3Point => ShapeKind::DimAngular3P,
            DimensionType::Ordinate => ShapeKind::DimOrdinate,
        }
    }
}

/// Entity name for a DXF `dimensionType` code. Only the low three bits
/// carry the subtype; the rest are display flags.
pub fn entity_name_for_dxf_type(code: i32) -> &'static str {
    match code & 0x07 {
        0 => "AcDbRotatedDimension",
        1 => "AcDbAlignedDimension",
        2 => "AcDb2LineAngularDimension",
        3 => "AcDbDiametricDimension",
        4 => "AcDbRadialDimension",
        5 => "AcDb3PointAngularDimension",
        6 => "AcDbOrdinateDimension",
        _ => "DIMENSION",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub common: AttributeSet,
    pub dimension_type: DimensionType,
    pub definition_point: Vector3,
    pub text_mid_point: Vector3,
    pub first_point: Vector3,
    pub second_point: Vector3,
    pub third_point: Vector3,
    pub arc_point: Vector3,
    /// Dimension line direction of linear dimensions
    pub direction: Vector2,
    /// Text baseline direction
    pub text_direction: Vector2,
    pub leader_length: f64,
    /// Measured value
    pub measurement: f64,
    /// Override text; empty shows the measurement
    pub text: String,
    pub style_name: String,
    pub attachment: AttachmentPoint,
}

impl Dimension {
    pub fn new(dimension_type: DimensionType) -> Self {
        Dimension {
            common: AttributeSet::new(),
            dimension_type,
            definition_point: Vector3::ZERO,
            text_mid_point: Vector3::ZERO,
            first_point: Vector3::ZERO,
            second_point: Vector3::ZERO,
            third_point: Vector3::ZERO,
            arc_point: Vector3::ZERO,
            direction: Vector2::UNIT_X,
            text_direction: Vector2::UNIT_X,
            leader_length: 0.0,
            measurement: 0.0,
            text: String::new(),
            style_name: "STANDARD".to_string(),
            attachment: AttachmentPoint::MiddleCenter,
        }
    }

    /// Text shown on the drawing
    pub fn display_text(&self) -> String {
        if self.text.is_empty() {
            format!("{:.2}", self.measurement)
        } else {
            self.text.clone()
        }
    }

    /// Dimension line angle in radians
    pub fn rotation(&self) -> f64 {
        self.direction.angle()
    }

    /// Text angle in radians
    pub fn text_rotation(&self) -> f64 {
        self.text_direction.angle()
    }

    pub fn is_angular(&self) -> bool {
        matches!(
            self.dimension_type,
            DimensionType::Angular | DimensionType::Angular3Point
        )
    }

    fn points_mut(&mut self) -> [&mut Vector3; 6] {
        [
            &mut self.definition_point,
            &mut self.text_mid_point,
            &mut self.first_point,
            &mut self.second_point,
            &mut self.third_point,
            &mut self.arc_point,
        ]
    }

    /// Angular dimensions measure counter-clockwise from the first
    /// point to the second, so a mirror swaps them.
    fn mirror(&mut self) {
        if self.is_angular() {
            mem::swap(&mut self.first_point, &mut self.second_point);
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::new(DimensionType::Generic)
    }
}

impl Shape for Dimension {
    fn kind(&self) -> ShapeKind {
        self.dimension_type.kind()
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        for p in self.points_mut() {
            p.x = -p.x;
        }
        self.direction.x = -self.direction.x;
        self.text_direction.x = -self.text_direction.x;
        self.mirror();
    }

    fn flip_y(&mut self) {
        for p in self.points_mut() {
            p.y = -p.y;
        }
        self.direction.y = -self.direction.y;
        self.text_direction.y = -self.text_direction.y;
        self.mirror();
    }

    fn flip_z(&mut self) {
        for p in self.points_mut() {
            p.z = -p.z;
        }
    }

    fn transform(&mut self, transform: &Transform, right_handed: bool) {
        for p in self.points_mut() {
            *p = transform.apply(*p);
        }
        self.direction = transform.apply_direction_2d(self.direction);
        self.text_direction = transform.apply_direction_2d(self.text_direction);
        self.leader_length *= transform.scale_factor_xy();
        if !right_handed {
            self.mirror();
        }
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&[
            self.definition_point.xy(),
            self.text_mid_point.xy(),
            self.first_point.xy(),
            self.second_point.xy(),
            self.third_point.xy(),
            self.arc_point.xy(),
        ])
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Line {
                start: self.first_point,
                end: self.definition_point,
            },
            &self.common,
        );
        canvas.render(
            Primitive::Line {
                start: self.second_point,
                end: self.definition_point,
            },
            &self.common,
        );
        let label = self.display_text();
        canvas.render(
            Primitive::Text {
                position: self.text_mid_point,
                direction: self.text_direction,
                height: DIMENSION_TEXT_HEIGHT,
                text: &label,
                style: &self.style_name,
                upside_down: false,
            },
            &self.common,
        );
    }

    /// Absent points default to the definition point
    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        let definition = json.point("definitionPoint")?;
        self.definition_point = definition;
        self.text_mid_point = json.point_or("textMidPoint", definition)?;
        self.first_point = json.point_or("firstPoint", definition)?;
        self.second_point = json.point_or("secondPoint", definition)?;
        self.third_point = json.point_or("thirdPoint", definition)?;
        self.arc_point = json.point_or("arcPoint", definition)?;
        self.direction = Vector2::from_angle(json.degrees_or("rotation", 0.0)?);
        self.text_direction = Vector2::from_angle(json.degrees_or("textRotation", 0.0)?);
        self.leader_length = json.f64_or("leaderLength", 0.0)?;
        self.measurement = json.f64_or("measurement", 0.0)?;
        self.text = json.string_or("text", "")?;
        self.style_name = json.string_or("style", "STANDARD")?;
        self.attachment = AttachmentPoint::try_from(json.i32_or("attachmentPoint", 5)?)
            .map_err(|_| ShapeError::invalid(json.entity(), "attachmentPoint", "1 to 9"))?;
        Ok(())
    }
}

impl Persist for Dimension {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        for p in self.points_mut() {
            p.persist(ar)?;
        }
        self.direction.persist(ar)?;
        self.text_direction.persist(ar)?;
        ar.double(&mut self.leader_length)?;
        ar.double(&mut self.measurement)?;
        ar.string(&mut self.text)?;
        ar.string(&mut self.style_name)?;
        persist_enum(ar, &mut self.attachment, "attachment point")
    }
}
