//! Multi-line text shape

use super::text::text_box;
use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::{Result, ShapeError};
use crate::io::archive::{persist_enum, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector2, Vector3};

/// Attachment point of the text block relative to its insertion point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachmentPoint {
    #[default]
    TopLeft = 1,
    TopCenter = 2,
    TopRight = 3,
    MiddleLeft = 4,
    MiddleCenter = 5,
    MiddleRight = 6,
    BottomLeft = 7,
    BottomCenter = 8,
    BottomRight = 9,
}

impl AttachmentPoint {
    /// Horizontal share of the box left of the insertion point (0, ½, 1)
    fn horizontal_offset(self) -> f64 {
        match (self as i32 - 1) % 3 {
            0 => 0.0,
            1 => 0.5,
            _ => 1.0,
        }
    }

    /// Vertical share of the box below the insertion point (1, ½, 0)
    fn vertical_offset(self) -> f64 {
        match (self as i32 - 1) / 3 {
            0 => 1.0,
            1 => 0.5,
            _ => 0.0,
        }
    }
}

impl From<AttachmentPoint> for i32 {
    fn from(value: AttachmentPoint) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for AttachmentPoint {
    type Error = ShapeError;

    fn try_from(value: i32) -> Result<Self> {
        use AttachmentPoint::*;
        match value {
            1 => Ok(TopLeft),
            2 => Ok(TopCenter),
            3 => Ok(TopRight),
            4 => Ok(MiddleLeft),
            5 => Ok(MiddleCenter),
            6 => Ok(MiddleRight),
            7 => Ok(BottomLeft),
            8 => Ok(BottomCenter),
            9 => Ok(BottomRight),
            _ => Err(ShapeError::Custom(format!("invalid attachment point: {}", value))),
        }
    }
}

/// Paragraph text wrapped to `reference_width`
#[derive(Debug, Clone, PartialEq)]
pub struct MText {
    pub common: AttributeSet,
    pub insertion_point: Vector3,
    pub direction: Vector2,
    pub height: f64,
    /// Wrapping width; 0 means no wrapping
    pub reference_width: f64,
    pub attachment: AttachmentPoint,
    /// Line spacing factor
    pub line_spacing: f64,
    /// Contents, possibly with inline formatting codes
    pub text: String,
    pub style_name: String,
}

impl MText {
    pub fn new() -> Self {
        MText {
            common: AttributeSet::new(),
            insertion_point: Vector3::ZERO,
            direction: Vector2::UNIT_X,
            height: 1.0,
            reference_width: 0.0,
            attachment: AttachmentPoint::TopLeft,
            line_spacing: 1.0,
            text: String::new(),
            style_name: "STANDARD".to_string(),
        }
    }

    /// Paragraphs split on `\P` and line feeds
    pub fn lines(&self) -> Vec<&str> {
        self.text
            .split('\n')
            .flat_map(|line| line.split("\\P"))
            .collect()
    }

    fn estimated_size(&self) -> (f64, f64) {
        let lines = self.lines();
        let width = if self.reference_width > 0.0 {
            self.reference_width
        } else {
            lines
                .iter()
                .map(|line| line.chars().count() as f64 * self.height * 0.6)
                .fold(0.0, f64::max)
        };
        let height = lines.len() as f64 * self.height * self.line_spacing;
        (width, height)
    }
}

impl Default for MText {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for MText {
    fn kind(&self) -> ShapeKind {
        ShapeKind::MText
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.insertion_point.x = -self.insertion_point.x;
        self.direction.x = -self.direction.x;
    }

    fn flip_y(&mut self) {
        self.insertion_point.y = -self.insertion_point.y;
        self.direction.y = -self.direction.y;
    }

    fn flip_z(&mut self) {
        self.insertion_point.z = -self.insertion_point.z;
    }

    fn transform(&mut self, transform: &Transform, _right_handed: bool) {
        let scale = transform.scale_factor_xy();
        self.insertion_point = transform.apply(self.insertion_point);
        self.direction = transform.apply_direction_2d(self.direction);
        self.height *= scale;
        self.reference_width *= scale;
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        let (width, height) = self.estimated_size();
        let along = if self.direction.length_squared() > 0.0 {
            self.direction.normalize()
        } else {
            Vector2::UNIT_X
        };
        let up = Vector2::new(-along.y, along.x);
        let origin = self.insertion_point.xy()
            - along * (width * self.attachment.horizontal_offset())
            - up * (height * self.attachment.vertical_offset());
        text_box(origin, along, width, height, false)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Text {
                position: self.insertion_point,
                direction: self.direction,
                height: self.height,
                text: &self.text,
                style: &self.style_name,
                upside_down: false,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.insertion_point = json.point("insertionPoint")?;
        self.text = json.str("text")?.to_string();
        self.height = json.f64("height")?;
        self.direction = if json.has("direction") {
            json.vector2_or("direction", Vector2::UNIT_X)?
        } else {
            Vector2::from_angle(json.degrees_or("rotation", 0.0)?)
        };
        self.reference_width = json.f64_or("width", 0.0)?;
        self.attachment = AttachmentPoint::try_from(json.i32_or("attachmentPoint", 1)?)
            .map_err(|_| ShapeError::invalid(json.entity(), "attachmentPoint", "1 to 9"))?;
        self.line_spacing = json.f64_or("lineSpacing", 1.0)?;
        self.style_name = json.string_or("style", "STANDARD")?;
        Ok(())
    }
}

impl Persist for MText {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.insertion_point.persist(ar)?;
        self.direction.persist(ar)?;
        ar.double(&mut self.height)?;
        ar.double(&mut self.reference_width)?;
        persist_enum(ar, &mut self.attachment, "attachment point")?;
        ar.double(&mut self.line_spacing)?;
        ar.string(&mut self.text)?;
        ar.string(&mut self.style_name)
    }
}
