//! Single-line text shape

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::{Result, ShapeError};
use crate::io::archive::{persist_enum, persist_flags, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector2, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Text generation flags (DXF group code 71)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextGenerationFlags: i32 {
        /// Mirrored in X
        const BACKWARD = 2;
        /// Mirrored in Y
        const UPSIDE_DOWN = 4;
    }
}

/// Text horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextHorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
    /// Fit between two points, keeping the aspect ratio
    Aligned,
    /// Centered horizontally and vertically
    Middle,
    /// Fit between two points, adjusting the width
    Fit,
}

impl From<TextHorizontalAlignment> for i32 {
    fn from(value: TextHorizontalAlignment) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for TextHorizontalAlignment {
    type Error = ShapeError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::Left),
            1 => Ok(Self::Center),
            2 => Ok(Self::Right),
            3 => Ok(Self::Aligned),
            4 => Ok(Self::Middle),
            5 => Ok(Self::Fit),
            _ => Err(ShapeError::Custom(format!("invalid horizontal alignment: {}", value))),
        }
    }
}

/// Text vertical alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextVerticalAlignment {
    #[default]
    Baseline,
    Bottom,
    Middle,
    Top,
}

impl From<TextVerticalAlignment> for i32 {
    fn from(value: TextVerticalAlignment) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for TextVerticalAlignment {
    type Error = ShapeError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::Baseline),
            1 => Ok(Self::Bottom),
            2 => Ok(Self::Middle),
            3 => Ok(Self::Top),
            _ => Err(ShapeError::Custom(format!("invalid vertical alignment: {}", value))),
        }
    }
}

/// A single-line text
///
/// The baseline is kept as a direction vector rather than an angle.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub common: AttributeSet,
    pub insertion_point: Vector3,
    /// Second alignment point for aligned and fit text
    pub alignment_point: Vector3,
    pub direction: Vector2,
    pub height: f64,
    pub width_factor: f64,
    /// Oblique angle in radians
    pub oblique: f64,
    pub generation_flags: TextGenerationFlags,
    pub horizontal_alignment: TextHorizontalAlignment,
    pub vertical_alignment: TextVerticalAlignment,
    pub value: String,
    pub style_name: String,
}

impl Text {
    pub fn new() -> Self {
        Text {
            common: AttributeSet::new(),
            insertion_point: Vector3::ZERO,
            alignment_point: Vector3::ZERO,
            direction: Vector2::UNIT_X,
            height: 1.0,
            width_factor: 1.0,
            oblique: 0.0,
            generation_flags: TextGenerationFlags::empty(),
            horizontal_alignment: TextHorizontalAlignment::Left,
            vertical_alignment: TextVerticalAlignment::Baseline,
            value: String::new(),
            style_name: "STANDARD".to_string(),
        }
    }

    pub fn with_value(value: impl Into<String>, insertion_point: Vector3, height: f64) -> Self {
        Text {
            value: value.into(),
            insertion_point,
            alignment_point: insertion_point,
            height,
            ..Self::new()
        }
    }

    /// Baseline angle in radians
    pub fn rotation(&self) -> f64 {
        self.direction.angle()
    }

    pub fn is_upside_down(&self) -> bool {
        self.generation_flags.contains(TextGenerationFlags::UPSIDE_DOWN)
    }

    /// Estimated advance of the whole string
    pub fn estimated_width(&self) -> f64 {
        self.value.chars().count() as f64 * self.height * 0.6 * self.width_factor
    }

    fn mirror(&mut self) {
        self.generation_flags.toggle(TextGenerationFlags::UPSIDE_DOWN);
        self.oblique = -self.oblique;
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

/// Rectangle spanned from `origin` along `direction` by `width` and
/// perpendicular to it by `height`; an upside-down box grows downwards.
pub(super) fn text_box(
    origin: Vector2,
    direction: Vector2,
    width: f64,
    height: f64,
    upside_down: bool,
) -> Option<BoundingBox2D> {
    let along = if direction.length_squared() > 0.0 {
        direction.normalize()
    } else {
        Vector2::UNIT_X
    };
    let mut up = Vector2::new(-along.y, along.x);
    if upside_down {
        up = -up;
    }
    let run = along * width;
    let rise = up * height;
    BoundingBox2D::from_points(&[origin, origin + run, origin + rise, origin + run + rise])
}

impl Shape for Text {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Text
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.insertion_point.x = -self.insertion_point.x;
        self.alignment_point.x = -self.alignment_point.x;
        self.direction.x = -self.direction.x;
        self.mirror();
    }

    fn flip_y(&mut self) {
        self.insertion_point.y = -self.insertion_point.y;
        self.alignment_point.y = -self.alignment_point.y;
        self.direction.y = -self.direction.y;
        self.mirror();
    }

    fn flip_z(&mut self) {
        self.insertion_point.z = -self.insertion_point.z;
        self.alignment_point.z = -self.alignment_point.z;
    }

    fn transform(&mut self, transform: &Transform, right_handed: bool) {
        self.insertion_point = transform.apply(self.insertion_point);
        self.alignment_point = transform.apply(self.alignment_point);
        self.direction = transform.apply_direction_2d(self.direction);
        self.height *= transform.scale_factor_xy();
        if !right_handed {
            self.mirror();
        }
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        text_box(
            self.insertion_point.xy(),
            self.direction,
            self.estimated_width(),
            self.height,
            self.is_upside_down(),
        )
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Text {
                position: self.insertion_point,
                direction: self.direction,
                height: self.height,
                text: &self.value,
                style: &self.style_name,
                upside_down: self.is_upside_down(),
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.insertion_point = json.point("insertionPoint")?;
        self.value = json.str("text")?.to_string();
        self.height = json.f64("height")?;
        self.direction = Vector2::from_angle(json.degrees_or("rotation", 0.0)?);
        self.alignment_point = json.point_or("alignmentPoint", self.insertion_point)?;
        self.width_factor = json.f64_or("widthFactor", 1.0)?;
        self.oblique = json.degrees_or("oblique", 0.0)?;
        self.generation_flags = TextGenerationFlags::from_bits_retain(json.i32_or("generationFlags", 0)?);
        self.horizontal_alignment = TextHorizontalAlignment::try_from(json.i32_or("horizontalAlignment", 0)?)
            .map_err(|_| ShapeError::invalid(json.entity(), "horizontalAlignment", "0 to 5"))?;
        self.vertical_alignment = TextVerticalAlignment::try_from(json.i32_or("verticalAlignment", 0)?)
            .map_err(|_| ShapeError::invalid(json.entity(), "verticalAlignment", "0 to 3"))?;
        self.style_name = json.string_or("style", "STANDARD")?;
        Ok(())
    }
}

impl Persist for Text {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.insertion_point.persist(ar)?;
        self.alignment_point.persist(ar)?;
        self.direction.persist(ar)?;
        ar.double(&mut self.height)?;
        ar.double(&mut self.width_factor)?;
        ar.double(&mut self.oblique)?;
        persist_flags(ar, &mut self.generation_flags)?;
        persist_enum(ar, &mut self.horizontal_alignment, "horizontal alignment")?;
        persist_enum(ar, &mut self.vertical_alignment, "vertical alignment")?;
        ar.string(&mut self.value)?;
        ar.string(&mut self.style_name)
    }
}
