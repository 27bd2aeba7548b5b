//! Raster image shape

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::{Result, ShapeError};
use crate::io::archive::{persist_flags, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector2, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Image display flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ImageDisplayFlags: i32 {
        const SHOW_IMAGE = 1;
        /// Show when not aligned with the screen
        const SHOW_NOT_ALIGNED = 2;
        const USE_CLIPPING_BOUNDARY = 4;
        const TRANSPARENCY_ON = 8;
    }
}

/// A raster image placed by its lower-left corner and per-pixel U/V vectors
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub common: AttributeSet,
    pub insertion_point: Vector3,
    /// One pixel along the image's width
    pub u_vector: Vector3,
    /// One pixel along the image's height
    pub v_vector: Vector3,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub file_name: String,
    pub display_flags: ImageDisplayFlags,
}

impl Image {
    pub fn new(file_name: impl Into<String>, pixel_width: u32, pixel_height: u32) -> Self {
        Image {
            common: AttributeSet::new(),
            insertion_point: Vector3::ZERO,
            u_vector: Vector3::UNIT_X,
            v_vector: Vector3::UNIT_Y,
            pixel_width,
            pixel_height,
            file_name: file_name.into(),
            display_flags: ImageDisplayFlags::SHOW_IMAGE,
        }
    }

    /// Corners in drawing space, counter-clockwise from the insertion point
    pub fn corners(&self) -> [Vector3; 4] {
        let across = self.u_vector * self.pixel_width as f64;
        let up = self.v_vector * self.pixel_height as f64;
        let p = self.insertion_point;
        [p, p + across, p + across + up, p + up]
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::new("", 1, 1)
    }
}

impl Shape for Image {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Image
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.insertion_point.x = -self.insertion_point.x;
        self.u_vector.x = -self.u_vector.x;
        self.v_vector.x = -self.v_vector.x;
    }

    fn flip_y(&mut self) {
        self.insertion_point.y = -self.insertion_point.y;
        self.u_vector.y = -self.u_vector.y;
        self.v_vector.y = -self.v_vector.y;
    }

    fn flip_z(&mut self) {
        self.insertion_point.z = -self.insertion_point.z;
        self.u_vector.z = -self.u_vector.z;
        self.v_vector.z = -self.v_vector.z;
    }

    fn transform(&mut self, transform: &Transform, _right_handed: bool) {
        self.insertion_point = transform.apply(self.insertion_point);
        self.u_vector = transform.apply_direction(self.u_vector);
        self.v_vector = transform.apply_direction(self.v_vector);
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        let xy: Vec<Vector2> = self.corners().iter().map(Vector3::xy).collect();
        BoundingBox2D::from_points(&xy)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Image {
                insertion_point: self.insertion_point,
                u_vector: self.u_vector,
                v_vector: self.v_vector,
                width: self.pixel_width,
                height: self.pixel_height,
                file_name: &self.file_name,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.insertion_point = json.point("insertionPoint")?;
        self.u_vector = json.point("uVector")?;
        self.v_vector = json.point("vVector")?;

        let size = json.array("imageSize")?;
        let dimension = |i: usize| {
            size.get(i)
                .and_then(|v| v.as_u64())
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ShapeError::invalid(json.entity(), "imageSize", "[width, height] in pixels"))
        };
        self.pixel_width = dimension(0)?;
        self.pixel_height = dimension(1)?;

        self.file_name = json.string_or("fileName", "")?;
        self.display_flags = ImageDisplayFlags::from_bits_retain(
            json.i32_or("displayFlags", ImageDisplayFlags::SHOW_IMAGE.bits())?,
        );
        Ok(())
    }
}

impl Persist for Image {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.insertion_point.persist(ar)?;
        self.u_vector.persist(ar)?;
        self.v_vector.persist(ar)?;
        ar.uint(&mut self.pixel_width)?;
        ar.uint(&mut self.pixel_height)?;
        ar.string(&mut self.file_name)?;
        persist_flags(ar, &mut self.display_flags)
    }
}
