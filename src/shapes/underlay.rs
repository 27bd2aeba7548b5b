//! Underlay shape (PDF, DWF or DGN reference)

use super::insert::transform_placement;
use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{persist_flags, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector2, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Display flags for underlays
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct UnderlayFlags: i32 {
        const CLIPPING = 1;
        const ON = 2;
        const MONOCHROME = 4;
        const ADJUST_FOR_BACKGROUND = 8;
    }
}

/// Externally referenced sheet placed like a block reference
#[derive(Debug, Clone, PartialEq)]
pub struct Underlay {
    pub common: AttributeSet,
    pub definition_name: String,
    pub insertion_point: Vector3,
    pub scale: Vector3,
    /// Rotation in radians
    pub rotation: f64,
    /// Clip polygon in underlay space
    pub clip_boundary: Vec<Vector2>,
    pub flags: UnderlayFlags,
}

impl Underlay {
    pub fn new(definition_name: impl Into<String>) -> Self {
        Underlay {
            common: AttributeSet::new(),
            definition_name: definition_name.into(),
            insertion_point: Vector3::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: 0.0,
            clip_boundary: Vec::new(),
            flags: UnderlayFlags::ON,
        }
    }

    pub fn placement(&self) -> Transform {
        Transform::from_placement(self.insertion_point, self.scale, self.rotation)
    }
}

impl Default for Underlay {
    fn default() -> Self {
        Self::new("")
    }
}

impl Shape for Underlay {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Underlay
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.insertion_point.x = -self.insertion_point.x;
        self.rotation = -self.rotation;
        self.scale.x = -self.scale.x;
    }

    fn flip_y(&mut self) {
        self.insertion_point.y = -self.insertion_point.y;
        self.rotation = -self.rotation;
        self.scale.y = -self.scale.y;
    }

    fn flip_z(&mut self) {
        self.insertion_point.z = -self.insertion_point.z;
        self.scale.z = -self.scale.z;
    }

    fn transform(&mut self, transform: &Transform, right_handed: bool) {
        transform_placement(
            transform,
            right_handed,
            &mut self.insertion_point,
            &mut self.scale,
            &mut self.rotation,
        );
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        if self.clip_boundary.is_empty() {
            return Some(BoundingBox2D::from_point(self.insertion_point.xy()));
        }
        let placement = self.placement();
        let corners: Vec<Vector2> = self
            .clip_boundary
            .iter()
            .map(|p| placement.apply_2d(*p))
            .collect();
        BoundingBox2D::from_points(&corners)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let placement = self.placement();
        canvas.render(
            Primitive::Image {
                insertion_point: self.insertion_point,
                u_vector: placement.apply_direction(Vector3::UNIT_X),
                v_vector: placement.apply_direction(Vector3::UNIT_Y),
                width: 1,
                height: 1,
                file_name: &self.definition_name,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.definition_name = json.str("definition")?.to_string();
        self.insertion_point = json.point("insertionPoint")?;
        self.scale = json.point_or("scale", Vector3::new(1.0, 1.0, 1.0))?;
        self.rotation = json.degrees_or("rotation", 0.0)?;
        self.clip_boundary = json
            .points_or_empty("clipBoundary")?
            .iter()
            .map(Vector3::xy)
            .collect();
        self.flags = UnderlayFlags::from_bits_retain(json.i32_or("flags", UnderlayFlags::ON.bits())?);
        Ok(())
    }
}

impl Persist for Underlay {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        ar.string(&mut self.definition_name)?;
        self.insertion_point.persist(ar)?;
        self.scale.persist(ar)?;
        ar.double(&mut self.rotation)?;
        self.clip_boundary.persist(ar)?;
        persist_flags(ar, &mut self.flags)
    }
}
