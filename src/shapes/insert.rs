//! Block reference shape

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector2, Vector3};

/// Reference to a named block, placed by scale, then rotation about Z, then
/// translation to `insertion_point`
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub common: AttributeSet,
    pub block_name: String,
    pub insertion_point: Vector3,
    pub scale: Vector3,
    /// Rotation in radians
    pub rotation: f64,
}

impl Insert {
    pub fn new(block_name: impl Into<String>, insertion_point: Vector3) -> Self {
        Insert {
            common: AttributeSet::new(),
            block_name: block_name.into(),
            insertion_point,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: 0.0,
        }
    }

    /// Map from block space to drawing space
    pub fn placement(&self) -> Transform {
        Transform::from_placement(self.insertion_point, self.scale, self.rotation)
    }
}

impl Default for Insert {
    fn default() -> Self {
        Self::new("", Vector3::ZERO)
    }
}

/// Push a placement (insertion point, per-axis scale, Z rotation) through
/// an affine map. Rotation follows the mapped local X axis; a mirroring map
/// lands in the Y scale.
pub(super) fn transform_placement(
    transform: &Transform,
    right_handed: bool,
    insertion_point: &mut Vector3,
    scale: &mut Vector3,
    rotation: &mut f64,
) {
    let local_x = Vector2::from_angle(*rotation);
    let local_y = Vector2::new(-local_x.y, local_x.x);
    let mapped_x = transform.apply_direction_2d(local_x);
    let mapped_y = transform.apply_direction_2d(local_y);

    *insertion_point = transform.apply(*insertion_point);
    *rotation = mapped_x.angle();
    scale.x *= mapped_x.length();
    scale.y *= mapped_y.length();
    if !right_handed {
        scale.y = -scale.y;
    }
    scale.z *= transform.apply_direction(Vector3::UNIT_Z).z;
}

impl Shape for Insert {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Insert
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

    /// Without the block at hand an insert bounds to its insertion point;
    /// a drawing resolves the block instead.
    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        Some(BoundingBox2D::from_point(self.insertion_point.xy()))
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::BlockReference {
                name: &self.block_name,
                transform: self.placement(),
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.block_name = json.str("name")?.to_string();
        self.insertion_point = json.point("insertionPoint")?;
        self.scale = json.point_or("scale", Vector3::new(1.0, 1.0, 1.0))?;
        self.rotation = json.degrees_or("rotation", 0.0)?;
        Ok(())
    }
}

impl Persist for Insert {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        ar.string(&mut self.block_name)?;
        self.insertion_point.persist(ar)?;
        self.scale.persist(ar)?;
        ar.double(&mut self.rotation)
    }
}
