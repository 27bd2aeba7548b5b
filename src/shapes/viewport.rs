//! Paper-space viewport

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, PolyPoint, Transform, Vector2, Vector3};

/// Rectangular window onto model space
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub common: AttributeSet,
    /// Center in paper space
    pub center: Vector3,
    pub width: f64,
    pub height: f64,
    /// Model-space point shown at the center
    pub view_center: Vector2,
    /// Model-space height shown
    pub view_height: f64,
    pub id: i32,
}

impl Viewport {
    pub fn new(center: Vector3, width: f64, height: f64) -> Self {
        Viewport {
            common: AttributeSet::new(),
            center,
            width,
            height,
            view_center: Vector2::ZERO,
            view_height: height,
            id: 1,
        }
    }

    /// Zoom factor from model space to paper space
    pub fn scale(&self) -> f64 {
        if self.view_height.abs() < 1e-10 {
            1.0
        } else {
            self.height / self.view_height
        }
    }

    fn outline(&self) -> [PolyPoint; 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let c = self.center;
        [
            PolyPoint::new(c.x - hw, c.y - hh, c.z, 0.0),
            PolyPoint::new(c.x + hw, c.y - hh, c.z, 0.0),
            PolyPoint::new(c.x + hw, c.y + hh, c.z, 0.0),
            PolyPoint::new(c.x - hw, c.y + hh, c.z, 0.0),
        ]
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Vector3::ZERO, 297.0, 210.0)
    }
}

impl Shape for Viewport {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Viewport
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.center.x = -self.center.x;
    }

    fn flip_y(&mut self) {
        self.center.y = -self.center.y;
    }

    fn flip_z(&mut self) {
        self.center.z = -self.center.z;
    }

    fn transform(&mut self, transform: &Transform, _right_handed: bool) {
        self.center = transform.apply(self.center);
        self.width *= transform.apply_direction_2d(Vector2::UNIT_X).length();
        self.height *= transform.apply_direction_2d(Vector2::UNIT_Y).length();
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        let half = Vector2::new(self.width.abs() / 2.0, self.height.abs() / 2.0);
        let c = self.center.xy();
        Some(BoundingBox2D::new(c - half, c + half))
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let outline = self.outline();
        canvas.render(
            Primitive::Polyline {
                vertices: &outline,
                closed: true,
                filled: false,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.center = json.point("center")?;
        self.width = json.f64("width")?;
        self.height = json.f64("height")?;
        self.view_center = json.vector2_or("viewCenter", Vector2::ZERO)?;
        self.view_height = json.f64_or("viewHeight", self.height)?;
        self.id = json.i32_or("id", 1)?;
        Ok(())
    }
}

impl Persist for Viewport {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.center.persist(ar)?;
        ar.double(&mut self.width)?;
        ar.double(&mut self.height)?;
        self.view_center.persist(ar)?;
        ar.double(&mut self.view_height)?;
        ar.int(&mut self.id)
    }
}
