//! Stand-alone polyline vertex

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{persist_flags, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, PolyPoint, Transform};
use bitflags::bitflags;

bitflags! {
    /// Vertex flags (DXF group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct VertexFlags: i32 {
        const EXTRA_VERTEX = 1;
        const CURVE_FIT_TANGENT = 2;
        const SPLINE_VERTEX = 8;
        const SPLINE_CONTROL = 16;
        const POLYLINE_3D = 32;
        const POLYGON_MESH = 64;
        const POLYFACE_FACE = 128;
    }
}

/// A vertex carrying its own bulge and segment widths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vertex {
    pub common: AttributeSet,
    pub location: PolyPoint,
    pub start_width: f64,
    pub end_width: f64,
    pub flags: VertexFlags,
}

impl Vertex {
    pub fn new(location: PolyPoint) -> Self {
        Vertex {
            location,
            ..Self::default()
        }
    }
}

impl Shape for Vertex {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Vertex
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.location.flip_x();
    }

    fn flip_y(&mut self) {
        self.location.flip_y();
    }

    fn flip_z(&mut self) {
        self.location.flip_z();
    }

    fn transform(&mut self, transform: &Transform, right_handed: bool) {
        self.location.transform(transform, right_handed);
        let scale = transform.scale_factor_xy();
        self.start_width *= scale;
        self.end_width *= scale;
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        Some(BoundingBox2D::from_point(self.location.xy()))
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Point {
                position: self.location.point(),
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        let base = json.point("basePoint")?;
        self.location = PolyPoint::from_point(base, json.f64_or("bulge", 0.0)?);
        self.start_width = json.f64_or("startWidth", 0.0)?;
        self.end_width = json.f64_or("endWidth", 0.0)?;
        self.flags = VertexFlags::from_bits_retain(json.i32_or("flags", 0)?);
        Ok(())
    }
}

impl Persist for Vertex {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.location.persist(ar)?;
        ar.double(&mut self.start_width)?;
        ar.double(&mut self.end_width)?;
        persist_flags(ar, &mut self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flip_negates_bulge() {
        let mut vertex = Vertex::new(PolyPoint::new(1.0, 2.0, 0.0, 0.5));
        vertex.flip_y();
        assert_eq!(vertex.location, PolyPoint::new(1.0, -2.0, 0.0, -0.5));
        vertex.flip_z();
        assert_eq!(vertex.location.bulge, -0.5);
    }

    #[test]
    fn test_mirroring_transform_negates_bulge() {
        let mut vertex = Vertex::new(PolyPoint::new(1.0, 0.0, 0.0, 1.0));
        vertex.start_width = 1.0;
        let mirror = Transform::from_scaling(crate::types::Vector3::new(-2.0, 2.0, 1.0));
        vertex.transform(&mirror, mirror.is_right_handed());
        assert_eq!(vertex.location.x, -2.0);
        assert_eq!(vertex.location.bulge, -1.0);
        assert!((vertex.start_width - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_load_from_cad_json() {
        let value = json!({"basePoint": [1, 2, 3], "bulge": 0.25, "flags": 32});
        let mut vertex = Vertex::default();
        vertex
            .load_from_cad_json(&CadJsonObject::new("VERTEX", &value).unwrap())
            .unwrap();
        assert_eq!(vertex.location, PolyPoint::new(1.0, 2.0, 3.0, 0.25));
        assert!(vertex.flags.contains(VertexFlags::POLYLINE_3D));

        let value = json!({"bulge": 0.25});
        assert!(Vertex::default()
            .load_from_cad_json(&CadJsonObject::new("VERTEX", &value).unwrap())
            .is_err());
    }
}
