//! Lightweight polyline shape

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::{poly_point_from, CadJsonObject};
use crate::types::poly_point::poly_bounds;
use crate::types::{BoundingBox2D, PolyPoint, Transform};

/// Planar polyline with bulged segments and a constant width
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LwPolyline {
    pub common: AttributeSet,
    pub vertices: Vec<PolyPoint>,
    pub closed: bool,
    pub constant_width: f64,
}

impl LwPolyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vertices(vertices: Vec<PolyPoint>, closed: bool) -> Self {
        LwPolyline {
            vertices,
            closed,
            ..Self::default()
        }
    }

    pub fn add_vertex(&mut self, vertex: PolyPoint) {
        self.vertices.push(vertex);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

impl Shape for LwPolyline {
    fn kind(&self) -> ShapeKind {
        ShapeKind::LwPolyline
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.vertices.iter_mut().for_each(PolyPoint::flip_x);
    }

    fn flip_y(&mut self) {
        self.vertices.iter_mut().for_each(PolyPoint::flip_y);
    }

    fn flip_z(&mut self) {
        self.vertices.iter_mut().for_each(PolyPoint::flip_z);
    }

    fn transform(&mut self, transform: &Transform, right_handed: bool) {
        for vertex in self.vertices.iter_mut() {
            vertex.transform(transform, right_handed);
        }
        self.constant_width *= transform.scale_factor_xy();
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        poly_bounds(&self.vertices, self.closed)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Polyline {
                vertices: &self.vertices,
                closed: self.closed,
                filled: false,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        let elevation = json.f64_or("elevation", 0.0)?;
        self.vertices = json
            .array("vertices")?
            .iter()
            .map(|v| {
                poly_point_from(v, json.entity(), "vertices").map(|mut p| {
                    p.z = elevation;
                    p
                })
            })
            .collect::<Result<_>>()?;
        self.closed = json.bool_or("closed", false)?;
        self.constant_width = json.f64_or("constantWidth", 0.0)?;
        Ok(())
    }
}

impl Persist for LwPolyline {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.vertices.persist(ar)?;
        ar.boolean(&mut self.closed)?;
        ar.double(&mut self.constant_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector2;
    use serde_json::json;

    #[test]
    fn test_bulged_segment_bounds() {
        // half circle below the chord from (0,0) to (2,0)
        let poly = LwPolyline::from_vertices(
            vec![PolyPoint::new(0.0, 0.0, 0.0, 1.0), PolyPoint::new(2.0, 0.0, 0.0, 0.0)],
            false,
        );
        let rect = poly.bounding_rect().unwrap();
        assert!((rect.min.y + 1.0).abs() < 1e-9);
        assert!(rect.max.y.abs() < 1e-9);
        assert!((rect.max.x - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_has_no_bounds() {
        assert!(LwPolyline::new().bounding_rect().is_none());
    }

    #[test]
    fn test_flip_twice_restores() {
        let original = LwPolyline::from_vertices(
            vec![PolyPoint::new(1.0, 2.0, 0.0, 0.3), PolyPoint::new(-2.0, 5.0, 0.0, -0.7)],
            true,
        );
        let mut poly = original.clone();
        poly.flip_x();
        assert_eq!(poly.vertices[0].bulge, -0.3);
        poly.flip_x();
        assert_eq!(poly, original);
    }

    #[test]
    fn test_load_positional_vertices() {
        let value = json!({
            "vertices": [[0, 0, 0, 0, 0.5], [4, 0], [4, 3, 1, 1, 0]],
            "closed": true,
            "elevation": 2
        });
        let mut poly = LwPolyline::new();
        poly.load_from_cad_json(&CadJsonObject::new("LWPOLYLINE", &value).unwrap())
            .unwrap();
        assert_eq!(poly.vertex_count(), 3);
        assert_eq!(poly.vertices[0], PolyPoint::new(0.0, 0.0, 2.0, 0.5));
        assert_eq!(poly.vertices[1].xy(), Vector2::new(4.0, 0.0));
        assert!(poly.closed);
    }
}
