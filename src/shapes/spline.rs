//! Spline shape (NURBS)

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::{Result, ShapeError};
use crate::io::archive::{persist_flags, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector2, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Spline flags (DXF group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SplineFlags: i32 {
        const CLOSED = 1;
        const PERIODIC = 2;
        const RATIONAL = 4;
        const PLANAR = 8;
        const LINEAR = 16;
    }
}

/// A NURBS curve given by control points, fit points or both
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    pub common: AttributeSet,
    pub degree: i32,
    pub flags: SplineFlags,
    pub knots: Vec<f64>,
    /// One weight per control point; empty for a non-rational spline
    pub weights: Vec<f64>,
    pub control_points: Vec<Vector3>,
    pub fit_points: Vec<Vector3>,
}

impl Spline {
    pub fn new() -> Self {
        Spline {
            common: AttributeSet::new(),
            degree: 3,
            flags: SplineFlags::empty(),
            knots: Vec::new(),
            weights: Vec::new(),
            control_points: Vec::new(),
            fit_points: Vec::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.flags.contains(SplineFlags::CLOSED)
    }

    pub fn is_rational(&self) -> bool {
        self.flags.contains(SplineFlags::RATIONAL)
    }

    fn points_mut(&mut self) -> impl Iterator<Item = &mut Vector3> {
        self.control_points.iter_mut().chain(self.fit_points.iter_mut())
    }
}

impl Default for Spline {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for Spline {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Spline
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.points_mut().for_each(|p| p.x = -p.x);
    }

    fn flip_y(&mut self) {
        self.points_mut().for_each(|p| p.y = -p.y);
    }

    fn flip_z(&mut self) {
        self.points_mut().for_each(|p| p.z = -p.z);
    }

    fn transform(&mut self, transform: &Transform, _right_handed: bool) {
        self.points_mut().for_each(|p| *p = transform.apply(*p));
    }

    /// Control polygon hull; a curve lies inside it. Fit points are used
    /// when there are no control points.
    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        let points = if self.control_points.is_empty() {
            &self.fit_points
        } else {
            &self.control_points
        };
        let xy: Vec<Vector2> = points.iter().map(Vector3::xy).collect();
        BoundingBox2D::from_points(&xy)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Spline {
                degree: self.degree,
                control_points: &self.control_points,
                fit_points: &self.fit_points,
                knots: &self.knots,
                weights: &self.weights,
                closed: self.is_closed(),
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.degree = json.i32("degree")?;
        self.control_points = json.points_or_empty("controlPoints")?;
        self.fit_points = json.points_or_empty("fitPoints")?;
        if self.control_points.is_empty() && self.fit_points.is_empty() {
            return Err(ShapeError::invalid(
                json.entity(),
                "controlPoints",
                "control points or fit points",
            ));
        }
        self.knots = json.numbers_or_empty("knots")?;
        self.weights = json.numbers_or_empty("weights")?;

        let mut flags = SplineFlags::from_bits_retain(json.i32_or("flags", 0)?);
        flags.set(SplineFlags::CLOSED, json.bool_or("closed", flags.contains(SplineFlags::CLOSED))?);
        flags.set(SplineFlags::PERIODIC, json.bool_or("periodic", flags.contains(SplineFlags::PERIODIC))?);
        flags.set(SplineFlags::RATIONAL, json.bool_or("rational", flags.contains(SplineFlags::RATIONAL))?);
        self.flags = flags;
        Ok(())
    }
}

impl Persist for Spline {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        ar.int(&mut self.degree)?;
        persist_flags(ar, &mut self.flags)?;
        self.knots.persist(ar)?;
        self.weights.persist(ar)?;
        self.control_points.persist(ar)?;
        self.fit_points.persist(ar)
    }
}
