//! Ellipse shape

use super::{AttributeSet, Shape, ShapeKind};
use crate::canvas::{Canvas, Primitive};
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{BoundingBox2D, Transform, Vector3};
use std::f64::consts::{FRAC_PI_2, TAU};

/// An ellipse or elliptical arc
///
/// A point at parameter `t` is `center + major_axis·cos t + minor·sin t`
/// with `minor = ratio · (Z × major_axis)`. The arc runs counter-clockwise
/// from `start_param` to `end_param`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub common: AttributeSet,
    pub center: Vector3,
    /// Center to major-axis end
    pub major_axis: Vector3,
    /// Minor to major length ratio
    pub ratio: f64,
    pub start_param: f64,
    pub end_param: f64,
}

impl Ellipse {
    pub fn new() -> Self {
        Ellipse {
            common: AttributeSet::new(),
            center: Vector3::ZERO,
            major_axis: Vector3::UNIT_X,
            ratio: 0.5,
            start_param: 0.0,
            end_param: TAU,
        }
    }

    pub fn from_axes(center: Vector3, major_axis: Vector3, ratio: f64) -> Self {
        Ellipse {
            center,
            major_axis,
            ratio,
            ..Self::new()
        }
    }

    pub fn is_full(&self) -> bool {
        (self.end_param - self.start_param).abs() >= TAU - 1e-10
    }

    pub fn minor_axis(&self) -> Vector3 {
        Vector3::UNIT_Z.cross(&self.major_axis) * self.ratio
    }

    pub fn point_at(&self, param: f64) -> Vector3 {
        self.center + self.major_axis * param.cos() + self.minor_axis() * param.sin()
    }

    fn mirror_params(&mut self) {
        let start = self.start_param;
        self.start_param = -self.end_param;
        self.end_param = -start;
    }

    /// Re-derive the principal axes after a general linear map. `u` and `v`
    /// are the images of the old major and minor axes.
    fn reshape(&mut self, u: Vector3, v: Vector3, right_handed: bool) {
        let t0 = 0.5 * (2.0 * u.dot(&v)).atan2(u.dot(&u) - v.dot(&v));
        let (sin, cos) = t0.sin_cos();
        let mut a = u * cos + v * sin;
        let mut b = v * cos - u * sin;
        let mut shift = t0;
        if b.length_squared() > a.length_squared() {
            std::mem::swap(&mut a, &mut b);
            b = -b;
            shift += FRAC_PI_2;
        }
        let major = a.length();
        if major == 0.0 {
            return;
        }
        self.major_axis = a;
        self.ratio = b.length() / major;
        self.start_param -= shift;
        self.end_param -= shift;
        if !right_handed {
            self.mirror_params();
        }
    }
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for Ellipse {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.center.x = -self.center.x;
        self.major_axis.x = -self.major_axis.x;
        self.mirror_params();
    }

    fn flip_y(&mut self) {
        self.center.y = -self.center.y;
        self.major_axis.y = -self.major_axis.y;
        self.mirror_params();
    }

    fn flip_z(&mut self) {
        self.center.z = -self.center.z;
        self.major_axis.z = -self.major_axis.z;
    }

    fn transform(&mut self, transform: &Transform, right_handed: bool) {
        let minor = self.minor_axis();
        self.center = transform.apply(self.center);
        if transform.is_conformal() {
            self.major_axis = transform.apply_direction(self.major_axis);
            if !right_handed {
                self.mirror_params();
            }
        } else {
            let u = transform.apply_direction(self.major_axis);
            let v = transform.apply_direction(minor);
            self.reshape(u, v, right_handed);
        }
    }

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        let mut rect = BoundingBox2D::from_point(self.point_at(self.start_param).xy());
        rect.expand_to_include_ellipse(
            self.center.xy(),
            self.major_axis.xy(),
            self.ratio,
            self.start_param,
            self.end_param,
        );
        Some(rect)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.render(
            Primitive::Ellipse {
                center: self.center,
                major_axis: self.major_axis,
                ratio: self.ratio,
                start_param: self.start_param,
                end_param: self.end_param,
            },
            &self.common,
        );
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.common.load_from_cad_json(json)?;
        self.center = json.point("center")?;
        self.major_axis = json.point("majorAxisEndPoint")?;
        self.ratio = json.f64("axisRatio")?;
        self.start_param = json.f64_or("startAngle", 0.0)?;
        self.end_param = json.f64_or("endAngle", TAU)?;
        Ok(())
    }
}

impl Persist for Ellipse {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.center.persist(ar)?;
        self.major_axis.persist(ar)?;
        ar.double(&mut self.ratio)?;
        ar.double(&mut self.start_param)?;
        ar.double(&mut self.end_param)
    }
}
