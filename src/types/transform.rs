//! Affine transforms applied to shapes
//!
//! A [`Transform`] wraps a row-major 4x4 matrix. Points go through the full
//! affine map, directions through the linear part only.

use crate::types::{Vector2, Vector3};
use std::ops::Mul;

/// 4x4 transformation matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    /// Matrix elements stored in row-major order
    pub m: [[f64; 4]; 4],
}

impl Matrix4 {
    /// Create identity matrix
    pub fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Create zero matrix
    pub fn zero() -> Self {
        Self { m: [[0.0; 4]; 4] }
    }

    /// Create translation matrix
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        let mut result = Self::identity();
        result.m[0][3] = tx;
        result.m[1][3] = ty;
        result.m[2][3] = tz;
        result
    }

    /// Create scaling matrix
    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        let mut result = Self::identity();
        result.m[0][0] = sx;
        result.m[1][1] = sy;
        result.m[2][2] = sz;
        result
    }

    /// Create rotation matrix around Z axis
    pub fn rotation_z(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let mut result = Self::identity();
        result.m[0][0] = cos;
        result.m[0][1] = -sin;
        result.m[1][0] = sin;
        result.m[1][1] = cos;
        result
    }

    /// Determinant of the upper-left 3x3 (linear) block
    pub fn linear_determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Transform a point (applies full transformation including translation)
    pub fn transform_point(&self, v: Vector3) -> Vector3 {
        let m = &self.m;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3],
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3],
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3],
        )
    }

    /// Transform a direction vector (ignores translation)
    pub fn transform_direction(&self, v: Vector3) -> Vector3 {
        let m = &self.m;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut result = Self::zero();
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result.m[i][j] += self.m[i][k] * rhs.m[k][j];
                }
            }
        }
        result
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Affine transform combining rotation, scaling, mirroring and translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The 4x4 transformation matrix
    pub matrix: Matrix4,
}

impl Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create transform from matrix
    pub fn from_matrix(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    /// Rotation about the Z axis through the origin
    pub fn from_rotation_z(angle: f64) -> Self {
        Self {
            matrix: Matrix4::rotation_z(angle),
        }
    }

    /// Create translation transform
    pub fn from_translation(translation: Vector3) -> Self {
        Self {
            matrix: Matrix4::translation(translation.x, translation.y, translation.z),
        }
    }

    /// Create uniform scaling transform
    pub fn from_scale(scale: f64) -> Self {
        Self {
            matrix: Matrix4::scaling(scale, scale, scale),
        }
    }

    /// Create non-uniform scaling transform
    pub fn from_scaling(scale: Vector3) -> Self {
        Self {
            matrix: Matrix4::scaling(scale.x, scale.y, scale.z),
        }
    }

    /// Placement of a block reference: scale, then rotate about Z, then
    /// move to `insertion`.
    pub fn from_placement(insertion: Vector3, scale: Vector3, rotation: f64) -> Self {
        Self::from_scaling(scale)
            .then(&Self::from_rotation_z(rotation))
            .then(&Self::from_translation(insertion))
    }

    /// Apply transform to a point
    pub fn apply(&self, point: Vector3) -> Vector3 {
        self.matrix.transform_point(point)
    }

    /// Apply transform to a point in the XY plane
    pub fn apply_2d(&self, point: Vector2) -> Vector2 {
        self.apply(point.with_z(0.0)).xy()
    }

    /// Apply only the linear portion
    pub fn apply_direction(&self, direction: Vector3) -> Vector3 {
        self.matrix.transform_direction(direction)
    }

    /// Apply only the linear portion to an XY direction
    pub fn apply_direction_2d(&self, direction: Vector2) -> Vector2 {
        self.apply_direction(direction.with_z(0.0)).xy()
    }

    /// Combine with another transform (this transform applied first)
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Check if transform is identity
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// False when the transform mirrors (negative linear determinant)
    pub fn is_right_handed(&self) -> bool {
        self.matrix.linear_determinant() >= 0.0
    }

    /// Determinant of the XY block of the linear part
    pub fn determinant_xy(&self) -> f64 {
        let m = &self.matrix.m;
        m[0][0] * m[1][1] - m[0][1] * m[1][0]
    }

    /// Length scale applied to radii and heights: `sqrt(|det XY|)`
    pub fn scale_factor_xy(&self) -> f64 {
        self.determinant_xy().abs().sqrt()
    }

    /// True when the XY block preserves angles (a similarity, possibly
    /// mirrored)
    pub fn is_conformal(&self) -> bool {
        let ex = self.apply_direction_2d(Vector2::UNIT_X);
        let ey = self.apply_direction_2d(Vector2::UNIT_Y);
        let lx = ex.length_squared();
        let ly = ey.length_squared();
        let tolerance = 1e-9 * lx.max(ly).max(1.0);
        (lx - ly).abs() <= tolerance && ex.dot(&ey).abs() <= tolerance
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
