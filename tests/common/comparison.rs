//! Tolerance-based comparison utilities for tests.

#![allow(dead_code)]

use super::text_record;
use cadshape::types::{BoundingBox2D, Vector3};
use cadshape::ShapeType;
use std::f64::consts::TAU;

/// Default tolerance for floating-point comparisons.
pub const TOL: f64 = 1e-6;

/// Check approximate equality of two f64 values, relative to their size.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

/// Assert two f64 values are approximately equal.
pub fn assert_f64_eq(a: f64, b: f64, tol: f64) {
    assert!(
        approx_eq(a, b, tol),
        "f64 mismatch: {a} vs {b} (delta={}, tol={tol})",
        (a - b).abs()
    );
}

/// Assert two Vector3 values are approximately equal component-wise.
pub fn assert_vec3_eq(a: &Vector3, b: &Vector3, tol: f64) {
    assert!(
        approx_eq(a.x, b.x, tol) && approx_eq(a.y, b.y, tol) && approx_eq(a.z, b.z, tol),
        "Vector3 mismatch: ({},{},{}) vs ({},{},{}) tol={tol}",
        a.x, a.y, a.z, b.x, b.y, b.z
    );
}

/// Assert two optional rectangles match within tolerance.
pub fn assert_bounds_eq(a: Option<BoundingBox2D>, b: Option<BoundingBox2D>, tol: f64) {
    match (a, b) {
        (None, None) => {}
        (Some(a), Some(b)) => {
            let same = approx_eq(a.min.x, b.min.x, tol)
                && approx_eq(a.min.y, b.min.y, tol)
                && approx_eq(a.max.x, b.max.x, tol)
                && approx_eq(a.max.y, b.max.y, tol);
            assert!(same, "bounds mismatch: {:?} vs {:?}", a, b);
        }
        (a, b) => panic!("bounds mismatch: {:?} vs {:?}", a, b),
    }
}

/// Compare two shapes field by field through their text records.
///
/// Numeric lines match within `tol`; angles may also differ by a full
/// turn. Every other line must match exactly. Returns one message per
/// differing line.
pub fn shape_diffs(a: &ShapeType, b: &ShapeType, tol: f64) -> Vec<String> {
    let left = text_record(a);
    let right = text_record(b);
    let mut diffs = Vec::new();
    if left.len() != right.len() {
        diffs.push(format!("record length: {} vs {}", left.len(), right.len()));
        return diffs;
    }
    for (line, (l, r)) in left.iter().zip(&right).enumerate() {
        if l == r {
            continue;
        }
        let close = match (l.parse::<f64>(), r.parse::<f64>()) {
            (Ok(x), Ok(y)) => approx_eq(x, y, tol) || approx_eq((x - y).abs(), TAU, tol),
            _ => false,
        };
        if !close {
            diffs.push(format!("line {}: {} vs {}", line + 1, l, r));
        }
    }
    diffs
}

/// Assert two shapes are equal within tolerance.
pub fn assert_shape_approx_eq(a: &ShapeType, b: &ShapeType, tol: f64) {
    let diffs = shape_diffs(a, b, tol);
    assert!(
        diffs.is_empty(),
        "{} differs:\n  {}",
        a.kind(),
        diffs.join("\n  ")
    );
}
