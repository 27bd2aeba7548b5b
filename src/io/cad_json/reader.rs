//! Typed access to decoded CAD-JSON values
//!
//! Every accessor distinguishes an absent key (or `null`) from a present key
//! of the wrong type: the first is `MissingField` for required fields and a
//! default for optional ones, the second is always `InvalidField`.

use crate::error::{Result, ShapeError};
use crate::types::{PolyPoint, Vector2, Vector3};
use serde_json::{Map, Value};

/// One JSON object being loaded into a shape or table entry
#[derive(Debug, Clone, Copy)]
pub struct CadJsonObject<'a> {
    entity: &'a str,
    map: &'a Map<String, Value>,
}

impl<'a> CadJsonObject<'a> {
    /// Wrap `value`, which must be a JSON object. `entity` names the
    /// entity in error messages.
    pub fn new(entity: &'a str, value: &'a Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self { entity, map }),
            _ => Err(ShapeError::invalid(entity, "<entity>", "object")),
        }
    }

    /// Entity name used in error messages
    pub fn entity(&self) -> &'a str {
        self.entity
    }

    /// Raw value of a present, non-null key
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match self.map.get(key) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn required(&self, key: &str) -> Result<&'a Value> {
        self.get(key)
            .ok_or_else(|| ShapeError::missing(self.entity, key))
    }

    fn invalid(&self, key: &str, expected: &'static str) -> ShapeError {
        ShapeError::invalid(self.entity, key, expected)
    }

    pub fn f64(&self, key: &str) -> Result<f64> {
        let value = self.required(key)?;
        value.as_f64().ok_or_else(|| self.invalid(key, "number"))
    }

    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => v.as_f64().ok_or_else(|| self.invalid(key, "number")),
        }
    }

    /// Optional angle given in degrees, returned in radians
    pub fn degrees_or(&self, key: &str, default_radians: f64) -> Result<f64> {
        match self.get(key) {
            None => Ok(default_radians),
            Some(v) => v
                .as_f64()
                .map(f64::to_radians)
                .ok_or_else(|| self.invalid(key, "number")),
        }
    }

    pub fn i32(&self, key: &str) -> Result<i32> {
        let value = self.required(key)?;
        as_i32(value).ok_or_else(|| self.invalid(key, "32-bit integer"))
    }

    pub fn i32_or(&self, key: &str, default: i32) -> Result<i32> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => as_i32(v).ok_or_else(|| self.invalid(key, "32-bit integer")),
        }
    }

    pub fn u32_or(&self, key: &str, default: u32) -> Result<u32> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| self.invalid(key, "unsigned integer")),
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            // CAD exports frequently write flags as 0/1
            Some(v) => match v.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(self.invalid(key, "boolean")),
            },
        }
    }

    pub fn str(&self, key: &str) -> Result<&'a str> {
        let value = self.required(key)?;
        value.as_str().ok_or_else(|| self.invalid(key, "string"))
    }

    pub fn string_or(&self, key: &str, default: &str) -> Result<String> {
        match self.get(key) {
            None => Ok(default.to_string()),
            Some(v) => v
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| self.invalid(key, "string")),
        }
    }

    pub fn array(&self, key: &str) -> Result<&'a Vec<Value>> {
        let value = self.required(key)?;
        value.as_array().ok_or_else(|| self.invalid(key, "array"))
    }

    /// Optional array; absent reads as empty
    pub fn array_or_empty(&self, key: &str) -> Result<&'a [Value]> {
        match self.get(key) {
            None => Ok(&[]),
            Some(v) => v
                .as_array()
                .map(Vec::as_slice)
                .ok_or_else(|| self.invalid(key, "array")),
        }
    }

    /// Required point
    pub fn point(&self, key: &str) -> Result<Vector3> {
        point_from(self.required(key)?, self.entity, key)
    }

    pub fn point_or(&self, key: &str, default: Vector3) -> Result<Vector3> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => point_from(v, self.entity, key),
        }
    }

    /// Optional XY vector (`[x, y]`)
    pub fn vector2_or(&self, key: &str, default: Vector2) -> Result<Vector2> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => point_from(v, self.entity, key).map(|p| p.xy()),
        }
    }

    /// Required array of points
    pub fn points(&self, key: &str) -> Result<Vec<Vector3>> {
        self.array(key)?
            .iter()
            .map(|v| point_from(v, self.entity, key))
            .collect()
    }

    /// Optional array of points; absent reads as empty
    pub fn points_or_empty(&self, key: &str) -> Result<Vec<Vector3>> {
        self.array_or_empty(key)?
            .iter()
            .map(|v| point_from(v, self.entity, key))
            .collect()
    }

    /// Optional array of numbers; absent reads as empty
    pub fn numbers_or_empty(&self, key: &str) -> Result<Vec<f64>> {
        self.array_or_empty(key)?
            .iter()
            .map(|v| v.as_f64().ok_or_else(|| self.invalid(key, "array of numbers")))
            .collect()
    }
}

fn as_i32(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|n| i32::try_from(n).ok())
}

fn slot(items: &[Value], index: usize) -> Option<std::result::Result<f64, ()>> {
    items.get(index).map(|v| v.as_f64().ok_or(()))
}

/// Read a point from positional slots: 0 and 1 are required, a missing
/// slot 2 reads as z = 0.
pub fn point_from(json: &Value, entity: &str, field: &str) -> Result<Vector3> {
    let bad = || ShapeError::invalid(entity, field, "array of 2 or 3 numbers");
    let items = json.as_array().ok_or_else(bad)?;
    let x = slot(items, 0).ok_or_else(bad)?.map_err(|_| bad())?;
    let y = slot(items, 1).ok_or_else(bad)?.map_err(|_| bad())?;
    let z = slot(items, 2).unwrap_or(Ok(0.0)).map_err(|_| bad())?;
    Ok(Vector3::new(x, y, z))
}

/// Read a poly-point from positional slots `[x, y, _, _, bulge]`. Slots 2
/// and 3 are skipped, a missing slot 4 reads as bulge 0, and z is 0.
pub fn poly_point_from(json: &Value, entity: &str, field: &str) -> Result<PolyPoint> {
    let bad = || ShapeError::invalid(entity, field, "array [x, y, ..., bulge] of numbers");
    let items = json.as_array().ok_or_else(bad)?;
    let x = slot(items, 0).ok_or_else(bad)?.map_err(|_| bad())?;
    let y = slot(items, 1).ok_or_else(bad)?.map_err(|_| bad())?;
    let bulge = slot(items, 4).unwrap_or(Ok(0.0)).map_err(|_| bad())?;
    Ok(PolyPoint::new(x, y, 0.0, bulge))
}

/// Read a poly-point from a vertex object: `basePoint` through
/// [`poly_point_from`], then `bulge` overwrites the bulge when present.
pub fn poly_point_from_vertex(json: &Value, entity: &str) -> Result<PolyPoint> {
    let vertex = CadJsonObject::new(entity, json)?;
    let base = vertex
        .get("basePoint")
        .ok_or_else(|| ShapeError::missing(entity, "basePoint"))?;
    let mut point = poly_point_from(base, entity, "basePoint")?;
    point.bulge = vertex.f64_or("bulge", point.bulge)?;
    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_point_from() {
        let p = point_from(&json!([1.0, 2.0, 3.0]), "LINE", "startPoint").unwrap();
        assert_eq!(p, Vector3::new(1.0, 2.0, 3.0));

        let p = point_from(&json!([1, 2]), "LINE", "startPoint").unwrap();
        assert_eq!(p, Vector3::new(1.0, 2.0, 0.0));

        assert!(point_from(&json!([1]), "LINE", "startPoint").is_err());
        assert!(point_from(&json!(["a", 2]), "LINE", "startPoint").is_err());
        assert!(point_from(&json!({"x": 1}), "LINE", "startPoint").is_err());
    }

    #[test]
    fn test_poly_point_from_skips_widths() {
        let p = poly_point_from(&json!([1.0, 2.0, 9.0, 9.0, 0.25]), "LWPOLYLINE", "vertices")
            .unwrap();
        assert_eq!(p, PolyPoint::new(1.0, 2.0, 0.0, 0.25));

        let p = poly_point_from(&json!([1.0, 2.0]), "LWPOLYLINE", "vertices").unwrap();
        assert_eq!(p.bulge, 0.0);
    }

    #[test]
    fn test_poly_point_from_vertex() {
        let p = poly_point_from_vertex(&json!({"basePoint": [1, 2, 0], "bulge": 0.5}), "VERTEX")
            .unwrap();
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 2.0);
        assert_eq!(p.bulge, 0.5);
    }

    #[test]
    fn test_poly_point_from_vertex_errors() {
        let err = poly_point_from_vertex(&json!({"bulge": 0.5}), "POLYLINE").unwrap_err();
        assert!(matches!(err, ShapeError::MissingField { .. }));

        let err = poly_point_from_vertex(&json!({"basePoint": [0, 0], "bulge": "x"}), "POLYLINE")
            .unwrap_err();
        assert!(matches!(err, ShapeError::InvalidField { .. }));
    }

    #[test]
    fn test_object_accessors() {
        let value = json!({"radius": 2.5, "name": "A", "flag": 1, "nothing": null});
        let obj = CadJsonObject::new("CIRCLE", &value).unwrap();

        assert_eq!(obj.f64("radius").unwrap(), 2.5);
        assert!(matches!(obj.f64("missing"), Err(ShapeError::MissingField { .. })));
        assert!(matches!(obj.f64("name"), Err(ShapeError::InvalidField { .. })));
        assert!(obj.bool_or("flag", false).unwrap());
        assert!(!obj.has("nothing"));
        assert_eq!(obj.f64_or("nothing", 4.0).unwrap(), 4.0);
    }
}
