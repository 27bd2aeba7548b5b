//! Display attributes shared by every shape

use crate::error::{Result, ShapeError};
use crate::io::archive::{persist_color_index, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::types::{Color, ColorIndex, Cookie, Handle, CR_DEFAULT};
use serde_json::Value;
use std::cmp::Ordering;

/// Attributes embedded in every shape
///
/// `layer` and `layer_color_index` record where the shape came from on
/// import. Equality and ordering cover the other seven fields only.
#[derive(Debug, Clone)]
pub struct AttributeSet {
    /// Resolved color
    pub color: Color,
    pub cookie: Cookie,
    pub line_type_name: String,
    pub line_weight: i32,
    /// Position in the drawing's line type table, -1 when unset
    pub line_type_index: i32,
    pub visible: bool,
    pub transparent: bool,
    /// Layer name
    pub layer: String,
    /// Raw layer color index; see [`ColorIndex`]
    pub layer_color_index: i32,
}

impl AttributeSet {
    pub fn new() -> Self {
        AttributeSet {
            color: CR_DEFAULT,
            cookie: Cookie::default(),
            line_type_name: String::new(),
            line_weight: 1,
            line_type_index: -1,
            visible: true,
            transparent: false,
            layer: "0".to_string(),
            layer_color_index: ColorIndex::BY_LAYER,
        }
    }

    /// Validated meaning of `layer_color_index`
    pub fn color_index(&self) -> Result<ColorIndex> {
        ColorIndex::try_from(self.layer_color_index)
    }

    pub fn set_color_index(&mut self, index: ColorIndex) {
        self.layer_color_index = index.value();
    }

    /// Load the keys every CAD-JSON entity may carry.
    ///
    /// `trueColor` wins over the color index. A direct or layer-off index
    /// resolves to its palette color right away; by-layer and by-block keep
    /// the default until the drawing resolves them.
    pub fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.layer = json.string_or("layer", "0")?;

        let raw_index = json.i32_or("color", ColorIndex::BY_LAYER)?;
        let index = ColorIndex::try_from(raw_index)?;
        self.layer_color_index = raw_index;

        if json.has("trueColor") {
            let value = json.u32_or("trueColor", 0)?;
            self.color = Color::from_true_color(value);
        } else if let Some(color) = index.palette_color() {
            self.color = color;
        }

        self.line_type_name = json.string_or("lineType", "")?;
        self.line_type_index = json.i32_or("lineTypeIndex", -1)?;
        self.line_weight = json.i32_or("lineWeight", 1)?;
        self.visible = json.bool_or("visible", true)?;
        self.transparent = json.bool_or("transparent", false)?;

        if let Some(handle) = json.get("handle") {
            self.cookie.handle = match handle {
                Value::String(text) => Handle::from_hex(text),
                other => other.as_u64().map(Handle::new),
            }
            .ok_or_else(|| ShapeError::invalid(json.entity(), "handle", "hex string or integer"))?;
        }
        Ok(())
    }

    fn key(&self) -> (&Color, &Cookie, &String, i32, i32, bool, bool) {
        (
            &self.color,
            &self.cookie,
            &self.line_type_name,
            self.line_weight,
            self.line_type_index,
            self.visible,
            self.transparent,
        )
    }
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for AttributeSet {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl PartialOrd for AttributeSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key().partial_cmp(&other.key())
    }
}

/// Base attribute block, then the import extension (`layer`,
/// `layer_color_index`)
impl Persist for AttributeSet {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.color.persist(ar)?;
        self.cookie.persist(ar)?;
        ar.string(&mut self.line_type_name)?;
        ar.int(&mut self.line_weight)?;
        ar.int(&mut self.line_type_index)?;
        ar.boolean(&mut self.visible)?;
        ar.boolean(&mut self.transparent)?;

        ar.string(&mut self.layer)?;
        persist_color_index(ar, &mut self.layer_color_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorTable;
    use serde_json::json;

    fn load(value: serde_json::Value) -> Result<AttributeSet> {
        let obj = CadJsonObject::new("LINE", &value)?;
        let mut attrs = AttributeSet::new();
        attrs.load_from_cad_json(&obj)?;
        Ok(attrs)
    }

    #[test]
    fn test_defaults() {
        let attrs = AttributeSet::new();
        assert_eq!(attrs.line_weight, 1);
        assert!(attrs.visible);
        assert!(!attrs.transparent);
        assert_eq!(attrs.color_index().unwrap(), ColorIndex::ByLayer);
        assert_eq!(attrs.color, CR_DEFAULT);
    }

    #[test]
    fn test_equality_ignores_import_context() {
        let a = AttributeSet::new();
        let mut b = AttributeSet::new();
        b.layer = "Walls".into();
        b.layer_color_index = 3;
        assert_eq!(a, b);

        b.line_weight = 2;
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn test_load_color_index() {
        let attrs = load(json!({"color": 1})).unwrap();
        assert_eq!(attrs.color, ColorTable::rgba(1));
        assert_eq!(attrs.layer_color_index, 1);

        let attrs = load(json!({"color": 0})).unwrap();
        assert_eq!(attrs.color_index().unwrap(), ColorIndex::ByBlock);

        let attrs = load(json!({"color": -3})).unwrap();
        assert!(attrs.color_index().unwrap().is_layer_off());

        let err = load(json!({"color": 300})).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidColorIndex(300)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_true_color_wins() {
        let attrs = load(json!({"color": 1, "trueColor": 0x00FF00})).unwrap();
        assert_eq!(attrs.color, Color::rgb(0, 255, 0));
    }

    #[test]
    fn test_handle_forms() {
        let attrs = load(json!({"handle": "2F"})).unwrap();
        assert_eq!(attrs.cookie.handle, Handle::new(0x2F));

        let attrs = load(json!({"handle": 17})).unwrap();
        assert_eq!(attrs.cookie.handle, Handle::new(17));

        assert!(load(json!({"handle": true})).is_err());
    }
}
