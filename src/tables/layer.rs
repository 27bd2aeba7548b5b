//! Layer table entry

use super::TableEntry;
use crate::canvas::Canvas;
use crate::error::{Result, ShapeError};
use crate::io::archive::{persist_color_index, persist_flags, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use crate::shapes::{AttributeSet, Shape, ShapeKind};
use crate::types::{BoundingBox2D, Color, ColorIndex, Transform};
use bitflags::bitflags;

bitflags! {
    /// Layer flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct LayerFlags: i32 {
        const FROZEN = 1;
        /// Frozen by default in new viewports
        const FROZEN_NEW_VIEWPORTS = 2;
        const LOCKED = 4;
        /// Defined in an external reference
        const XREF = 16;
        const XREF_RESOLVED = 32;
        /// Referenced by at least one entity
        const REFERENCED = 64;
    }
}

/// Default layer color index (white)
pub const DEFAULT_LAYER_COLOR: i32 = 7;

/// A layer: a named group of shapes sharing color and line style
///
/// The resolved layer color lives in `common.color`; `color_index` keeps
/// the raw index, negative when the layer is off.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub common: AttributeSet,
    pub name: String,
    pub flags: LayerFlags,
    pub color_index: i32,
    pub line_type: String,
    pub line_weight: i32,
    pub plottable: bool,
}

impl Layer {
    /// Create a new layer with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            common: AttributeSet::new(),
            name: name.into(),
            flags: LayerFlags::empty(),
            color_index: DEFAULT_LAYER_COLOR,
            line_type: "Continuous".to_string(),
            line_weight: 1,
            plottable: true,
        }
    }

    /// Create a layer showing a palette color
    pub fn with_color_index(name: impl Into<String>, color_index: i32) -> Result<Self> {
        let mut layer = Self::new(name);
        layer.set_color_index(color_index)?;
        Ok(layer)
    }

    /// Set the raw color index and re-resolve the layer color
    pub fn set_color_index(&mut self, color_index: i32) -> Result<()> {
        let index = ColorIndex::try_from(color_index)?;
        self.color_index = color_index;
        if let Some(color) = index.palette_color() {
            self.common.color = color;
        }
        Ok(())
    }

    /// Resolved layer color
    pub fn color(&self) -> Color {
        self.common.color
    }

    pub fn is_off(&self) -> bool {
        self.color_index < 0
    }

    pub fn is_frozen(&self) -> bool {
        self.flags.contains(LayerFlags::FROZEN)
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(LayerFlags::LOCKED)
    }

    /// Not off and not frozen
    pub fn is_visible(&self) -> bool {
        !self.is_off() && !self.is_frozen()
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::new("0")
    }
}

impl TableEntry for Layer {
    const TABLE: &'static str = "layer";

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Layers carry no geometry: flips and transforms leave them alone and
/// they draw nothing.
impl Shape for Layer {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Layer
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {}

    fn flip_y(&mut self) {}

    fn flip_z(&mut self) {}

    fn transform(&mut self, _transform: &Transform, _right_handed: bool) {}

    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        None
    }

    fn draw(&self, _canvas: &mut dyn Canvas) {}

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.name = json.str("name")?.to_string();
        self.set_color_index(json.i32_or("color", DEFAULT_LAYER_COLOR)?)
            .map_err(|_| ShapeError::invalid(json.entity(), "color", "color index up to 256"))?;
        if json.has("trueColor") {
            self.common.color = Color::from_true_color(json.u32_or("trueColor", 0)?);
        }
        self.line_type = json.string_or("lineType", "Continuous")?;
        self.line_weight = json.i32_or("lineWeight", 1)?;
        self.flags = LayerFlags::from_bits_retain(json.i32_or("flags", 0)?);
        self.plottable = json.bool_or("plottable", true)?;
        self.common.line_type_name = self.line_type.clone();
        self.common.line_weight = self.line_weight;
        self.common.visible = !self.is_off();
        Ok(())
    }
}

impl Persist for Layer {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        ar.string(&mut self.name)?;
        persist_flags(ar, &mut self.flags)?;
        persist_color_index(ar, &mut self.color_index)?;
        ar.string(&mut self.line_type)?;
        ar.int(&mut self.line_weight)?;
        ar.boolean(&mut self.plottable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorTable;
    use serde_json::json;

    #[test]
    fn test_new_layer_defaults() {
        let layer = Layer::new("Walls");
        assert_eq!(layer.color_index, 7);
        assert_eq!(layer.color(), Color::WHITE);
        assert!(layer.is_visible());
        assert!(layer.plottable);
        assert_eq!(layer.kind(), ShapeKind::Layer);
    }

    #[test]
    fn test_negative_index_turns_layer_off() {
        let layer = Layer::with_color_index("Hidden", -1).unwrap();
        assert!(layer.is_off());
        assert!(!layer.is_visible());
        assert_eq!(layer.color(), ColorTable::rgba(1));
    }

    #[test]
    fn test_rejects_index_above_by_layer() {
        let err = Layer::with_color_index("Bad", 300).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidColorIndex(300)));
    }

    #[test]
    fn test_record_rejects_index_above_by_layer() {
        use crate::io::archive::{TextArchiveReader, TextArchiveWriter};

        let mut layer = Layer::new("Bad");
        layer.color_index = 300;
        let mut buf = Vec::new();
        layer.persist(&mut TextArchiveWriter::new(&mut buf)).unwrap();

        let mut loaded = Layer::default();
        let err = loaded
            .persist(&mut TextArchiveReader::new(buf.as_slice()))
            .unwrap_err();
        assert!(matches!(err, ShapeError::Corrupt(_)));
    }

    #[test]
    fn test_frozen_and_locked() {
        let mut layer = Layer::new("Grid");
        layer.flags = LayerFlags::FROZEN | LayerFlags::LOCKED;
        assert!(layer.is_frozen());
        assert!(layer.is_locked());
        assert!(!layer.is_visible());
    }

    #[test]
    fn test_layer_has_no_geometry() {
        let mut layer = Layer::new("A");
        layer.flip_x();
        layer.transform(&Transform::from_scale(3.0), true);
        assert_eq!(layer, Layer::new("A"));
        assert!(layer.bounding_rect().is_none());
    }

    #[test]
    fn test_load_from_cad_json() {
        let value = json!({"name": "Doors", "color": 1, "lineType": "DASHED", "flags": 4});
        let mut layer = Layer::default();
        layer
            .load_from_cad_json(&CadJsonObject::new("LAYER", &value).unwrap())
            .unwrap();
        assert_eq!(layer.name, "Doors");
        assert_eq!(layer.color(), Color::rgb(255, 0, 0));
        assert_eq!(layer.line_type, "DASHED");
        assert!(layer.is_locked());
    }

    #[test]
    fn test_true_color_wins() {
        let value = json!({"name": "Roof", "color": 3, "trueColor": 0x336699});
        let mut layer = Layer::default();
        layer
            .load_from_cad_json(&CadJsonObject::new("LAYER", &value).unwrap())
            .unwrap();
        assert_eq!(layer.color(), Color::rgb(0x33, 0x66, 0x99));
        assert_eq!(layer.color_index, 3);
    }

    #[test]
    fn test_load_requires_name() {
        let value = json!({"color": 2});
        let err = Layer::default()
            .load_from_cad_json(&CadJsonObject::new("LAYER", &value).unwrap())
            .unwrap_err();
        assert!(matches!(err, ShapeError::MissingField { .. }));
    }
}
