//! The drawing: an ordered shape collection plus its tables

use crate::canvas::Canvas;
use crate::error::{Result, ShapeError};
use crate::io::archive::{Archive, Persist};
use crate::io::cad_json::{CadJsonImporter, CadJsonObject};
use crate::io::record::{self, RecordFormat};
use crate::notification::NotificationCollection;
use crate::shapes::{persist_shapes, AttributeSet, Block, Shape, ShapeKind, ShapeType};
use crate::tables::{Layer, LineType, Table};
use crate::types::{BoundingBox2D, Color, ColorIndex, Transform};
use std::io::{BufRead, Write};

/// Deepest insert-in-block nesting followed when bounding a drawing
pub const MAX_INSERT_DEPTH: usize = 16;

/// A drawing owning its shapes, line types and layers
///
/// Shapes keep insertion order, which is also draw order. Block
/// definitions live in the shape list next to the shapes that insert
/// them. Equality ignores the notifications.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    pub common: AttributeSet,
    shapes: Vec<ShapeType>,
    pub line_types: Table<LineType>,
    pub layers: Table<Layer>,
    /// Diagnostics from the last import; never persisted
    pub notifications: NotificationCollection,
}

impl Drawing {
    /// Create a new empty drawing
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape
    pub fn add_shape(&mut self, shape: ShapeType) {
        self.shapes.push(shape);
    }

    /// Insert a shape at `index`, shifting later shapes back
    pub fn insert_shape(&mut self, index: usize, shape: ShapeType) -> Result<()> {
        if index > self.shapes.len() {
            return Err(self.out_of_range(index));
        }
        self.shapes.insert(index, shape);
        Ok(())
    }

    /// Remove and return the shape at `index`
    pub fn remove_shape(&mut self, index: usize) -> Option<ShapeType> {
        if index < self.shapes.len() {
            Some(self.shapes.remove(index))
        } else {
            None
        }
    }

    /// Move the shape at `from` so it ends up at `to`
    pub fn move_shape(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.shapes.len();
        if from >= len {
            return Err(self.out_of_range(from));
        }
        if to >= len {
            return Err(self.out_of_range(to));
        }
        let shape = self.shapes.remove(from);
        self.shapes.insert(to, shape);
        Ok(())
    }

    pub fn shapes(&self) -> &[ShapeType] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [ShapeType] {
        &mut self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn clear_shapes(&mut self) {
        self.shapes.clear();
    }

    fn out_of_range(&self, index: usize) -> ShapeError {
        ShapeError::Custom(format!(
            "shape index {} out of range for {} shapes",
            index,
            self.shapes.len()
        ))
    }

    /// Block definition by name (case-insensitive)
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.shapes
            .iter()
            .filter_map(ShapeType::as_block)
            .find(|block| block.name.eq_ignore_ascii_case(name))
    }

    /// Iterate over block definitions
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.shapes.iter().filter_map(ShapeType::as_block)
    }

    /// Line type of a shape: by name first, then by table position
    pub fn line_type_for(&self, attributes: &AttributeSet) -> Option<&LineType> {
        if !attributes.line_type_name.is_empty() {
            if let Some(line_type) = self.line_types.get(&attributes.line_type_name) {
                return Some(line_type);
            }
        }
        usize::try_from(attributes.line_type_index)
            .ok()
            .and_then(|index| self.line_types.get_index(index))
    }

    /// Resolve inherited colors against the layer table.
    ///
    /// By-layer shapes take their layer's color (white for an unknown
    /// layer) and shapes whose index marks the layer off become invisible.
    /// Direct and true colors were resolved on import; by-block is left
    /// alone. Block children are resolved too.
    pub fn resolve_colors(&mut self) {
        let layers = &self.layers;
        for shape in self.shapes.iter_mut() {
            resolve_shape_colors(layers, shape);
        }
    }

    /// Import a CAD-JSON document with the default configuration
    pub fn from_cad_json(document: &serde_json::Value) -> Result<Drawing> {
        CadJsonImporter::default().import(document)
    }

    /// Save as a drawing record
    pub fn save<W: Write>(&self, writer: W, format: RecordFormat) -> Result<()> {
        record::save_drawing(writer, format, self)
    }

    /// Load a drawing record
    pub fn load<R: BufRead>(reader: R, format: RecordFormat) -> Result<Drawing> {
        record::load_drawing(reader, format)
    }

    /// Shapes placed in drawing space. Block definitions live in block
    /// space and only move through the inserts that reference them.
    fn placed_shapes_mut(&mut self) -> impl Iterator<Item = &mut ShapeType> {
        self.shapes
            .iter_mut()
            .filter(|shape| shape.as_block().is_none())
    }

    /// Bounds of one shape, with inserts resolved against the blocks
    fn resolved_bounds(&self, shape: &ShapeType, depth: usize) -> Option<BoundingBox2D> {
        let insert = match shape {
            ShapeType::Insert(insert) => insert,
            other => return other.bounding_rect(),
        };
        let fallback = || Some(BoundingBox2D::from_point(insert.insertion_point.xy()));
        if depth >= MAX_INSERT_DEPTH {
            return fallback();
        }
        let block = match self.block(&insert.block_name) {
            Some(block) => block,
            None => return fallback(),
        };

        let placement = Transform::from_translation(-block.base_point).then(&insert.placement());
        let right_handed = placement.is_right_handed();
        block
            .shapes
            .iter()
            .filter(|child| child.as_block().is_none())
            .fold(None, |acc, child| {
                let mut placed = child.clone();
                placed.transform(&placement, right_handed);
                BoundingBox2D::union(acc, self.resolved_bounds(&placed, depth + 1))
            })
            .or_else(fallback)
    }
}

impl PartialEq for Drawing {
    fn eq(&self, other: &Self) -> bool {
        self.common == other.common
            && self.shapes == other.shapes
            && self.line_types == other.line_types
            && self.layers == other.layers
    }
}

fn resolve_shape_colors(layers: &Table<Layer>, shape: &mut ShapeType) {
    resolve_attributes(layers, shape.common_mut());
    if let ShapeType::Block(block) = shape {
        for child in block.shapes.iter_mut() {
            resolve_shape_colors(layers, child);
        }
    }
}

fn resolve_attributes(layers: &Table<Layer>, attributes: &mut AttributeSet) {
    match attributes.color_index() {
        Ok(ColorIndex::ByLayer) => {
            attributes.color = layers
                .get(&attributes.layer)
                .map(Layer::color)
                .unwrap_or(Color::WHITE);
        }
        Ok(ColorIndex::LayerOff(_)) => attributes.visible = false,
        Ok(ColorIndex::ByBlock) | Ok(ColorIndex::Index(_)) => {}
        Err(err) => {
            tracing::warn!(error = %err, layer = %attributes.layer, "color left unresolved");
        }
    }
}

impl Shape for Drawing {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Drawing
    }

    fn common(&self) -> &AttributeSet {
        &self.common
    }

    fn common_mut(&mut self) -> &mut AttributeSet {
        &mut self.common
    }

    fn flip_x(&mut self) {
        self.placed_shapes_mut().for_each(ShapeType::flip_x);
    }

    fn flip_y(&mut self) {
        self.placed_shapes_mut().for_each(ShapeType::flip_y);
    }

    fn flip_z(&mut self) {
        self.placed_shapes_mut().for_each(ShapeType::flip_z);
    }

    fn transform(&mut self, transform: &Transform, right_handed: bool) {
        for shape in self.placed_shapes_mut() {
            shape.transform(transform, right_handed);
        }
    }

    /// Union over every shape except block definitions, with each insert
    /// bounded by its block's contents
    fn bounding_rect(&self) -> Option<BoundingBox2D> {
        self.shapes
            .iter()
            .filter(|shape| shape.as_block().is_none())
            .fold(None, |acc, shape| {
                BoundingBox2D::union(acc, self.resolved_bounds(shape, 0))
            })
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        for shape in &self.shapes {
            shape.draw(canvas);
        }
    }

    fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        CadJsonImporter::default().read_into(self, json)
    }
}

impl Persist for Drawing {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.common.persist(ar)?;
        self.line_types.persist(ar)?;
        self.layers.persist(ar)?;
        persist_shapes(ar, &mut self.shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::test_support::RecordingCanvas;
    use crate::canvas::CountingCanvas;
    use crate::shapes::{Circle, Insert, Line, Text};
    use crate::types::{ColorTable, Vector2, Vector3};
    use std::f64::consts::FRAC_PI_2;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> ShapeType {
        ShapeType::Line(Line::from_points(
            Vector3::new(x0, y0, 0.0),
            Vector3::new(x1, y1, 0.0),
        ))
    }

    fn square_block() -> ShapeType {
        let mut block = Block::new("SQ", Vector3::new(1.0, 1.0, 0.0));
        block.add_shape(line(1.0, 1.0, 3.0, 1.0));
        block.add_shape(line(3.0, 1.0, 3.0, 2.0));
        ShapeType::Block(block)
    }

    #[test]
    fn test_collection_operations() {
        let mut drawing = Drawing::new();
        drawing.add_shape(line(0.0, 0.0, 1.0, 0.0));
        drawing.add_shape(ShapeType::Circle(Circle::default()));
        drawing.insert_shape(0, ShapeType::Text(Text::default())).unwrap();
        assert_eq!(drawing.shape_count(), 3);
        assert_eq!(drawing.shapes()[0].kind(), ShapeKind::Text);

        drawing.move_shape(0, 2).unwrap();
        let kinds: Vec<_> = drawing.shapes().iter().map(ShapeType::kind).collect();
        assert_eq!(kinds, vec![ShapeKind::Line, ShapeKind::Circle, ShapeKind::Text]);

        let removed = drawing.remove_shape(1).unwrap();
        assert_eq!(removed.kind(), ShapeKind::Circle);
        assert!(drawing.remove_shape(5).is_none());
        assert!(drawing.insert_shape(9, line(0.0, 0.0, 0.0, 0.0)).is_err());
        assert!(drawing.move_shape(0, 2).is_err());

        drawing.clear_shapes();
        assert_eq!(drawing.shape_count(), 0);
    }

    #[test]
    fn test_empty_drawing_has_no_bounds() {
        assert!(Drawing::new().bounding_rect().is_none());
    }

    #[test]
    fn test_bounds_resolve_inserts() {
        let mut drawing = Drawing::new();
        drawing.add_shape(square_block());
        drawing.add_shape(ShapeType::Insert(Insert::new("sq", Vector3::new(10.0, 0.0, 0.0))));

        let rect = drawing.bounding_rect().unwrap();
        assert!((rect.min.x - 10.0).abs() < 1e-12);
        assert!((rect.max.x - 12.0).abs() < 1e-12);
        assert!((rect.max.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotated_insert_bounds() {
        let mut drawing = Drawing::new();
        drawing.add_shape(square_block());
        let mut insert = Insert::new("SQ", Vector3::ZERO);
        insert.rotation = FRAC_PI_2;
        drawing.add_shape(ShapeType::Insert(insert));

        let rect = drawing.bounding_rect().unwrap();
        assert!((rect.min.x + 1.0).abs() < 1e-9);
        assert!((rect.max.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_flip_moves_inserted_geometry_once() {
        let mut drawing = Drawing::new();
        drawing.add_shape(square_block());
        drawing.add_shape(ShapeType::Insert(Insert::new("sq", Vector3::new(10.0, 0.0, 0.0))));
        let definition = drawing.block("sq").cloned();

        drawing.flip_x();
        let rect = drawing.bounding_rect().unwrap();
        assert!((rect.min.x + 12.0).abs() < 1e-12);
        assert!((rect.max.x + 10.0).abs() < 1e-12);
        assert_eq!(drawing.block("sq").cloned(), definition);
    }

    #[test]
    fn test_transform_moves_inserted_geometry_once() {
        let mut drawing = Drawing::new();
        drawing.add_shape(square_block());
        drawing.add_shape(ShapeType::Insert(Insert::new("sq", Vector3::new(10.0, 0.0, 0.0))));

        drawing.transform(&Transform::from_rotation_z(FRAC_PI_2), true);
        let rect = drawing.bounding_rect().unwrap();
        assert!((rect.min.x + 1.0).abs() < 1e-9);
        assert!(rect.max.x.abs() < 1e-9);
        assert!((rect.min.y - 10.0).abs() < 1e-9);
        assert!((rect.max.y - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_unresolved_insert_bounds_to_insertion_point() {
        let mut drawing = Drawing::new();
        drawing.add_shape(ShapeType::Insert(Insert::new("MISSING", Vector3::new(4.0, 5.0, 0.0))));
        let rect = drawing.bounding_rect().unwrap();
        assert_eq!(rect.min, Vector2::new(4.0, 5.0));
        assert_eq!(rect.max, rect.min);
    }

    #[test]
    fn test_self_referencing_block_stops() {
        let mut block = Block::new("LOOP", Vector3::ZERO);
        block.add_shape(line(0.0, 0.0, 1.0, 0.0));
        block.add_shape(ShapeType::Insert(Insert::new("LOOP", Vector3::new(1.0, 0.0, 0.0))));
        let mut drawing = Drawing::new();
        drawing.add_shape(ShapeType::Block(block));
        drawing.add_shape(ShapeType::Insert(Insert::new("LOOP", Vector3::ZERO)));

        let rect = drawing.bounding_rect().unwrap();
        assert!((rect.max.x - MAX_INSERT_DEPTH as f64).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_colors() {
        let mut drawing = Drawing::new();
        drawing.layers.add(Layer::with_color_index("Red", 1).unwrap()).unwrap();

        let mut by_layer = line(0.0, 0.0, 1.0, 0.0);
        by_layer.common_mut().layer = "red".into();
        let mut unknown_layer = line(0.0, 0.0, 1.0, 0.0);
        unknown_layer.common_mut().layer = "Nowhere".into();
        unknown_layer.common_mut().color = Color::BLACK;
        let mut off = line(0.0, 0.0, 1.0, 0.0);
        off.common_mut().set_color_index(ColorIndex::LayerOff(-3));
        let mut by_block = line(0.0, 0.0, 1.0, 0.0);
        by_block.common_mut().set_color_index(ColorIndex::ByBlock);
        by_block.common_mut().color = Color::BLACK;

        for shape in [by_layer, unknown_layer, off, by_block] {
            drawing.add_shape(shape);
        }
        drawing.resolve_colors();

        let shapes = drawing.shapes();
        assert_eq!(shapes[0].common().color, ColorTable::rgba(1));
        assert_eq!(shapes[1].common().color, Color::WHITE);
        assert!(!shapes[2].common().visible);
        assert_eq!(shapes[3].common().color, Color::BLACK);
    }

    #[test]
    fn test_line_type_lookup() {
        let mut drawing = Drawing::new();
        drawing.line_types.add(LineType::continuous()).unwrap();
        drawing.line_types.add(LineType::new("DASHED")).unwrap();

        let mut attributes = AttributeSet::new();
        attributes.line_type_name = "dashed".into();
        assert_eq!(drawing.line_type_for(&attributes).unwrap().name, "DASHED");

        attributes.line_type_name.clear();
        attributes.line_type_index = 0;
        assert_eq!(drawing.line_type_for(&attributes).unwrap().name, "Continuous");

        attributes.line_type_index = -1;
        assert!(drawing.line_type_for(&attributes).is_none());
    }

    #[test]
    fn test_draw_in_order() {
        let mut drawing = Drawing::new();
        drawing.add_shape(square_block());
        drawing.add_shape(ShapeType::Circle(Circle::default()));
        let mut canvas = RecordingCanvas::default();
        drawing.draw(&mut canvas);
        assert_eq!(canvas.calls.first().map(String::as_str), Some("begin SQ"));
        assert!(canvas.calls.last().unwrap().starts_with("Circle"));
    }

    #[test]
    fn test_counting_canvas() {
        let mut drawing = Drawing::new();
        drawing.add_shape(square_block());
        drawing.add_shape(ShapeType::Insert(Insert::new("SQ", Vector3::ZERO)));
        let mut hidden = line(0.0, 0.0, 1.0, 0.0);
        hidden.common_mut().visible = false;
        drawing.add_shape(hidden);

        let mut canvas = CountingCanvas::default();
        drawing.draw(&mut canvas);
        assert_eq!(canvas.blocks, 1);
        assert_eq!(canvas.primitives, 4);
        assert_eq!(canvas.invisible, 1);
    }

    #[test]
    fn test_flip_reaches_every_shape() {
        let mut drawing = Drawing::new();
        drawing.add_shape(line(1.0, 0.0, 2.0, 0.0));
        drawing.flip_x();
        let rect = drawing.bounding_rect().unwrap();
        assert_eq!(rect.min.x, -2.0);
        drawing.flip_x();
        assert_eq!(drawing.shapes()[0], line(1.0, 0.0, 2.0, 0.0));
    }
}
