//! CAD-JSON importer
//!
//! A CAD-JSON document is a decoded JSON value tree:
//!
//! ```text
//! { "lineTypes": [...], "layers": [...], "blocks": [...], "entities": [...] }
//! ```
//!
//! Every key is optional. Entities are created through the shape registry
//! by their `type` entity name and populated by the shape's own loader.

mod reader;

pub use reader::{point_from, poly_point_from, poly_point_from_vertex, CadJsonObject};

use crate::drawing::Drawing;
use crate::error::{Result, ShapeError};
use crate::notification::NotificationType;
use crate::shapes::dimension::entity_name_for_dxf_type;
use crate::shapes::{create_shape_from_entity_name, Block, Shape, ShapeType};
use crate::tables::{Layer, LineType};
use serde_json::Value;

/// Build one shape from a CAD-JSON entity object.
///
/// A `DIMENSION` carrying a `dimensionType` code is routed to its subclass
/// entity name first.
pub fn shape_from_cad_json(value: &Value) -> Result<ShapeType> {
    let entity = CadJsonObject::new("entity", value)?;
    let mut name = entity.str("type")?;
    if name == "DIMENSION" && entity.has("dimensionType") {
        name = entity_name_for_dxf_type(entity.i32("dimensionType")?);
    }
    let mut shape = create_shape_from_entity_name(name)?;
    shape.load_from_cad_json(&CadJsonObject::new(name, value)?)?;
    Ok(shape)
}

/// Configuration for the CAD-JSON importer.
#[derive(Debug, Clone)]
pub struct ImportConfiguration {
    /// When `true`, a malformed entity or table entry is skipped and
    /// reported as a notification instead of aborting the import.
    ///
    /// Default: `false`
    pub failsafe: bool,
    /// When `true`, an entity name with no registered shape kind is
    /// skipped and reported instead of failing with `NotFound`.
    ///
    /// Default: `true`
    pub skip_unknown_entities: bool,
    /// Run [`Drawing::resolve_colors`] after the import.
    ///
    /// Default: `true`
    pub resolve_colors: bool,
}

impl Default for ImportConfiguration {
    fn default() -> Self {
        Self {
            failsafe: false,
            skip_unknown_entities: true,
            resolve_colors: true,
        }
    }
}

/// CAD-JSON document importer
#[derive(Debug, Clone, Default)]
pub struct CadJsonImporter {
    config: ImportConfiguration,
}

impl CadJsonImporter {
    pub fn new(config: ImportConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfiguration {
        &self.config
    }

    /// Parse raw JSON text and import it
    pub fn import_str(&self, text: &str) -> Result<Drawing> {
        let value: Value = serde_json::from_str(text)?;
        self.import(&value)
    }

    /// Import a decoded CAD-JSON document into a new drawing
    pub fn import(&self, document: &Value) -> Result<Drawing> {
        let mut drawing = Drawing::new();
        self.read_into(&mut drawing, &CadJsonObject::new("document", document)?)?;
        Ok(drawing)
    }

    /// Import a document into an existing drawing: line types, layers,
    /// blocks, then entities.
    pub fn read_into(&self, drawing: &mut Drawing, document: &CadJsonObject) -> Result<()> {
        for value in document.array_or_empty("lineTypes")? {
            let mut line_type = LineType::default();
            let loaded = CadJsonObject::new("LTYPE", value)
                .and_then(|json| line_type.load_from_cad_json(&json));
            if self.recover(drawing, "line type", loaded)? {
                let name = line_type.name.clone();
                if drawing.line_types.add_or_replace(line_type).is_some() {
                    notify_replaced(drawing, "line type", &name);
                }
            }
        }

        for value in document.array_or_empty("layers")? {
            let mut layer = Layer::default();
            let loaded = CadJsonObject::new("LAYER", value)
                .and_then(|json| layer.load_from_cad_json(&json));
            if self.recover(drawing, "layer", loaded)? {
                let name = layer.name.clone();
                if drawing.layers.add_or_replace(layer).is_some() {
                    notify_replaced(drawing, "layer", &name);
                }
            }
        }

        for value in document.array_or_empty("blocks")? {
            let mut block = Block::default();
            let loaded = CadJsonObject::new("BLOCK", value)
                .and_then(|json| block.load_from_cad_json(&json));
            if self.recover(drawing, "BLOCK", loaded)? {
                drawing.add_shape(ShapeType::Block(block));
            }
        }

        for value in document.array_or_empty("entities")? {
            match shape_from_cad_json(value) {
                Ok(shape) => drawing.add_shape(shape),
                Err(ShapeError::NotFound(name)) if self.config.skip_unknown_entities => {
                    tracing::warn!(entity = %name, "skipping unsupported entity");
                    drawing.notifications.notify(
                        NotificationType::NotSupported,
                        format!("Entity not supported: {}", name),
                    );
                }
                Err(e @ ShapeError::NotFound(_)) => return Err(e),
                Err(e) => {
                    self.recover(drawing, "entity", Err(e))?;
                }
            }
        }

        if self.config.resolve_colors {
            drawing.resolve_colors();
        }

        tracing::debug!(
            shapes = drawing.shape_count(),
            layers = drawing.layers.len(),
            line_types = drawing.line_types.len(),
            skipped = drawing.notifications.len(),
            "CAD-JSON import finished"
        );
        Ok(())
    }

    /// `Ok(true)` when the item loaded. In failsafe mode a recoverable
    /// error becomes an `Error` notification and `Ok(false)`.
    fn recover(&self, drawing: &mut Drawing, what: &str, result: Result<()>) -> Result<bool> {
        match result {
            Ok(()) => Ok(true),
            Err(e) if self.config.failsafe && e.is_recoverable() => {
                tracing::warn!(error = %e, "skipping malformed {}", what);
                drawing
                    .notifications
                    .notify(NotificationType::Error, format!("Skipped {}: {}", what, e));
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

fn notify_replaced(drawing: &mut Drawing, table: &str, name: &str) {
    tracing::warn!(table, name, "duplicate table entry replaced");
    drawing.notifications.notify(
        NotificationType::Warning,
        format!("Duplicate {} '{}' replaced", table, name),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;
    use serde_json::json;

    #[test]
    fn test_shape_from_cad_json() {
        let shape = shape_from_cad_json(&json!({
            "type": "LINE",
            "startPoint": [0, 0],
            "endPoint": [3, 4],
            "color": 1
        }))
        .unwrap();
        assert_eq!(shape.kind(), ShapeKind::Line);
        assert_eq!(shape.common().layer_color_index, 1);
    }

    #[test]
    fn test_shape_requires_type() {
        let err = shape_from_cad_json(&json!({"startPoint": [0, 0]})).unwrap_err();
        assert!(matches!(err, ShapeError::MissingField { ref field, .. } if field == "type"));
    }

    #[test]
    fn test_dimension_type_routing() {
        let shape = shape_from_cad_json(&json!({
            "type": "DIMENSION",
            "dimensionType": 33,
            "definitionPoint": [0, 0]
        }))
        .unwrap();
        assert_eq!(shape.kind(), ShapeKind::DimAligned);

        let plain = shape_from_cad_json(&json!({"type": "DIMENSION", "definitionPoint": [0, 0]})).unwrap();
        assert_eq!(plain.kind(), ShapeKind::Dimension);
    }

    #[test]
    fn test_unknown_entity_is_skipped_by_default() {
        let drawing = CadJsonImporter::default()
            .import(&json!({"entities": [
                {"type": "WIPEOUT"},
                {"type": "POINT", "position": [1, 1]}
            ]}))
            .unwrap();
        assert_eq!(drawing.shape_count(), 1);
        assert!(drawing.notifications.has_type(NotificationType::NotSupported));
    }

    #[test]
    fn test_unknown_entity_fails_when_not_skipping() {
        let importer = CadJsonImporter::new(ImportConfiguration {
            skip_unknown_entities: false,
            failsafe: true,
            ..Default::default()
        });
        let err = importer
            .import(&json!({"entities": [{"type": "bogus_entity"}]}))
            .unwrap_err();
        assert!(matches!(err, ShapeError::NotFound(ref name) if name == "bogus_entity"));
    }

    #[test]
    fn test_malformed_entity_strict_and_failsafe() {
        let document = json!({"entities": [
            {"type": "CIRCLE", "center": [0, 0]},
            {"type": "CIRCLE", "center": [0, 0], "radius": 2}
        ]});

        let err = CadJsonImporter::default().import(&document).unwrap_err();
        assert!(matches!(err, ShapeError::MissingField { .. }));

        let drawing = CadJsonImporter::new(ImportConfiguration {
            failsafe: true,
            ..Default::default()
        })
        .import(&document)
        .unwrap();
        assert_eq!(drawing.shape_count(), 1);
        assert_eq!(drawing.notifications.len(), 1);
        assert!(drawing.notifications.has_type(NotificationType::Error));
    }

    #[test]
    fn test_blocks_precede_entities() {
        let drawing = CadJsonImporter::default()
            .import(&json!({
                "entities": [{"type": "INSERT", "name": "B", "insertionPoint": [0, 0]}],
                "blocks": [{"name": "B", "entities": []}]
            }))
            .unwrap();
        assert_eq!(drawing.shapes()[0].kind(), ShapeKind::Block);
        assert_eq!(drawing.shapes()[1].kind(), ShapeKind::Insert);
    }

    #[test]
    fn test_duplicate_layer_is_replaced_with_warning() {
        let drawing = CadJsonImporter::default()
            .import(&json!({"layers": [
                {"name": "A", "color": 1},
                {"name": "a", "color": 2}
            ]}))
            .unwrap();
        assert_eq!(drawing.layers.len(), 1);
        assert_eq!(drawing.layers.get("A").unwrap().color_index, 2);
        assert!(drawing.notifications.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_import_str_rejects_bad_json() {
        let err = CadJsonImporter::default().import_str("{ not json").unwrap_err();
        assert!(matches!(err, ShapeError::Json(_)));
    }
}
