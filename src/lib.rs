//! # cadshape
//!
//! A polymorphic model of CAD drawing entities: lines, arcs, text,
//! dimensions, hatches, block definitions and references, and the rest of
//! the common DXF entity family.
//!
//! ## Features
//!
//! - One closed [`ShapeType`] sum over every entity kind, created by DXF
//!   entity name through a registry
//! - In-place flips and affine transforms with exact mirroring
//! - Axis-aligned bounds, with block references resolved by the drawing
//! - Binary and text records sharing one read/write procedure per type
//! - Import from CAD-JSON documents
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cadshape::{CadJsonImporter, ImportConfiguration, RecordFormat, Shape};
//!
//! let importer = CadJsonImporter::new(ImportConfiguration {
//!     failsafe: true,
//!     ..Default::default()
//! });
//! let drawing = importer.import_str(&std::fs::read_to_string("plan.json")?)?;
//!
//! for shape in drawing.shapes() {
//!     println!("{}", shape);
//! }
//! println!("bounds: {:?}", drawing.bounding_rect());
//!
//! let mut record = Vec::new();
//! drawing.save(&mut record, RecordFormat::Binary)?;
//! # Ok::<(), cadshape::ShapeError>(())
//! ```
//!
//! ## Architecture
//!
//! - `Shape` - Trait every entity kind implements
//! - `ShapeType` - Closed enum over the registered kinds
//! - `Persist` / `Archive` - Symmetric record codec
//! - `Drawing` - Ordered shape collection with line type and layer tables
//! - `Canvas` - Render collaborator shapes draw into

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod canvas;
pub mod drawing;
pub mod error;
pub mod io;
pub mod notification;
pub mod shapes;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ShapeError};
pub use types::{
    BoundingBox2D, Color, ColorIndex, ColorTable, Cookie, Handle, PolyPoint, Transform, Vector2,
    Vector3,
};

// Re-export shape types
pub use shapes::{
    create_shape, create_shape_from_entity_name, entity_name, AttributeSet, Shape, ShapeKind,
    ShapeType,
};

// Re-export table types
pub use tables::{Layer, LineType, Table, TableEntry};

pub use canvas::{Canvas, Primitive};
pub use drawing::Drawing;
pub use notification::{Notification, NotificationType};

// Re-export I/O types
pub use io::{CadJsonImporter, ImportConfiguration, RecordFormat, RecordReader};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
