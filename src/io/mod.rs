//! Persistence and import
//!
//! - [`archive`]: the symmetric record codec and its binary and text archives
//! - [`record`]: framed top-level records for shapes and drawings
//! - [`cad_json`]: the CAD-JSON importer

pub mod archive;
pub mod cad_json;
pub mod record;

pub use archive::{Archive, Persist};
pub use cad_json::{shape_from_cad_json, CadJsonImporter, ImportConfiguration};
pub use record::{
    load_drawing, load_shape, save_drawing, save_shape, RecordFormat, RecordReader,
    CURRENT_RECORD_VERSION,
};
