//! Line type table entry

use super::TableEntry;
use crate::error::Result;
use crate::io::archive::{persist_flags, Archive, Persist};
use crate::io::cad_json::CadJsonObject;
use bitflags::bitflags;

bitflags! {
    /// Line type flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct LineTypeFlags: i32 {
        /// Defined in an external reference
        const XREF = 16;
        /// External reference has been resolved
        const XREF_RESOLVED = 16 | 32;
        /// Modified internally since the last load
        const MODIFIED_INTERNAL = 64;
    }
}

/// A line type: a named dash pattern
///
/// Pattern lengths: positive = dash, negative = gap, 0 = dot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineType {
    pub name: String,
    pub flags: LineTypeFlags,
    pub description: String,
    pub path: Vec<f64>,
}

impl LineType {
    /// Create a new continuous line type
    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create the standard "Continuous" line type
    pub fn continuous() -> Self {
        LineType {
            description: "Solid line".to_string(),
            ..Self::new("Continuous")
        }
    }

    /// Total length of one pattern repetition
    pub fn pattern_length(&self) -> f64 {
        self.path.iter().map(|l| l.abs()).sum()
    }

    /// Check if this is a continuous line type
    pub fn is_continuous(&self) -> bool {
        self.path.is_empty()
    }

    pub fn load_from_cad_json(&mut self, json: &CadJsonObject) -> Result<()> {
        self.name = json.str("name")?.to_string();
        self.flags = LineTypeFlags::from_bits_retain(json.i32_or("flags", 0)?);
        self.description = json.string_or("description", "")?;
        self.path = json.numbers_or_empty("pattern")?;
        Ok(())
    }
}

impl TableEntry for LineType {
    const TABLE: &'static str = "line type";

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Persist for LineType {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        ar.string(&mut self.name)?;
        persist_flags(ar, &mut self.flags)?;
        ar.string(&mut self.description)?;
        self.path.persist(ar)
    }
}
