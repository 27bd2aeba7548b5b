//! Name-keyed auxiliary tables

use crate::error::{Result, ShapeError};
use crate::io::archive::{persist_count, Archive, Persist};
use indexmap::IndexMap;

pub mod layer;
pub mod linetype;

pub use layer::{Layer, LayerFlags};
pub use linetype::{LineType, LineTypeFlags};

/// An entry of a name-keyed table
pub trait TableEntry {
    /// Table name used in diagnostics
    const TABLE: &'static str;

    /// Get the entry's name
    fn name(&self) -> &str;

    /// Set the entry's name
    fn set_name(&mut self, name: String);
}

/// Ordered table of named entries
///
/// Names are case-insensitive; insertion order is kept and is also the
/// numeric index order used by [`Table::get_index`].
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T: TableEntry> {
    entries: IndexMap<String, T>,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Add an entry to the table
    pub fn add(&mut self, entry: T) -> Result<()> {
        let key = entry.name().to_uppercase();
        if self.entries.contains_key(&key) {
            return Err(ShapeError::DuplicateEntry {
                table: T::TABLE,
                name: entry.name().to_string(),
            });
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Add or replace an entry; returns the replaced one
    pub fn add_or_replace(&mut self, entry: T) -> Option<T> {
        self.entries.insert(entry.name().to_uppercase(), entry)
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    /// Get a mutable entry by name (case-insensitive)
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&name.to_uppercase())
    }

    /// Entry at a position in insertion order
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.entries.get_index(index).map(|(_, entry)| entry)
    }

    /// Remove an entry by name (case-insensitive), keeping the order of
    /// the rest
    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.entries.shift_remove(&name.to_uppercase())
    }

    /// Check if an entry exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    /// Get all entry names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A table persists as a sequence of entries. Loading re-adds every
/// entry, so a record with duplicate names fails.
impl<T: TableEntry + Persist + Default> Persist for Table<T> {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        let mut count = persist_count(ar, self.len())?;
        if ar.is_saving() {
            for entry in self.iter_mut() {
                entry.persist(ar)?;
            }
        } else {
            self.clear();
            while count > 0 {
                let mut entry = T::default();
                entry.persist(ar)?;
                self.add(entry)?;
                count -= 1;
            }
        }
        Ok(())
    }
}
