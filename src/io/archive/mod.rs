//! Symmetric record codec
//!
//! Every persisted type implements [`Persist`] once. The same `persist`
//! body runs for saving and loading: each [`Archive`] primitive takes the
//! field by `&mut`, a saving archive reads it and a loading archive
//! overwrites it. Field order in `persist` is the wire order.

pub mod binary;
pub mod text;

pub use binary::{BinaryArchiveReader, BinaryArchiveWriter};
pub use text::{TextArchiveReader, TextArchiveWriter};

use crate::error::{Result, ShapeError};
use crate::types::ColorIndex;

/// One direction of the record codec
pub trait Archive {
    /// True when values flow from the fields into the stream
    fn is_saving(&self) -> bool;

    /// True when values flow from the stream into the fields
    fn is_loading(&self) -> bool {
        !self.is_saving()
    }

    /// Record version being written or read
    fn version(&self) -> u32;

    fn set_version(&mut self, version: u32);

    fn boolean(&mut self, value: &mut bool) -> Result<()>;
    fn int(&mut self, value: &mut i32) -> Result<()>;
    fn uint(&mut self, value: &mut u32) -> Result<()>;
    fn ulong(&mut self, value: &mut u64) -> Result<()>;
    fn double(&mut self, value: &mut f64) -> Result<()>;
    fn string(&mut self, value: &mut String) -> Result<()>;
    fn binary(&mut self, value: &mut Vec<u8>) -> Result<()>;
}

/// A type with one read/write procedure over an [`Archive`]
pub trait Persist {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()>;
}

impl Persist for f64 {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        ar.double(self)
    }
}

/// Sequences are a `u32` count followed by the items.
impl<T: Persist + Default> Persist for Vec<T> {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        let mut count = persist_count(ar, self.len())?;
        if ar.is_saving() {
            for item in self.iter_mut() {
                item.persist(ar)?;
            }
        } else {
            self.clear();
            while count > 0 {
                let mut item = T::default();
                item.persist(ar)?;
                self.push(item);
                count -= 1;
            }
        }
        Ok(())
    }
}

impl<T: Persist, const N: usize> Persist for [T; N] {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        for item in self.iter_mut() {
            item.persist(ar)?;
        }
        Ok(())
    }
}

/// Write `len` as a `u32` count, or read a count back.
pub fn persist_count(ar: &mut dyn Archive, len: usize) -> Result<u32> {
    let mut count = u32::try_from(len)
        .map_err(|_| ShapeError::Custom(format!("sequence too long to persist: {}", len)))?;
    ar.uint(&mut count)?;
    Ok(count)
}

/// Persist a bitflags value as an `int`, keeping unknown bits.
pub fn persist_flags<F>(ar: &mut dyn Archive, flags: &mut F) -> Result<()>
where
    F: bitflags::Flags<Bits = i32>,
{
    let mut bits = flags.bits();
    ar.int(&mut bits)?;
    *flags = F::from_bits_retain(bits);
    Ok(())
}

/// Persist a C-like enum as an `int` through its raw conversions.
pub fn persist_enum<E>(ar: &mut dyn Archive, value: &mut E, what: &str) -> Result<()>
where
    E: Copy + Into<i32> + TryFrom<i32>,
{
    let mut raw: i32 = (*value).into();
    ar.int(&mut raw)?;
    *value = E::try_from(raw)
        .map_err(|_| ShapeError::Corrupt(format!("invalid {} value: {}", what, raw)))?;
    Ok(())
}

/// Persist a layer color index as an `int`. Values outside the index
/// range fail the load.
pub fn persist_color_index(ar: &mut dyn Archive, index: &mut i32) -> Result<()> {
    ar.int(index)?;
    if ar.is_loading() {
        ColorIndex::try_from(*index)
            .map_err(|_| ShapeError::Corrupt(format!("invalid color index value: {}", index)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector2;

    #[test]
    fn test_vec_roundtrip_binary() {
        let mut points = vec![Vector2::new(1.0, 2.0), Vector2::new(-3.5, 0.25)];
        let mut buf = Vec::new();
        {
            let mut writer = BinaryArchiveWriter::new(&mut buf);
            points.persist(&mut writer).unwrap();
        }
        // count + 4 doubles
        assert_eq!(buf.len(), 4 + 4 * 8);

        let mut loaded: Vec<Vector2> = vec![Vector2::ZERO; 7];
        let mut reader = BinaryArchiveReader::new(buf.as_slice());
        loaded.persist(&mut reader).unwrap();
        assert_eq!(loaded, points);
    }

    #[test]
    fn test_array_has_no_count() {
        let mut corners = [1.0f64, 2.0, 3.0];
        let mut buf = Vec::new();
        {
            let mut writer = BinaryArchiveWriter::new(&mut buf);
            corners.persist(&mut writer).unwrap();
        }
        assert_eq!(buf.len(), 3 * 8);
    }

    #[test]
    fn test_truncated_sequence_fails() {
        // claims two doubles, carries one
        let mut buf = Vec::new();
        buf.extend_from_slice(&2u32.to_le_bytes());
        buf.extend_from_slice(&1.0f64.to_le_bytes());

        let mut loaded: Vec<f64> = Vec::new();
        let mut reader = BinaryArchiveReader::new(buf.as_slice());
        assert!(loaded.persist(&mut reader).is_err());
    }
}
