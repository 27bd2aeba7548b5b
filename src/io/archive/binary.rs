//! Little-endian binary archive

use super::Archive;
use crate::error::{Result, ShapeError};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Binary archive in saving mode
pub struct BinaryArchiveWriter<W: Write> {
    writer: W,
    version: u32,
}

impl<W: Write> BinaryArchiveWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, version: 0 }
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        let len = u32::try_from(data.len())
            .map_err(|_| ShapeError::Custom(format!("buffer too long to persist: {}", data.len())))?;
        self.writer.write_u32::<LittleEndian>(len)?;
        self.writer.write_all(data)?;
        Ok(())
    }

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Archive for BinaryArchiveWriter<W> {
    fn is_saving(&self) -> bool {
        true
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    fn boolean(&mut self, value: &mut bool) -> Result<()> {
        self.writer.write_u8(u8::from(*value))?;
        Ok(())
    }

    fn int(&mut self, value: &mut i32) -> Result<()> {
        self.writer.write_i32::<LittleEndian>(*value)?;
        Ok(())
    }

    fn uint(&mut self, value: &mut u32) -> Result<()> {
        self.writer.write_u32::<LittleEndian>(*value)?;
        Ok(())
    }

    fn ulong(&mut self, value: &mut u64) -> Result<()> {
        self.writer.write_u64::<LittleEndian>(*value)?;
        Ok(())
    }

    fn double(&mut self, value: &mut f64) -> Result<()> {
        self.writer.write_f64::<LittleEndian>(*value)?;
        Ok(())
    }

    fn string(&mut self, value: &mut String) -> Result<()> {
        self.write_bytes(value.as_bytes())
    }

    fn binary(&mut self, value: &mut Vec<u8>) -> Result<()> {
        self.write_bytes(value)
    }
}

/// Binary archive in loading mode
pub struct BinaryArchiveReader<R: Read> {
    reader: R,
    version: u32,
}

impl<R: Read> BinaryArchiveReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, version: 0 }
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.reader.read_u32::<LittleEndian>().map_err(truncated)?;
        let mut data = Vec::new();
        (&mut self.reader).take(len as u64).read_to_end(&mut data)?;
        if data.len() != len as usize {
            return Err(ShapeError::Corrupt(format!(
                "truncated buffer: expected {} bytes, found {}",
                len,
                data.len()
            )));
        }
        Ok(data)
    }
}

/// Running out of bytes mid-record is corruption, not a transport failure
fn truncated(err: io::Error) -> ShapeError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        ShapeError::Corrupt("unexpected end of record".to_string())
    } else {
        ShapeError::Io(err)
    }
}

impl<R: Read> Archive for BinaryArchiveReader<R> {
    fn is_saving(&self) -> bool {
        false
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    fn boolean(&mut self, value: &mut bool) -> Result<()> {
        *value = match self.reader.read_u8().map_err(truncated)? {
            0 => false,
            1 => true,
            other => {
                return Err(ShapeError::Corrupt(format!("invalid boolean byte: {}", other)))
            }
        };
        Ok(())
    }

    fn int(&mut self, value: &mut i32) -> Result<()> {
        *value = self.reader.read_i32::<LittleEndian>().map_err(truncated)?;
        Ok(())
    }

    fn uint(&mut self, value: &mut u32) -> Result<()> {
        *value = self.reader.read_u32::<LittleEndian>().map_err(truncated)?;
        Ok(())
    }

    fn ulong(&mut self, value: &mut u64) -> Result<()> {
        *value = self.reader.read_u64::<LittleEndian>().map_err(truncated)?;
        Ok(())
    }

    fn double(&mut self, value: &mut f64) -> Result<()> {
        *value = self.reader.read_f64::<LittleEndian>().map_err(truncated)?;
        Ok(())
    }

    fn string(&mut self, value: &mut String) -> Result<()> {
        let data = self.read_bytes()?;
        *value = String::from_utf8(data)
            .map_err(|e| ShapeError::Corrupt(format!("invalid UTF-8 string: {}", e)))?;
        Ok(())
    }

    fn binary(&mut self, value: &mut Vec<u8>) -> Result<()> {
        *value = self.read_bytes()?;
        Ok(())
    }
}
