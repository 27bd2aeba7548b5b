//! Top-level persisted records
//!
//! A record is the version (`uint`), the kind tag (`int`), then the
//! fields of one shape or of a whole [`Drawing`]. The version is handed
//! to every `persist` call through [`Archive::version`].

use super::archive::{
    Archive, BinaryArchiveReader, BinaryArchiveWriter, Persist, TextArchiveReader,
    TextArchiveWriter,
};
use crate::drawing::Drawing;
use crate::error::{Result, ShapeError};
use crate::shapes::{create_shape, ShapeKind, ShapeType};
use encoding_rs::Encoding;
use std::io::{BufRead, Write};

/// Record version written by this build. Readers reject `0` and anything
/// newer.
pub const CURRENT_RECORD_VERSION: u32 = 1;

/// Wire encoding of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFormat {
    /// Little-endian binary
    #[default]
    Binary,
    /// One value per line
    Text,
}

/// Save one shape record
pub fn save_shape<W: Write>(writer: W, format: RecordFormat, shape: &ShapeType) -> Result<()> {
    let mut record = shape.clone();
    write_record(writer, format, shape.kind(), &mut record)
}

/// Load one shape record with the default reader
pub fn load_shape<R: BufRead>(reader: R, format: RecordFormat) -> Result<ShapeType> {
    RecordReader::new(format).read_shape(reader)
}

/// Save a drawing record
pub fn save_drawing<W: Write>(writer: W, format: RecordFormat, drawing: &Drawing) -> Result<()> {
    let mut record = drawing.clone();
    write_record(writer, format, ShapeKind::Drawing, &mut record)?;
    tracing::debug!(shapes = drawing.shape_count(), ?format, "drawing saved");
    Ok(())
}

/// Load a drawing record with the default reader
pub fn load_drawing<R: BufRead>(reader: R, format: RecordFormat) -> Result<Drawing> {
    RecordReader::new(format).read_drawing(reader)
}

fn write_record<W: Write>(
    writer: W,
    format: RecordFormat,
    kind: ShapeKind,
    record: &mut dyn Persist,
) -> Result<()> {
    match format {
        RecordFormat::Binary => {
            let mut ar = BinaryArchiveWriter::new(writer);
            write_framed(&mut ar, kind, record)?;
            ar.into_inner().flush()?;
        }
        RecordFormat::Text => {
            let mut ar = TextArchiveWriter::new(writer);
            write_framed(&mut ar, kind, record)?;
            ar.into_inner().flush()?;
        }
    }
    Ok(())
}

fn write_framed(ar: &mut dyn Archive, kind: ShapeKind, record: &mut dyn Persist) -> Result<()> {
    let mut version = CURRENT_RECORD_VERSION;
    ar.uint(&mut version)?;
    ar.set_version(version);
    let mut tag = kind.tag();
    ar.int(&mut tag)?;
    record.persist(ar)
}

/// Reader for persisted records
#[derive(Debug, Clone, Copy)]
pub struct RecordReader {
    format: RecordFormat,
    encoding: Option<&'static Encoding>,
}

impl RecordReader {
    pub fn new(format: RecordFormat) -> Self {
        Self {
            format,
            encoding: None,
        }
    }

    /// Decode text-record lines that are not valid UTF-8 with a legacy
    /// encoding instead of failing. Binary records are unaffected.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn format(&self) -> RecordFormat {
        self.format
    }

    /// Read a shape record; the kind tag picks the shape through the
    /// registry.
    pub fn read_shape<R: BufRead>(&self, reader: R) -> Result<ShapeType> {
        self.with_archive(reader, |ar| {
            let kind = read_header(ar)?;
            let mut shape = create_shape(kind)?;
            shape.persist(ar)?;
            Ok(shape)
        })
    }

    /// Read a drawing record. Any error discards the partial drawing.
    pub fn read_drawing<R: BufRead>(&self, reader: R) -> Result<Drawing> {
        let drawing = self.with_archive(reader, |ar| {
            let kind = read_header(ar)?;
            if kind != ShapeKind::Drawing {
                return Err(ShapeError::Corrupt(format!(
                    "expected a drawing record, found {}",
                    kind
                )));
            }
            let mut drawing = Drawing::new();
            drawing.persist(ar)?;
            Ok(drawing)
        })?;
        tracing::debug!(shapes = drawing.shape_count(), format = ?self.format, "drawing loaded");
        Ok(drawing)
    }

    fn with_archive<R, T>(&self, reader: R, read: impl FnOnce(&mut dyn Archive) -> Result<T>) -> Result<T>
    where
        R: BufRead,
    {
        match self.format {
            RecordFormat::Binary => read(&mut BinaryArchiveReader::new(reader)),
            RecordFormat::Text => {
                let mut ar = TextArchiveReader::new(reader);
                if let Some(encoding) = self.encoding {
                    ar.set_encoding(encoding);
                }
                read(&mut ar)
            }
        }
    }
}

fn read_header(ar: &mut dyn Archive) -> Result<ShapeKind> {
    let mut version = 0;
    ar.uint(&mut version)?;
    if version == 0 || version > CURRENT_RECORD_VERSION {
        return Err(ShapeError::UnsupportedVersion(version));
    }
    ar.set_version(version);
    let mut tag = 0;
    ar.int(&mut tag)?;
    ShapeKind::try_from(tag)
}
