//! Line-oriented text archive
//!
//! One value per line. Doubles use the shortest form that parses back to
//! the same bits, booleans are `0`/`1`, buffers are upper-case hex, and
//! strings escape line breaks with carets (`^J`, `^M`, `^I`, `^ ` for a
//! literal caret).

use super::Archive;
use crate::error::{Result, ShapeError};
use encoding_rs::Encoding;
use std::io::{BufRead, Write};

/// Text archive in saving mode
pub struct TextArchiveWriter<W: Write> {
    writer: W,
    version: u32,
}

impl<W: Write> TextArchiveWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, version: 0 }
    }

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escape a string so it fits on one line
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '^' => out.push_str("^ "),
            '\n' => out.push_str("^J"),
            '\r' => out.push_str("^M"),
            '\t' => out.push_str("^I"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape`]; `None` on a dangling or unknown escape
pub fn unescape(value: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '^' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            ' ' => out.push('^'),
            'J' => out.push('\n'),
            'M' => out.push('\r'),
            'I' => out.push('\t'),
            _ => return None,
        }
    }
    Some(out)
}

impl<W: Write> Archive for TextArchiveWriter<W> {
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
        writeln!(self.writer, "{}", u8::from(*value))?;
        Ok(())
    }

    fn int(&mut self, value: &mut i32) -> Result<()> {
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn uint(&mut self, value: &mut u32) -> Result<()> {
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn ulong(&mut self, value: &mut u64) -> Result<()> {
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn double(&mut self, value: &mut f64) -> Result<()> {
        // Display is the shortest representation that round-trips
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn string(&mut self, value: &mut String) -> Result<()> {
        writeln!(self.writer, "{}", escape(value))?;
        Ok(())
    }

    fn binary(&mut self, value: &mut Vec<u8>) -> Result<()> {
        for byte in value.iter() {
            write!(self.writer, "{:02X}", byte)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Text archive in loading mode
pub struct TextArchiveReader<R: BufRead> {
    reader: R,
    line_number: usize,
    version: u32,
    /// Fallback for lines that are not valid UTF-8. `None` rejects them.
    encoding: Option<&'static Encoding>,
}

impl<R: BufRead> TextArchiveReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            version: 0,
            encoding: None,
        }
    }

    /// Decode non-UTF-8 lines with a legacy encoding instead of failing
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = Some(encoding);
    }

    /// Current line number (1-based, last line read)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_line(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        let read = self.reader.read_until(b'\n', &mut bytes)?;
        if read == 0 {
            return Err(ShapeError::Corrupt(format!(
                "unexpected end of record after line {}",
                self.line_number
            )));
        }
        self.line_number += 1;

        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }

        match String::from_utf8(bytes) {
            Ok(line) => Ok(line),
            Err(err) => match self.encoding {
                Some(enc) => {
                    let (decoded, _, _) = enc.decode(err.as_bytes());
                    Ok(decoded.into_owned())
                }
                None => Err(self.corrupt("invalid UTF-8")),
            },
        }
    }

    fn corrupt(&self, what: &str) -> ShapeError {
        ShapeError::Corrupt(format!("line {}: {}", self.line_number, what))
    }

    fn parse<T: std::str::FromStr>(&mut self, what: &str) -> Result<T> {
        let line = self.read_line()?;
        line.trim()
            .parse::<T>()
            .map_err(|_| self.corrupt(&format!("expected {}, found '{}'", what, line)))
    }
}

impl<R: BufRead> Archive for TextArchiveReader<R> {
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
        *value = match self.parse::<u8>("boolean")? {
            0 => false,
            1 => true,
            _ => return Err(self.corrupt("boolean must be 0 or 1")),
        };
        Ok(())
    }

    fn int(&mut self, value: &mut i32) -> Result<()> {
        *value = self.parse("integer")?;
        Ok(())
    }

    fn uint(&mut self, value: &mut u32) -> Result<()> {
        *value = self.parse("unsigned integer")?;
        Ok(())
    }

    fn ulong(&mut self, value: &mut u64) -> Result<()> {
        *value = self.parse("unsigned integer")?;
        Ok(())
    }

    fn double(&mut self, value: &mut f64) -> Result<()> {
        *value = self.parse("number")?;
        Ok(())
    }

    fn string(&mut self, value: &mut String) -> Result<()> {
        let line = self.read_line()?;
        *value = unescape(&line).ok_or_else(|| self.corrupt("invalid caret escape"))?;
        Ok(())
    }

    fn binary(&mut self, value: &mut Vec<u8>) -> Result<()> {
        let line = self.read_line()?;
        let hex = line.trim().as_bytes();
        if hex.len() % 2 != 0 {
            return Err(self.corrupt("odd-length hex buffer"));
        }
        let mut data = Vec::with_capacity(hex.len() / 2);
        for pair in hex.chunks(2) {
            let byte = std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| self.corrupt("invalid hex digit"))?;
            data.push(byte);
        }
        *value = data;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_roundtrip() {
        let raw = "a^b\nc\rd\te^J";
        let escaped = escape(raw);
        assert_eq!(escaped, "a^ b^Jc^Md^Ie^ J");
        assert_eq!(unescape(&escaped).unwrap(), raw);
    }

    #[test]
    fn test_bad_escape() {
        assert!(unescape("abc^").is_none());
        assert!(unescape("^X").is_none());
    }

    #[test]
    fn test_write_layout() {
        let mut buf = Vec::new();
        {
            let mut w = TextArchiveWriter::new(&mut buf);
            w.double(&mut 0.1).unwrap();
            w.double(&mut 2.0).unwrap();
            w.boolean(&mut true).unwrap();
            w.binary(&mut vec![0xAB, 0x01]).unwrap();
            w.string(&mut "  padded ".to_string()).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "0.1\n2\n1\nAB01\n  padded \n");
    }

    #[test]
    fn test_read_preserves_string_whitespace() {
        let data = "  padded \n";
        let mut r = TextArchiveReader::new(data.as_bytes());
        let mut s = String::new();
        r.string(&mut s).unwrap();
        assert_eq!(s, "  padded ");
    }

    #[test]
    fn test_read_special_doubles() {
        let data = "inf\n-0\nNaN\n";
        let mut r = TextArchiveReader::new(data.as_bytes());
        let (mut a, mut b, mut c) = (0.0, 1.0, 0.0);
        r.double(&mut a).unwrap();
        r.double(&mut b).unwrap();
        r.double(&mut c).unwrap();
        assert_eq!(a, f64::INFINITY);
        assert!(b == 0.0 && b.is_sign_negative());
        assert!(c.is_nan());
    }

    #[test]
    fn test_bad_token() {
        let mut r = TextArchiveReader::new("twelve\n".as_bytes());
        let mut v = 0;
        let err = r.int(&mut v).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_end_of_stream() {
        let mut r = TextArchiveReader::new("".as_bytes());
        let mut v = 0u32;
        assert!(matches!(r.uint(&mut v), Err(ShapeError::Corrupt(_))));
    }

    #[test]
    fn test_legacy_encoding() {
        let data: &[u8] = b"caf\xE9\n";
        let mut strict = TextArchiveReader::new(data);
        let mut s = String::new();
        assert!(strict.string(&mut s).is_err());

        let mut lenient = TextArchiveReader::new(data);
        lenient.set_encoding(encoding_rs::WINDOWS_1252);
        lenient.string(&mut s).unwrap();
        assert_eq!(s, "café");
    }
}
