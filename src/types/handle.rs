//! External correlation handle
//!
//! Handles identify a shape in some external system. They are carried
//! through import and persistence verbatim and never looked up.

use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use std::fmt;

/// An opaque 64-bit correlation handle. Handle 0 means "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(u64);

impl Handle {
    /// The null handle (0)
    pub const NULL: Handle = Handle(0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    /// Get the raw u64 value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Parse a hexadecimal handle string as written by CAD exports
    /// (`"1F"`, `"0x1F"`)
    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text
            .trim()
            .trim_start_matches("0x")
            .trim_start_matches("0X");
        u64::from_str_radix(digits, 16).ok().map(Handle)
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle(value)
    }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}", self.0)
    }
}

impl fmt::UpperHex for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl Persist for Handle {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        ar.ulong(&mut self.0)
    }
}
