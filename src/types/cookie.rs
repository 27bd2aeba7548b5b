//! Opaque per-shape extension payload

use super::Handle;
use crate::error::Result;
use crate::io::archive::{Archive, Persist};
use std::time::Duration;

/// Extension payload carried by every shape for round-trip fidelity with
/// an external system. The contents are never interpreted.
///
/// Ordering is lexicographic over `handle, buffer, text, duration`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cookie {
    pub handle: Handle,
    pub buffer: Vec<u8>,
    pub text: String,
    pub duration: Duration,
}

impl Cookie {
    /// Cookie carrying only a correlation handle
    pub fn with_handle(handle: Handle) -> Self {
        Cookie {
            handle,
            ..Default::default()
        }
    }

    /// True when no field carries data
    pub fn is_empty(&self) -> bool {
        self.handle.is_null()
            && self.buffer.is_empty()
            && self.text.is_empty()
            && self.duration.is_zero()
    }
}

impl Persist for Cookie {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        self.handle.persist(ar)?;
        ar.binary(&mut self.buffer)?;
        ar.string(&mut self.text)?;

        let mut secs = self.duration.as_secs();
        let mut nanos = self.duration.subsec_nanos();
        ar.ulong(&mut secs)?;
        ar.uint(&mut nanos)?;
        if ar.is_loading() {
            if nanos >= 1_000_000_000 {
                return Err(crate::error::ShapeError::Corrupt(format!(
                    "cookie duration nanoseconds out of range: {}",
                    nanos
                )));
            }
            self.duration = Duration::new(secs, nanos);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_ordering_is_lexicographic() {
        let a = Cookie::with_handle(Handle::new(1));
        let mut b = Cookie::with_handle(Handle::new(1));
        b.buffer = vec![0];
        let c = Cookie::with_handle(Handle::new(2));

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_cookie_empty() {
        assert!(Cookie::default().is_empty());
        let mut cookie = Cookie::default();
        cookie.duration = Duration::from_millis(5);
        assert!(!cookie.is_empty());
    }
}
