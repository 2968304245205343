//! Bounds-checked little-endian cursor over the raw log buffer.

use encoding_rs::UTF_8;
use memchr::memchr;

use crate::error::DecodeError;

pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
    section: &'static str,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            section: "header",
        }
    }

    /// Name the table being read, for truncation errors.
    pub fn enter(&mut self, section: &'static str) {
        self.section = section;
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::Truncated {
                section: self.section,
                offset: self.pos,
                needed: n,
                available: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.take(n).map(|_| ())
    }

    pub fn array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.array::<1>()?[0])
    }

    pub fn u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.array()?))
    }

    pub fn i16(&mut self) -> Result<i16, DecodeError> {
        Ok(i16::from_le_bytes(self.array()?))
    }

    pub fn u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    pub fn i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    pub fn u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.array()?))
    }

    /// Fail early if `count` records of `size` bytes cannot all fit.
    pub fn ensure_records(&self, count: usize, size: usize) -> Result<(), DecodeError> {
        let needed = count.saturating_mul(size);
        if needed > self.remaining() {
            return Err(DecodeError::Truncated {
                section: self.section,
                offset: self.pos,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }
}

/// Split at the first NUL. Without one, the whole slice is the segment.
pub fn split_nul(bytes: &[u8]) -> (&[u8], &[u8]) {
    match memchr(0, bytes) {
        Some(i) => (&bytes[..i], &bytes[i + 1..]),
        None => (bytes, &[]),
    }
}

/// Decode a NUL-terminated text field, replacing invalid UTF-8.
pub fn c_string(bytes: &[u8]) -> String {
    let (text, _) = split_nul(bytes);
    let (decoded, _had_errors) = UTF_8.decode_without_bom_handling(text);
    decoded.into_owned()
}
