//! Fixed 16-byte file header.

use super::reader::{ByteReader, c_string};
use crate::error::DecodeError;

pub const MAGIC: [u8; 4] = *b"EVTC";
pub const HEADER_SIZE: usize = 16;

/// Event record layout selected by the header's revision byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    /// Revision 0: 16-bit skill ids, no buff stack ids.
    Legacy,
    /// Revision 1: 32-bit skill ids and overstack, dst master id, buff stack id.
    Current,
}

impl Revision {
    pub fn from_byte(byte: u8) -> Result<Self, DecodeError> {
        match byte {
            0 => Ok(Self::Legacy),
            1 => Ok(Self::Current),
            other => Err(DecodeError::UnsupportedRevision(other)),
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Self::Legacy => 0,
            Self::Current => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Free-text build tag after the magic, usually a date such as `20190722`.
    pub version: String,
    pub revision: Revision,
    /// Encounter id, equal to the primary boss species id.
    pub area_id: u16,
}

pub fn decode_header(reader: &mut ByteReader<'_>) -> Result<Header, DecodeError> {
    reader.enter("header");
    let magic = reader.array::<4>()?;
    if magic != MAGIC {
        return Err(DecodeError::MalformedHeader { found: magic });
    }
    let version = c_string(reader.take(8)?);
    let revision = Revision::from_byte(reader.u8()?)?;
    let area_id = reader.u16()?;
    reader.skip(1)?;

    Ok(Header {
        version,
        revision,
        area_id,
    })
}
