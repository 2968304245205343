//! Decode failures that abort a whole parse.
//!
//! Only buffer-shape problems live here. Per-event inconsistencies (unknown
//! addresses, unknown buff ids) are skipped where they occur and never
//! surface as errors.

/// Fatal decode error. The parser turns any of these into an invalid `Log`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The first four bytes are not the EVTC magic tag.
    #[error("corrupted or otherwise invalid EVTC file (magic tag {found:?})")]
    MalformedHeader { found: [u8; 4] },

    /// A read would run past the end of the buffer.
    #[error("truncated {section}: need {needed} bytes at offset {offset}, only {available} left")]
    Truncated {
        section: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Bytes after the skill table do not divide into whole event records.
    #[error("event stream misaligned: {remainder} trailing bytes with {record_size}-byte records")]
    Misaligned { remainder: usize, record_size: usize },

    /// Revision byte names an event layout this parser does not know.
    #[error("unsupported EVTC revision {0}")]
    UnsupportedRevision(u8),
}
