//! Skill id -> name table. Enrichment only; nothing is computed from it.

use super::reader::{ByteReader, c_string};
use crate::error::DecodeError;

pub const SKILL_RECORD_SIZE: usize = 4 + 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: i32,
    pub name: String,
}

pub fn decode_skill_table(reader: &mut ByteReader<'_>) -> Result<Vec<Skill>, DecodeError> {
    reader.enter("skill table");
    let count = reader.u32()? as usize;
    reader.ensure_records(count, SKILL_RECORD_SIZE)?;

    let mut skills = Vec::with_capacity(count);
    for _ in 0..count {
        let id = reader.i32()?;
        let name = c_string(reader.take(64)?);
        skills.push(Skill { id, name });
    }
    Ok(skills)
}
