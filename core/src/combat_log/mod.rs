//! EVTC binary decoding
//!
//! Layout, in order: 16-byte header, agent table, skill table, then event
//! records until the end of the buffer. Every read is bounds checked; a
//! short or misaligned buffer is a [`DecodeError`](crate::DecodeError).

mod agent;
mod event;
mod header;
pub(crate) mod reader;
mod skill;

pub use agent::{
    AGENT_RECORD_SIZE, Agent, AgentKind, AgentRecord, DamageTotals, PlayerIdentity,
    decode_agent_table,
};
pub use event::{
    Activation, BuffRemove, CombatEvent, EVENT_RECORD_SIZE, Iff, StateChange, decode_events,
};
pub use header::{HEADER_SIZE, Header, MAGIC, Revision, decode_header};
pub use reader::ByteReader;
pub use skill::{SKILL_RECORD_SIZE, Skill, decode_skill_table};
