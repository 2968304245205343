//! Synthetic EVTC buffers for tests.

use revtc_types::BoonDefinition;

use crate::combat_log::{
    Activation, BuffRemove, ByteReader, CombatEvent, Header, Iff, Revision, StateChange,
    decode_agent_table,
};
use crate::context::ParseContext;

const NON_PLAYER_ELITE: u32 = 0xFFFF_FFFF;

/// Event with every field zeroed.
pub fn blank_event() -> CombatEvent {
    CombatEvent {
        time: 0,
        src_agent: 0,
        dst_agent: 0,
        value: 0,
        buff_dmg: 0,
        overstack_value: 0,
        skill_id: 0,
        src_instid: 0,
        dst_instid: 0,
        src_master_instid: 0,
        dst_master_instid: 0,
        iff: Iff::Friend,
        is_buff: false,
        result: 0,
        activation: Activation::None,
        buff_remove: BuffRemove::None,
        is_ninety: false,
        is_fifty: false,
        is_moving: false,
        state_change: StateChange::None,
        is_flanking: false,
        is_shields: false,
        is_offcycle: false,
        buff_instid: 0,
    }
}

/// Context with the builder's agents loaded and the default boons seeded.
pub fn context_from(builder: LogBuilder) -> ParseContext {
    let bytes = builder.agent_table_bytes();
    let records = decode_agent_table(&mut ByteReader::new(&bytes)).unwrap();
    let mut ctx = ParseContext::new(Header {
        version: "20200101".to_string(),
        revision: builder.revision,
        area_id: builder.area_id,
    });
    ctx.load_agents(records, &BoonDefinition::defaults());
    ctx
}

fn fixed<const N: usize>(text: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out[..text.len()].copy_from_slice(text);
    out
}

#[derive(Debug, Clone)]
pub struct LogBuilder {
    area_id: u16,
    revision: Revision,
    magic: [u8; 4],
    agents: Vec<[u8; 96]>,
    skills: Vec<(i32, String)>,
    events: Vec<CombatEvent>,
}

impl LogBuilder {
    pub fn new(area_id: u16) -> Self {
        Self {
            area_id,
            revision: Revision::Current,
            magic: *b"EVTC",
            agents: Vec::new(),
            skills: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn legacy(mut self) -> Self {
        self.revision = Revision::Legacy;
        self
    }

    pub fn magic(mut self, magic: &[u8; 4]) -> Self {
        self.magic = *magic;
        self
    }

    fn agent(mut self, addr: u64, profession: u32, elite: u32, blob: &[u8]) -> Self {
        let mut rec = [0u8; 96];
        rec[0..8].copy_from_slice(&addr.to_le_bytes());
        rec[8..12].copy_from_slice(&profession.to_le_bytes());
        rec[12..16].copy_from_slice(&elite.to_le_bytes());
        rec[28..92].copy_from_slice(&fixed::<64>(blob));
        self.agents.push(rec);
        self
    }

    pub fn player(
        self,
        addr: u64,
        profession: u32,
        elite: u32,
        character: &str,
        account: &str,
        subgroup: u8,
    ) -> Self {
        let mut blob = Vec::new();
        blob.extend_from_slice(character.as_bytes());
        blob.extend_from_slice(b"\0:");
        blob.extend_from_slice(account.as_bytes());
        blob.push(0);
        blob.push(b'0' + subgroup);
        blob.push(0);
        self.agent(addr, profession, elite, &blob)
    }

    pub fn npc(self, addr: u64, species: u16, name: &str) -> Self {
        let blob = [name.as_bytes(), b"\0".as_slice()].concat();
        self.agent(addr, u32::from(species), NON_PLAYER_ELITE, &blob)
    }

    pub fn gadget(self, addr: u64, species: u16, name: &str) -> Self {
        let blob = [name.as_bytes(), b"\0".as_slice()].concat();
        self.agent(addr, (0xFFFF << 16) | u32::from(species), NON_PLAYER_ELITE, &blob)
    }

    pub fn skill(mut self, id: i32, name: &str) -> Self {
        self.skills.push((id, name.to_string()));
        self
    }

    pub fn event(mut self, event: CombatEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn hit(self, time: u64, src: u64, dst: u64, value: i32) -> Self {
        self.event(CombatEvent {
            time,
            src_agent: src,
            dst_agent: dst,
            value,
            ..blank_event()
        })
    }

    pub fn buff(self, time: u64, src: u64, dst: u64, skill_id: u32, duration: i32) -> Self {
        self.event(CombatEvent {
            time,
            src_agent: src,
            dst_agent: dst,
            value: duration,
            skill_id,
            is_buff: true,
            ..blank_event()
        })
    }

    pub fn state(self, time: u64, src: u64, kind: StateChange) -> Self {
        self.event(CombatEvent {
            time,
            src_agent: src,
            state_change: kind,
            ..blank_event()
        })
    }

    pub fn agent_table_bytes(&self) -> Vec<u8> {
        let mut buf = (self.agents.len() as u32).to_le_bytes().to_vec();
        for rec in &self.agents {
            buf.extend_from_slice(rec);
        }
        buf
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.magic);
        buf.extend_from_slice(b"20200101");
        buf.push(self.revision.as_byte());
        buf.extend_from_slice(&self.area_id.to_le_bytes());
        buf.push(0);

        buf.extend_from_slice(&self.agent_table_bytes());

        buf.extend_from_slice(&(self.skills.len() as u32).to_le_bytes());
        for (id, name) in &self.skills {
            buf.extend_from_slice(&id.to_le_bytes());
            buf.extend_from_slice(&fixed::<64>(name.as_bytes()));
        }

        for event in &self.events {
            match self.revision {
                Revision::Legacy => encode_legacy(&mut buf, event),
                Revision::Current => encode_current(&mut buf, event),
            }
        }
        buf
    }
}

fn encode_core(buf: &mut Vec<u8>, e: &CombatEvent) {
    buf.extend_from_slice(&e.time.to_le_bytes());
    buf.extend_from_slice(&e.src_agent.to_le_bytes());
    buf.extend_from_slice(&e.dst_agent.to_le_bytes());
    buf.extend_from_slice(&e.value.to_le_bytes());
    buf.extend_from_slice(&e.buff_dmg.to_le_bytes());
}

fn encode_flags(buf: &mut Vec<u8>, e: &CombatEvent) {
    buf.extend_from_slice(&[
        u8::from(e.iff),
        u8::from(e.is_buff),
        e.result,
        u8::from(e.activation),
        u8::from(e.buff_remove),
        u8::from(e.is_ninety),
        u8::from(e.is_fifty),
        u8::from(e.is_moving),
        u8::from(e.state_change),
        u8::from(e.is_flanking),
        u8::from(e.is_shields),
        u8::from(e.is_offcycle),
    ]);
}

fn encode_legacy(buf: &mut Vec<u8>, e: &CombatEvent) {
    encode_core(buf, e);
    buf.extend_from_slice(&(e.overstack_value as u16).to_le_bytes());
    buf.extend_from_slice(&(e.skill_id as u16).to_le_bytes());
    buf.extend_from_slice(&e.src_instid.to_le_bytes());
    buf.extend_from_slice(&e.dst_instid.to_le_bytes());
    buf.extend_from_slice(&e.src_master_instid.to_le_bytes());
    buf.extend_from_slice(&[0u8; 9]);
    encode_flags(buf, e);
    buf.push(0);
}

fn encode_current(buf: &mut Vec<u8>, e: &CombatEvent) {
    encode_core(buf, e);
    buf.extend_from_slice(&e.overstack_value.to_le_bytes());
    buf.extend_from_slice(&e.skill_id.to_le_bytes());
    buf.extend_from_slice(&e.src_instid.to_le_bytes());
    buf.extend_from_slice(&e.dst_instid.to_le_bytes());
    buf.extend_from_slice(&e.src_master_instid.to_le_bytes());
    buf.extend_from_slice(&e.dst_master_instid.to_le_bytes());
    encode_flags(buf, e);
    buf.extend_from_slice(&e.buff_instid.to_le_bytes());
}
