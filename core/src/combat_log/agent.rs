//! Agent table: one fixed 96-byte record per tracked entity.

use super::reader::{ByteReader, c_string, split_nul};
use crate::error::DecodeError;

pub const AGENT_RECORD_SIZE: usize = 96;

/// `is_elite` value marking a non-player agent.
const NON_PLAYER_ELITE: u32 = 0xFFFF_FFFF;
/// Upper half of the profession field on gadgets.
const GADGET_MARKER: u16 = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Player,
    Npc,
    Gadget,
}

/// Identity fields packed into a player's name blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub character: String,
    pub account: String,
    pub subgroup: u8,
}

#[derive(Debug, Clone, Default)]
pub struct DamageTotals {
    pub direct: i64,
    pub boss_direct: i64,
    pub condi: i64,
    pub boss_condi: i64,
}

impl DamageTotals {
    pub fn add(&mut self, other: &DamageTotals) {
        self.direct += other.direct;
        self.boss_direct += other.boss_direct;
        self.condi += other.condi;
        self.boss_condi += other.boss_condi;
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub addr: u64,
    pub profession: u32,
    pub elite_spec: u32,
    pub kind: AgentKind,
    /// Lower half of the profession field. Meaningless for players.
    pub species_id: u16,
    pub toughness: i16,
    pub concentration: i16,
    pub healing: i16,
    pub hitbox_width: i16,
    pub condition: i16,
    pub hitbox_height: i16,
    pub name: String,

    /// Last seen instance id. Reused across entities over the log.
    pub instance_id: u16,
    pub first_aware: Option<u64>,
    pub last_aware: Option<u64>,
    pub master_addr: Option<u64>,

    pub damage: DamageTotals,
    pub hits: u32,
    pub note_counter: u32,
}

impl Agent {
    pub fn is_player(&self) -> bool {
        self.kind == AgentKind::Player
    }

    /// Species id for NPCs and gadgets, `None` for players.
    pub fn species(&self) -> Option<u16> {
        match self.kind {
            AgentKind::Player => None,
            AgentKind::Npc | AgentKind::Gadget => Some(self.species_id),
        }
    }

    /// Record that an event sourced from this agent happened at `time`.
    pub fn observe(&mut self, time: u64) {
        if self.first_aware.is_none() {
            self.first_aware = Some(time);
        }
        self.last_aware = Some(time);
    }

    /// True if `time` lies strictly inside the awareness window.
    pub fn aware_strictly_at(&self, time: u64) -> bool {
        match (self.first_aware, self.last_aware) {
            (Some(first), Some(last)) => time > first && time < last,
            _ => false,
        }
    }

    pub fn lifetime(&self) -> Option<u64> {
        Some(self.last_aware?.saturating_sub(self.first_aware?))
    }
}

#[derive(Debug, Clone)]
pub struct AgentRecord {
    pub agent: Agent,
    pub player: Option<PlayerIdentity>,
}

pub fn decode_agent_table(reader: &mut ByteReader<'_>) -> Result<Vec<AgentRecord>, DecodeError> {
    reader.enter("agent table");
    let count = reader.u32()? as usize;
    reader.ensure_records(count, AGENT_RECORD_SIZE)?;

    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        records.push(decode_agent(reader)?);
    }
    Ok(records)
}

fn decode_agent(reader: &mut ByteReader<'_>) -> Result<AgentRecord, DecodeError> {
    let addr = reader.u64()?;
    let profession = reader.u32()?;
    let elite_spec = reader.u32()?;
    let toughness = reader.i16()?;
    let concentration = reader.i16()?;
    let healing = reader.i16()?;
    let hitbox_width = reader.i16()?;
    let condition = reader.i16()?;
    let hitbox_height = reader.i16()?;
    let name_blob = reader.take(64)?;
    reader.skip(4)?;

    let lower = (profession & 0xFFFF) as u16;
    let upper = (profession >> 16) as u16;

    let (kind, player) = if elite_spec != NON_PLAYER_ELITE {
        (AgentKind::Player, Some(parse_player_blob(name_blob)))
    } else if upper == GADGET_MARKER {
        (AgentKind::Gadget, None)
    } else {
        (AgentKind::Npc, None)
    };

    let name = match &player {
        Some(identity) => identity.character.clone(),
        None => c_string(name_blob),
    };

    Ok(AgentRecord {
        agent: Agent {
            addr,
            profession,
            elite_spec,
            kind,
            species_id: lower,
            toughness,
            concentration,
            healing,
            hitbox_width,
            condition,
            hitbox_height,
            name,
            instance_id: 0,
            first_aware: None,
            last_aware: None,
            master_addr: None,
            damage: DamageTotals::default(),
            hits: 0,
            note_counter: 0,
        },
        player,
    })
}

/// Split `character\0:account\0<digit>` into its three fields.
fn parse_player_blob(blob: &[u8]) -> PlayerIdentity {
    let (character, rest) = split_nul(blob);
    let rest = rest.strip_prefix(b":").unwrap_or(rest);
    let (account, rest) = split_nul(rest);

    let subgroup = match rest.first() {
        Some(&digit) if digit.is_ascii_digit() => digit - b'0',
        other => {
            tracing::warn!(byte = ?other, "Player subgroup is not a digit, using 0");
            0
        }
    };

    PlayerIdentity {
        character: c_string(character),
        account: c_string(account),
        subgroup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(addr: u64, profession: u32, elite: u32, blob: &[u8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(AGENT_RECORD_SIZE);
        buf.extend_from_slice(&addr.to_le_bytes());
        buf.extend_from_slice(&profession.to_le_bytes());
        buf.extend_from_slice(&elite.to_le_bytes());
        for stat in [10i16, 0, 5, 48, 0, 240] {
            buf.extend_from_slice(&stat.to_le_bytes());
        }
        let mut name = [0u8; 64];
        name[..blob.len()].copy_from_slice(blob);
        buf.extend_from_slice(&name);
        buf.extend_from_slice(&[0u8; 4]);
        buf
    }

    fn table(records: &[Vec<u8>]) -> Vec<u8> {
        let mut buf = (records.len() as u32).to_le_bytes().to_vec();
        for r in records {
            buf.extend_from_slice(r);
        }
        buf
    }

    #[test]
    fn test_player_blob_fields() {
        let buf = table(&[record(7, 1, 27, b"Tarvos Yaro\0:tarvos.4821\x003\0")]);
        let records = decode_agent_table(&mut ByteReader::new(&buf)).unwrap();

        let rec = &records[0];
        assert_eq!(rec.agent.kind, AgentKind::Player);
        assert_eq!(rec.agent.name, "Tarvos Yaro");
        assert_eq!(rec.agent.toughness, 10);
        assert_eq!(rec.agent.hitbox_height, 240);
        let identity = rec.player.as_ref().unwrap();
        assert_eq!(identity.account, "tarvos.4821");
        assert_eq!(identity.subgroup, 3);
        assert_eq!(rec.agent.species(), None);
    }

    #[test]
    fn test_npc_and_gadget_kinds() {
        let npc_prof = 15438u32;
        let gadget_prof = (0xFFFFu32 << 16) | 0x1234;
        let buf = table(&[
            record(1, npc_prof, NON_PLAYER_ELITE, b"Vale Guardian\0"),
            record(2, gadget_prof, NON_PLAYER_ELITE, b"Deimos\0"),
        ]);
        let records = decode_agent_table(&mut ByteReader::new(&buf)).unwrap();

        assert_eq!(records[0].agent.kind, AgentKind::Npc);
        assert_eq!(records[0].agent.species(), Some(15438));
        assert_eq!(records[0].agent.name, "Vale Guardian");
        assert_eq!(records[1].agent.kind, AgentKind::Gadget);
        assert_eq!(records[1].agent.species(), Some(0x1234));
        assert!(records.iter().all(|r| r.player.is_none()));
    }

    #[test]
    fn test_bad_subgroup_falls_back_to_zero() {
        let identity = parse_player_blob(b"Name\0:acct.1\0x\0");
        assert_eq!(identity.subgroup, 0);
        assert_eq!(identity.account, "acct.1");
    }

    #[test]
    fn test_short_table_is_truncated() {
        let mut buf = table(&[record(1, 1, 1, b"A\0:b\x001\0")]);
        buf[0] = 2;
        let err = decode_agent_table(&mut ByteReader::new(&buf)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                section: "agent table",
                ..
            }
        ));
    }

    #[test]
    fn test_awareness_window_is_strict() {
        let buf = table(&[record(1, 1, 1, b"A\0:b\x001\0")]);
        let mut agent = decode_agent_table(&mut ByteReader::new(&buf)).unwrap()[0]
            .agent
            .clone();
        assert!(!agent.aware_strictly_at(5));

        agent.observe(100);
        agent.observe(200);
        assert_eq!(agent.first_aware, Some(100));
        assert_eq!(agent.lifetime(), Some(100));
        assert!(agent.aware_strictly_at(150));
        assert!(!agent.aware_strictly_at(100));
        assert!(!agent.aware_strictly_at(200));
    }
}
