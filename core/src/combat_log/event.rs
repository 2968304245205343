//! Combat event records.
//!
//! Both on-disk revisions are 64 bytes wide but lay fields out differently.
//! They decode into the same [`CombatEvent`]; fields a revision lacks are zero.

use super::header::Revision;
use super::reader::ByteReader;
use crate::error::DecodeError;

pub const EVENT_RECORD_SIZE: usize = 64;

macro_rules! byte_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            Unknown(u8),
        }

        impl From<u8> for $name {
            fn from(byte: u8) -> Self {
                match byte {
                    $($value => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                match value {
                    $($name::$variant => $value,)+
                    $name::Unknown(other) => other,
                }
            }
        }
    };
}

byte_enum! {
    /// Kind of state change carried by an event. `None` means an ordinary combat event.
    pub enum StateChange {
        None = 0,
        EnterCombat = 1,
        ExitCombat = 2,
        ChangeUp = 3,
        ChangeDead = 4,
        ChangeDown = 5,
        Spawn = 6,
        Despawn = 7,
        HealthUpdate = 8,
        LogStart = 9,
        LogEnd = 10,
        WeaponSwap = 11,
        MaxHealthUpdate = 12,
        PointOfView = 13,
        Language = 14,
        GwBuild = 15,
        ShardId = 16,
        Reward = 17,
        BuffInitial = 18,
        Position = 19,
        Velocity = 20,
        Facing = 21,
        TeamChange = 22,
        AttackTarget = 23,
        Targetable = 24,
        MapId = 25,
        ReplInfo = 26,
        StackActive = 27,
        StackReset = 28,
    }
}

byte_enum! {
    /// How a buff removal event clears stacks.
    pub enum BuffRemove {
        None = 0,
        /// Every stack removed.
        All = 1,
        /// One stack removed, identified by its buff instance id.
        Single = 2,
        /// Removed by out-of-combat or all-stack cleanup.
        Manual = 3,
    }
}

byte_enum! {
    pub enum Activation {
        None = 0,
        Normal = 1,
        Quickness = 2,
        CancelFire = 3,
        CancelCancel = 4,
        Reset = 5,
    }
}

byte_enum! {
    pub enum Iff {
        Friend = 0,
        Foe = 1,
    }
}

/// Revision-agnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatEvent {
    pub time: u64,
    pub src_agent: u64,
    pub dst_agent: u64,
    /// Damage for physical hits, applied duration for buff applications,
    /// server timestamp on log start.
    pub value: i32,
    pub buff_dmg: i32,
    pub overstack_value: u32,
    pub skill_id: u32,
    pub src_instid: u16,
    pub dst_instid: u16,
    /// Owner's instance id when the source is a minion.
    pub src_master_instid: u16,
    pub dst_master_instid: u16,
    pub iff: Iff,
    pub is_buff: bool,
    pub result: u8,
    pub activation: Activation,
    pub buff_remove: BuffRemove,
    pub is_ninety: bool,
    pub is_fifty: bool,
    pub is_moving: bool,
    pub state_change: StateChange,
    pub is_flanking: bool,
    pub is_shields: bool,
    pub is_offcycle: bool,
    /// Disambiguates concurrent stacks of one buff.
    pub buff_instid: u32,
}

impl CombatEvent {
    pub fn is_state_change(&self) -> bool {
        self.state_change != StateChange::None
    }
}

/// Trailing flag bytes shared by both layouts.
struct Flags {
    iff: u8,
    buff: u8,
    result: u8,
    activation: u8,
    buff_remove: u8,
    ninety: u8,
    fifty: u8,
    moving: u8,
    state_change: u8,
    flanking: u8,
    shields: u8,
    offcycle: u8,
}

impl Flags {
    fn read(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let [
            iff,
            buff,
            result,
            activation,
            buff_remove,
            ninety,
            fifty,
            moving,
            state_change,
            flanking,
            shields,
            offcycle,
        ] = reader.array::<12>()?;
        Ok(Self {
            iff,
            buff,
            result,
            activation,
            buff_remove,
            ninety,
            fifty,
            moving,
            state_change,
            flanking,
            shields,
            offcycle,
        })
    }
}

struct Core {
    time: u64,
    src_agent: u64,
    dst_agent: u64,
    value: i32,
    buff_dmg: i32,
}

impl Core {
    fn read(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            time: reader.u64()?,
            src_agent: reader.u64()?,
            dst_agent: reader.u64()?,
            value: reader.i32()?,
            buff_dmg: reader.i32()?,
        })
    }
}

struct Ids {
    overstack_value: u32,
    skill_id: u32,
    src_instid: u16,
    dst_instid: u16,
    src_master_instid: u16,
    dst_master_instid: u16,
    buff_instid: u32,
}

fn assemble(core: Core, ids: Ids, flags: Flags) -> CombatEvent {
    CombatEvent {
        time: core.time,
        src_agent: core.src_agent,
        dst_agent: core.dst_agent,
        value: core.value,
        buff_dmg: core.buff_dmg,
        overstack_value: ids.overstack_value,
        skill_id: ids.skill_id,
        src_instid: ids.src_instid,
        dst_instid: ids.dst_instid,
        src_master_instid: ids.src_master_instid,
        dst_master_instid: ids.dst_master_instid,
        iff: Iff::from(flags.iff),
        is_buff: flags.buff != 0,
        result: flags.result,
        activation: Activation::from(flags.activation),
        buff_remove: BuffRemove::from(flags.buff_remove),
        is_ninety: flags.ninety != 0,
        is_fifty: flags.fifty != 0,
        is_moving: flags.moving != 0,
        state_change: StateChange::from(flags.state_change),
        is_flanking: flags.flanking != 0,
        is_shields: flags.shields != 0,
        is_offcycle: flags.offcycle != 0,
        buff_instid: ids.buff_instid,
    }
}

/// Revision 0: 16-bit overstack and skill id, nine internal tracking bytes,
/// one trailing pad byte.
fn decode_legacy(reader: &mut ByteReader<'_>) -> Result<CombatEvent, DecodeError> {
    let core = Core::read(reader)?;
    let overstack_value = u32::from(reader.u16()?);
    let skill_id = u32::from(reader.u16()?);
    let src_instid = reader.u16()?;
    let dst_instid = reader.u16()?;
    let src_master_instid = reader.u16()?;
    reader.skip(9)?;
    let flags = Flags::read(reader)?;
    reader.skip(1)?;

    let ids = Ids {
        overstack_value,
        skill_id,
        src_instid,
        dst_instid,
        src_master_instid,
        dst_master_instid: 0,
        buff_instid: 0,
    };
    Ok(assemble(core, ids, flags))
}

fn decode_current(reader: &mut ByteReader<'_>) -> Result<CombatEvent, DecodeError> {
    let core = Core::read(reader)?;
    let overstack_value = reader.u32()?;
    let skill_id = reader.u32()?;
    let src_instid = reader.u16()?;
    let dst_instid = reader.u16()?;
    let src_master_instid = reader.u16()?;
    let dst_master_instid = reader.u16()?;
    let flags = Flags::read(reader)?;
    let buff_instid = reader.u32()?;

    let ids = Ids {
        overstack_value,
        skill_id,
        src_instid,
        dst_instid,
        src_master_instid,
        dst_master_instid,
        buff_instid,
    };
    Ok(assemble(core, ids, flags))
}

/// Decode every remaining record. The stream has no count; it ends with the buffer.
pub fn decode_events(
    reader: &mut ByteReader<'_>,
    revision: Revision,
) -> Result<Vec<CombatEvent>, DecodeError> {
    reader.enter("event stream");
    let remainder = reader.remaining() % EVENT_RECORD_SIZE;
    if remainder != 0 {
        return Err(DecodeError::Misaligned {
            remainder,
            record_size: EVENT_RECORD_SIZE,
        });
    }

    let mut events = Vec::with_capacity(reader.remaining() / EVENT_RECORD_SIZE);
    while !reader.is_empty() {
        let event = match revision {
            Revision::Legacy => decode_legacy(reader)?,
            Revision::Current => decode_current(reader)?,
        };
        events.push(event);
    }
    Ok(events)
}
