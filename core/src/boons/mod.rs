//! Boon stacks and uptime replay
//!
//! Attribution appends one [`BoonStack`] per application or removal. After
//! the encounter window is known, [`replay`] steps through it one
//! millisecond at a time and averages the active stack count.

mod replay;

pub use replay::{ReplayWindow, replay, replay_players};

use revtc_types::BoonDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    Application,
    /// Drop every active stack.
    ClearAll,
    /// Drop the active stack carrying `buff_instid`.
    ClearOne,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoonStack {
    pub start_time: u64,
    /// Applied duration; zero for removals.
    pub duration: u64,
    pub is_offcycle: bool,
    pub buff_instid: u32,
    pub kind: StackKind,
}

impl BoonStack {
    pub fn application(
        start_time: u64,
        duration: u64,
        is_offcycle: bool,
        buff_instid: u32,
    ) -> Self {
        Self {
            start_time,
            duration,
            is_offcycle,
            buff_instid,
            kind: StackKind::Application,
        }
    }

    pub fn clear_all(start_time: u64) -> Self {
        Self {
            start_time,
            duration: 0,
            is_offcycle: false,
            buff_instid: 0,
            kind: StackKind::ClearAll,
        }
    }

    pub fn clear_one(start_time: u64, buff_instid: u32) -> Self {
        Self {
            start_time,
            duration: 0,
            is_offcycle: false,
            buff_instid,
            kind: StackKind::ClearOne,
        }
    }
}

/// One tracked boon on one player.
#[derive(Debug, Clone)]
pub struct Boon {
    pub definition: BoonDefinition,
    /// Chronological stack events.
    pub stacks: Vec<BoonStack>,
    /// Uptime ratio for duration boons, mean stack count for intensity boons.
    pub average: f32,
}

impl Boon {
    pub fn new(definition: BoonDefinition) -> Self {
        Self {
            definition,
            stacks: Vec::new(),
            average: 0.0,
        }
    }
}
