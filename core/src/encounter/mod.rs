//! Parse result types and the aggregation stage that builds them.

mod aggregate;
mod timing;

pub use aggregate::assemble;
pub use timing::{EncounterTiming, per_second};

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use revtc_types::{BoonType, Stacking};
use serde::{Deserialize, Serialize};

use crate::game_data::{BossCategory, BossId};

/// The only value a parse hands back. Owns copies of everything it reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Log {
    pub valid: bool,
    /// Why the buffer was rejected, when `valid` is false.
    pub error: Option<String>,

    pub version: String,
    pub revision: u8,
    pub area_id: u16,
    pub boss: BossId,
    pub category: BossCategory,
    /// Every species that counted as the boss for boss-scoped damage.
    pub boss_ids: BTreeSet<u16>,
    pub encounter_name: String,

    pub log_start: u64,
    pub log_end: u64,
    pub reward_at: Option<u64>,
    pub boss_death: Option<u64>,
    pub boss_lifetime: u64,
    /// Milliseconds from log start to the chosen encounter end.
    pub encounter_duration: u64,
    pub server_start: Option<DateTime<Utc>>,
    pub game_build: Option<u64>,
    /// Character name of the player who recorded the log.
    pub recorded_by: Option<String>,

    /// Sorted by subgroup, encounter order within a subgroup.
    pub players: Vec<PlayerSummary>,
}

impl Log {
    /// Result for a buffer that could not be decoded.
    pub fn invalid(error: impl ToString) -> Self {
        Self {
            valid: false,
            error: Some(error.to_string()),
            version: String::new(),
            revision: 0,
            area_id: 0,
            boss: BossId::Unknown(0),
            category: BossCategory::Unknown,
            boss_ids: BTreeSet::new(),
            encounter_name: String::new(),
            log_start: 0,
            log_end: 0,
            reward_at: None,
            boss_death: None,
            boss_lifetime: 0,
            encounter_duration: 0,
            server_start: None,
            game_build: None,
            recorded_by: None,
            players: Vec::new(),
        }
    }

    pub fn player(&self, name: &str) -> Option<&PlayerSummary> {
        self.players.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoonUptime {
    pub boon: BoonType,
    pub name: String,
    pub stacking: Stacking,
    pub average: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub addr: u64,
    pub name: String,
    pub account: String,
    pub profession: String,
    pub profession_short: String,
    pub elite_spec: String,
    pub elite_spec_short: String,
    pub subgroup: u8,
    pub first_aware: Option<u64>,
    pub last_aware: Option<u64>,
    pub slaves: Vec<u64>,
    /// Times this player was the destination of an event.
    pub hits: u32,

    /// Own damage plus every resolved minion's.
    pub direct_damage: i64,
    pub condi_damage: i64,
    pub boss_direct_damage: i64,
    pub boss_condi_damage: i64,
    pub dps: u32,
    pub boss_dps: u32,

    pub might: f32,
    pub quickness: f32,
    pub alacrity: f32,
    pub fury: f32,
    pub boons: Vec<BoonUptime>,

    pub note: Option<String>,
}

impl PlayerSummary {
    pub fn total_damage(&self) -> i64 {
        self.direct_damage + self.condi_damage
    }
}
