use std::collections::{BTreeMap, BTreeSet};

use revtc_types::{BoonDefinition, BoonType};

use crate::boons::Boon;
use crate::combat_log::{Agent, PlayerIdentity};

/// Player-only state layered over the agent with the same address.
#[derive(Debug, Clone)]
pub struct Player {
    pub addr: u64,
    pub name: String,
    pub account: String,
    pub profession: u32,
    pub elite_spec: u32,
    pub subgroup: u8,
    pub first_aware: Option<u64>,
    pub last_aware: Option<u64>,
    /// Minions resolved to this player during master resolution.
    pub slaves: BTreeSet<u64>,
    pub boons: BTreeMap<BoonType, Boon>,
}

impl Player {
    pub fn new(agent: &Agent, identity: PlayerIdentity, boons: &[BoonDefinition]) -> Self {
        let boons = boons
            .iter()
            .filter(|def| def.boon != BoonType::Unknown)
            .map(|def| (def.boon, Boon::new(def.clone())))
            .collect();

        Self {
            addr: agent.addr,
            name: identity.character,
            account: identity.account,
            profession: agent.profession,
            elite_spec: agent.elite_spec,
            subgroup: identity.subgroup,
            first_aware: None,
            last_aware: None,
            slaves: BTreeSet::new(),
            boons,
        }
    }

    /// The tracked boon for `boon`, if this player tracks it.
    pub fn boon_mut(&mut self, boon: BoonType) -> Option<&mut Boon> {
        self.boons.get_mut(&boon)
    }

    pub fn boon_average(&self, boon: BoonType) -> f32 {
        self.boons.get(&boon).map_or(0.0, |b| b.average)
    }
}
