//! Parse-scoped working state
//!
//! A [`ParseContext`] is created by the parser for a single buffer, threaded
//! through every stage, and consumed when the [`Log`](crate::Log) is
//! assembled. Nothing in it outlives the parse call.

mod player;

pub use player::Player;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use revtc_types::BoonDefinition;

use crate::combat_log::{Agent, AgentKind, AgentRecord, CombatEvent, Header, Skill, StateChange};
use crate::game_data::BossId;

/// Encounter timestamps collected while decoding and classifying.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub log_start: u64,
    pub log_end: u64,
    pub reward_at: Option<u64>,
    pub boss_death: Option<u64>,
    /// Server wall clock carried by the log-start event.
    pub server_start: Option<DateTime<Utc>>,
    pub game_build: Option<u64>,
    /// Agent that recorded the log.
    pub pov_addr: Option<u64>,
}

#[derive(Debug)]
pub struct ParseContext {
    pub header: Header,
    pub boss: BossId,
    pub agents: HashMap<u64, Agent>,
    /// Players in agent-table order.
    pub players: Vec<Player>,
    player_index: HashMap<u64, usize>,
    pub skills: HashMap<i32, String>,
    /// Every decoded event, in file order.
    pub events: Vec<CombatEvent>,
    /// Every address seen under each instance id. Ids are reused, so a
    /// lookup must be checked against the candidate's awareness window.
    instance_registry: HashMap<u16, Vec<u64>>,
    /// Species that count as "the boss" for boss-scoped damage.
    pub boss_species: BTreeSet<u16>,
    pub boss_addr: Option<u64>,
    pub timeline: Timeline,
}

impl ParseContext {
    pub fn new(header: Header) -> Self {
        let boss = BossId::from_id(header.area_id);
        let mut boss_species = BTreeSet::from([header.area_id]);
        if boss == BossId::Nikare {
            boss_species.insert(BossId::Kenut.id());
        }

        Self {
            header,
            boss,
            agents: HashMap::new(),
            players: Vec::new(),
            player_index: HashMap::new(),
            skills: HashMap::new(),
            events: Vec::new(),
            instance_registry: HashMap::new(),
            boss_species,
            boss_addr: None,
            timeline: Timeline::default(),
        }
    }

    /// Register the agent table. Players are seeded with `boons` here, before
    /// any event is read.
    pub fn load_agents(&mut self, records: Vec<AgentRecord>, boons: &[BoonDefinition]) {
        for AgentRecord { agent, player } in records {
            if let Some(identity) = player {
                self.player_index.insert(agent.addr, self.players.len());
                self.players.push(Player::new(&agent, identity, boons));
            } else {
                // Deimos turns into a gadget with a new species near the end of the fight
                if agent.kind == AgentKind::Gadget
                    && self.boss == BossId::Deimos
                    && agent.name == "Deimos"
                {
                    self.boss_species.insert(agent.species_id);
                }
                if agent.species_id == self.header.area_id {
                    self.boss_addr = Some(agent.addr);
                }
            }
            self.agents.insert(agent.addr, agent);
        }

        tracing::debug!(
            agents = self.agents.len(),
            players = self.players.len(),
            boss_addr = ?self.boss_addr,
            "Loaded agent table"
        );
    }

    /// Register skill names and use them for boon display names where present.
    pub fn load_skills(&mut self, skills: Vec<Skill>) {
        self.skills = skills
            .into_iter()
            .filter(|skill| !skill.name.is_empty())
            .map(|skill| (skill.id, skill.name))
            .collect();

        for player in &mut self.players {
            for boon in player.boons.values_mut() {
                let name = boon
                    .definition
                    .boon
                    .skill_id()
                    .and_then(|id| i32::try_from(id).ok())
                    .and_then(|id| self.skills.get(&id));
                if let Some(name) = name {
                    boon.definition.name = name.clone();
                }
            }
        }
    }

    /// Store decoded events, updating log bounds, agent awareness and the
    /// instance registry along the way.
    pub fn ingest_events(&mut self, events: Vec<CombatEvent>) {
        for event in &events {
            match event.state_change {
                StateChange::LogStart => {
                    self.timeline.log_start = event.time;
                    self.timeline.server_start =
                        DateTime::<Utc>::from_timestamp(i64::from(event.value as u32), 0);
                }
                StateChange::LogEnd => self.timeline.log_end = event.time,
                _ => {}
            }

            let Some(agent) = self.agents.get_mut(&event.src_agent) else {
                continue;
            };
            agent.observe(event.time);
            if !event.is_state_change() {
                agent.instance_id = event.src_instid;
                let addrs = self.instance_registry.entry(event.src_instid).or_default();
                if !addrs.contains(&agent.addr) {
                    addrs.push(agent.addr);
                }
            }
        }

        tracing::debug!(
            events = events.len(),
            instance_ids = self.instance_registry.len(),
            "Ingested event stream"
        );
        self.events = events;
    }

    /// Address that held `instid` at `time`, if one was strictly inside its
    /// awareness window then.
    pub fn resolve_instance(&self, instid: u16, time: u64) -> Option<u64> {
        self.instance_registry
            .get(&instid)?
            .iter()
            .copied()
            .find(|addr| {
                self.agents
                    .get(addr)
                    .is_some_and(|agent| agent.aware_strictly_at(time))
            })
    }

    pub fn player(&self, addr: u64) -> Option<&Player> {
        self.player_index.get(&addr).map(|&i| &self.players[i])
    }

    pub fn player_mut(&mut self, addr: u64) -> Option<&mut Player> {
        let index = *self.player_index.get(&addr)?;
        self.players.get_mut(index)
    }

    pub fn is_boss_species(&self, species: Option<u16>) -> bool {
        species.is_some_and(|s| self.boss_species.contains(&s))
    }
}
