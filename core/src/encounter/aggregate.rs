use hashbrown::HashMap;
use revtc_types::BoonType;

use super::{BoonUptime, EncounterTiming, Log, PlayerSummary, per_second};
use crate::combat_log::{Agent, DamageTotals};
use crate::context::{ParseContext, Player};
use crate::game_data::{elite_spec_name, profession_name};

/// Roll attributed state into the final [`Log`], consuming the context.
///
/// Boon replay must already have run; averages are copied, not computed.
pub fn assemble(ctx: ParseContext, timing: EncounterTiming) -> Log {
    let ParseContext {
        header,
        boss,
        agents,
        players,
        boss_species,
        timeline,
        ..
    } = ctx;

    let mut summaries: Vec<PlayerSummary> = players
        .iter()
        .map(|player| summarize(player, &agents, timing.duration))
        .collect();

    if let Some(note) = boss.mechanic_note() {
        let counters = players
            .iter()
            .map(|p| agents.get(&p.addr).map_or(0, |a| a.note_counter));
        if let Some(index) = strict_max(counters) {
            summaries[index].note = Some(note.to_string());
        }
    }

    summaries.sort_by_key(|p| p.subgroup);

    let recorded_by = timeline
        .pov_addr
        .and_then(|addr| agents.get(&addr))
        .map(|agent| agent.name.clone());

    tracing::debug!(
        players = summaries.len(),
        duration_ms = timing.duration,
        "Assembled encounter result"
    );

    Log {
        valid: true,
        error: None,
        version: header.version,
        revision: header.revision.as_byte(),
        area_id: header.area_id,
        boss,
        category: boss.category(),
        boss_ids: boss_species,
        encounter_name: boss.encounter_name().to_string(),
        log_start: timeline.log_start,
        log_end: timeline.log_end,
        reward_at: timeline.reward_at,
        boss_death: timeline.boss_death,
        boss_lifetime: timing.boss_lifetime,
        encounter_duration: timing.duration,
        server_start: timeline.server_start,
        game_build: timeline.game_build,
        recorded_by,
        players: summaries,
    }
}

fn summarize(player: &Player, agents: &HashMap<u64, Agent>, duration_ms: u64) -> PlayerSummary {
    let own = agents.get(&player.addr);

    let mut damage = own.map(|a| a.damage.clone()).unwrap_or_default();
    for slave in player.slaves.iter().filter_map(|addr| agents.get(addr)) {
        damage.add(&slave.damage);
    }
    let DamageTotals {
        direct,
        boss_direct,
        condi,
        boss_condi,
    } = damage;

    let (profession, profession_short) = profession_name(player.profession);
    let (elite_spec, elite_spec_short) = elite_spec_name(player.elite_spec);

    let boons = player
        .boons
        .values()
        .map(|boon| BoonUptime {
            boon: boon.definition.boon,
            name: boon.definition.name.clone(),
            stacking: boon.definition.stacking,
            average: boon.average,
        })
        .collect();

    PlayerSummary {
        addr: player.addr,
        name: player.name.clone(),
        account: player.account.clone(),
        profession: profession.to_string(),
        profession_short: profession_short.to_string(),
        elite_spec: elite_spec.to_string(),
        elite_spec_short: elite_spec_short.to_string(),
        subgroup: player.subgroup,
        first_aware: player.first_aware,
        last_aware: player.last_aware,
        slaves: player.slaves.iter().copied().collect(),
        hits: own.map_or(0, |a| a.hits),
        direct_damage: direct,
        condi_damage: condi,
        boss_direct_damage: boss_direct,
        boss_condi_damage: boss_condi,
        dps: per_second(direct + condi, duration_ms),
        boss_dps: per_second(boss_direct + boss_condi, duration_ms),
        might: player.boon_average(BoonType::Might),
        quickness: player.boon_average(BoonType::Quickness),
        alacrity: player.boon_average(BoonType::Alacrity),
        fury: player.boon_average(BoonType::Fury),
        boons,
        note: None,
    }
}

/// Index of the single largest non-zero counter. Ties go to the earliest.
fn strict_max(counters: impl IntoIterator<Item = u32>) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, count) in counters.into_iter().enumerate() {
        if count > best.map_or(0, |(_, c)| c) {
            best = Some((index, count));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_max() {
        assert_eq!(strict_max([0, 3, 1]), Some(1));
        assert_eq!(strict_max([2, 5, 5]), Some(1));
        assert_eq!(strict_max([0, 0]), None);
        assert_eq!(strict_max([]), None);
    }
}
