//! Attribution pipeline
//!
//! Three ordered stages run over a [`ParseContext`] once decoding is done:
//!
//! 1. [`copy_awareness`] gives every player the awareness window of its agent.
//! 2. [`resolve_masters`] links minions to their owners.
//! 3. [`classify_events`] turns the event stream into damage totals, boon
//!    stack events, encounter timestamps and mechanic counters.
//!
//! Each stage depends on the previous one having run over the whole stream,
//! so none of them can be fused into a single pass.

use revtc_types::BoonType;

use crate::boons::BoonStack;
use crate::combat_log::{Activation, BuffRemove, CombatEvent, StateChange};
use crate::context::ParseContext;
use crate::game_data::{BossId, DEIMOS_HANDS, KC_CONSTRUCT_CORE};

/// Run every stage in order.
pub fn attribute(ctx: &mut ParseContext) {
    copy_awareness(ctx);
    resolve_masters(ctx);
    classify_events(ctx);
}

/// Stage 1.
///
/// Requires: every event has been ingested, so agent awareness is final.
/// Ensures: each player's `first_aware`/`last_aware` equal its agent's.
pub fn copy_awareness(ctx: &mut ParseContext) {
    for player in &mut ctx.players {
        if let Some(agent) = ctx.agents.get(&player.addr) {
            player.first_aware = agent.first_aware;
            player.last_aware = agent.last_aware;
        }
    }
    tracing::debug!(stage = "copy_awareness", players = ctx.players.len(), "Stage complete");
}

/// Stage 2.
///
/// Requires: stage 1, and final awareness windows for every agent.
/// Ensures: a minion whose event names a master instance id that was held by
/// an agent strictly aware at that time has `master_addr` set; when that
/// master is a player, the minion is in the player's `slaves`.
pub fn resolve_masters(ctx: &mut ParseContext) {
    let links: Vec<(u64, u64)> = ctx
        .events
        .iter()
        .filter(|event| event.src_master_instid != 0)
        .filter(|event| ctx.agents.contains_key(&event.src_agent))
        .filter_map(|event| {
            let master = ctx.resolve_instance(event.src_master_instid, event.time)?;
            (master != event.src_agent).then_some((event.src_agent, master))
        })
        .collect();

    for &(slave, master) in &links {
        if let Some(agent) = ctx.agents.get_mut(&slave) {
            agent.master_addr = Some(master);
        }
        if let Some(player) = ctx.player_mut(master) {
            player.slaves.insert(slave);
        }
    }

    tracing::debug!(stage = "resolve_masters", links = links.len(), "Stage complete");
}

/// Copy of the agent fields classification needs, so the agent table can be
/// mutated while deciding.
#[derive(Debug, Clone, Copy)]
struct Party {
    addr: u64,
    is_player: bool,
    species: Option<u16>,
    is_boss: bool,
}

impl Party {
    fn lookup(ctx: &ParseContext, addr: u64) -> Option<Self> {
        let agent = ctx.agents.get(&addr)?;
        let species = agent.species();
        Some(Self {
            addr,
            is_player: agent.is_player(),
            species,
            is_boss: ctx.is_boss_species(species),
        })
    }
}

/// Stage 3.
///
/// Requires: stage 2, and players seeded with their tracked boons.
/// Ensures: agent damage totals, hit and mechanic counters, player boon
/// stacks and the encounter timeline reflect every event. Events naming an
/// unknown agent only touch the side that is known.
pub fn classify_events(ctx: &mut ParseContext) {
    let events = std::mem::take(&mut ctx.events);
    for event in &events {
        classify(ctx, event);
    }
    ctx.events = events;

    tracing::debug!(
        stage = "classify_events",
        reward_at = ?ctx.timeline.reward_at,
        boss_death = ?ctx.timeline.boss_death,
        "Stage complete"
    );
}

fn classify(ctx: &mut ParseContext, event: &CombatEvent) {
    let src = Party::lookup(ctx, event.src_agent);
    let dst = Party::lookup(ctx, event.dst_agent);

    if let Some(agent) = ctx.agents.get_mut(&event.dst_agent) {
        agent.hits += 1;
    }

    if event.is_state_change() {
        record_state_change(ctx, event, src);
    } else if event.activation != Activation::None {
        // casts carry no damage or boon information
    } else if event.buff_remove != BuffRemove::None {
        record_removal(ctx, event, src);
    } else if event.is_buff {
        if event.buff_dmg != 0 {
            record_condition_damage(ctx, event, src, dst);
        } else if event.value != 0 {
            record_application(ctx, event, src, dst);
        }
    } else {
        record_physical(ctx, event, src, dst);
    }
}

fn record_state_change(ctx: &mut ParseContext, event: &CombatEvent, src: Option<Party>) {
    match event.state_change {
        StateChange::Reward => ctx.timeline.reward_at = Some(event.time),
        StateChange::ChangeDead => {
            let area_id = ctx.header.area_id;
            if src.and_then(|p| p.species) == Some(area_id) {
                ctx.timeline.boss_death = Some(event.time);
            }
        }
        StateChange::PointOfView => ctx.timeline.pov_addr = Some(event.src_agent),
        StateChange::GwBuild => ctx.timeline.game_build = Some(event.src_agent),
        _ => {}
    }
}

fn record_removal(ctx: &mut ParseContext, event: &CombatEvent, src: Option<Party>) {
    let Some(src) = src.filter(|p| p.is_player) else {
        return;
    };
    let stack = match event.buff_remove {
        BuffRemove::All => BoonStack::clear_all(event.time),
        BuffRemove::Single if event.buff_instid != 0 => {
            BoonStack::clear_one(event.time, event.buff_instid)
        }
        // the legacy layout has no stack ids
        BuffRemove::Single => BoonStack::clear_all(event.time),
        _ => return,
    };

    let boon = BoonType::from_skill_id(event.skill_id);
    if let Some(tracked) = ctx
        .player_mut(src.addr)
        .and_then(|player| player.boon_mut(boon))
    {
        tracked.stacks.push(stack);
    }
}

fn record_condition_damage(
    ctx: &mut ParseContext,
    event: &CombatEvent,
    src: Option<Party>,
    dst: Option<Party>,
) {
    let Some(src) = src else { return };
    let on_boss = dst.is_some_and(|p| p.is_boss);
    if let Some(agent) = ctx.agents.get_mut(&src.addr) {
        let damage = i64::from(event.buff_dmg);
        agent.damage.condi += damage;
        if on_boss {
            agent.damage.boss_condi += damage;
        }
    }
}

fn record_application(
    ctx: &mut ParseContext,
    event: &CombatEvent,
    src: Option<Party>,
    dst: Option<Party>,
) {
    let target = if event.dst_agent == event.src_agent {
        src
    } else {
        dst
    };
    let Some(target) = target.filter(|p| p.is_player) else {
        return;
    };

    let boon = BoonType::from_skill_id(event.skill_id);
    if let Some(tracked) = ctx
        .player_mut(target.addr)
        .and_then(|player| player.boon_mut(boon))
    {
        tracked.stacks.push(BoonStack::application(
            event.time,
            u64::try_from(event.value).unwrap_or(0),
            event.is_offcycle,
            event.buff_instid,
        ));
    }
}

fn record_physical(
    ctx: &mut ParseContext,
    event: &CombatEvent,
    src: Option<Party>,
    dst: Option<Party>,
) {
    let boss = ctx.boss;

    if let Some(src) = src {
        let on_boss = dst.is_some_and(|p| p.is_boss);
        let on_core = boss == BossId::KeepConstruct
            && dst.and_then(|p| p.species) == Some(KC_CONSTRUCT_CORE);

        if let Some(agent) = ctx.agents.get_mut(&src.addr) {
            let damage = i64::from(event.value);
            agent.damage.direct += damage;
            if on_boss {
                agent.damage.boss_direct += damage;
            } else if on_core {
                agent.note_counter += 1;
            }
        }
    }

    // a Deimos hand hitting a player means that player was chased by it
    let from_hand = boss == BossId::Deimos && src.and_then(|p| p.species) == Some(DEIMOS_HANDS);
    if from_hand
        && let Some(dst) = dst.filter(|p| p.is_player)
        && let Some(agent) = ctx.agents.get_mut(&dst.addr)
    {
        agent.note_counter += 1;
    }
}
