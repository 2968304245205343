use crate::context::ParseContext;

/// End-of-encounter resolution. The chosen end drives every per-second figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncounterTiming {
    /// `last_aware - first_aware` of the primary boss agent, 0 without one.
    pub boss_lifetime: u64,
    /// Reward time, else boss death, else boss lifetime.
    pub end: u64,
    /// `end - log_start`, saturating at 0.
    pub duration: u64,
}

impl EncounterTiming {
    pub fn resolve(ctx: &ParseContext) -> Self {
        let boss_lifetime = match ctx.boss_addr.and_then(|addr| ctx.agents.get(&addr)) {
            Some(agent) => agent.lifetime().unwrap_or(0),
            None => {
                tracing::warn!(area_id = ctx.header.area_id, "No agent matches the encounter id");
                0
            }
        };

        let end = ctx
            .timeline
            .reward_at
            .or(ctx.timeline.boss_death)
            .unwrap_or(boss_lifetime);
        let duration = end.saturating_sub(ctx.timeline.log_start);
        if duration == 0 {
            tracing::warn!(end, log_start = ctx.timeline.log_start, "Encounter has zero length");
        }

        Self {
            boss_lifetime,
            end,
            duration,
        }
    }
}

/// `total / seconds`, rounded, 0 for an empty window or negative totals.
pub fn per_second(total: i64, duration_ms: u64) -> u32 {
    if duration_ms == 0 {
        return 0;
    }
    let secs = duration_ms as f64 / 1000.0;
    (total as f64 / secs).round().clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_second() {
        assert_eq!(per_second(1000, 5000), 200);
        assert_eq!(per_second(1000, 3000), 333);
        assert_eq!(per_second(2000, 3000), 667);
        assert_eq!(per_second(1000, 0), 0);
        assert_eq!(per_second(-50, 1000), 0);
    }
}
