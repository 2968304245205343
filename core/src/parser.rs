//! Whole-buffer parse entry point.

use revtc_types::ParserConfig;

use crate::attribution;
use crate::boons::{ReplayWindow, replay_players};
use crate::combat_log::{
    ByteReader, decode_agent_table, decode_events, decode_header, decode_skill_table,
};
use crate::context::ParseContext;
use crate::encounter::{EncounterTiming, Log, assemble};
use crate::error::DecodeError;

/// Parses EVTC buffers with a fixed configuration. Holds no per-parse state,
/// so one parser can be shared across threads and reused.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a complete log. Never fails: a rejected buffer comes back as a
    /// [`Log`] with `valid == false` and the reason in `error`.
    pub fn parse(&self, buf: &[u8]) -> Log {
        match self.try_parse(buf) {
            Ok(log) => log,
            Err(e) => {
                tracing::error!(error = %e, len = buf.len(), "Rejected combat log");
                Log::invalid(e)
            }
        }
    }

    pub fn try_parse(&self, buf: &[u8]) -> Result<Log, DecodeError> {
        let mut ctx = self.decode(buf)?;

        attribution::attribute(&mut ctx);

        let timing = EncounterTiming::resolve(&ctx);
        let window = ReplayWindow::new(ctx.timeline.log_start, timing.duration)
            .with_tail_trim(self.config.replay_tail_trim_ms);
        replay_players(&mut ctx.players, window, self.config.parallel_replay);
        tracing::debug!(?window, "Replayed boon stacks");

        Ok(assemble(ctx, timing))
    }

    fn decode(&self, buf: &[u8]) -> Result<ParseContext, DecodeError> {
        let mut reader = ByteReader::new(buf);

        let header = decode_header(&mut reader)?;
        tracing::debug!(
            version = %header.version,
            revision = ?header.revision,
            area_id = header.area_id,
            "Decoded header"
        );

        let agents = decode_agent_table(&mut reader)?;
        let skills = decode_skill_table(&mut reader)?;
        tracing::debug!(count = skills.len(), "Decoded skill table");
        let events = decode_events(&mut reader, header.revision)?;

        let mut ctx = ParseContext::new(header);
        ctx.load_agents(agents, &self.config.boons);
        ctx.load_skills(skills);
        ctx.ingest_events(events);
        Ok(ctx)
    }
}

/// Parse with the default configuration.
pub fn parse(buf: &[u8]) -> Log {
    Parser::default().parse(buf)
}
