pub mod attribution;
pub mod boons;
pub mod combat_log;
pub mod context;
pub mod encounter;
pub mod error;
pub mod game_data;
pub mod parser;

#[cfg(test)]
mod fixtures;

pub use encounter::{BoonUptime, Log, PlayerSummary};
pub use error::DecodeError;
pub use game_data::{BossCategory, BossId};
pub use parser::{Parser, parse};
pub use revtc_types::ParserConfig;
