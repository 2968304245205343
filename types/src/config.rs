//! Parser configuration
//!
//! Everything here is optional in TOML; missing keys fall back to the
//! defaults the legacy parser hard-coded.

use serde::{Deserialize, Serialize};

use crate::boon::BoonDefinition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Milliseconds cut from the end of the boon replay window.
    pub replay_tail_trim_ms: u64,
    /// Replay each player's boons on the rayon pool.
    pub parallel_replay: bool,
    /// Boons seeded onto every player before any event is read.
    pub boons: Vec<BoonDefinition>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            replay_tail_trim_ms: 0,
            parallel_replay: true,
            boons: BoonDefinition::defaults(),
        }
    }
}

impl ParserConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boon::{BoonType, Stacking};

    #[test]
    fn test_empty_toml_is_default() {
        let config = ParserConfig::from_toml_str("").unwrap();
        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn test_parse_custom_boons() {
        let toml = r#"
replay_tail_trim_ms = 50
parallel_replay = false

[[boons]]
boon = "might"
name = "Might"
stacking = "intensity"
max_stacks = 25

[[boons]]
boon = "quickness"
name = "Quickness"
stacking = "duration"
max_stacks = 5
"#;

        let config = ParserConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.replay_tail_trim_ms, 50);
        assert!(!config.parallel_replay);
        assert_eq!(config.boons.len(), 2);
        assert_eq!(config.boons[1].boon, BoonType::Quickness);
        assert_eq!(config.boons[1].stacking, Stacking::Duration);
    }

    #[test]
    fn test_roundtrip_default() {
        let text = ParserConfig::default().to_toml_string().unwrap();
        let back = ParserConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, ParserConfig::default());
    }
}
