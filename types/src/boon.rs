//! Boon identifiers and stacking descriptors.

use serde::{Deserialize, Serialize};

/// Boons the parser knows how to track, keyed by their buff skill id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoonType {
    Might,
    Quickness,
    Alacrity,
    Fury,
    Unknown,
}

impl BoonType {
    pub const MIGHT_ID: u32 = 0x2E4;
    pub const QUICKNESS_ID: u32 = 0x4A3;
    pub const ALACRITY_ID: u32 = 0x7678;
    pub const FURY_ID: u32 = 0x2D5;

    /// Resolve a buff skill id. Anything unrecognized is `Unknown`.
    pub fn from_skill_id(id: u32) -> Self {
        match id {
            Self::MIGHT_ID => Self::Might,
            Self::QUICKNESS_ID => Self::Quickness,
            Self::ALACRITY_ID => Self::Alacrity,
            Self::FURY_ID => Self::Fury,
            _ => Self::Unknown,
        }
    }

    pub fn skill_id(self) -> Option<u32> {
        match self {
            Self::Might => Some(Self::MIGHT_ID),
            Self::Quickness => Some(Self::QUICKNESS_ID),
            Self::Alacrity => Some(Self::ALACRITY_ID),
            Self::Fury => Some(Self::FURY_ID),
            Self::Unknown => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Might => "Might",
            Self::Quickness => "Quickness",
            Self::Alacrity => "Alacrity",
            Self::Fury => "Fury",
            Self::Unknown => "Unknown",
        }
    }
}

/// How concurrent applications of a boon combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stacking {
    /// Stacks add concurrently (might). Uptime is the mean stack count.
    Intensity,
    /// Applications extend one timer (quickness). Uptime is a presence ratio.
    Duration,
}

/// Static descriptor for one tracked boon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoonDefinition {
    pub boon: BoonType,
    pub name: String,
    pub stacking: Stacking,
    pub max_stacks: u8,
}

impl BoonDefinition {
    pub fn new(boon: BoonType, stacking: Stacking, max_stacks: u8) -> Self {
        Self {
            boon,
            name: boon.name().to_string(),
            stacking,
            max_stacks,
        }
    }

    pub fn is_intensity(&self) -> bool {
        self.stacking == Stacking::Intensity
    }

    /// The boon set every player is seeded with.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(BoonType::Might, Stacking::Intensity, 25),
            Self::new(BoonType::Quickness, Stacking::Duration, 5),
            Self::new(BoonType::Alacrity, Stacking::Duration, 9),
            Self::new(BoonType::Fury, Stacking::Duration, 9),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_id_lookup() {
        assert_eq!(BoonType::from_skill_id(740), BoonType::Might);
        assert_eq!(BoonType::from_skill_id(1187), BoonType::Quickness);
        assert_eq!(BoonType::from_skill_id(30328), BoonType::Alacrity);
        assert_eq!(BoonType::from_skill_id(725), BoonType::Fury);
        assert_eq!(BoonType::from_skill_id(1), BoonType::Unknown);
        assert_eq!(BoonType::Unknown.skill_id(), None);
    }

    #[test]
    fn test_default_set() {
        let defaults = BoonDefinition::defaults();
        assert_eq!(defaults.len(), 4);

        let might = &defaults[0];
        assert!(might.is_intensity());
        assert_eq!(might.max_stacks, 25);

        assert!(defaults[1..].iter().all(|d| d.stacking == Stacking::Duration));
    }
}
