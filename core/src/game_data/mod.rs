//! Static lookup tables: encounters, professions, elite specializations.

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Species id of the hands that chase players on Deimos.
pub const DEIMOS_HANDS: u16 = 0x4345;
/// Species id of the core players push orbs into on Keep Construct.
pub const KC_CONSTRUCT_CORE: u16 = 0x3F85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossCategory {
    Raids,
    Fractals,
    Strikes,
    Golems,
    Wvw,
    Unknown,
}

macro_rules! bosses {
    ($($variant:ident = $id:literal, $name:literal, $category:ident;)+) => {
        /// Encounter identifier, equal to the primary boss species id.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum BossId {
            $($variant,)+
            Unknown(u16),
        }

        impl BossId {
            pub fn from_id(id: u16) -> Self {
                match id {
                    $($id => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }

            pub fn id(self) -> u16 {
                match self {
                    $(Self::$variant => $id,)+
                    Self::Unknown(id) => id,
                }
            }

            pub fn encounter_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                    Self::Unknown(_) => "Unknown",
                }
            }

            pub fn category(self) -> BossCategory {
                match self {
                    $(Self::$variant => BossCategory::$category,)+
                    Self::Unknown(_) => BossCategory::Unknown,
                }
            }
        }
    };
}

bosses! {
    ValeGuardian = 15438, "Vale Guardian", Raids;
    Gorseval = 15429, "Gorseval", Raids;
    Sabetha = 15375, "Sabetha", Raids;
    Slothasor = 16123, "Slothasor", Raids;
    Matthias = 16115, "Matthias Gabriel", Raids;
    KeepConstruct = 16235, "Keep Construct", Raids;
    Xera = 16246, "Xera", Raids;
    Cairn = 17194, "Cairn", Raids;
    MursaatOverseer = 17172, "Mursaat Overseer", Raids;
    Samarog = 17188, "Samarog", Raids;
    Deimos = 17154, "Deimos", Raids;
    SoullessHorror = 19767, "Soulless Horror", Raids;
    Dhuum = 19450, "Dhuum", Raids;
    ConjuredAmalgamate = 43974, "Conjured Amalgamate", Raids;
    Nikare = 21105, "Twin Largos", Raids;
    Kenut = 21089, "Twin Largos", Raids;
    Qadim = 20934, "Qadim", Raids;
    Adina = 22006, "Cardinal Adina", Raids;
    Sabir = 21964, "Cardinal Sabir", Raids;
    QadimThePeerless = 22000, "Qadim the Peerless", Raids;
    Berg = 16088, "Trio", Raids;
    Zane = 16137, "Trio", Raids;
    Nurella = 16125, "Trio", Raids;
    McLeod = 16253, "Escort", Raids;
    TwistedCastle = 16247, "Twisted Castle", Raids;
    River = 19828, "River of Souls", Raids;
    BrokenKing = 19691, "Broken King", Raids;
    SoulEater = 19536, "Soul Eater", Raids;
    EyeOfJudgement = 19651, "Eyes", Raids;
    EyeOfFate = 19844, "Eyes", Raids;
    Mama = 17021, "M.A.M.A", Fractals;
    Siax = 17028, "Siax", Fractals;
    Ensolyss = 16948, "Ensolyss", Fractals;
    Skorvald = 17632, "Skorvald", Fractals;
    Artsariiv = 17949, "Artsariiv", Fractals;
    Arkk = 17759, "Arkk", Fractals;
    SorrowfulSpellcaster = 23254, "Sorrowful Spellcaster", Fractals;
    Icebrood = 22154, "Icebrood Construct", Strikes;
    TheVoice = 22343, "The Voice and The Claw", Strikes;
    TheClaw = 22481, "The Voice and The Claw", Strikes;
    Fraenir = 22492, "Fraenir of Jormag", Strikes;
    FraenirConstruct = 22436, "Fraenir of Jormag", Strikes;
    Boneskinner = 22521, "Boneskinner", Strikes;
    WhisperOfJormag = 22711, "Whisper of Jormag", Strikes;
    Freezie = 21333, "Freezie", Strikes;
    StandardGolem = 16199, "Standard Kitty Golem", Golems;
    MediumGolem = 19645, "Medium Kitty Golem", Golems;
    LargeGolem = 19676, "Large Kitty Golem", Golems;
    MassiveGolem = 16202, "Massive Kitty Golem", Golems;
    AverageGolem = 16177, "Average Kitty Golem", Golems;
    VitalGolem = 16198, "Vital Kitty Golem", Golems;
    Wvw = 1, "WvW", Wvw;
}

impl BossId {
    /// Tag given to the player who trips this encounter's mechanic most often.
    pub fn mechanic_note(self) -> Option<&'static str> {
        match self {
            Self::KeepConstruct => Some("Orb Pusher"),
            Self::Deimos => Some("Hand Kiter"),
            _ => None,
        }
    }
}

static PROFESSIONS: phf::Map<u32, (&'static str, &'static str)> = phf_map! {
    1u32 => ("Guardian", "Grdn"),
    2u32 => ("Warrior", "Warr"),
    3u32 => ("Engineer", "Engi"),
    4u32 => ("Ranger", "Rngr"),
    5u32 => ("Thief", "Thf"),
    6u32 => ("Elementalist", "Ele"),
    7u32 => ("Mesmer", "Mes"),
    8u32 => ("Necromancer", "Necr"),
    9u32 => ("Revenant", "Rev"),
};

static ELITE_SPECS: phf::Map<u32, (&'static str, &'static str)> = phf_map! {
    5u32 => ("Druid", "Dru"),
    7u32 => ("Daredevil", "DD"),
    18u32 => ("Berserker", "Brsk"),
    27u32 => ("Dragonhunter", "DH"),
    34u32 => ("Reaper", "Rpr"),
    40u32 => ("Chronomancer", "Chrn"),
    43u32 => ("Scrapper", "Scrp"),
    48u32 => ("Tempest", "Temp"),
    52u32 => ("Herald", "Hrld"),
    55u32 => ("Soulbeast", "Slb"),
    56u32 => ("Weaver", "Weav"),
    57u32 => ("Holosmith", "Holo"),
    58u32 => ("Deadeye", "Deye"),
    59u32 => ("Mirage", "Mir"),
    60u32 => ("Scourge", "Scrg"),
    61u32 => ("Spellbreaker", "Spbr"),
    62u32 => ("Firebrand", "Fbrd"),
    63u32 => ("Renegade", "Ren"),
};

const UNKNOWN_NAME: (&str, &str) = ("Unknown", "Unk");

/// (full name, short name) for a profession id.
pub fn profession_name(id: u32) -> (&'static str, &'static str) {
    PROFESSIONS.get(&id).copied().unwrap_or(UNKNOWN_NAME)
}

/// (full name, short name) for an elite specialization id. Core builds (0) are unknown.
pub fn elite_spec_name(id: u32) -> (&'static str, &'static str) {
    ELITE_SPECS.get(&id).copied().unwrap_or(UNKNOWN_NAME)
}
