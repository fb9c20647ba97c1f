//! # Stat Blocks
//!
//! The detail view of a monster: defenses, ability scores and the
//! abilities and actions listed on its stat sheet. Encounters never read
//! any of this.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// Stat sheet order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Three-letter column heading, e.g. `STR`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }
}

/// Signed ability modifier; displays with an explicit sign (`+2`, `-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Modifier(pub i32);

impl Modifier {
    /// Modifier for an ability score: half the distance from 10, rounded
    /// down.
    ///
    /// # Examples
    ///
    /// ```
    /// use bestiary::Modifier;
    ///
    /// assert_eq!(Modifier::for_score(10).to_string(), "+0");
    /// assert_eq!(Modifier::for_score(15).to_string(), "+2");
    /// assert_eq!(Modifier::for_score(9).to_string(), "-1");
    /// assert_eq!(Modifier::for_score(1).to_string(), "-5");
    /// ```
    pub fn for_score(score: u8) -> Self {
        Self((score as i32 - 10).div_euclid(2))
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:+}", self.0))
    }
}

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub fn score(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn modifier(&self, ability: Ability) -> Modifier {
        Modifier::for_score(self.score(ability))
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

/// Defenses and ability scores.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBlock {
    #[serde(alias = "armor_class")]
    pub armor_class: u32,
    #[serde(alias = "hit_points")]
    pub hit_points: u32,
    #[serde(alias = "hit_dice", default)]
    pub hit_dice: String,
    #[serde(flatten)]
    pub abilities: AbilityScores,
}

/// A named entry on the stat sheet: a special ability, an action or a
/// legendary action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    /// Recharge or per-day limit, e.g. `Recharge 5-6`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

impl Feature {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.usage {
            Some(usage) => write!(f, "{} ({}). {}", self.name, usage, self.desc),
            None => write!(f, "{}. {}", self.name, self.desc),
        }
    }
}
