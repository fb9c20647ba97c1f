//! # Encounter Groups
//!
//! Hero and monster groups: N identical combatants counted together.

use super::lenient;
use crate::{config, BestiaryError, BestiaryResult, ChallengeRating, MonsterId, MonsterRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// N heroes of the same level.
///
/// Deserialization also accepts the `num`/`lvl` field names and numbers
/// stored as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeroGroup {
    #[serde(alias = "num", deserialize_with = "lenient::u32_lenient")]
    pub count: u32,
    #[serde(alias = "lvl", deserialize_with = "lenient::u8_lenient")]
    pub level: u8,
}

impl HeroGroup {
    /// Creates a hero group. Call [`HeroGroup::validate`] before trusting it.
    pub fn new(count: u32, level: u8) -> Self {
        Self { count, level }
    }

    /// Checks `count >= 1` and `level` within 1..=20.
    pub fn validate(&self) -> BestiaryResult<()> {
        if self.count == 0 {
            return Err(BestiaryError::validation(format!(
                "hero group ({self}): count must be at least 1"
            )));
        }
        if !(config::MIN_HERO_LEVEL..=config::MAX_HERO_LEVEL).contains(&self.level) {
            return Err(BestiaryError::validation(format!(
                "hero group ({self}): level must be between {} and {}",
                config::MIN_HERO_LEVEL,
                config::MAX_HERO_LEVEL
            )));
        }
        Ok(())
    }
}

impl Default for HeroGroup {
    fn default() -> Self {
        Self::new(config::DEFAULT_PARTY_SIZE, config::DEFAULT_PARTY_LEVEL)
    }
}

impl fmt::Display for HeroGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x level {}", self.count, self.level)
    }
}

/// Parses `COUNTxLEVEL`, e.g. `4x1` for four first-level heroes.
impl FromStr for HeroGroup {
    type Err = BestiaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            BestiaryError::validation(format!("expected COUNTxLEVEL such as 4x1, got {s:?}"))
        };

        let (count, level) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let group = Self::new(
            count.trim().parse().map_err(|_| invalid())?,
            level.trim().parse().map_err(|_| invalid())?,
        );
        group.validate()?;
        Ok(group)
    }
}

/// N copies of one catalog monster.
///
/// Deserialization also accepts the `cr`/`num` field names and numbers
/// stored as strings. A catalog row carrying both `challenge_rating` and
/// the display form `cr` reads the numeric one, and a missing count means
/// a single monster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMonsterGroup")]
pub struct MonsterGroup {
    pub id: MonsterId,
    pub name: String,
    pub challenge_rating: ChallengeRating,
    pub xp: u32,
    pub count: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMonsterGroup {
    id: MonsterId,
    name: String,
    #[serde(alias = "challenge_rating", default)]
    challenge_rating: Option<ChallengeRating>,
    #[serde(default)]
    cr: Option<ChallengeRating>,
    #[serde(deserialize_with = "lenient::u32_lenient")]
    xp: u32,
    #[serde(alias = "num", default = "single", deserialize_with = "lenient::u32_lenient")]
    count: u32,
}

fn single() -> u32 {
    1
}

impl TryFrom<RawMonsterGroup> for MonsterGroup {
    type Error = BestiaryError;

    fn try_from(raw: RawMonsterGroup) -> Result<Self, Self::Error> {
        let challenge_rating = raw.challenge_rating.or(raw.cr).ok_or_else(|| {
            BestiaryError::validation(format!("monster group {} has no challenge rating", raw.id))
        })?;
        Ok(Self::new(raw.id, raw.name, challenge_rating, raw.xp, raw.count))
    }
}

impl MonsterGroup {
    /// Creates a monster group. Call [`MonsterGroup::validate`] before trusting it.
    pub fn new(
        id: MonsterId,
        name: impl Into<String>,
        challenge_rating: ChallengeRating,
        xp: u32,
        count: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            challenge_rating,
            xp,
            count,
        }
    }

    /// Creates a single-monster group from a catalog record.
    pub fn from_record(record: &MonsterRecord) -> Self {
        Self::new(
            record.id,
            record.name.clone(),
            record.challenge_rating,
            record.xp,
            1,
        )
    }

    /// Checks `count >= 1`. XP is unsigned, so it needs no check.
    pub fn validate(&self) -> BestiaryResult<()> {
        if self.count == 0 {
            return Err(BestiaryError::validation(format!(
                "monster group ({self}): count must be at least 1"
            )));
        }
        Ok(())
    }

    /// Raw XP of the whole group.
    pub fn total_xp(&self) -> u64 {
        self.xp as u64 * self.count as u64
    }
}

impl fmt::Display for MonsterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} (CR {}, XP {}) x {}",
            self.name, self.id, self.challenge_rating, self.xp, self.count
        )
    }
}

impl MonsterRecord {
    /// Creates a single-monster group from this record.
    pub fn to_group(&self) -> MonsterGroup {
        MonsterGroup::from_record(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hero_group() {
        assert_eq!(HeroGroup::default(), HeroGroup::new(4, 1));
    }

    #[test]
    fn test_hero_validation() {
        assert!(HeroGroup::new(1, 1).validate().is_ok());
        assert!(HeroGroup::new(6, 20).validate().is_ok());
        assert!(HeroGroup::new(0, 5).validate().is_err());
        assert!(HeroGroup::new(3, 0).validate().is_err());
        assert!(HeroGroup::new(3, 21).validate().is_err());
    }

    #[test]
    fn test_hero_validation_names_the_group() {
        let err = HeroGroup::new(2, 25).validate().unwrap_err();
        assert!(err.to_string().contains("2 x level 25"), "{}", err);
    }

    #[test]
    fn test_hero_group_parse() {
        assert_eq!("4x1".parse::<HeroGroup>().unwrap(), HeroGroup::new(4, 1));
        assert_eq!(" 2 X 15 ".parse::<HeroGroup>().unwrap(), HeroGroup::new(2, 15));
        assert!("4".parse::<HeroGroup>().is_err());
        assert!("0x3".parse::<HeroGroup>().is_err());
        assert!("3x21".parse::<HeroGroup>().is_err());
        assert!("axb".parse::<HeroGroup>().is_err());
    }

    #[test]
    fn test_hero_group_legacy_json() {
        let group: HeroGroup = serde_json::from_str(r#"{"num": "2", "lvl": "3"}"#).unwrap();
        assert_eq!(group, HeroGroup::new(2, 3));

        let group: HeroGroup = serde_json::from_str(r#"{"count": 5, "level": 7}"#).unwrap();
        assert_eq!(group, HeroGroup::new(5, 7));

        assert!(serde_json::from_str::<HeroGroup>(r#"{"count": -1, "level": 7}"#).is_err());
        assert!(serde_json::from_str::<HeroGroup>(r#"{"count": 1, "level": "many"}"#).is_err());
    }

    #[test]
    fn test_monster_group_legacy_json() {
        let json = r#"{"id": 72, "name": "Skeleton", "cr": "1/4", "xp": 50, "num": 2}"#;
        let group: MonsterGroup = serde_json::from_str(json).unwrap();

        assert_eq!(
            group,
            MonsterGroup::new(MonsterId(72), "Skeleton", ChallengeRating::QUARTER, 50, 2)
        );
        assert_eq!(group.total_xp(), 100);
    }

    #[test]
    fn test_monster_group_from_catalog_row() {
        let json = r#"{
            "id": 72,
            "name": "Skeleton",
            "challenge_rating": 0.25,
            "cr": "1/4",
            "size": "Medium",
            "type": "undead",
            "subtype": null,
            "xp": 50
        }"#;
        let group: MonsterGroup = serde_json::from_str(json).unwrap();
        assert_eq!(
            group,
            MonsterGroup::new(MonsterId(72), "Skeleton", ChallengeRating::QUARTER, 50, 1)
        );

        let json = r#"{"id": 72, "name": "Skeleton", "challengeRating": 0.25, "cr": "1/2", "xp": 50, "count": 3}"#;
        let group: MonsterGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.challenge_rating, ChallengeRating::QUARTER);
        assert_eq!(group.count, 3);
    }

    #[test]
    fn test_monster_group_needs_a_rating() {
        let json = r#"{"id": 72, "name": "Skeleton", "xp": 50, "count": 1}"#;
        let err = serde_json::from_str::<MonsterGroup>(json).unwrap_err();
        assert!(err.to_string().contains("no challenge rating"), "{}", err);
    }

    #[test]
    fn test_monster_group_serializes_canonical_names() {
        let group = MonsterGroup::new(MonsterId(4), "Bat", ChallengeRating::ZERO, 10, 5);
        let value = serde_json::to_value(&group).unwrap();

        assert_eq!(value["challengeRating"], 0.0);
        assert_eq!(value["count"], 5);
        assert!(value.get("num").is_none());
    }

    #[test]
    fn test_monster_validation() {
        let mut group = MonsterGroup::new(MonsterId(4), "Bat", ChallengeRating::ZERO, 0, 1);
        assert!(group.validate().is_ok());
        group.count = 0;
        assert!(matches!(group.validate(), Err(BestiaryError::Validation(_))));
    }

    #[test]
    fn test_group_from_record() {
        let record = MonsterRecord::new(MonsterId(196), "Owlbear", ChallengeRating::new(3.0).unwrap(), 700);
        let group = record.to_group();

        assert_eq!(group.id, MonsterId(196));
        assert_eq!(group.name, "Owlbear");
        assert_eq!(group.xp, 700);
        assert_eq!(group.count, 1);
    }
}
