//! # Catalog Module
//!
//! Monster records and the lookup contract encounters use to resolve them.
//!
//! The catalog is an external collaborator of the encounter engine: the
//! engine only ever asks it for a single record by id, through the
//! [`MonsterCatalog`] trait. [`InMemoryCatalog`] is the bundled
//! implementation, loaded from the JSON the monster API serves, and also
//! answers the filter queries a monster browser needs.

pub mod filter;
pub mod memory;
pub mod rating;
pub mod stats;

pub use filter::*;
pub use memory::*;
pub use rating::*;
pub use stats::*;

use crate::{BestiaryError, BestiaryResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a monster in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonsterId(pub u32);

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for MonsterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A monster as served by the catalog.
///
/// Only `id`, `name`, `challenge_rating` and `xp` matter to encounters;
/// `size`, `monster_type` and `subtype` drive catalog filtering. The stat
/// block and feature lists are optional detail for the monster sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterRecord {
    pub id: MonsterId,
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(rename = "type", default)]
    pub monster_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(alias = "challenge_rating")]
    pub challenge_rating: ChallengeRating,
    pub xp: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatBlock>,
    #[serde(alias = "special_abilities", default, skip_serializing_if = "Vec::is_empty")]
    pub special_abilities: Vec<Feature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Feature>,
    #[serde(alias = "legendary_actions", default, skip_serializing_if = "Vec::is_empty")]
    pub legendary_actions: Vec<Feature>,
}

impl MonsterRecord {
    /// Creates a record with the fields an encounter needs; size and type
    /// are left blank.
    pub fn new(
        id: MonsterId,
        name: impl Into<String>,
        challenge_rating: ChallengeRating,
        xp: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            size: String::new(),
            monster_type: String::new(),
            subtype: None,
            challenge_rating,
            xp,
            stats: None,
            special_abilities: Vec::new(),
            actions: Vec::new(),
            legendary_actions: Vec::new(),
        }
    }

    /// Sets the size and type used by catalog filters.
    pub fn with_kind(mut self, size: impl Into<String>, monster_type: impl Into<String>) -> Self {
        self.size = size.into();
        self.monster_type = monster_type.into();
        self
    }

    /// Attaches the stat block shown on the monster sheet.
    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Checks the record can be served by a catalog.
    pub fn validate(&self) -> BestiaryResult<()> {
        if self.name.trim().is_empty() {
            return Err(BestiaryError::validation(format!(
                "monster {} has an empty name",
                self.id
            )));
        }
        Ok(())
    }
}

/// Lookup of monster metadata by id.
///
/// This is the only way the encounter engine reaches into external data.
/// Any closure `Fn(MonsterId) -> BestiaryResult<MonsterRecord>` is a
/// catalog too, which keeps test doubles and remote-backed caches cheap to
/// write.
///
/// # Examples
///
/// ```
/// use bestiary::{BestiaryError, ChallengeRating, MonsterCatalog, MonsterId, MonsterRecord};
///
/// let lookup = |id: MonsterId| match id.0 {
///     4 => Ok(MonsterRecord::new(id, "Bat", ChallengeRating::ZERO, 10)),
///     _ => Err(BestiaryError::NotFound(id)),
/// };
///
/// assert_eq!(lookup.get(MonsterId(4)).unwrap().name, "Bat");
/// assert!(lookup.get(MonsterId(5)).is_err());
/// ```
pub trait MonsterCatalog {
    /// Returns the record for `id`, or [`BestiaryError::NotFound`].
    fn get(&self, id: MonsterId) -> BestiaryResult<MonsterRecord>;
}

impl<F> MonsterCatalog for F
where
    F: Fn(MonsterId) -> BestiaryResult<MonsterRecord>,
{
    fn get(&self, id: MonsterId) -> BestiaryResult<MonsterRecord> {
        self(id)
    }
}
