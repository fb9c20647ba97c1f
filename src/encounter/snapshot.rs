//! # Encounter Snapshots
//!
//! Serializable copies of an encounter's group lists, used to save an
//! encounter and bring it back later.

use super::lenient;
use crate::{config, BestiaryResult, HeroGroup, MonsterGroup};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Both group lists of an encounter, without any derived values.
///
/// Restoring a snapshot into an [`EncounterEngine`](crate::EncounterEngine)
/// recomputes everything else. Older saves stored each list as a JSON
/// string inside the outer object; those load too.
///
/// # Examples
///
/// ```
/// use bestiary::{EncounterEngine, EncounterSnapshot};
///
/// let saved = r#"{
///     "heroes": "[{\"num\":\"4\",\"lvl\":\"1\"}]",
///     "monsters": "[{\"id\":72,\"name\":\"Skeleton\",\"cr\":\"1/4\",\"xp\":50,\"num\":2}]"
/// }"#;
///
/// let snapshot = EncounterSnapshot::from_json(saved).unwrap();
/// assert_eq!(snapshot.summarize(50), "Heroes x 4 vs. Skeleton x 2");
///
/// let engine = EncounterEngine::from_snapshot(snapshot).unwrap();
/// assert_eq!(engine.monster_adjusted_xp(), 150);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    #[serde(default, deserialize_with = "lenient::list_or_embedded_json")]
    pub heroes: Vec<HeroGroup>,
    #[serde(default, deserialize_with = "lenient::list_or_embedded_json")]
    pub monsters: Vec<MonsterGroup>,
}

impl EncounterSnapshot {
    pub fn new(heroes: Vec<HeroGroup>, monsters: Vec<MonsterGroup>) -> Self {
        Self { heroes, monsters }
    }

    /// Serializes to compact JSON.
    pub fn to_json(&self) -> BestiaryResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes to indented JSON.
    pub fn to_json_pretty(&self) -> BestiaryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot. Group values are not validated here; restoring
    /// into an engine does that.
    pub fn from_json(json: &str) -> BestiaryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the snapshot to `path` as indented JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> BestiaryResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json_pretty()?)?;
        log::info!("Saved encounter to {}", path.display());
        Ok(())
    }

    /// Reads a snapshot from `path`.
    pub fn load(path: impl AsRef<Path>) -> BestiaryResult<Self> {
        let path = path.as_ref();
        let snapshot = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!(
            "Loaded encounter from {} ({} hero groups, {} monster groups)",
            path.display(),
            snapshot.heroes.len(),
            snapshot.monsters.len()
        );
        Ok(snapshot)
    }

    /// One-line description such as `Heroes x 4 vs. Skeleton x 2, Bat x 5`.
    ///
    /// Lines longer than `max_len` characters are cut to `max_len - 3`
    /// characters followed by `...`. Below three characters there is no
    /// room for the ellipsis and the line is simply cut.
    pub fn summarize(&self, max_len: usize) -> String {
        let num_heroes: u64 = self.heroes.iter().map(|h| h.count as u64).sum();

        let mut summary = if num_heroes == 0 {
            String::from("No Heroes")
        } else {
            format!("Heroes x {}", num_heroes)
        };
        summary.push_str(" vs. ");

        if self.monsters.is_empty() {
            summary.push_str("No Monsters");
        } else {
            let monsters: Vec<String> = self
                .monsters
                .iter()
                .map(|m| format!("{} x {}", m.name, m.count))
                .collect();
            summary.push_str(&monsters.join(", "));
        }

        if summary.chars().count() <= max_len {
            summary
        } else if max_len < 3 {
            summary.chars().take(max_len).collect()
        } else {
            let mut truncated: String = summary.chars().take(max_len - 3).collect();
            truncated.push_str("...");
            truncated
        }
    }

    /// [`summarize`](Self::summarize) with the default length.
    pub fn summary(&self) -> String {
        self.summarize(config::DEFAULT_SUMMARY_LENGTH)
    }
}
