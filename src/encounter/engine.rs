//! # Encounter Engine
//!
//! Canonical state of one encounter and its derived difficulty fields.
//!
//! The engine owns the hero and monster group lists. Every edit validates
//! its input first, mutates only on success, and then re-derives the XP
//! thresholds, monster totals, and difficulty from scratch, so the derived
//! fields can never drift from the groups.

use super::difficulty::{
    classify, hero_count, hero_xp_thresholds, monster_xp, per_hero_xp, MonsterXp, PerHeroXp,
    XpThresholds,
};
use crate::{
    BestiaryError, BestiaryResult, Difficulty, EncounterSnapshot, HeroGroup, MonsterCatalog,
    MonsterGroup, MonsterId,
};
use std::collections::HashSet;

/// Hero and monster rosters plus the values derived from them.
///
/// # Examples
///
/// ```
/// use bestiary::{BestiaryResult, ChallengeRating, Difficulty, EncounterEngine, MonsterId, MonsterRecord};
///
/// let catalog = |id: MonsterId| -> BestiaryResult<MonsterRecord> {
///     Ok(MonsterRecord::new(id, "Owlbear", ChallengeRating::new(3.0)?, 700))
/// };
///
/// let mut engine = EncounterEngine::with_default_party();
/// engine.add_or_increment_monster(MonsterId(196), &catalog).unwrap();
/// engine.add_or_increment_monster(MonsterId(196), &catalog).unwrap();
///
/// assert_eq!(engine.monster_groups().len(), 1);
/// assert_eq!(engine.monster_groups()[0].count, 2);
/// assert_eq!(engine.monster_adjusted_xp(), 2100);
/// assert_eq!(engine.difficulty(), Difficulty::Deadly);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncounterEngine {
    hero_groups: Vec<HeroGroup>,
    monster_groups: Vec<MonsterGroup>,
    hero_xp_thresholds: XpThresholds,
    monster_xp: MonsterXp,
    difficulty: Difficulty,
}

impl EncounterEngine {
    /// Creates an encounter with no heroes and no monsters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encounter with the default party (four level-1 heroes).
    pub fn with_default_party() -> Self {
        let mut engine = Self::new();
        engine.hero_groups.push(HeroGroup::default());
        engine.recompute();
        engine
    }

    /// Creates an encounter from a saved snapshot.
    pub fn from_snapshot(snapshot: EncounterSnapshot) -> BestiaryResult<Self> {
        let mut engine = Self::new();
        engine.restore(snapshot)?;
        Ok(engine)
    }

    /// Replaces the hero list.
    ///
    /// Every group must have `count >= 1` and a level in 1..=20; otherwise
    /// the whole list is rejected and the engine is left unchanged.
    pub fn set_hero_groups(&mut self, groups: Vec<HeroGroup>) -> BestiaryResult<()> {
        validate_hero_groups(&groups)?;
        self.hero_groups = groups;
        self.recompute();
        Ok(())
    }

    /// Replaces the monster list.
    ///
    /// Every group must have `count >= 1`, and no two groups may share an
    /// id; otherwise the whole list is rejected and the engine is left
    /// unchanged.
    pub fn set_monster_groups(&mut self, groups: Vec<MonsterGroup>) -> BestiaryResult<()> {
        validate_monster_groups(&groups)?;
        self.monster_groups = groups;
        self.recompute();
        Ok(())
    }

    /// Appends one hero group.
    pub fn add_hero_group(&mut self, group: HeroGroup) -> BestiaryResult<()> {
        group.validate().inspect_err(|e| log::warn!("Rejected hero group: {}", e))?;
        log::info!("Adding hero group {}", group);
        self.hero_groups.push(group);
        self.recompute();
        Ok(())
    }

    /// Removes the hero group at `index` and returns it.
    pub fn remove_hero_group(&mut self, index: usize) -> BestiaryResult<HeroGroup> {
        if index >= self.hero_groups.len() {
            return Err(BestiaryError::validation(format!(
                "no hero group at index {} ({} groups)",
                index,
                self.hero_groups.len()
            )));
        }
        let removed = self.hero_groups.remove(index);
        log::info!("Removed hero group {}", removed);
        self.recompute();
        Ok(removed)
    }

    /// Adds one monster to the encounter.
    ///
    /// If a group for `id` already exists its count goes up by one.
    /// Otherwise the catalog is asked for the monster's metadata and a new
    /// single-monster group is appended. Returns the group's new count.
    pub fn add_or_increment_monster<C>(&mut self, id: MonsterId, catalog: &C) -> BestiaryResult<u32>
    where
        C: MonsterCatalog + ?Sized,
    {
        if let Some(group) = self.monster_groups.iter_mut().find(|g| g.id == id) {
            group.count = group.count.checked_add(1).ok_or_else(|| {
                BestiaryError::validation(format!("monster group ({}) cannot grow further", group))
            })?;
            let count = group.count;
            log::info!("Monster {} count is now {}", id, count);
            self.recompute();
            return Ok(count);
        }

        let record = catalog
            .get(id)
            .inspect_err(|e| log::warn!("Catalog lookup for monster {} failed: {}", id, e))?;
        if record.id != id {
            return Err(BestiaryError::validation(format!(
                "catalog returned monster {} when asked for {}",
                record.id, id
            )));
        }

        log::info!("Adding monster {} ({}) to the encounter", id, record.name);
        self.monster_groups.push(MonsterGroup::from_record(&record));
        self.recompute();
        Ok(1)
    }

    /// Sets the count of the group for `id`; a count of zero removes it.
    pub fn set_monster_count(&mut self, id: MonsterId, count: u32) -> BestiaryResult<()> {
        let position = self.monster_position(id)?;
        if count == 0 {
            self.monster_groups.remove(position);
            log::info!("Removed monster {} from the encounter", id);
        } else {
            self.monster_groups[position].count = count;
        }
        self.recompute();
        Ok(())
    }

    /// Removes the group for `id` and returns it.
    pub fn remove_monster(&mut self, id: MonsterId) -> BestiaryResult<MonsterGroup> {
        let position = self.monster_position(id)?;
        let removed = self.monster_groups.remove(position);
        log::info!("Removed monster {} from the encounter", id);
        self.recompute();
        Ok(removed)
    }

    /// Drops every hero and monster group.
    pub fn clear(&mut self) {
        self.hero_groups.clear();
        self.monster_groups.clear();
        self.recompute();
    }

    /// Re-derives thresholds, monster XP, and difficulty from the groups.
    ///
    /// Every mutating method already calls this; calling it again without
    /// an intervening edit changes nothing.
    pub fn recompute(&mut self) {
        self.hero_xp_thresholds = hero_xp_thresholds(&self.hero_groups);
        self.monster_xp = monster_xp(&self.monster_groups);
        self.difficulty = classify(
            &self.hero_xp_thresholds,
            self.monster_xp.adjusted,
            !self.hero_groups.is_empty(),
        );

        log::debug!(
            "Recomputed encounter: thresholds {:?}, monster xp {} (adjusted {}), difficulty {}",
            self.hero_xp_thresholds,
            self.monster_xp.total,
            self.monster_xp.adjusted,
            self.difficulty
        );
    }

    /// Copies both group lists into a serializable snapshot.
    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot::new(self.hero_groups.clone(), self.monster_groups.clone())
    }

    /// Replaces both group lists from a snapshot.
    ///
    /// Both lists are validated before either is applied.
    pub fn restore(&mut self, snapshot: EncounterSnapshot) -> BestiaryResult<()> {
        validate_hero_groups(&snapshot.heroes)?;
        validate_monster_groups(&snapshot.monsters)?;
        self.hero_groups = snapshot.heroes;
        self.monster_groups = snapshot.monsters;
        self.recompute();
        Ok(())
    }

    pub fn hero_groups(&self) -> &[HeroGroup] {
        &self.hero_groups
    }

    pub fn monster_groups(&self) -> &[MonsterGroup] {
        &self.monster_groups
    }

    /// Party XP budgets at `[easy, medium, hard, deadly]`.
    pub fn hero_xp_thresholds(&self) -> XpThresholds {
        self.hero_xp_thresholds
    }

    /// Raw monster XP.
    pub fn monster_total_xp(&self) -> u64 {
        self.monster_xp.total
    }

    /// Monster XP scaled by the headcount multiplier.
    pub fn monster_adjusted_xp(&self) -> u64 {
        self.monster_xp.adjusted
    }

    pub fn monster_xp(&self) -> MonsterXp {
        self.monster_xp
    }

    /// Headcount multiplier currently applied.
    pub fn multiplier(&self) -> f64 {
        self.monster_xp.multiplier
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn num_heroes(&self) -> u64 {
        hero_count(&self.hero_groups)
    }

    pub fn num_monsters(&self) -> u64 {
        self.monster_xp.num_monsters
    }

    /// Monster XP per hero, or `None` with an empty party.
    pub fn per_hero_xp(&self) -> Option<PerHeroXp> {
        per_hero_xp(&self.monster_xp, self.num_heroes())
    }

    fn monster_position(&self, id: MonsterId) -> BestiaryResult<usize> {
        self.monster_groups
            .iter()
            .position(|g| g.id == id)
            .ok_or(BestiaryError::NotFound(id))
    }
}

fn validate_hero_groups(groups: &[HeroGroup]) -> BestiaryResult<()> {
    for (index, group) in groups.iter().enumerate() {
        group.validate().map_err(|e| {
            log::warn!("Rejected hero group {}: {}", index, e);
            BestiaryError::validation(format!("hero group {}: {}", index, e))
        })?;
    }
    Ok(())
}

fn validate_monster_groups(groups: &[MonsterGroup]) -> BestiaryResult<()> {
    let mut seen = HashSet::with_capacity(groups.len());
    for (index, group) in groups.iter().enumerate() {
        group.validate().map_err(|e| {
            log::warn!("Rejected monster group {}: {}", index, e);
            BestiaryError::validation(format!("monster group {}: {}", index, e))
        })?;
        if !seen.insert(group.id) {
            log::warn!("Rejected monster group {}: duplicate id {}", index, group.id);
            return Err(BestiaryError::validation(format!(
                "monster group {}: monster {} already has a group",
                index, group.id
            )));
        }
    }
    Ok(())
}
