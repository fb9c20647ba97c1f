//! # In-Memory Catalog
//!
//! A monster catalog held entirely in memory, loaded from the JSON the
//! monster API serves.

use crate::{BestiaryError, BestiaryResult, MonsterCatalog, MonsterFilter, MonsterId, MonsterRecord};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

/// Monster catalog backed by a vector of records.
///
/// Records are kept ordered by name, which is the order every query
/// returns them in.
///
/// # Examples
///
/// ```
/// use bestiary::{ChallengeRating, InMemoryCatalog, MonsterCatalog, MonsterFilter, MonsterId, MonsterRecord};
///
/// let catalog = InMemoryCatalog::new(vec![
///     MonsterRecord::new(MonsterId(72), "Skeleton", ChallengeRating::QUARTER, 50)
///         .with_kind("Medium", "undead"),
///     MonsterRecord::new(MonsterId(4), "Bat", ChallengeRating::ZERO, 10)
///         .with_kind("Tiny", "beast"),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.get(MonsterId(72)).unwrap().name, "Skeleton");
///
/// let undead = catalog.query(&MonsterFilter::new().with_type("undead")).unwrap();
/// assert_eq!(undead.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Vec<MonsterRecord>,
    index: HashMap<MonsterId, usize>,
}

/// The API wraps its list in an envelope; exported files may not.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Envelope { monsters: Vec<MonsterRecord> },
    List(Vec<MonsterRecord>),
}

impl InMemoryCatalog {
    /// Builds a catalog, rejecting invalid records and duplicate ids.
    pub fn new(mut records: Vec<MonsterRecord>) -> BestiaryResult<Self> {
        for record in &records {
            record.validate()?;
        }

        records.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id, position).is_some() {
                return Err(BestiaryError::validation(format!(
                    "duplicate monster id {} in catalog",
                    record.id
                )));
            }
        }

        log::debug!("Catalog built with {} monsters", records.len());
        Ok(Self { records, index })
    }

    /// Parses a catalog from JSON: either a bare array of records or an
    /// object with a `monsters` array.
    pub fn from_json(json: &str) -> BestiaryResult<Self> {
        let records = match serde_json::from_str(json)? {
            CatalogDocument::Envelope { monsters } => monsters,
            CatalogDocument::List(monsters) => monsters,
        };
        Self::new(records)
    }

    /// Loads a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> BestiaryResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        log::info!("Loaded {} monsters from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over all records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &MonsterRecord> {
        self.records.iter()
    }

    /// Looks up a record without cloning it.
    pub fn find(&self, id: MonsterId) -> Option<&MonsterRecord> {
        self.index.get(&id).map(|&position| &self.records[position])
    }

    /// Returns the records matching `filter`, ordered by name.
    pub fn query(&self, filter: &MonsterFilter) -> BestiaryResult<Vec<&MonsterRecord>> {
        filter.validate()?;
        Ok(self.records.iter().filter(|r| filter.matches(r)).collect())
    }

    /// Distinct monster types, ascending.
    pub fn types(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.monster_type.as_str())
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct size categories, descending.
    pub fn sizes(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.size.as_str())
            .filter(|s| !s.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .rev()
            .collect()
    }
}

impl MonsterCatalog for InMemoryCatalog {
    fn get(&self, id: MonsterId) -> BestiaryResult<MonsterRecord> {
        self.find(id).cloned().ok_or(BestiaryError::NotFound(id))
    }
}
