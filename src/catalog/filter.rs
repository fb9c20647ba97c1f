//! # Monster Filter
//!
//! Query parameters for browsing the catalog.

use crate::{BestiaryError, BestiaryResult, ChallengeRating, MonsterRecord};
use serde::{Deserialize, Serialize};

/// Catalog query: an inclusive challenge-rating range plus optional type
/// and size restrictions.
///
/// Empty type or size strings mean "any", matching how the browser sends
/// an unselected dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonsterFilter {
    /// Lowest challenge rating to include
    pub min_cr: ChallengeRating,
    /// Highest challenge rating to include
    pub max_cr: ChallengeRating,
    /// Monster type such as `undead`
    #[serde(rename = "type")]
    pub monster_type: Option<String>,
    /// Size category such as `Large`
    pub size: Option<String>,
}

impl MonsterFilter {
    /// Creates a filter matching every monster.
    pub fn new() -> Self {
        Self {
            min_cr: ChallengeRating::ZERO,
            max_cr: ChallengeRating::MAX,
            monster_type: None,
            size: None,
        }
    }

    /// Restricts the challenge-rating range.
    pub fn with_cr_range(mut self, min_cr: ChallengeRating, max_cr: ChallengeRating) -> Self {
        self.min_cr = min_cr;
        self.max_cr = max_cr;
        self
    }

    /// Restricts the monster type.
    pub fn with_type(mut self, monster_type: impl Into<String>) -> Self {
        self.monster_type = Some(monster_type.into());
        self
    }

    /// Restricts the size category.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Rejects an inverted challenge-rating range.
    pub fn validate(&self) -> BestiaryResult<()> {
        if self.min_cr > self.max_cr {
            return Err(BestiaryError::validation(format!(
                "minimum challenge rating {} exceeds maximum {}",
                self.min_cr, self.max_cr
            )));
        }
        Ok(())
    }

    /// Returns true if `record` satisfies every restriction.
    pub fn matches(&self, record: &MonsterRecord) -> bool {
        let cr = record.challenge_rating;
        cr >= self.min_cr
            && cr <= self.max_cr
            && field_matches(self.monster_type.as_deref(), &record.monster_type)
            && field_matches(self.size.as_deref(), &record.size)
    }
}

impl Default for MonsterFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted.map(str::trim) {
        None | Some("") => true,
        Some(wanted) => wanted.eq_ignore_ascii_case(actual),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonsterId;

    fn owlbear() -> MonsterRecord {
        MonsterRecord::new(
            MonsterId(196),
            "Owlbear",
            ChallengeRating::new(3.0).unwrap(),
            700,
        )
        .with_kind("Large", "monstrosity")
    }

    #[test]
    fn test_default_matches_everything() {
        assert!(MonsterFilter::default().matches(&owlbear()));
    }

    #[test]
    fn test_cr_range_is_inclusive() {
        let three = ChallengeRating::new(3.0).unwrap();
        let filter = MonsterFilter::new().with_cr_range(three, three);
        assert!(filter.matches(&owlbear()));

        let filter = MonsterFilter::new().with_cr_range(ChallengeRating::ZERO, ChallengeRating::HALF);
        assert!(!filter.matches(&owlbear()));
    }

    #[test]
    fn test_type_and_size_ignore_case_and_blank() {
        assert!(MonsterFilter::new().with_type("Monstrosity").matches(&owlbear()));
        assert!(MonsterFilter::new().with_type("").matches(&owlbear()));
        assert!(MonsterFilter::new().with_size("large").matches(&owlbear()));
        assert!(!MonsterFilter::new().with_size("Huge").matches(&owlbear()));
        assert!(!MonsterFilter::new().with_type("beast").matches(&owlbear()));
    }

    #[test]
    fn test_inverted_range_is_invalid() {
        let filter = MonsterFilter::new().with_cr_range(ChallengeRating::HALF, ChallengeRating::EIGHTH);
        assert!(filter.validate().is_err());
        assert!(MonsterFilter::new().validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_query() {
        let filter: MonsterFilter = serde_json::from_str(r#"{"maxCr": "1/2", "type": "undead"}"#).unwrap();
        assert_eq!(filter.min_cr, ChallengeRating::ZERO);
        assert_eq!(filter.max_cr, ChallengeRating::HALF);
        assert_eq!(filter.monster_type.as_deref(), Some("undead"));
        assert_eq!(filter.size, None);
    }
}
