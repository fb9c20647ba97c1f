//! # Difficulty Calculation
//!
//! Pure functions turning hero and monster groups into XP budgets, adjusted
//! monster XP, and a difficulty rating. [`EncounterEngine`](crate::EncounterEngine)
//! caches their results; nothing here holds state.

use super::tables::{encounter_multiplier, encounter_multiplier_halves, xp_tier_row, XP_TIERS};
use crate::{HeroGroup, MonsterGroup};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Party XP budgets at `[easy, medium, hard, deadly]`.
pub type XpThresholds = [u64; 4];

/// Column of the XP tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XpTier {
    Easy,
    Medium,
    Hard,
    Deadly,
}

impl XpTier {
    /// All tiers in table column order.
    pub const ALL: [XpTier; 4] = [XpTier::Easy, XpTier::Medium, XpTier::Hard, XpTier::Deadly];

    /// Column index into [`XpThresholds`] and the XP tier table.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for XpTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            XpTier::Easy => "easy",
            XpTier::Medium => "medium",
            XpTier::Hard => "hard",
            XpTier::Deadly => "deadly",
        };
        f.write_str(name)
    }
}

/// Overall encounter rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    /// No heroes, or nothing to fight
    #[default]
    None,
    Easy,
    Medium,
    Hard,
    Deadly,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::None => "NONE",
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
            Difficulty::Deadly => "DEADLY",
        };
        f.write_str(name)
    }
}

/// Raw and headcount-adjusted XP of a monster roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterXp {
    /// Sum of `xp * count` over all groups
    pub total: u64,
    /// `total` scaled by the headcount multiplier, rounded down
    pub adjusted: u64,
    /// Sum of `count` over all groups
    pub num_monsters: u64,
    /// Headcount multiplier applied to `total`
    pub multiplier: f64,
}

/// Monster XP divided evenly across the party, rounded to nearest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerHeroXp {
    pub total: u64,
    pub adjusted: u64,
}

/// Sums `count * XP_TIERS[level]` over the groups, column by column.
///
/// Levels outside the table contribute nothing; validate groups first.
///
/// # Examples
///
/// ```
/// use bestiary::{hero_xp_thresholds, HeroGroup};
///
/// let party = [HeroGroup::new(2, 1), HeroGroup::new(2, 2)];
/// assert_eq!(hero_xp_thresholds(&party), [150, 300, 450, 600]);
/// assert_eq!(hero_xp_thresholds(&[]), [0, 0, 0, 0]);
/// ```
pub fn hero_xp_thresholds(groups: &[HeroGroup]) -> XpThresholds {
    groups.iter().fold([0; 4], |mut thresholds, group| {
        let row = xp_tier_row(group.level).unwrap_or(&XP_TIERS[0]);
        for (threshold, &per_hero) in thresholds.iter_mut().zip(row) {
            *threshold = threshold.saturating_add(group.count as u64 * per_hero as u64);
        }
        thresholds
    })
}

/// Total number of heroes across all groups.
pub fn hero_count(groups: &[HeroGroup]) -> u64 {
    groups.iter().map(|g| g.count as u64).sum()
}

/// Totals monster XP and applies the headcount multiplier.
///
/// Half-step multipliers can produce a fractional adjusted value; it is
/// rounded down, which leaves every comparison against a whole-number
/// threshold unchanged.
pub fn monster_xp(groups: &[MonsterGroup]) -> MonsterXp {
    let (total, num_monsters) = groups.iter().fold((0u64, 0u64), |(xp, count), group| {
        (
            xp.saturating_add(group.total_xp()),
            count.saturating_add(group.count as u64),
        )
    });

    MonsterXp {
        total,
        adjusted: total.saturating_mul(encounter_multiplier_halves(num_monsters)) / 2,
        num_monsters,
        multiplier: encounter_multiplier(num_monsters),
    }
}

/// Rates an encounter against the party's thresholds.
///
/// The first matching rule wins: no heroes or zero adjusted XP is
/// [`Difficulty::None`]; then each threshold is an exclusive upper bound
/// for the tier of the same name; anything at or past the hard threshold
/// is [`Difficulty::Deadly`].
pub fn classify(thresholds: &XpThresholds, adjusted_xp: u64, has_heroes: bool) -> Difficulty {
    if adjusted_xp == 0 || !has_heroes {
        Difficulty::None
    } else if adjusted_xp < thresholds[XpTier::Easy.index()] {
        Difficulty::Easy
    } else if adjusted_xp < thresholds[XpTier::Medium.index()] {
        Difficulty::Medium
    } else if adjusted_xp < thresholds[XpTier::Hard.index()] {
        Difficulty::Hard
    } else {
        Difficulty::Deadly
    }
}

/// Splits monster XP across `num_heroes`; `None` when there are no heroes.
///
/// The adjusted share divides the unrounded adjusted XP, so a half-step
/// multiplier rounds once, after the split.
pub fn per_hero_xp(monster_xp: &MonsterXp, num_heroes: u64) -> Option<PerHeroXp> {
    if num_heroes == 0 {
        return None;
    }
    let adjusted_halves = monster_xp
        .total
        .saturating_mul(encounter_multiplier_halves(monster_xp.num_monsters));
    Some(PerHeroXp {
        total: divide_rounded(monster_xp.total, num_heroes),
        adjusted: divide_rounded(adjusted_halves, num_heroes.saturating_mul(2)),
    })
}

/// Integer division rounding halves up.
fn divide_rounded(value: u64, divisor: u64) -> u64 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder >= divisor - remainder {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChallengeRating, MonsterId};

    fn monsters(groups: &[(u32, u32)]) -> Vec<MonsterGroup> {
        groups
            .iter()
            .enumerate()
            .map(|(i, &(xp, count))| {
                MonsterGroup::new(MonsterId(i as u32), format!("m{}", i), ChallengeRating::ZERO, xp, count)
            })
            .collect()
    }

    #[test]
    fn test_thresholds_sum_groups() {
        let party = [HeroGroup::new(4, 1)];
        assert_eq!(hero_xp_thresholds(&party), [100, 200, 300, 400]);

        let party = [HeroGroup::new(3, 5), HeroGroup::new(1, 20)];
        assert_eq!(
            hero_xp_thresholds(&party),
            [3 * 250 + 2800, 3 * 500 + 5700, 3 * 750 + 8500, 3 * 1100 + 12700]
        );
    }

    #[test]
    fn test_out_of_table_level_contributes_nothing() {
        assert_eq!(hero_xp_thresholds(&[HeroGroup::new(3, 40)]), [0, 0, 0, 0]);
    }

    #[test]
    fn test_monster_xp_totals() {
        let xp = monster_xp(&monsters(&[(50, 3), (11500, 1)]));
        assert_eq!(xp.total, 11650);
        assert_eq!(xp.num_monsters, 4);
        assert_eq!(xp.multiplier, 2.0);
        assert_eq!(xp.adjusted, 23300);
    }

    #[test]
    fn test_monster_xp_empty() {
        assert_eq!(monster_xp(&[]), MonsterXp::default());
    }

    #[test]
    fn test_half_multiplier_rounds_down() {
        // 35 * 1.5 = 52.5
        let xp = monster_xp(&monsters(&[(10, 1), (25, 1)]));
        assert_eq!(xp.total, 35);
        assert_eq!(xp.adjusted, 52);
    }

    #[test]
    fn test_classify_walks_thresholds() {
        let thresholds = [100, 200, 300, 400];
        assert_eq!(classify(&thresholds, 0, true), Difficulty::None);
        assert_eq!(classify(&thresholds, 50, false), Difficulty::None);
        assert_eq!(classify(&thresholds, 1, true), Difficulty::Easy);
        assert_eq!(classify(&thresholds, 99, true), Difficulty::Easy);
        assert_eq!(classify(&thresholds, 100, true), Difficulty::Medium);
        assert_eq!(classify(&thresholds, 199, true), Difficulty::Medium);
        assert_eq!(classify(&thresholds, 200, true), Difficulty::Hard);
        assert_eq!(classify(&thresholds, 299, true), Difficulty::Hard);
        assert_eq!(classify(&thresholds, 300, true), Difficulty::Deadly);
        assert_eq!(classify(&thresholds, 100_000, true), Difficulty::Deadly);
    }

    #[test]
    fn test_classify_with_zero_thresholds() {
        // Heroes present but every threshold zero: any XP is deadly.
        assert_eq!(classify(&[0, 0, 0, 0], 10, true), Difficulty::Deadly);
    }

    #[test]
    fn test_per_hero_share() {
        let xp = MonsterXp {
            total: 150,
            adjusted: 300,
            num_monsters: 3,
            multiplier: 2.0,
        };
        assert_eq!(per_hero_xp(&xp, 4), Some(PerHeroXp { total: 38, adjusted: 75 }));
        assert_eq!(per_hero_xp(&xp, 0), None);
    }

    #[test]
    fn test_per_hero_share_rounds_after_split() {
        // 35 xp across two monsters is 52.5 adjusted.
        let xp = monster_xp(&monsters(&[(20, 1), (15, 1)]));
        assert_eq!(xp.adjusted, 52);
        assert_eq!(per_hero_xp(&xp, 1), Some(PerHeroXp { total: 35, adjusted: 53 }));
        assert_eq!(per_hero_xp(&xp, 2), Some(PerHeroXp { total: 18, adjusted: 26 }));
        assert_eq!(per_hero_xp(&xp, 3), Some(PerHeroXp { total: 12, adjusted: 18 }));
    }

    #[test]
    fn test_divide_rounded() {
        assert_eq!(divide_rounded(5, 2), 3);
        assert_eq!(divide_rounded(4, 3), 1);
        assert_eq!(divide_rounded(5, 3), 2);
        assert_eq!(divide_rounded(0, 7), 0);
        assert_eq!(divide_rounded(u64::MAX, 1), u64::MAX);
    }

    #[test]
    fn test_difficulty_text() {
        assert_eq!(Difficulty::Deadly.to_string(), "DEADLY");
        assert_eq!(serde_json::to_string(&Difficulty::None).unwrap(), "\"NONE\"");
        assert_eq!(XpTier::Medium.to_string(), "medium");
        assert_eq!(XpTier::Deadly.index(), 3);
    }
}
