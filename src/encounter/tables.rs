//! # XP Tables
//!
//! Constant lookup tables from the encounter-building rules.

use crate::config;

/// XP budget per hero, indexed by hero level.
///
/// Columns are `[easy, medium, hard, deadly]`. Row 0 is all zeros and
/// stands for "no level".
pub static XP_TIERS: [[u32; 4]; 21] = [
    [0, 0, 0, 0],
    [25, 50, 75, 100],        // level 1
    [50, 100, 150, 200],      // level 2
    [75, 150, 225, 400],      // level 3
    [125, 250, 375, 500],     // level 4
    [250, 500, 750, 1100],    // level 5
    [300, 600, 900, 1400],    // level 6
    [350, 750, 1100, 1700],   // level 7
    [450, 900, 1400, 2100],   // level 8
    [550, 1100, 1600, 2400],  // level 9
    [600, 1200, 1900, 2800],  // level 10
    [800, 1600, 2400, 3600],  // level 11
    [1000, 2000, 3000, 4500], // level 12
    [1100, 2200, 3400, 5100], // level 13
    [1250, 2500, 3800, 5700], // level 14
    [1400, 2800, 4300, 6400], // level 15
    [1600, 3200, 4800, 7200], // level 16
    [2000, 3900, 5900, 8800], // level 17
    [2100, 4200, 6300, 9500], // level 18
    [2400, 4900, 7300, 10900], // level 19
    [2800, 5700, 8500, 12700], // level 20
];

/// Difficulty multiplier indexed by total monster headcount.
///
/// More monsters means more actions per round, so the same raw XP is
/// riskier spread across many bodies. Counts past the end of the table use
/// the last entry.
pub const ENCOUNTER_MULTIPLIERS: [f64; 16] = [
    0.0, // no monsters, no encounter
    1.0, // 1 monster
    1.5, // 2 monsters
    2.0, 2.0, 2.0, 2.0, // 3-6 monsters
    2.5, 2.5, 2.5, 2.5, // 7-10 monsters
    3.0, 3.0, 3.0, 3.0, // 11-14 monsters
    4.0, // 15 or more
];

/// Returns the XP tier row for `level`, or `None` past level 20.
pub fn xp_tier_row(level: u8) -> Option<&'static [u32; 4]> {
    XP_TIERS.get(level as usize)
}

/// Returns the multiplier for `num_monsters` monsters.
///
/// # Examples
///
/// ```
/// use bestiary::encounter_multiplier;
///
/// assert_eq!(encounter_multiplier(0), 0.0);
/// assert_eq!(encounter_multiplier(2), 1.5);
/// assert_eq!(encounter_multiplier(16), 4.0);
/// ```
pub fn encounter_multiplier(num_monsters: u64) -> f64 {
    if num_monsters > config::MULTIPLIER_SATURATION_COUNT as u64 {
        ENCOUNTER_MULTIPLIERS[ENCOUNTER_MULTIPLIERS.len() - 1]
    } else {
        ENCOUNTER_MULTIPLIERS[num_monsters as usize]
    }
}

/// Twice the multiplier, as an exact integer. Every multiplier is a whole
/// or half number, so this keeps adjusted XP in integer arithmetic.
pub(crate) fn encounter_multiplier_halves(num_monsters: u64) -> u64 {
    (encounter_multiplier(num_monsters) * 2.0) as u64
}
