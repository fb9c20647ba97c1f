//! # Bestiary
//!
//! Monster catalog filtering and encounter difficulty calculation for
//! tabletop role-playing games.
//!
//! ## Architecture Overview
//!
//! The crate is a computation core with no rendering, storage, or network
//! behavior of its own. A front end (the bundled CLI, a web view, ...) pushes
//! edits in and reads derived values back out:
//!
//! - **Catalog**: monster records, challenge ratings, and the lookup contract
//!   an encounter uses to resolve monster metadata
//! - **Encounter**: hero and monster groups, the XP tables, and the
//!   [`EncounterEngine`] that derives XP budgets and a difficulty rating
//! - **Snapshot**: a serializable copy of an encounter's group lists for
//!   save/restore
//!
//! ## Example
//!
//! ```
//! use bestiary::{ChallengeRating, Difficulty, EncounterEngine, HeroGroup, MonsterGroup, MonsterId};
//!
//! let mut engine = EncounterEngine::new();
//! engine.set_hero_groups(vec![HeroGroup::new(4, 1)]).unwrap();
//! engine
//!     .set_monster_groups(vec![MonsterGroup::new(
//!         MonsterId(72),
//!         "Skeleton",
//!         ChallengeRating::QUARTER,
//!         50,
//!         3,
//!     )])
//!     .unwrap();
//!
//! assert_eq!(engine.hero_xp_thresholds(), [100, 200, 300, 400]);
//! assert_eq!(engine.monster_adjusted_xp(), 300);
//! assert_eq!(engine.difficulty(), Difficulty::Deadly);
//! ```

pub mod catalog;
pub mod encounter;

pub use catalog::*;
pub use encounter::*;

/// Core error type for the Bestiary engine.
#[derive(thiserror::Error, Debug)]
pub enum BestiaryError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Group or record input violates an invariant
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Monster id is unknown to the catalog or the encounter
    #[error("Monster not found: {0}")]
    NotFound(MonsterId),
}

impl BestiaryError {
    /// Creates a validation error from any message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type used throughout the Bestiary codebase.
pub type BestiaryResult<T> = Result<T, BestiaryError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rules and presentation constants.
pub mod config {
    /// Lowest hero level with a row in the XP tier table
    pub const MIN_HERO_LEVEL: u8 = 1;

    /// Highest hero level with a row in the XP tier table
    pub const MAX_HERO_LEVEL: u8 = 20;

    /// Monster headcount at and above which the multiplier saturates
    pub const MULTIPLIER_SATURATION_COUNT: u32 = 15;

    /// Headcount of the hero group added by default
    pub const DEFAULT_PARTY_SIZE: u32 = 4;

    /// Level of the hero group added by default
    pub const DEFAULT_PARTY_LEVEL: u8 = 1;

    /// Highest challenge rating a catalog record may carry
    pub const MAX_CHALLENGE_RATING: f64 = 30.0;

    /// Default character budget for encounter summaries
    pub const DEFAULT_SUMMARY_LENGTH: usize = 50;
}
