//! # Encounter Module
//!
//! Encounter building and difficulty rating.
//!
//! An encounter is a hero roster and a monster roster, each a list of
//! groups of identical combatants:
//! - The heroes' levels set XP budgets for each difficulty tier
//! - The monsters' XP, scaled by how many of them there are, is measured
//!   against those budgets
//! - [`EncounterEngine`] keeps both rosters and the resulting rating in step

mod lenient;

pub mod difficulty;
pub mod engine;
pub mod groups;
pub mod snapshot;
pub mod tables;

pub use difficulty::*;
pub use engine::*;
pub use groups::*;
pub use snapshot::*;
pub use tables::*;
