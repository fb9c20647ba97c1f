//! # Challenge Rating
//!
//! Monster difficulty scores, including the fractional ratings below 1.

use crate::{config, BestiaryError, BestiaryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A monster's challenge rating.
///
/// Ratings run from 0 to 30. Below 1 only the fractions 1/8, 1/4 and 1/2
/// appear in published stat blocks; those display as fractions, everything
/// else as its whole part.
///
/// # Examples
///
/// ```
/// use bestiary::ChallengeRating;
///
/// let cr: ChallengeRating = "1/4".parse().unwrap();
/// assert_eq!(cr, ChallengeRating::QUARTER);
/// assert_eq!(cr.to_string(), "1/4");
/// assert_eq!(ChallengeRating::new(5.0).unwrap().to_string(), "5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "RatingRepr", into = "f64")]
pub struct ChallengeRating(f64);

impl ChallengeRating {
    pub const ZERO: Self = Self(0.0);
    pub const EIGHTH: Self = Self(0.125);
    pub const QUARTER: Self = Self(0.25);
    pub const HALF: Self = Self(0.5);
    pub const MAX: Self = Self(config::MAX_CHALLENGE_RATING);

    /// Creates a rating, rejecting negative, non-finite, or out-of-range values.
    pub fn new(value: f64) -> BestiaryResult<Self> {
        if !value.is_finite() || !(0.0..=config::MAX_CHALLENGE_RATING).contains(&value) {
            return Err(BestiaryError::validation(format!(
                "challenge rating {} is outside 0..={}",
                value,
                config::MAX_CHALLENGE_RATING
            )));
        }
        Ok(Self(value))
    }

    /// Returns the numeric rating.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ChallengeRating {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if *self == Self::EIGHTH {
            String::from("1/8")
        } else if *self == Self::QUARTER {
            String::from("1/4")
        } else if *self == Self::HALF {
            String::from("1/2")
        } else {
            (self.0.trunc() as u32).to_string()
        };
        f.pad(&text)
    }
}

impl FromStr for ChallengeRating {
    type Err = BestiaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || BestiaryError::validation(format!("invalid challenge rating {s:?}"));

        let value = match s.split_once('/') {
            Some((numerator, denominator)) => {
                let numerator: f64 = numerator.trim().parse().map_err(|_| invalid())?;
                let denominator: f64 = denominator.trim().parse().map_err(|_| invalid())?;
                if denominator == 0.0 {
                    return Err(invalid());
                }
                numerator / denominator
            }
            None => s.parse().map_err(|_| invalid())?,
        };

        Self::new(value)
    }
}

impl From<ChallengeRating> for f64 {
    fn from(rating: ChallengeRating) -> Self {
        rating.0
    }
}

impl TryFrom<f64> for ChallengeRating {
    type Error = BestiaryError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Wire forms a rating arrives in: the API sends numbers, saved encounters
/// carry display strings like `"1/4"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RatingRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<RatingRepr> for ChallengeRating {
    type Error = BestiaryError;

    fn try_from(repr: RatingRepr) -> Result<Self, Self::Error> {
        match repr {
            RatingRepr::Number(value) => Self::new(value),
            RatingRepr::Text(text) => text.parse(),
        }
    }
}
