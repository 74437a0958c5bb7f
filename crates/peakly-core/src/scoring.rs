//! Energy score and the qualitative message shown with it.

use crate::rating::WellnessRatings;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores above this get the top-tier message.
pub const EXCELLENT_THRESHOLD: u8 = 70;
/// Scores above this (and not above `EXCELLENT_THRESHOLD`) get the middle-tier message.
pub const GOOD_THRESHOLD: u8 = 50;

/// Averaged percentage score in 10..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyScore(u8);

impl EnergyScore {
    /// `round(((sleep + mood + energy) / 3) * 10)`.
    pub fn from_ratings(ratings: &WellnessRatings) -> Self {
        // Sum/3*10 never lands on .5, so rounding mode does not matter.
        let raw = ratings.personal_modifier().round();
        EnergyScore(raw as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn message(self) -> EnergyMessage {
        EnergyMessage::for_score(self)
    }
}

impl fmt::Display for EnergyScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyMessage {
    Excellent,
    Good,
    Low,
}

impl EnergyMessage {
    /// Strict greater-than on both thresholds: 70 and 50 fall to the lower tier.
    pub fn for_score(score: EnergyScore) -> Self {
        if score.0 > EXCELLENT_THRESHOLD {
            EnergyMessage::Excellent
        } else if score.0 > GOOD_THRESHOLD {
            EnergyMessage::Good
        } else {
            EnergyMessage::Low
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            EnergyMessage::Excellent => "Excellent! You're primed for a great day!",
            EnergyMessage::Good => "Good energy levels - optimize with our recommendations",
            EnergyMessage::Low => "Low energy detected - follow our recovery plan",
        }
    }
}

impl fmt::Display for EnergyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Convenience wrapper over [`EnergyScore::from_ratings`].
pub fn energy_score(ratings: &WellnessRatings) -> EnergyScore {
    EnergyScore::from_ratings(ratings)
}
