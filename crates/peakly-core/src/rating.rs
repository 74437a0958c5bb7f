//! Self-reported wellness ratings (sleep quality, mood, energy level).
//!
//! Every rating is an integer on the 1..=10 slider scale. The type enforces the
//! range so that scoring and charting never see an out-of-range value.

use crate::error::{PeaklyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One slider value, always within `Rating::MIN..=Rating::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: Rating = Rating(1);
    pub const MAX: Rating = Rating(10);
    /// Initial slider position.
    pub const DEFAULT: Rating = Rating(7);

    pub fn new(value: u8) -> Result<Self> {
        Self::try_from(i64::from(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// One step up, saturating at 10.
    pub fn increment(self) -> Self {
        Rating((self.0 + 1).min(Self::MAX.0))
    }

    /// One step down, saturating at 1.
    pub fn decrement(self) -> Self {
        Rating(self.0.saturating_sub(1).max(Self::MIN.0))
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Rating {
    type Error = PeaklyError;

    fn try_from(value: i64) -> Result<Self> {
        if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(PeaklyError::RatingOutOfRange(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> u8 {
        r.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

/// Which of the three sliders a rating belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingKind {
    SleepQuality,
    Mood,
    EnergyLevel,
}

impl RatingKind {
    /// Input order of the sliders.
    pub const ALL: [RatingKind; 3] = [RatingKind::SleepQuality, RatingKind::Mood, RatingKind::EnergyLevel];

    /// Title of the input card.
    pub fn title(self) -> &'static str {
        match self {
            RatingKind::SleepQuality => "Sleep Quality",
            RatingKind::Mood => "Current Mood",
            RatingKind::EnergyLevel => "Energy Level",
        }
    }

    /// Label used by the comparison chart and its summary row.
    pub fn comparison_label(self) -> &'static str {
        match self {
            RatingKind::SleepQuality => "Sleep Quality",
            RatingKind::Mood => "Daily Mood",
            RatingKind::EnergyLevel => "Daily Energy",
        }
    }

    /// Form / query field name.
    pub fn field_name(self) -> &'static str {
        match self {
            RatingKind::SleepQuality => "sleep_quality",
            RatingKind::Mood => "mood",
            RatingKind::EnergyLevel => "energy_level",
        }
    }

    pub fn next(self) -> Self {
        match self {
            RatingKind::SleepQuality => RatingKind::Mood,
            RatingKind::Mood => RatingKind::EnergyLevel,
            RatingKind::EnergyLevel => RatingKind::SleepQuality,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            RatingKind::SleepQuality => RatingKind::EnergyLevel,
            RatingKind::Mood => RatingKind::SleepQuality,
            RatingKind::EnergyLevel => RatingKind::Mood,
        }
    }
}

/// The three sliders of the input view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WellnessRatings {
    #[serde(default)]
    pub sleep_quality: Rating,
    #[serde(default)]
    pub mood: Rating,
    #[serde(default)]
    pub energy_level: Rating,
}

impl WellnessRatings {
    pub fn new(sleep_quality: Rating, mood: Rating, energy_level: Rating) -> Self {
        Self { sleep_quality, mood, energy_level }
    }

    /// Builds ratings from raw integers, failing on the first out-of-range value.
    pub fn try_from_values(sleep_quality: i64, mood: i64, energy_level: i64) -> Result<Self> {
        Ok(Self {
            sleep_quality: Rating::try_from(sleep_quality)?,
            mood: Rating::try_from(mood)?,
            energy_level: Rating::try_from(energy_level)?,
        })
    }

    pub fn get(&self, kind: RatingKind) -> Rating {
        match kind {
            RatingKind::SleepQuality => self.sleep_quality,
            RatingKind::Mood => self.mood,
            RatingKind::EnergyLevel => self.energy_level,
        }
    }

    pub fn set(&mut self, kind: RatingKind, rating: Rating) {
        match kind {
            RatingKind::SleepQuality => self.sleep_quality = rating,
            RatingKind::Mood => self.mood = rating,
            RatingKind::EnergyLevel => self.energy_level = rating,
        }
    }

    pub fn sum(&self) -> u32 {
        u32::from(self.sleep_quality.0) + u32::from(self.mood.0) + u32::from(self.energy_level.0)
    }

    /// Average of the three ratings times ten; shared by the score and the hourly curve.
    pub fn personal_modifier(&self) -> f64 {
        f64::from(self.sum()) / 3.0 * 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(Rating::try_from(0).is_err());
        assert!(Rating::try_from(11).is_err());
        assert!(Rating::try_from(-3).is_err());
        assert_eq!(Rating::try_from(1).unwrap(), Rating::MIN);
        assert_eq!(Rating::try_from(10).unwrap(), Rating::MAX);
        assert_eq!(Rating::default().value(), 7);
    }

    #[test]
    fn out_of_range_error_carries_value() {
        match Rating::try_from(42) {
            Err(PeaklyError::RatingOutOfRange(v)) => assert_eq!(v, 42),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn step_saturates() {
        assert_eq!(Rating::MAX.increment(), Rating::MAX);
        assert_eq!(Rating::MIN.decrement(), Rating::MIN);
        assert_eq!(Rating::new(5).unwrap().increment().value(), 6);
        assert_eq!(Rating::new(5).unwrap().decrement().value(), 4);
    }

    #[test]
    fn display_shows_out_of_ten() {
        assert_eq!(Rating::new(3).unwrap().to_string(), "3/10");
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        let ok: WellnessRatings =
            serde_json::from_str(r#"{"sleep_quality":3,"mood":9,"energy_level":6}"#).unwrap();
        assert_eq!(ok.get(RatingKind::Mood).value(), 9);
        let bad = serde_json::from_str::<WellnessRatings>(r#"{"sleep_quality":0,"mood":9,"energy_level":6}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn missing_fields_default_to_seven() {
        let r: WellnessRatings = serde_json::from_str(r#"{"mood":2}"#).unwrap();
        assert_eq!(r.sleep_quality, Rating::DEFAULT);
        assert_eq!(r.mood.value(), 2);
        assert_eq!(r.energy_level, Rating::DEFAULT);
    }

    #[test]
    fn kind_cycle_visits_all() {
        let mut k = RatingKind::SleepQuality;
        for expected in [RatingKind::Mood, RatingKind::EnergyLevel, RatingKind::SleepQuality] {
            k = k.next();
            assert_eq!(k, expected);
        }
        assert_eq!(RatingKind::SleepQuality.previous(), RatingKind::EnergyLevel);
    }

    #[test]
    fn set_and_get() {
        let mut r = WellnessRatings::default();
        r.set(RatingKind::EnergyLevel, Rating::new(2).unwrap());
        assert_eq!(r.get(RatingKind::EnergyLevel).value(), 2);
        assert_eq!(r.sum(), 7 + 7 + 2);
    }
}
