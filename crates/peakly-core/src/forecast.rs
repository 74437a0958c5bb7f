//! 24-hour energy curve.
//!
//! A sine wave over the day (trough at midnight, crest at noon) shifted by the
//! personal modifier and jittered per hour. The randomness is for display only;
//! callers pass the generator so tests can seed it.

use crate::rating::WellnessRatings;
use rand::Rng;
use serde::Serialize;
use std::f64::consts::PI;

pub const HOURS_PER_DAY: u8 = 24;
pub const MIN_ENERGY: f64 = 10.0;
pub const MAX_ENERGY: f64 = 100.0;
/// Half-width of the per-hour jitter; values are drawn from `[-JITTER, JITTER)`.
pub const JITTER: f64 = 10.0;

/// Color tier of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyTier {
    Low,
    Moderate,
    High,
    Peak,
}

impl EnergyTier {
    /// Descending strict thresholds: >80 peak, >60 high, >40 moderate, else low.
    pub fn for_value(value: f64) -> Self {
        if value > 80.0 {
            EnergyTier::Peak
        } else if value > 60.0 {
            EnergyTier::High
        } else if value > 40.0 {
            EnergyTier::Moderate
        } else {
            EnergyTier::Low
        }
    }

    pub fn color_name(self) -> &'static str {
        match self {
            EnergyTier::Peak => "green",
            EnergyTier::High => "yellow",
            EnergyTier::Moderate => "orange",
            EnergyTier::Low => "red",
        }
    }

    /// Bottom and top of the bar gradient.
    pub fn gradient(self) -> (&'static str, &'static str) {
        match self {
            EnergyTier::Peak => ("#4ade80", "#86efac"),
            EnergyTier::High => ("#facc15", "#fde047"),
            EnergyTier::Moderate => ("#fb923c", "#fdba74"),
            EnergyTier::Low => ("#f87171", "#fca5a5"),
        }
    }
}

/// One renderable bar of the hourly curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyBar {
    pub hour: u8,
    /// Height as a percentage, always in `MIN_ENERGY..=MAX_ENERGY`.
    pub value: f64,
    pub tier: EnergyTier,
    /// e.g. `"14:00"`.
    pub label: String,
}

impl HourlyBar {
    pub fn height_percent(&self) -> f64 {
        self.value
    }
}

/// Circadian base level for an hour, before personalization.
pub fn base_energy(hour: u8) -> f64 {
    ((f64::from(hour) - 6.0) * PI / 12.0).sin() * 40.0 + 50.0
}

/// Value for a single hour given an already-drawn jitter.
pub fn hourly_value(hour: u8, ratings: &WellnessRatings, jitter: f64) -> f64 {
    (base_energy(hour) + ratings.personal_modifier() + jitter).clamp(MIN_ENERGY, MAX_ENERGY)
}

/// Generates the 24 bars, drawing one jitter per hour from `rng`.
pub fn hourly_curve<R: Rng + ?Sized>(ratings: &WellnessRatings, rng: &mut R) -> Vec<HourlyBar> {
    (0..HOURS_PER_DAY)
        .map(|hour| {
            let jitter = rng.gen::<f64>() * (2.0 * JITTER) - JITTER;
            let value = hourly_value(hour, ratings, jitter);
            HourlyBar {
                hour,
                value,
                tier: EnergyTier::for_value(value),
                label: format!("{}:00", hour),
            }
        })
        .collect()
}
