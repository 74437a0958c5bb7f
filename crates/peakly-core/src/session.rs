//! Display-mode state machine: Editing → Analyzing → Showing → Editing.
//!
//! The only timed transition is Analyzing → Showing, which fires on the first
//! [`Session::poll`] at or after the deadline. Time is passed in by the caller.

use crate::rating::{Rating, RatingKind, WellnessRatings};
use crate::scoring::{EnergyMessage, EnergyScore};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Fixed simulated analysis time.
pub const ANALYSIS_DELAY: Duration = Duration::from_millis(3000);
/// Longest configurable delay; larger values are clamped so the deadline stays representable.
pub const MAX_ANALYSIS_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Score and message computed when analysis completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub ratings: WellnessRatings,
    pub score: EnergyScore,
    pub message: EnergyMessage,
}

impl AnalysisResult {
    pub fn from_ratings(ratings: WellnessRatings) -> Self {
        let score = EnergyScore::from_ratings(&ratings);
        Self { ratings, score, message: score.message() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editing,
    Analyzing { ready_at: Instant },
    Showing(AnalysisResult),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Editing => "editing",
            Mode::Analyzing { .. } => "analyzing",
            Mode::Showing(_) => "showing",
        }
    }
}

/// Outcome of the "Optimize My Energy" trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Started { ready_at: Instant },
    /// Trigger arrived in a mode that does not accept it.
    Ignored { mode: &'static str },
}

#[derive(Debug, Clone)]
pub struct Session {
    ratings: WellnessRatings,
    mode: Mode,
    delay: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(WellnessRatings::default())
    }
}

impl Session {
    pub fn new(ratings: WellnessRatings) -> Self {
        Self::with_delay(ratings, ANALYSIS_DELAY)
    }

    pub fn with_delay(ratings: WellnessRatings, delay: Duration) -> Self {
        if delay > MAX_ANALYSIS_DELAY {
            tracing::warn!(delay_ms = delay.as_millis() as u64, "analysis delay clamped to one day");
        }
        Self { ratings, mode: Mode::Editing, delay: delay.min(MAX_ANALYSIS_DELAY) }
    }

    pub fn ratings(&self) -> &WellnessRatings {
        &self.ratings
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn input_visible(&self) -> bool {
        matches!(self.mode, Mode::Editing)
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.mode, Mode::Analyzing { .. })
    }

    pub fn results_visible(&self) -> bool {
        matches!(self.mode, Mode::Showing(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.mode {
            Mode::Showing(result) => Some(result),
            _ => None,
        }
    }

    /// Moves a slider. Accepted in every mode; while analyzing, the new value is
    /// what gets scored. A change while results are showing makes them stale, so
    /// the session drops back to editing.
    pub fn set_rating(&mut self, kind: RatingKind, rating: Rating) {
        self.ratings.set(kind, rating);
        if self.results_visible() {
            tracing::debug!(rating = ?kind, "rating changed while showing results; returning to editing");
            self.mode = Mode::Editing;
        }
    }

    /// "Optimize My Energy". Only starts from editing; ignored while analyzing so the deadline never moves.
    pub fn optimize(&mut self, now: Instant) -> Trigger {
        match self.mode {
            Mode::Editing => {
                let ready_at = now.checked_add(self.delay).unwrap_or(now);
                self.mode = Mode::Analyzing { ready_at };
                tracing::debug!(delay_ms = self.delay.as_millis() as u64, "analysis started");
                Trigger::Started { ready_at }
            }
            other => {
                let mode = other.name();
                tracing::debug!(mode, "optimize trigger ignored");
                Trigger::Ignored { mode }
            }
        }
    }

    /// Fires the timed transition once the deadline has passed. Returns the new result exactly once.
    pub fn poll(&mut self, now: Instant) -> Option<AnalysisResult> {
        match self.mode {
            Mode::Analyzing { ready_at } if now >= ready_at => {
                let result = AnalysisResult::from_ratings(self.ratings);
                tracing::debug!(score = result.score.value(), "analysis complete");
                self.mode = Mode::Showing(result);
                Some(result)
            }
            _ => None,
        }
    }

    /// Time left before results show, if analyzing.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.mode {
            Mode::Analyzing { ready_at } => Some(ready_at.saturating_duration_since(now)),
            _ => None,
        }
    }

    /// "Update My Status": discards the result and keeps the ratings.
    pub fn update_status(&mut self) -> bool {
        if self.results_visible() {
            self.mode = Mode::Editing;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(s: i64, m: i64, e: i64) -> WellnessRatings {
        WellnessRatings::try_from_values(s, m, e).unwrap()
    }

    #[test]
    fn starts_editing_with_defaults() {
        let session = Session::default();
        assert!(session.input_visible());
        assert!(!session.is_analyzing());
        assert!(!session.results_visible());
        assert_eq!(session.ratings().sum(), 21);
        assert_eq!(session.delay(), Duration::from_millis(3000));
    }

    #[test]
    fn optimize_then_exact_delay_shows_results() {
        let t0 = Instant::now();
        let mut session = Session::new(ratings(8, 6, 9));
        assert_eq!(session.optimize(t0), Trigger::Started { ready_at: t0 + ANALYSIS_DELAY });
        assert!(session.is_analyzing());
        assert!(!session.input_visible());
        assert!(!session.results_visible());

        assert!(session.poll(t0 + Duration::from_millis(2999)).is_none());
        assert!(session.is_analyzing());

        let result = session.poll(t0 + ANALYSIS_DELAY).unwrap();
        assert_eq!(result.score.value(), 77);
        assert_eq!(result.message, EnergyMessage::Excellent);
        assert!(session.results_visible());
        assert!(!session.is_analyzing());
        assert!(session.poll(t0 + Duration::from_secs(10)).is_none());
    }

    #[test]
    fn retrigger_while_analyzing_is_ignored() {
        let t0 = Instant::now();
        let mut session = Session::new(ratings(5, 5, 5));
        session.optimize(t0);
        let again = session.optimize(t0 + Duration::from_millis(1500));
        assert_eq!(again, Trigger::Ignored { mode: "analyzing" });
        assert_eq!(session.remaining(t0), Some(ANALYSIS_DELAY));
        assert!(session.poll(t0 + ANALYSIS_DELAY).is_some());
    }

    #[test]
    fn ratings_changed_while_analyzing_are_scored() {
        let t0 = Instant::now();
        let mut session = Session::new(ratings(1, 1, 1));
        session.optimize(t0);
        session.set_rating(RatingKind::SleepQuality, Rating::MAX);
        session.set_rating(RatingKind::Mood, Rating::MAX);
        session.set_rating(RatingKind::EnergyLevel, Rating::MAX);
        assert!(session.is_analyzing());
        let result = session.poll(t0 + ANALYSIS_DELAY).unwrap();
        assert_eq!(result.score.value(), 100);
    }

    #[test]
    fn update_status_keeps_ratings() {
        let t0 = Instant::now();
        let mut session = Session::new(ratings(3, 9, 6));
        session.optimize(t0);
        session.poll(t0 + ANALYSIS_DELAY);
        assert!(session.update_status());
        assert!(session.input_visible());
        assert!(session.result().is_none());
        assert_eq!(*session.ratings(), ratings(3, 9, 6));
        assert!(!session.update_status());
    }

    #[test]
    fn optimize_ignored_while_showing() {
        let t0 = Instant::now();
        let mut session = Session::new(ratings(3, 9, 6));
        session.optimize(t0);
        session.poll(t0 + ANALYSIS_DELAY);
        assert_eq!(session.optimize(t0 + ANALYSIS_DELAY), Trigger::Ignored { mode: "showing" });
    }

    #[test]
    fn huge_delay_is_clamped_instead_of_overflowing() {
        let t0 = Instant::now();
        let mut session = Session::with_delay(ratings(5, 5, 5), Duration::from_millis(u64::MAX));
        assert_eq!(session.delay(), MAX_ANALYSIS_DELAY);
        assert_eq!(session.optimize(t0), Trigger::Started { ready_at: t0 + MAX_ANALYSIS_DELAY });
        assert!(session.poll(t0 + ANALYSIS_DELAY).is_none());
    }

    #[test]
    fn rating_change_while_showing_hides_stale_results() {
        let t0 = Instant::now();
        let mut session = Session::new(ratings(3, 9, 6));
        session.optimize(t0);
        session.poll(t0 + ANALYSIS_DELAY);
        session.set_rating(RatingKind::Mood, Rating::MIN);
        assert!(session.input_visible());
        assert!(session.result().is_none());
    }
}
