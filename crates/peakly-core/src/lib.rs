//! peakly-core: wellness ratings, energy score, display-mode session, and the
//! models behind the hourly curve and the comparison radar.
//!
//! Renderers (the gateway page and the terminal UI) consume these types; no
//! rendering happens here.

mod calendar;
mod config;
mod error;
mod metadata;
mod rating;
mod recommendations;
mod scoring;
mod session;
pub mod forecast;
pub mod radar;

pub use calendar::{long_date, today_label};
pub use config::PeaklyConfig;
pub use error::{PeaklyError, Result};
pub use forecast::{hourly_curve, EnergyTier, HourlyBar};
pub use metadata::{html_escape, PageMetadata};
pub use radar::{render_comparison, MountPoint, RadarAxis, RadarChart, RadarScale};
pub use rating::{Rating, RatingKind, WellnessRatings};
pub use recommendations::{recommendations, Recommendation, RecommendationIcon, RECOMMENDATIONS};
pub use scoring::{energy_score, EnergyMessage, EnergyScore};
pub use session::{AnalysisResult, Mode, Session, Trigger, ANALYSIS_DELAY, MAX_ANALYSIS_DELAY};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Name of the element the comparison chart binds to.
pub const COMPARISON_MOUNT_ID: &str = "comparison-chart";
/// Name of the element the hourly bars render into.
pub const ENERGY_CHART_ID: &str = "energy-chart";

/// RNG for the hourly curve: seeded when a seed is configured, otherwise from OS entropy.
pub fn curve_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
