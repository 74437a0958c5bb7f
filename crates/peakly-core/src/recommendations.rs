//! Static recommendation cards shown under the energy score.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationIcon {
    Coffee,
    TrendingUp,
    Calendar,
    Moon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub detail: &'static str,
    pub time_window: &'static str,
    pub icon: RecommendationIcon,
    /// Accent color of the icon tile.
    pub accent: &'static str,
}

pub const RECOMMENDATIONS: [Recommendation; 4] = [
    Recommendation {
        title: "Optimal Coffee Time",
        detail: "Have your first coffee between 9:30-11:30 AM for maximum effectiveness",
        time_window: "9:30 AM",
        icon: RecommendationIcon::Coffee,
        accent: "#f59e0b",
    },
    Recommendation {
        title: "Peak Performance Window",
        detail: "Schedule important tasks during your energy peak hours",
        time_window: "2:00 PM - 4:00 PM",
        icon: RecommendationIcon::TrendingUp,
        accent: "#22c55e",
    },
    Recommendation {
        title: "Meeting Optimization",
        detail: "Best time for challenging meetings and decisions",
        time_window: "10:00 AM - 12:00 PM",
        icon: RecommendationIcon::Calendar,
        accent: "#3b82f6",
    },
    Recommendation {
        title: "Wind Down Time",
        detail: "Start preparing for sleep to maintain tomorrow's energy",
        time_window: "9:00 PM",
        icon: RecommendationIcon::Moon,
        accent: "#a855f7",
    },
];

pub fn recommendations() -> &'static [Recommendation] {
    &RECOMMENDATIONS
}
