//! Wellness comparison radar.
//!
//! The chart is an owned handle: `render_comparison` takes the previous chart
//! for a mount point, tears it down, and returns the replacement. A
//! [`MountPoint`] counts the charts currently alive on it, so a leaked or
//! duplicated instance is observable.

use crate::rating::{RatingKind, WellnessRatings};
use serde::Serialize;
use std::f64::consts::PI;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

pub const DATASET_LABEL: &str = "Your Wellness Metrics";
pub const FILL_COLOR: &str = "rgba(99, 102, 241, 0.2)";
pub const BORDER_COLOR: &str = "rgba(99, 102, 241, 1)";
pub const GRID_COLOR: &str = "rgba(209, 213, 219, 0.5)";

/// Display order of the axes. Differs from the slider order on purpose.
pub const AXIS_ORDER: [RatingKind; 3] = [RatingKind::SleepQuality, RatingKind::EnergyLevel, RatingKind::Mood];

/// Fixed radial scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl RadarScale {
    pub const WELLNESS: RadarScale = RadarScale { min: 0.0, max: 10.0, step: 2.0 };

    /// Tick values from `min + step` up to `max`, e.g. 2, 4, 6, 8, 10.
    pub fn ticks(&self) -> Vec<f64> {
        let mut ticks = Vec::new();
        let mut t = self.min + self.step;
        while t <= self.max + f64::EPSILON {
            ticks.push(t);
            t += self.step;
        }
        ticks
    }

    /// Fraction of the radius for a value, clamped to the scale.
    pub fn fraction(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub kind: RatingKind,
    pub label: &'static str,
    pub value: u8,
    pub point_color: &'static str,
}

impl RadarAxis {
    pub fn tooltip(&self) -> String {
        format!("{}: {}/10", DATASET_LABEL, self.value)
    }
}

fn point_color(kind: RatingKind) -> &'static str {
    match kind {
        RatingKind::SleepQuality => "rgba(99, 102, 241, 1)",
        RatingKind::EnergyLevel => "rgba(16, 185, 129, 1)",
        RatingKind::Mood => "rgba(234, 179, 8, 1)",
    }
}

/// A surface a chart can be bound to. Absent mount points skip rendering.
#[derive(Debug, Clone)]
pub struct MountPoint {
    id: String,
    live: Arc<AtomicUsize>,
    created: Arc<AtomicU64>,
}

impl MountPoint {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            live: Arc::new(AtomicUsize::new(0)),
            created: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Charts currently bound here.
    pub fn live_instances(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Charts ever created here.
    pub fn created_instances(&self) -> u64 {
        self.created.load(Ordering::SeqCst)
    }
}

/// A live comparison chart bound to a mount point.
#[derive(Debug)]
pub struct RadarChart {
    instance: u64,
    mount_id: String,
    axes: Vec<RadarAxis>,
    scale: RadarScale,
    live: Arc<AtomicUsize>,
}

impl RadarChart {
    fn create(mount: &MountPoint, ratings: &WellnessRatings) -> Self {
        let instance = mount.created.fetch_add(1, Ordering::SeqCst) + 1;
        mount.live.fetch_add(1, Ordering::SeqCst);
        let axes = AXIS_ORDER
            .iter()
            .map(|&kind| RadarAxis {
                kind,
                label: kind.comparison_label(),
                value: ratings.get(kind).value(),
                point_color: point_color(kind),
            })
            .collect();
        Self {
            instance,
            mount_id: mount.id.clone(),
            axes,
            scale: RadarScale::WELLNESS,
            live: Arc::clone(&mount.live),
        }
    }

    pub fn instance(&self) -> u64 {
        self.instance
    }

    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    pub fn axes(&self) -> &[RadarAxis] {
        &self.axes
    }

    pub fn scale(&self) -> RadarScale {
        self.scale
    }

    /// Unit-circle direction of axis `index`, starting at twelve o'clock and going clockwise.
    /// `y` grows downward (screen coordinates).
    pub fn axis_direction(&self, index: usize) -> (f64, f64) {
        let n = self.axes.len().max(1) as f64;
        let angle = -PI / 2.0 + 2.0 * PI * index as f64 / n;
        (angle.cos(), angle.sin())
    }

    /// Polygon vertices for the dataset, as `(x, y)` fractions of the radius from the center.
    pub fn polygon(&self) -> Vec<(f64, f64)> {
        self.axes
            .iter()
            .enumerate()
            .map(|(i, axis)| {
                let (dx, dy) = self.axis_direction(i);
                let r = self.scale.fraction(f64::from(axis.value));
                (dx * r, dy * r)
            })
            .collect()
    }

    /// Explicit teardown; unbinds the chart from its mount point.
    pub fn destroy(self) {
        tracing::debug!(mount = %self.mount_id, instance = self.instance, "comparison chart destroyed");
    }
}

impl Drop for RadarChart {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Renders the comparison chart at `mount`, replacing `previous`.
///
/// When the mount point is absent nothing is rendered and `previous` is handed back untouched.
pub fn render_comparison(
    mount: Option<&MountPoint>,
    previous: Option<RadarChart>,
    ratings: &WellnessRatings,
) -> Option<RadarChart> {
    let Some(mount) = mount else {
        tracing::debug!("comparison chart mount point absent; skipping render");
        return previous;
    };
    if let Some(old) = previous {
        old.destroy();
    }
    let chart = RadarChart::create(mount, ratings);
    tracing::debug!(mount = %mount.id(), instance = chart.instance(), "comparison chart created");
    Some(chart)
}
