//! Terminal app state and key handling.

use crossterm::event::KeyCode;
use peakly_core::{
    curve_rng, hourly_curve, render_comparison, today_label, AnalysisResult, HourlyBar, MountPoint, PeaklyConfig,
    RadarChart, RatingKind, Session, Trigger, WellnessRatings, COMPARISON_MOUNT_ID,
};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

pub struct App {
    session: Session,
    focus: RatingKind,
    mount: MountPoint,
    radar: Option<RadarChart>,
    curve: Vec<HourlyBar>,
    rng: ChaCha8Rng,
    app_name: String,
    date_label: String,
    should_quit: bool,
}

impl App {
    pub fn new(config: &PeaklyConfig) -> Self {
        Self::with_parts(
            Session::with_delay(WellnessRatings::default(), config.analysis_delay()),
            config.curve_seed,
            config.app_name.clone(),
            today_label(),
        )
    }

    pub fn with_parts(session: Session, curve_seed: Option<u64>, app_name: String, date_label: String) -> Self {
        Self {
            session,
            focus: RatingKind::SleepQuality,
            mount: MountPoint::new(COMPARISON_MOUNT_ID),
            radar: None,
            curve: Vec::new(),
            rng: curve_rng(curve_seed),
            app_name,
            date_label,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn focus(&self) -> RatingKind {
        self.focus
    }

    pub fn mount(&self) -> &MountPoint {
        &self.mount
    }

    pub fn radar(&self) -> Option<&RadarChart> {
        self.radar.as_ref()
    }

    pub fn curve(&self) -> &[HourlyBar] {
        &self.curve
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.session.remaining(now)
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => {
                if let Trigger::Started { .. } = self.session.optimize(now) {
                    let r = self.session.ratings();
                    tracing::info!(
                        sleep_quality = r.sleep_quality.value(),
                        mood = r.mood.value(),
                        energy_level = r.energy_level.value(),
                        "analysis started"
                    );
                }
            }
            KeyCode::Char('u') | KeyCode::Char('U') => {
                if self.session.update_status() {
                    tracing::info!("back to editing");
                }
            }
            // The sliders are only on screen while editing.
            _ if !self.session.input_visible() => {}
            KeyCode::Up | KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Down | KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Left | KeyCode::Char('-') => self.adjust(false),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => self.adjust(true),
            _ => {}
        }
    }

    fn adjust(&mut self, up: bool) {
        let current = self.session.ratings().get(self.focus);
        let next = if up { current.increment() } else { current.decrement() };
        if next != current {
            self.session.set_rating(self.focus, next);
        }
    }

    /// Fires the timed transition; on completion both charts are rebuilt.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(result) = self.session.poll(now) {
            self.show(&result);
        }
    }

    fn show(&mut self, result: &AnalysisResult) {
        self.curve = hourly_curve(&result.ratings, &mut self.rng);
        self.radar = render_comparison(Some(&self.mount), self.radar.take(), &result.ratings);
        tracing::info!(
            score = result.score.value(),
            message = ?result.message,
            live_charts = self.mount.live_instances(),
            "results ready"
        );
    }
}
