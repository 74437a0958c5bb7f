//! Peakly configuration.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | app_name | Peakly | Brand shown in the page header. |
//! | host / port | 127.0.0.1 / 8080 | Gateway bind address. |
//! | site_url | https://peakly.com | Canonical URL used by the page metadata. |
//! | compress | true | Gzip gateway responses. |
//! | scroll_restoration | true | `history.scrollRestoration` = auto (true) or manual (false). |
//! | optimize_css | false | Inline the stylesheet into the document head instead of linking it. |
//! | analysis_delay_ms | 3000 | Fixed "analyzing" delay. |
//! | curve_seed | unset | Seed for the hourly-curve RNG; unset means fresh randomness. |

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "config/peakly";

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeaklyConfig {
    pub app_name: String,
    pub host: String,
    pub port: u16,
    pub site_url: String,
    #[serde(default = "default_true")]
    pub compress: bool,
    #[serde(default = "default_true")]
    pub scroll_restoration: bool,
    /// Experimental stylesheet optimization. Off unless explicitly enabled.
    #[serde(default)]
    pub optimize_css: bool,
    pub analysis_delay_ms: u64,
    #[serde(default)]
    pub curve_seed: Option<u64>,
}

impl Default for PeaklyConfig {
    fn default() -> Self {
        Self {
            app_name: "Peakly".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            site_url: "https://peakly.com".to_string(),
            compress: true,
            scroll_restoration: true,
            optimize_css: false,
            analysis_delay_ms: 3000,
            curve_seed: None,
        }
    }
}

impl PeaklyConfig {
    /// Load config from file and environment. Precedence: env `PEAKLY__*` > file
    /// (`PEAKLY_CONFIG` path, else `config/peakly.toml`) > defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var("PEAKLY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Same as [`PeaklyConfig::load`] with an explicit file path. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("site_url", defaults.site_url)?
            .set_default("compress", defaults.compress)?
            .set_default("scroll_restoration", defaults.scroll_restoration)?
            .set_default("optimize_css", defaults.optimize_css)?
            .set_default("analysis_delay_ms", defaults.analysis_delay_ms as i64)?;

        let builder = if path.exists() || path.with_extension("toml").exists() {
            builder.add_source(config::File::from(path).required(false))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("PEAKLY").prefix_separator("__").separator("__"))
            .build()?;

        Ok(built.try_deserialize()?)
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Value for `history.scrollRestoration`.
    pub fn scroll_restoration_mode(&self) -> &'static str {
        if self.scroll_restoration {
            "auto"
        } else {
            "manual"
        }
    }
}
