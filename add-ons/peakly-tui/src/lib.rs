//! peakly-tui: Ratatui rendition of the Peakly page.
//!
//! `app` owns the session, the slider focus, the hourly curve and the live
//! comparison chart; `ui` draws whichever mode the session is in.

pub mod app;
pub mod ui;

pub use app::App;
