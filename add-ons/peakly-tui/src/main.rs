//! peakly-tui: keyboard-driven Peakly in the terminal.
//! Logs go to `logs/peakly-tui.log`; the terminal belongs to the UI.

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use peakly_core::PeaklyConfig;
use peakly_tui::{ui, App};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TICK_RATE: Duration = Duration::from_millis(100);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let file_appender = tracing_appender::rolling::never("logs", "peakly-tui.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    let config = PeaklyConfig::load()?;
    let mut app = App::new(&config);
    tracing::info!(
        delay_ms = config.analysis_delay_ms,
        seeded = config.curve_seed.is_some(),
        "peakly-tui started"
    );

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "terminal loop failed");
    }
    tracing::info!("peakly-tui stopped");
    Ok(res?)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, app, Instant::now()))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, Instant::now());
                }
            }
        }
        app.on_tick(Instant::now());
    }
    Ok(())
}
