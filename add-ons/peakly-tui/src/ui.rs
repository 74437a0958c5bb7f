//! Drawing. One body per display mode; header and key help are shared.

use crate::app::App;
use peakly_core::radar::DATASET_LABEL;
use peakly_core::{
    recommendations, AnalysisResult, EnergyMessage, EnergyTier, HourlyBar, Mode, RadarChart, RatingKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Bar, BarChart, BarGroup, Block, Borders, Gauge, List, ListItem, Paragraph,
    },
    Frame,
};
use std::time::Instant;

const ACCENT: Color = Color::Rgb(99, 102, 241);
const GRID: Color = Color::Rgb(209, 213, 219);

pub fn draw(f: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(1)])
        .split(f.area());

    render_header(f, chunks[0], app);
    match app.session().mode() {
        Mode::Editing => render_input(f, chunks[1], app),
        Mode::Analyzing { .. } => render_analyzing(f, chunks[1], app, now),
        Mode::Showing(result) => render_results(f, chunks[1], app, result),
    }
    render_help(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::BOTTOM);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    let brand = Paragraph::new(Line::from(vec![
        Span::styled(" ⚡ ", Style::default().fg(Color::White).bg(ACCENT)),
        Span::raw(" "),
        Span::styled(app.app_name().to_string(), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
    ]));
    f.render_widget(brand, halves[0]);
    let date = Paragraph::new(app.date_label().to_string())
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Right);
    f.render_widget(date, halves[1]);
}

fn render_help(f: &mut Frame, area: Rect, app: &App) {
    let keys = match app.session().mode() {
        Mode::Editing => "↑/↓ select  ←/→ adjust  Enter optimize  q quit",
        Mode::Analyzing { .. } => "analyzing...  q quit",
        Mode::Showing(_) => "u update my status  q quit",
    };
    f.render_widget(Paragraph::new(keys).style(Style::default().fg(Color::DarkGray)), area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let intro = Paragraph::new(vec![
        Line::from(Span::styled("How are you feeling today?", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("Tell us about your current state and we'll optimize your energy throughout the day"),
    ])
    .alignment(Alignment::Center);
    f.render_widget(intro, chunks[0]);

    for (i, kind) in RatingKind::ALL.into_iter().enumerate() {
        render_slider(f, chunks[i + 1], app, kind);
    }

    let button = Paragraph::new(Line::from(Span::styled(
        " [Enter] Optimize My Energy ",
        Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(button, chunks[4]);
}

fn render_slider(f: &mut Frame, area: Rect, app: &App, kind: RatingKind) {
    let rating = app.session().ratings().get(kind);
    let focused = app.focus() == kind;
    let (title, border) = if focused {
        (format!(" > {} ", kind.title()), Style::default().fg(Color::Yellow))
    } else {
        (format!(" {} ", kind.title()), Style::default().fg(Color::Gray))
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title).border_style(border))
        .gauge_style(Style::default().fg(slider_color(rating.value())))
        .ratio(f64::from(rating.value()) / 10.0)
        .label(rating.to_string());
    f.render_widget(gauge, area);
}

/// Red at "Poor", amber in the middle, green at "Amazing".
fn slider_color(value: u8) -> Color {
    match value {
        0..=3 => Color::Red,
        4..=7 => Color::Yellow,
        _ => Color::Green,
    }
}

fn render_analyzing(f: &mut Frame, area: Rect, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(2), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "Analyzing your energy patterns...",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let delay = app.session().delay().as_secs_f64();
    let remaining = app.remaining(now).map(|d| d.as_secs_f64()).unwrap_or(0.0);
    let ratio = if delay > 0.0 { (1.0 - remaining / delay).clamp(0.0, 1.0) } else { 1.0 };
    let progress_area = centered(chunks[2], 40);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(ACCENT))
        .ratio(ratio)
        .label(format!("{:.1}s", remaining));
    f.render_widget(gauge, progress_area);
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect { x: area.x + (area.width - width) / 2, width, ..area }
}

fn render_results(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(14), Constraint::Length(4), Constraint::Min(6)])
        .split(area);
    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[0]);

    render_energy_curve(f, charts[0], app.curve());
    match app.radar() {
        Some(chart) => render_comparison(f, charts[1], chart),
        None => f.render_widget(Block::default().borders(Borders::ALL).title(" Wellness Comparison "), charts[1]),
    }
    render_score(f, chunks[1], result);
    render_recommendations(f, chunks[2]);
}

fn tier_color(tier: EnergyTier) -> Color {
    let (bottom, _) = tier.gradient();
    bottom.parse().unwrap_or(Color::White)
}

fn render_energy_curve(f: &mut Frame, area: Rect, curve: &[HourlyBar]) {
    let bars: Vec<Bar> = curve
        .iter()
        .map(|bar| {
            Bar::default()
                .value(bar.height_percent().round() as u64)
                .label(Line::from(bar.hour.to_string()))
                .style(Style::default().fg(tier_color(bar.tier)))
                .text_value(String::new())
        })
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 24-Hour Energy Curve ")
                .title_bottom(Line::from(" Today's Prediction ").right_aligned()),
        )
        .bar_width(2)
        .bar_gap(1)
        .max(100)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

fn axis_color(kind: RatingKind) -> Color {
    match kind {
        RatingKind::SleepQuality => Color::Rgb(99, 102, 241),
        RatingKind::EnergyLevel => Color::Rgb(16, 185, 129),
        RatingKind::Mood => Color::Rgb(234, 179, 8),
    }
}

fn render_comparison(f: &mut Frame, area: Rect, chart: &RadarChart) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Wellness Comparison ")
        .title_bottom(Line::from(format!(" {} ", DATASET_LABEL)).right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(inner);

    // Canvas y grows upward; axis directions are in screen space.
    let flip = |(x, y): (f64, f64)| (x, -y);
    let axis_count = chart.axes().len();
    let scale = chart.scale();
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.4, 1.4])
        .y_bounds([-1.3, 1.3])
        .paint(|ctx| {
            for tick in scale.ticks() {
                let r = scale.fraction(tick);
                for i in 0..axis_count {
                    let (x1, y1) = flip(chart.axis_direction(i));
                    let (x2, y2) = flip(chart.axis_direction((i + 1) % axis_count));
                    ctx.draw(&CanvasLine::new(x1 * r, y1 * r, x2 * r, y2 * r, GRID));
                }
            }
            for i in 0..axis_count {
                let (x, y) = flip(chart.axis_direction(i));
                ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, GRID));
            }
            ctx.layer();

            let vertices: Vec<(f64, f64)> = chart.polygon().into_iter().map(flip).collect();
            for (i, &(x1, y1)) in vertices.iter().enumerate() {
                let (x2, y2) = vertices[(i + 1) % vertices.len()];
                ctx.draw(&CanvasLine::new(x1, y1, x2, y2, ACCENT));
            }
            for (axis, &(x, y)) in chart.axes().iter().zip(vertices.iter()) {
                ctx.draw(&Points { coords: &[(x, y)], color: axis_color(axis.kind) });
            }
            for (i, axis) in chart.axes().iter().enumerate() {
                let (x, y) = flip(chart.axis_direction(i));
                let label_x = x * 1.15 - 0.03 * axis.label.len() as f64;
                ctx.print(label_x, y * 1.15, Span::styled(axis.label, Style::default().fg(Color::Gray)));
            }
        });
    f.render_widget(canvas, parts[0]);

    let summary: Vec<Line> = chart
        .axes()
        .iter()
        .map(|axis| {
            Line::from(vec![
                Span::styled(format!("{:<14}", axis.label), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}/10", axis.value),
                    Style::default().fg(axis_color(axis.kind)).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(summary).alignment(Alignment::Center), parts[1]);
}

fn message_color(message: EnergyMessage) -> Color {
    match message {
        EnergyMessage::Excellent => Color::Green,
        EnergyMessage::Good => Color::Yellow,
        EnergyMessage::Low => Color::Red,
    }
}

fn render_score(f: &mut Frame, area: Rect, result: &AnalysisResult) {
    let score = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Energy Score  ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                result.score.to_string(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(result.message.text(), Style::default().fg(message_color(result.message)))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)));
    f.render_widget(score, area);
}

fn render_recommendations(f: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = recommendations()
        .iter()
        .map(|rec| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", rec.title), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("{:<22}", rec.time_window), Style::default().fg(Color::Gray)),
                Span::raw(rec.detail),
            ]))
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Personalized Recommendations "));
    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use peakly_core::{Session, WellnessRatings, ANALYSIS_DELAY};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn screen(app: &App, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app, now)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with(s: i64, m: i64, e: i64) -> App {
        let session = Session::new(WellnessRatings::try_from_values(s, m, e).unwrap());
        App::with_parts(session, Some(3), "Peakly".into(), "Friday, October 16, 2026".into())
    }

    #[test]
    fn editing_shows_sliders_and_header() {
        let app = app_with(7, 7, 7);
        let text = screen(&app, Instant::now());
        assert!(text.contains("Peakly"));
        assert!(text.contains("Friday, October 16, 2026"));
        assert!(text.contains("How are you feeling today?"));
        assert!(text.contains("> Sleep Quality"));
        assert!(text.contains("Current Mood"));
        assert!(text.contains("Energy Level"));
        assert_eq!(text.matches("7/10").count(), 3);
        assert!(!text.contains("Energy Score"));
    }

    #[test]
    fn analyzing_hides_sliders() {
        let mut app = app_with(7, 7, 7);
        let t0 = Instant::now();
        app.handle_key(crossterm::event::KeyCode::Enter, t0);
        let text = screen(&app, t0 + Duration::from_secs(1));
        assert!(text.contains("Analyzing your energy patterns..."));
        assert!(!text.contains("How are you feeling today?"));
        assert!(text.contains("2.0s"));
    }

    #[test]
    fn results_show_score_message_charts_and_recommendations() {
        let mut app = app_with(8, 6, 9);
        let t0 = Instant::now();
        app.handle_key(crossterm::event::KeyCode::Enter, t0);
        app.on_tick(t0 + ANALYSIS_DELAY);
        let text = screen(&app, t0 + ANALYSIS_DELAY);
        assert!(text.contains("77%"));
        assert!(text.contains("Excellent! You're primed for a great day!"));
        assert!(text.contains("24-Hour Energy Curve"));
        assert!(text.contains("Wellness Comparison"));
        assert!(text.contains("Optimal Coffee Time"));
        assert!(text.contains("Wind Down Time"));
        assert!(!text.contains("Analyzing your energy patterns..."));
    }
}
