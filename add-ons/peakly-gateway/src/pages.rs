//! Page rendering for the three display modes. Exactly one section is rendered per response.

use crate::{charts, AppState};
use peakly_core::{
    html_escape, recommendations, AnalysisResult, HourlyBar, RadarChart, Rating, RatingKind, RecommendationIcon,
    WellnessRatings,
};

pub const STYLESHEET: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/peakly.css"));

/// Rewrites the server-rendered date in the viewer's own time zone.
const LOCAL_DATE_SCRIPT: &str = "<script>document.currentScript.previousElementSibling.textContent = new Date().toLocaleDateString('en-US', {weekday: 'long', year: 'numeric', month: 'long', day: 'numeric'});</script>";

/// `sleep_quality=8&mood=6&energy_level=9`, unescaped.
pub fn ratings_query(ratings: &WellnessRatings) -> String {
    RatingKind::ALL
        .iter()
        .map(|&kind| format!("{}={}", kind.field_name(), ratings.get(kind).value()))
        .collect::<Vec<_>>()
        .join("&")
}

fn document(state: &AppState, date_label: &str, extra_head: &str, body: &str) -> String {
    let style = if state.config.optimize_css {
        format!("<style>{}</style>", STYLESHEET)
    } else {
        r#"<link rel="stylesheet" href="/static/peakly.css">"#.to_string()
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
{head}{style}
<script>history.scrollRestoration = "{scroll}";</script>
{extra_head}</head>
<body>
<header class="topbar"><div class="inner">
  <div class="brand"><span class="logo">&#9889;</span><h1>{app_name}</h1></div>
  <span class="date">{date}</span>{local_date}
</div></header>
<main class="content">
{body}
</main>
</body>
</html>"#,
        head = state.metadata.render_head(),
        style = style,
        scroll = state.config.scroll_restoration_mode(),
        extra_head = extra_head,
        app_name = html_escape(&state.config.app_name),
        date = html_escape(date_label),
        local_date = LOCAL_DATE_SCRIPT,
        body = body,
    )
}

fn slider(kind: RatingKind, rating: Rating) -> String {
    format!(
        r#"<div class="card">
  <h3><label for="{field}">{title}</label></h3>
  <div class="scale"><span>Poor</span><span>Amazing</span></div>
  <input type="range" id="{field}" name="{field}" min="{min}" max="{max}" step="1" value="{value}" oninput="this.nextElementSibling.value = this.value + '/10'">
  <output for="{field}" class="value">{value}/10</output>
</div>"#,
        field = kind.field_name(),
        title = kind.title(),
        min = Rating::MIN.value(),
        max = Rating::MAX.value(),
        value = rating.value(),
    )
}

pub fn input_page(state: &AppState, ratings: &WellnessRatings, date_label: &str) -> String {
    let sliders: String = RatingKind::ALL.iter().map(|&kind| slider(kind, ratings.get(kind))).collect();
    let body = format!(
        r#"<section id="input-section">
<div class="intro">
  <h2>How are you feeling today?</h2>
  <p>Tell us about your current state and we&#39;ll optimize your energy throughout the day</p>
</div>
<form method="post" action="/optimize">
<div class="grid-3">
{sliders}
</div>
<div class="actions"><button type="submit" class="btn-primary">&#9889; Optimize My Energy</button></div>
</form>
</section>"#
    );
    document(state, date_label, "", &body)
}

/// Analyzing indicator; the browser moves on to the results after `refresh_secs`.
pub fn analyzing_page(state: &AppState, ratings: &WellnessRatings, refresh_secs: u64, date_label: &str) -> String {
    let refresh = format!(
        r#"<meta http-equiv="refresh" content="{};url=/results?{}">
"#,
        refresh_secs,
        html_escape(&ratings_query(ratings))
    );
    let body = r#"<section id="analyzing-section" class="analyzing">
<div class="pulse"></div>
<h2>Analyzing your energy patterns...</h2>
<div class="progress"><div></div></div>
</section>"#;
    document(state, date_label, &refresh, body)
}

fn icon_glyph(icon: RecommendationIcon) -> &'static str {
    match icon {
        RecommendationIcon::Coffee => "&#9749;",
        RecommendationIcon::TrendingUp => "&#128200;",
        RecommendationIcon::Calendar => "&#128197;",
        RecommendationIcon::Moon => "&#127769;",
    }
}

fn recommendation_cards() -> String {
    recommendations()
        .iter()
        .map(|rec| {
            format!(
                r#"<div class="rec">
  <span class="icon" style="background: {accent}">{glyph}</span>
  <div><h4>{title}</h4><p>{detail}</p><div class="when">&#128339; {when}</div></div>
</div>"#,
                accent = rec.accent,
                glyph = icon_glyph(rec.icon),
                title = html_escape(rec.title),
                detail = html_escape(rec.detail),
                when = html_escape(rec.time_window),
            )
        })
        .collect()
}

pub fn results_page(
    state: &AppState,
    result: &AnalysisResult,
    bars: &[HourlyBar],
    radar: Option<&RadarChart>,
    date_label: &str,
) -> String {
    let ratings = &result.ratings;
    let radar_markup = radar.map(charts::radar_svg).unwrap_or_default();
    let body = format!(
        r##"<section id="results-section">
<div class="intro">
  <h2>Your Energy Forecast</h2>
  <p>Based on your inputs, here&#39;s your personalized energy optimization plan</p>
</div>

<div class="card">
  <div class="card-head"><h3>24-Hour Energy Curve</h3><span>Today&#39;s Prediction</span></div>
  {bars}
</div>

<div class="card">
  <div class="card-head"><h3>Wellness Comparison</h3><span>Your Wellness Metrics</span></div>
  {radar}
  <div class="summary">
    <div><div class="label">Sleep Quality</div><div class="metric" style="color: #4f46e5">{sleep}</div></div>
    <div><div class="label">Daily Energy</div><div class="metric" style="color: #16a34a">{energy}</div></div>
    <div><div class="label">Daily Mood</div><div class="metric" style="color: #ca8a04">{mood}</div></div>
  </div>
</div>

<div class="score">
  <h3>Energy Score</h3>
  <div class="pct">{score}</div>
  <p>{message}</p>
</div>

<h3>Personalized Recommendations</h3>
<div class="grid-2">
{recommendations}
</div>

<div class="actions"><a class="btn-secondary" href="/?{query}">Update My Status</a></div>
</section>"##,
        bars = charts::hourly_bars(bars),
        radar = radar_markup,
        sleep = ratings.sleep_quality,
        energy = ratings.energy_level,
        mood = ratings.mood,
        score = result.score,
        message = html_escape(result.message.text()),
        recommendations = recommendation_cards(),
        query = html_escape(&ratings_query(ratings)),
    );
    document(state, date_label, "", &body)
}
