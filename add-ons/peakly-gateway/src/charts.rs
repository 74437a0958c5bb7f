//! Server-side chart markup: hourly bars as sized divs, the comparison radar as inline SVG.

use peakly_core::radar::{BORDER_COLOR, DATASET_LABEL, FILL_COLOR, GRID_COLOR};
use peakly_core::{html_escape, HourlyBar, RadarChart, ENERGY_CHART_ID};

/// SVG viewport edge, in user units.
const RADAR_SIZE: f64 = 320.0;
/// Room left around the outer ring for axis labels.
const RADAR_MARGIN: f64 = 48.0;

pub fn hourly_bars(bars: &[HourlyBar]) -> String {
    let mut html = format!(r#"<div id="{}" class="energy-chart">"#, ENERGY_CHART_ID);
    for bar in bars {
        html.push_str(&format!(
            r#"<div class="bar-col"><div class="bar tier-{color}" style="height: {height:.1}%" title="{label} · {value:.0}%"></div><span class="bar-label">{label}</span></div>"#,
            color = bar.tier.color_name(),
            height = bar.height_percent(),
            label = bar.label,
            value = bar.value,
        ));
    }
    html.push_str("</div>");
    html
}

fn point(center: f64, radius: f64, (x, y): (f64, f64)) -> (f64, f64) {
    (center + x * radius, center + y * radius)
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn radar_svg(chart: &RadarChart) -> String {
    let center = RADAR_SIZE / 2.0;
    let radius = center - RADAR_MARGIN;
    let scale = chart.scale();
    let axis_count = chart.axes().len();

    let mut svg = format!(
        r#"<svg id="{id}" class="radar" viewBox="0 0 {size} {size}" role="img" aria-label="{label}">"#,
        id = html_escape(chart.mount_id()),
        size = RADAR_SIZE,
        label = DATASET_LABEL,
    );

    // Grid rings, one per tick, then the spokes.
    for tick in scale.ticks() {
        let r = radius * scale.fraction(tick);
        let ring: Vec<_> = (0..axis_count).map(|i| point(center, r, chart.axis_direction(i))).collect();
        svg.push_str(&format!(
            r#"<polygon points="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
            points_attr(&ring),
            GRID_COLOR
        ));
        let (x, y) = point(center, r, chart.axis_direction(0));
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" font-size="10" fill="#6b7280" text-anchor="start" dx="4">{}</text>"##,
            x, y, tick
        ));
    }
    for i in 0..axis_count {
        let (x, y) = point(center, radius, chart.axis_direction(i));
        svg.push_str(&format!(
            r#"<line x1="{c:.1}" y1="{c:.1}" x2="{x:.1}" y2="{y:.1}" stroke="{color}" stroke-width="1"/>"#,
            c = center,
            x = x,
            y = y,
            color = GRID_COLOR
        ));
    }

    let vertices: Vec<_> = chart.polygon().into_iter().map(|v| point(center, radius, v)).collect();
    svg.push_str(&format!(
        r#"<polygon class="dataset" points="{}" fill="{}" stroke="{}" stroke-width="2"/>"#,
        points_attr(&vertices),
        FILL_COLOR,
        BORDER_COLOR
    ));

    for (i, (axis, (x, y))) in chart.axes().iter().zip(vertices.iter()).enumerate() {
        svg.push_str(&format!(
            r##"<circle cx="{:.1}" cy="{:.1}" r="6" fill="{}" stroke="#fff" stroke-width="2"><title>{}</title></circle>"##,
            x,
            y,
            axis.point_color,
            html_escape(&axis.tooltip())
        ));
        let (lx, ly) = point(center, radius + 22.0, chart.axis_direction(i));
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" font-size="13" font-weight="500" fill="#374151" text-anchor="middle" dominant-baseline="middle">{}</text>"##,
            lx,
            ly,
            html_escape(axis.label)
        ));
    }

    svg.push_str("</svg>");
    svg
}
