//! Horizontal-bar SVG rendering for throughput comparisons.
//!
//! Charts are assembled as SVG markup directly, so the harness needs no
//! plotting or GUI dependency. Bars are scaled against the maximum value and
//! the best entry gets its own fill color.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// One bar: a library display name and its throughput in MB/s.
#[derive(Clone, Debug)]
pub struct ChartEntry {
    pub label: String,
    pub value: f64,
}

const WIDTH: f64 = 1000.0;
const MARGIN_LEFT: f64 = 280.0;
const MARGIN_RIGHT: f64 = 90.0;
const TOP: f64 = 56.0;
const BAR_HEIGHT: f64 = 24.0;
const BAR_STEP: f64 = 34.0;
const BOTTOM: f64 = 40.0;

const BAR_FILL: &str = "#9999FF";
const BEST_FILL: &str = "#90EE90";

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Render `entries` as a horizontal bar chart, in the order given (callers
/// pass them ranked fastest-first). The entry with the maximum value is
/// highlighted.
pub fn render_barh(title: &str, entries: &[ChartEntry]) -> String {
    let height = TOP + entries.len() as f64 * BAR_STEP + BOTTOM;
    let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let max_value = entries.iter().map(|e| e.value).fold(0.0, f64::max);
    let best = entries
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.value.total_cmp(&b.value))
        .map(|(i, _)| i);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}" font-family="sans-serif">"#
    );
    let _ = writeln!(svg, r#"<rect width="{WIDTH}" height="{height}" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="30" font-size="18" text-anchor="middle">{}</text>"#,
        WIDTH / 2.0,
        xml_escape(title)
    );

    for (i, entry) in entries.iter().enumerate() {
        let y = TOP + i as f64 * BAR_STEP;
        let bar_width = if max_value > 0.0 {
            entry.value / max_value * plot_width
        } else {
            0.0
        };
        let fill = if Some(i) == best { BEST_FILL } else { BAR_FILL };
        let text_y = y + BAR_HEIGHT / 2.0 + 4.0;

        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{text_y}" font-size="12" text-anchor="end">{}</text>"#,
            MARGIN_LEFT - 10.0,
            xml_escape(&entry.label)
        );
        let _ = writeln!(
            svg,
            r#"<rect x="{MARGIN_LEFT}" y="{y}" width="{bar_width:.2}" height="{BAR_HEIGHT}" fill="{fill}"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{text_y}" font-size="12">{:.2}</text>"#,
            MARGIN_LEFT + bar_width + 6.0,
            entry.value
        );
    }

    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="13" text-anchor="middle">MB/s</text>"#,
        MARGIN_LEFT + plot_width / 2.0,
        height - 12.0
    );
    svg.push_str("</svg>\n");
    svg
}

/// Render and write one chart file.
pub fn write_chart(path: &Path, title: &str, entries: &[ChartEntry]) -> io::Result<()> {
    fs::write(path, render_barh(title, entries))
}
