//! Ranks measurements within a view and renders the textual artifacts.

use std::fmt::Write as _;

use crate::registry::LibraryIdentity;
use crate::schema::Measurement;

/// Sort fastest-first (ascending elapsed time).
pub fn rank<'a>(measurements: impl IntoIterator<Item = &'a Measurement>) -> Vec<&'a Measurement> {
    let mut ranked: Vec<&Measurement> = measurements.into_iter().collect();
    ranked.sort_by(|a, b| a.time_s.total_cmp(&b.time_s));
    ranked
}

/// `100 * best / entry`; the best entry itself maps to 100.0.
pub fn relative_percent(best: &Measurement, entry: &Measurement) -> f64 {
    100.0 * best.time_s / entry.time_s
}

/// Registered libraries with no measurement in this view, in registration
/// order.
pub fn missing_libraries(
    registered: &[LibraryIdentity],
    view: &[&Measurement],
) -> Vec<LibraryIdentity> {
    registered
        .iter()
        .filter(|lib| !view.iter().any(|m| &m.lib == *lib))
        .cloned()
        .collect()
}

/// `X does not support ...` / `X, Y do not support ...`, or `None` when
/// every registered library produced a result for the view.
pub fn coverage_note(what: &str, missing: &[LibraryIdentity]) -> Option<String> {
    let names: Vec<String> = missing.iter().map(|l| l.display_name()).collect();
    match names.as_slice() {
        [] => None,
        [one] => Some(format!("{one} does not support {what}.")),
        many => Some(format!("{} do not support {what}.", many.join(", "))),
    }
}

/// Markdown table for one ranked view, coverage note appended.
pub fn render_table(
    what: &str,
    ranked: &[&Measurement],
    missing: &[LibraryIdentity],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {what}:");
    let _ = writeln!(out);
    let _ = writeln!(out, "Library | Throughput | %");
    let _ = writeln!(out, "--------|------------|--");
    if let Some(best) = ranked.first().copied() {
        for &m in ranked {
            let _ = writeln!(
                out,
                "{} | {:.2} MB/s | {:.2}%",
                m.lib.display_name(),
                m.mb_per_s,
                relative_percent(best, m)
            );
        }
    }
    if let Some(note) = coverage_note(what, missing) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{note}");
    }
    out
}
