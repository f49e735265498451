//! Display helpers shared by the summary and presentation layers.

/// Render a score with three decimal places.
pub fn format_score(value: f64) -> String {
    format!("{value:.3}")
}

/// Truncate a string to at most `max_chars` characters, appending `...`
/// when anything was cut.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
