//! Word wrapping and truncation against a width budget

use crate::metrics::TextMetrics;

/// Suffix of truncated cell text
pub const ELLIPSIS: &str = "...";

/// Slack for float error when comparing widths
const WIDTH_EPSILON: f32 = 1e-3;

/// Byte offset of the `n`th character
fn char_offset(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(i, _)| i)
}

/// Greedy word wrap.
///
/// Explicit newlines always break; runs of whitespace collapse to one space;
/// a word wider than `max_width` is split across lines. Every returned line
/// fits, so wrapping the joined output again returns it unchanged.
pub fn wrap_text(text: &str, max_width: f32, size: f32, metrics: &dyn TextMetrics) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        wrap_line(raw, max_width, size, metrics, &mut lines);
    }
    lines
}

fn wrap_line(raw: &str, max_width: f32, size: f32, metrics: &dyn TextMetrics, out: &mut Vec<String>) {
    let fits = |s: &str| metrics.text_width(s, size) <= max_width + WIDTH_EPSILON;
    let mut current = String::new();

    for word in raw.split_whitespace() {
        if current.is_empty() {
            if fits(word) {
                current.push_str(word);
                continue;
            }
        } else {
            let candidate = format!("{} {}", current, word);
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            out.push(std::mem::take(&mut current));
        }

        let mut rest = word;
        while !fits(rest) {
            let take = metrics.fitting_chars(rest, max_width, size).max(1);
            let split = char_offset(rest, take);
            out.push(rest[..split].to_string());
            rest = &rest[split..];
        }
        current = rest.to_string();
    }

    out.push(current);
}

/// Cut `text` to `max_width`, ending in [`ELLIPSIS`] when anything was dropped.
///
/// Whitespace (including newlines) collapses to single spaces first.
pub fn truncate(text: &str, max_width: f32, size: f32, metrics: &dyn TextMetrics) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if metrics.text_width(&text, size) <= max_width + WIDTH_EPSILON {
        return text;
    }

    let room = max_width - metrics.text_width(ELLIPSIS, size);
    if room <= 0.0 {
        let n = metrics.fitting_chars(ELLIPSIS, max_width, size);
        return ELLIPSIS[..char_offset(ELLIPSIS, n)].to_string();
    }

    let n = metrics.fitting_chars(&text, room, size);
    format!("{}{}", text[..char_offset(&text, n)].trim_end(), ELLIPSIS)
}
