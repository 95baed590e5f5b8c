//! Bounded content normalizer
//!
//! Repairs raw generator text into a length band: strips formatting
//! leftovers, collapses whitespace, truncates or pads. Lossy fallbacks are
//! reported as flags, never as errors; this stage cannot fail.

use super::item::LengthBand;
use tracing::debug;

/// Truncation marker appended when text is cut to fit a band.
pub const ELLIPSIS: char = '…';

/// Label prefixes the generator tends to leave at the start of a line.
const LABEL_PREFIXES: [&str; 7] = [
    "content:",
    "question:",
    "quote:",
    "explanation:",
    "option:",
    "text:",
    "answer:",
];

/// Output of a normalization pass: the repaired text plus which lossy
/// fallbacks were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub truncated: bool,
    pub padded: bool,
    /// Input stripped to nothing and was replaced by the filler.
    pub defaulted: bool,
}

/// Normalize `raw` into `band`, using `filler` both as the padding phrase
/// and as the replacement for input that strips to empty.
pub fn normalize(raw: &str, band: LengthBand, filler: &str) -> Normalized {
    let mut defaulted = false;
    let mut text = strip_markup(raw);

    if text.is_empty() {
        debug!("input stripped to empty, substituting filler");
        text = filler.to_string();
        defaulted = true;
    }

    let mut truncated = false;
    let mut padded = false;

    if char_len(&text) > band.max {
        text = truncate_to(&text, band.max);
        truncated = true;
        debug!(max = band.max, "truncated over-long field");
    }

    while char_len(&text) < band.min {
        text.push(' ');
        text.push_str(filler);
        padded = true;
    }
    if padded {
        debug!(min = band.min, "padded under-length field");
        // Filler phrases are short relative to the bands, but guard the
        // upper bound anyway.
        if char_len(&text) > band.max {
            text = truncate_to(&text, band.max);
        }
    }

    Normalized {
        text,
        truncated,
        padded,
        defaulted,
    }
}

/// Apply the fixed, ordered set of textual substitutions: inline link
/// syntax and emphasis markers first, then line-level structure (headers,
/// blockquotes, bullets, labels), then whitespace collapse. Inline markers
/// go first so an emphasis-wrapped header prefix still reads as a header
/// when the line pass runs.
pub fn strip_markup(raw: &str) -> String {
    let mut text = strip_links(raw);
    for marker in ["**", "__", "*", "`"] {
        text = text.replace(marker, "");
    }

    let mut lines = Vec::new();
    for line in text.lines() {
        let mut rest = line.trim_start();
        rest = rest.trim_start_matches('#').trim_start();
        rest = rest.trim_start_matches('>').trim_start();
        // `*` bullets are already gone with the emphasis markers.
        if let Some(stripped) = rest.strip_prefix("- ") {
            rest = stripped;
        }
        let lower = rest.to_lowercase();
        for prefix in LABEL_PREFIXES {
            if lower.starts_with(prefix) {
                rest = rest[prefix.len()..].trim_start();
                break;
            }
        }
        lines.push(rest.to_string());
    }

    let joined = lines.join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrite `[label](target)` spans to their label.
fn strip_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find("](") else {
            break;
        };
        let close = open + close;
        let Some(end) = rest[close..].find(')') else {
            break;
        };
        let end = close + end;
        out.push_str(&rest[..open]);
        out.push_str(&rest[open + 1..close]);
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    out
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cut to at most `max` chars, preferring the last word boundary, and
/// append the truncation marker.
fn truncate_to(text: &str, max: usize) -> String {
    let budget = max.saturating_sub(1);
    let prefix: String = text.chars().take(budget).collect();
    let cut = match prefix.rfind(' ') {
        // Keep the word-boundary cut unless it would throw away most of
        // the budget (a single giant token).
        Some(pos) if pos > budget / 2 => prefix[..pos].trim_end().to_string(),
        _ => prefix,
    };
    let mut out = cut;
    out.push(ELLIPSIS);
    out
}
