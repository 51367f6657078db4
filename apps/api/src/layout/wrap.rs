use crate::layout::font_metrics::{FontFace, TextMeasure};

/// Greedy word wrap.
///
/// Words are appended to the current line separated by single spaces. When the
/// candidate line measures wider than `max_width` and the line already holds a
/// word, the line is flushed and the word starts the next one. A single word
/// wider than `max_width` gets a line of its own and overflows; it is never split.
///
/// Returns no lines for blank input.
pub fn wrap_lines(
    text: &str,
    max_width: f32,
    measure: &dyn TextMeasure,
    face: FontFace,
    size: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure.width_of(&candidate, face, size) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
