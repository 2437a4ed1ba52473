//! Greedy word-wrap for free-text sections.
//!
//! Lines break only at whitespace. A word wider than the line sits alone on its own
//! line rather than being split. Runs of whitespace (including the source's own
//! newlines) collapse to a single space before wrapping.

/// Wraps `text` to at most `width` characters per line and joins the lines with `\n`.
///
/// An empty or all-whitespace string returns an empty string.
pub fn wrap(text: &str, width: usize) -> String {
    wrap_lines(text, width).join("\n")
}

/// Same as [`wrap`] but returns the individual lines.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_w = word.chars().count();

        if current_width > 0 && current_width + 1 + word_w > width {
            // Current line is full — push it and start a new line with this word.
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_w;
    }
    if current_width > 0 {
        lines.push(current);
    }

    lines
}
