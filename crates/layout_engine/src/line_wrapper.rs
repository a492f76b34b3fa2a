//! Greedy line wrapping
//!
//! Text is split on spaces, runs of them counting as one, and tokens are packed onto a line until
//! the next one would push the line past the width budget. Tokens are never
//! hyphenated: a token wider than the budget is emitted on a line of its own
//! and overflows it.

use text_engine::{FontSpec, TextMeasurer};

/// Wrap `text` into lines no wider than `max_width`.
///
/// `measure` returns the rendered width of a candidate line. Hard line breaks
/// (`\n`) always start a new line. Empty or whitespace-only input produces no
/// lines at all.
pub fn wrap<F>(text: &str, max_width: f32, mut measure: F) -> text_engine::Result<Vec<String>>
where
    F: FnMut(&str) -> text_engine::Result<f32>,
{
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            continue;
        }

        let mut current = String::new();
        let mut has_token = false;

        // runs of spaces separate tokens without producing empty ones
        for token in paragraph.split(' ').filter(|t| !t.is_empty()) {
            if !has_token {
                current.push_str(token);
                has_token = true;
                continue;
            }

            let candidate_len = current.len();
            current.push(' ');
            current.push_str(token);

            if measure(&current)? > max_width {
                current.truncate(candidate_len);
                lines.push(std::mem::replace(&mut current, token.to_string()));
            }
        }

        if has_token {
            lines.push(current);
        }
    }

    Ok(lines)
}

/// Wraps text for one font using a [`TextMeasurer`]
pub struct LineWrapper<'a, M: TextMeasurer + ?Sized> {
    measurer: &'a M,
    font: FontSpec,
}

impl<'a, M: TextMeasurer + ?Sized> LineWrapper<'a, M> {
    pub fn new(measurer: &'a M, font: FontSpec) -> Self {
        Self { measurer, font }
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Wrap `text` to `max_width` with this wrapper's font
    pub fn wrap(&self, text: &str, max_width: f32) -> text_engine::Result<Vec<String>> {
        wrap(text, max_width, |candidate| {
            self.measurer.measure(candidate, &self.font)
        })
    }
}
