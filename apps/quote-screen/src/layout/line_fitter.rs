//! Greedy character wrap for logographic text.
//!
//! Every `char` is an atomic wrapping unit: there is no word-boundary search and
//! no hyphenation. Each prospective line is measured whole (not summed per char)
//! so kerning-aware measurers give the same answer the renderer will.

use crate::layout::font_metrics::{FontSpec, TextMeasurer};

/// Wraps `text` into lines no wider than `width_budget` pixels.
///
/// Single pass, no backtracking. A char that alone exceeds the budget still
/// occupies its own line. An empty input yields an empty sequence.
pub fn fit_lines(
    text: &str,
    measurer: &dyn TextMeasurer,
    font: &FontSpec,
    width_budget: u32,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if measurer.text_width(&current, font) <= width_budget {
            continue;
        }
        current.pop();
        if current.is_empty() {
            // Over-wide glyph on a fresh line: keep it rather than emit an empty line.
            current.push(c);
            continue;
        }
        lines.push(std::mem::take(&mut current));
        current.push(c);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
