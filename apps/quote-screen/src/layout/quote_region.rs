//! Quote region geometry: where the fitted lines and footer land on the 400x300 panel.
//!
//! The region sits below the date bar. Lines start at a fixed left margin with a
//! fixed pitch; the footer is right-aligned against the region's right edge.

use serde::Serialize;

use crate::content::FittedContent;
use crate::layout::font_metrics::{FontSpec, TextMeasurer};

/// Fixed geometry of the quote region, in panel pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRegion {
    pub left_x: i32,
    pub first_line_y: i32,
    pub line_pitch: i32,
    pub right_x: i32,
    pub footer_y: i32,
}

impl Default for QuoteRegion {
    fn default() -> Self {
        Self {
            left_x: 20,
            first_line_y: 195,
            line_pitch: 32,
            right_x: 380,
            footer_y: 270,
        }
    }
}

/// Which font a placed string is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Quote,
    Footer,
}

/// A string positioned at its top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedText {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub role: TextRole,
}

/// Positions `content` inside `region`.
///
/// `footer_font` must be the font the renderer uses for the footer, since the
/// right alignment depends on its measured width.
pub fn layout_quote_region(
    content: &FittedContent,
    region: &QuoteRegion,
    measurer: &dyn TextMeasurer,
    footer_font: &FontSpec,
) -> Vec<PlacedText> {
    let mut placed: Vec<PlacedText> = content
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| PlacedText {
            x: region.left_x,
            y: region.first_line_y + region.line_pitch * i as i32,
            text: line.clone(),
            role: TextRole::Quote,
        })
        .collect();

    let footer_width = measurer.text_width(content.footer(), footer_font) as i32;
    placed.push(PlacedText {
        x: region.right_x - footer_width,
        y: region.footer_y,
        text: content.footer().to_string(),
        role: TextRole::Footer,
    });

    placed
}

/// Terminal echo of the quote region, one entry per printed row.
pub fn echo_lines(content: &FittedContent) -> Vec<String> {
    let mut out = Vec::with_capacity(content.lines().len() + 2);
    out.push("[quote]".to_string());
    out.extend(content.lines().iter().map(|line| format!("    {line}")));
    out.push(format!("[footer] {}", content.footer()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{FontFamily, MetricTableMeasurer};

    fn content() -> FittedContent {
        FittedContent::new(
            vec!["生活不是等待风暴过去".to_string(), "而是学会在雨中跳舞。".to_string()],
            "—— 佚名".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_lines_use_fixed_margin_and_pitch() {
        let footer_font = FontSpec::new(FontFamily::WqyMicroHei, 18);
        let placed = layout_quote_region(
            &content(),
            &QuoteRegion::default(),
            &MetricTableMeasurer,
            &footer_font,
        );
        assert_eq!(placed.len(), 3);
        assert_eq!((placed[0].x, placed[0].y), (20, 195));
        assert_eq!((placed[1].x, placed[1].y), (20, 227));
        assert!(placed[..2].iter().all(|p| p.role == TextRole::Quote));
    }

    #[test]
    fn test_footer_is_right_aligned() {
        let footer_font = FontSpec::new(FontFamily::WqyMicroHei, 18);
        let placed = layout_quote_region(
            &content(),
            &QuoteRegion::default(),
            &MetricTableMeasurer,
            &footer_font,
        );
        let footer = placed.last().unwrap();
        assert_eq!(footer.role, TextRole::Footer);
        assert_eq!(footer.y, 270);
        // "—— 佚名" = 2 wide dashes + space + 2 ideographs at 18px.
        let width = MetricTableMeasurer.text_width("—— 佚名", &footer_font) as i32;
        assert_eq!(footer.x + width, 380);
    }

    #[test]
    fn test_echo_lists_lines_then_footer() {
        let echo = echo_lines(&content());
        assert_eq!(echo.first().map(String::as_str), Some("[quote]"));
        assert_eq!(echo[1], "    生活不是等待风暴过去");
        assert_eq!(echo.last().map(String::as_str), Some("[footer] —— 佚名"));
    }
}
