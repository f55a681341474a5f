//! Static font-metric tables for the panel's CJK fonts.
//!
//! Character widths are in em units (relative to font size). Logographic glyphs,
//! kana, hangul and full-width punctuation all occupy exactly 1em in these fonts, so
//! only the proportional Latin range needs a per-character table.
//! All Latin tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family / font spec
// ────────────────────────────────────────────────────────────────────────────

/// The WenQuanYi families shipped by `fonts-wqy-*` on the panel's host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// `wqy-microhei.ttc`: the default for every text element on the screen.
    WqyMicroHei,
    /// `wqy-zenhei.ttc`: slightly wider Latin glyphs.
    WqyZenHei,
}

impl FontFamily {
    /// Parses the `FONT_FAMILY` config value (case-insensitive, `-`/`_` ignored).
    pub fn from_config(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "wqymicrohei" | "microhei" => Some(FontFamily::WqyMicroHei),
            "wqyzenhei" | "zenhei" => Some(FontFamily::WqyZenHei),
            _ => None,
        }
    }
}

/// A font at a concrete pixel size. Fitting and rendering must use the same spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: FontFamily,
    pub size_px: u32,
}

impl FontSpec {
    pub fn new(family: FontFamily, size_px: u32) -> Self {
        Self { family, size_px }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Measurer trait
// ────────────────────────────────────────────────────────────────────────────

/// Returns the rendered pixel width of a string's bounding box.
pub trait TextMeasurer: Send + Sync {
    fn text_width(&self, text: &str, font: &FontSpec) -> u32;
}

/// Measures text with the static tables below.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricTableMeasurer;

impl TextMeasurer for MetricTableMeasurer {
    fn text_width(&self, text: &str, font: &FontSpec) -> u32 {
        let em = get_metrics(&font.family).measure_str(text);
        (em * font.size_px as f32).ceil() as u32
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Width of ideographs and other full-width glyphs.
    pub wide_char_width: f32,
    /// Fallback for narrow non-ASCII characters (accented Latin, `·`, etc.).
    pub average_char_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if is_wide(c) {
            self.wide_char_width
        } else if c.is_control() {
            0.0
        } else {
            self.average_char_width
        }
    }
}

/// East Asian wide and full-width ranges, plus the dash and ellipsis that CJK
/// fonts draw at full width.
fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x115F
            | 0x2014
            | 0x2026
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x20000..=0x3FFFD
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// WenQuanYi Micro Hei: Latin range derived from Droid Sans.
static WQY_MICRO_HEI_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.26, 0.27, 0.40, 0.65, 0.57, 0.83, 0.71, 0.22, 0.30, 0.30, 0.55, 0.57, 0.26, 0.32, 0.27, 0.37,
        // 0     1     2     3     4     5     6     7     8     9
        0.57, 0.57, 0.57, 0.57, 0.57, 0.57, 0.57, 0.57, 0.57, 0.57,
        // :     ;     <     =     >     ?     @
        0.27, 0.27, 0.57, 0.57, 0.57, 0.43, 0.90,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.63, 0.65, 0.63, 0.73, 0.56, 0.52, 0.73, 0.74, 0.30, 0.27, 0.61, 0.52, 0.91,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.76, 0.78, 0.60, 0.78, 0.62, 0.55, 0.55, 0.73, 0.60, 0.93, 0.58, 0.56, 0.57,
        // [     \     ]     ^     _     `
        0.31, 0.37, 0.31, 0.54, 0.44, 0.29,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.61, 0.48, 0.61, 0.56, 0.34, 0.54, 0.61, 0.25, 0.25, 0.52, 0.25, 0.92,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.61, 0.60, 0.61, 0.61, 0.41, 0.47, 0.35, 0.61, 0.50, 0.77, 0.52, 0.50, 0.47,
        // {     |     }     ~
        0.37, 0.55, 0.37, 0.57,
    ],
    wide_char_width: 1.0,
    average_char_width: 0.55,
};

/// WenQuanYi Zen Hei: wider, rounder Latin glyphs. Approx. 104% of Micro Hei.
static WQY_ZEN_HEI_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.27, 0.28, 0.42, 0.68, 0.59, 0.86, 0.74, 0.23, 0.31, 0.31, 0.57, 0.59, 0.27, 0.33, 0.28, 0.38,
        // 0     1     2     3     4     5     6     7     8     9
        0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59, 0.59,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.45, 0.94,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.66, 0.68, 0.66, 0.76, 0.58, 0.54, 0.76, 0.77, 0.31, 0.28, 0.63, 0.54, 0.95,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.79, 0.81, 0.62, 0.81, 0.64, 0.57, 0.57, 0.76, 0.62, 0.97, 0.60, 0.58, 0.59,
        // [     \     ]     ^     _     `
        0.32, 0.38, 0.32, 0.56, 0.46, 0.30,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.58, 0.63, 0.50, 0.63, 0.58, 0.35, 0.56, 0.63, 0.26, 0.26, 0.54, 0.26, 0.96,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.63, 0.62, 0.63, 0.63, 0.43, 0.49, 0.36, 0.63, 0.52, 0.80, 0.54, 0.52, 0.49,
        // {     |     }     ~
        0.38, 0.57, 0.38, 0.59,
    ],
    wide_char_width: 1.0,
    average_char_width: 0.57,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: &FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::WqyMicroHei => &WQY_MICRO_HEI_TABLE,
        FontFamily::WqyZenHei => &WQY_ZEN_HEI_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
