/// One candidate quote as returned by a `QuoteSource`. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: Option<String>,
    pub source: Option<String>,
}

impl Quote {
    /// Builds a quote, treating blank author/source as absent.
    pub fn new(text: impl Into<String>, author: Option<String>, source: Option<String>) -> Self {
        Self {
            text: text.into(),
            author: non_blank(author),
            source: non_blank(source),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Wrapped quote lines plus footer: the unit that is cached and rendered.
///
/// Always holds at least one line. The `max_lines` bound and per-line width are
/// enforced by the acquirer, which is the only producer besides the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedContent {
    lines: Vec<String>,
    footer: String,
}

impl FittedContent {
    /// Returns `None` for an empty line list.
    pub fn new(lines: Vec<String>, footer: String) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        Some(Self { lines, footer })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn footer(&self) -> &str {
        &self.footer
    }

    /// The built-in content shown when every acquisition attempt is rejected.
    /// Pre-wrapped for the 360px / 22px quote region.
    pub fn fallback() -> Self {
        Self {
            lines: vec![
                "大多数人如果能给更多事情一个机".to_string(),
                "会的话，他们的问题都能解决。".to_string(),
            ],
            footer: "—— 岛上书店".to_string(),
        }
    }
}

/// Where an acquisition's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    Fetched,
    Fallback,
}

/// Result of one `ContentAcquirer::acquire` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquisition {
    pub content: FittedContent,
    /// Number of fetch-or-fit attempts consumed, including the accepted one.
    pub attempts: u32,
    pub origin: ContentOrigin,
}
