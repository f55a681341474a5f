/// Attribution marker placed before every footer.
pub const FOOTER_PREFIX: &str = "—— ";
/// Shown when the quote carries neither author nor source ("anonymous").
pub const ANONYMOUS: &str = "佚名";
const SEPARATOR: &str = " · ";

/// Builds the attribution footer.
///
/// Precedence: `author · source` when both are present and differ (exact,
/// case-sensitive), then author alone, then source alone, then anonymous.
pub fn build_footer(author: Option<&str>, source: Option<&str>) -> String {
    match (author, source) {
        (Some(author), Some(source)) if author != source => {
            format!("{FOOTER_PREFIX}{author}{SEPARATOR}{source}")
        }
        (Some(author), _) => format!("{FOOTER_PREFIX}{author}"),
        (None, Some(source)) => format!("{FOOTER_PREFIX}{source}"),
        (None, None) => format!("{FOOTER_PREFIX}{ANONYMOUS}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_and_distinct_source() {
        assert_eq!(build_footer(Some("鲁迅"), Some("呐喊")), "—— 鲁迅 · 呐喊");
    }

    #[test]
    fn test_identical_author_and_source_collapse_to_author() {
        assert_eq!(build_footer(Some("A"), Some("A")), "—— A");
    }

    #[test]
    fn test_distinct_is_case_sensitive() {
        assert_eq!(build_footer(Some("a"), Some("A")), "—— a · A");
    }

    #[test]
    fn test_author_only() {
        assert_eq!(build_footer(Some("A"), None), "—— A");
    }

    #[test]
    fn test_source_only() {
        assert_eq!(build_footer(None, Some("B")), "—— B");
    }

    #[test]
    fn test_anonymous_placeholder() {
        assert_eq!(build_footer(None, None), "—— 佚名");
    }
}
