//! Content derivation - read time, excerpts, and tag normalization.
//!
//! Pure functions over post content. Infrastructure persists whatever these
//! produce; nothing here touches a store.

/// Average reading speed used for the read-time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Maximum excerpt length in characters (before the truncation marker).
const EXCERPT_LEN: usize = 150;

/// Strip complete markup tags (`<...>`) from content, leaving plain text.
///
/// Only a `<` that is actually closed by a later `>` counts as a tag; a bare
/// `<` in prose (`5 < 10`) is kept verbatim.
fn strip_markup(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if close > 0 => {
                rest = &after[close + 1..];
            }
            _ => {
                // Unclosed (or empty "<>") - not a tag
                text.push('<');
                rest = after;
            }
        }
    }
    text.push_str(rest);
    text
}

/// Estimated read time in minutes based on word count.
///
/// Markup is stripped first. Floor division by 200 words/minute with a
/// minimum of 1 minute, so even an empty post reads as one minute.
pub fn read_time(content: &str) -> i32 {
    let words = strip_markup(content).split_whitespace().count();
    (words / WORDS_PER_MINUTE).max(1) as i32
}

/// Generate an excerpt from content, or use the override verbatim.
///
/// A non-empty override (typically the SEO description) wins. Otherwise the
/// stripped content is clipped to 150 characters, with `...` appended only
/// when clipping actually occurred.
pub fn excerpt(content: &str, seo_description: Option<&str>) -> String {
    if let Some(desc) = seo_description
        && !desc.is_empty()
    {
        return desc.to_string();
    }

    let text = strip_markup(content);
    if text.chars().count() > EXCERPT_LEN {
        let clipped: String = text.chars().take(EXCERPT_LEN).collect();
        format!("{}...", clipped)
    } else {
        text
    }
}

/// Canonicalize a raw tag name: trim whitespace, lowercase.
///
/// Returns `None` when nothing remains after trimming; such tags are
/// discarded, never created or linked.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() { None } else { Some(name) }
}

/// Normalize a raw tag list: canonicalize each entry, drop empties, and
/// deduplicate while preserving first-seen order.
pub fn normalize_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut names = Vec::new();
    for tag in raw {
        if let Some(name) = normalize_tag(tag.as_ref())
            && seen.insert(name.clone())
        {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_time_empty_content_is_one_minute() {
        assert_eq!(read_time(""), 1);
        assert_eq!(read_time("<p></p>"), 1);
    }

    #[test]
    fn test_read_time_short_content_is_one_minute() {
        assert_eq!(read_time("hello world"), 1);
    }

    #[test]
    fn test_read_time_400_words_is_two_minutes() {
        let content = (0..400).map(|_| "word").collect::<Vec<_>>().join(" ");
        assert_eq!(read_time(&content), 2);

        // Markup does not count as words
        let wrapped = format!("<article>{}</article>", content);
        assert_eq!(read_time(&wrapped), 2);
    }

    #[test]
    fn test_read_time_399_words_floors_to_one() {
        let content = (0..399).map(|_| "word").collect::<Vec<_>>().join(" ");
        assert_eq!(read_time(&content), 1);
    }

    #[test]
    fn test_excerpt_short_content_no_marker() {
        assert_eq!(excerpt("<p>hello world</p>", None), "hello world");
    }

    #[test]
    fn test_excerpt_long_content_is_clipped() {
        let content = "a".repeat(200);
        let result = excerpt(&content, None);
        assert_eq!(result.chars().count(), 153);
        assert!(result.ends_with("..."));
        assert!(result.starts_with("aaa"));
    }

    #[test]
    fn test_excerpt_exactly_150_chars_no_marker() {
        let content = "b".repeat(150);
        assert_eq!(excerpt(&content, None), content);
    }

    #[test]
    fn test_bare_angle_bracket_is_not_a_tag() {
        let prose = "5 < 10 keeps all of this text";
        assert_eq!(excerpt(prose, None), prose);
        assert_eq!(read_time(prose), 1);
        assert_eq!(excerpt("a <b>bold</b> claim: 1 < 2", None), "a bold claim: 1 < 2");
    }

    #[test]
    fn test_excerpt_override_wins_verbatim() {
        let long = "c".repeat(300);
        assert_eq!(excerpt(&long, Some("My summary")), "My summary");
    }

    #[test]
    fn test_excerpt_empty_override_ignored() {
        assert_eq!(excerpt("<p>body</p>", Some("")), "body");
    }

    #[test]
    fn test_normalize_tag_trims_and_lowercases() {
        assert_eq!(normalize_tag("  Rust "), Some("rust".to_string()));
        assert_eq!(normalize_tag("GO"), Some("go".to_string()));
        assert_eq!(normalize_tag("   "), None);
        assert_eq!(normalize_tag(""), None);
    }

    #[test]
    fn test_normalize_tags_dedups_and_drops_empties() {
        let tags = normalize_tags(["Go ", "go", " GO", ""]);
        assert_eq!(tags, vec!["go".to_string()]);
    }

    #[test]
    fn test_normalize_tags_preserves_order() {
        let tags = normalize_tags(["Rust", "web", "rust", "Async"]);
        assert_eq!(
            tags,
            vec!["rust".to_string(), "web".to_string(), "async".to_string()]
        );
    }
}
