//! Tag input parsing.

/// Parse a free-text tag draft into an ordered tag list.
///
/// - Splits on runs of whitespace
/// - Strips a single leading `#` from each token
/// - Drops tokens that are empty after stripping
///
/// Tags are neither deduplicated nor lowercased: `Nature` and `nature`
/// are distinct labels, and repeating a tag repeats it in the output.
/// The server owns any further normalization.
///
/// # Examples
/// ```
/// use photobooth_tags::parse_tags;
/// assert_eq!(parse_tags("#a  #b b"), vec!["a", "b", "b"]);
/// assert_eq!(parse_tags(""), Vec::<String>::new());
/// ```
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .map(|token| token.strip_prefix('#').unwrap_or(token))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether `tag` is already present as a parsed token of `draft`.
///
/// Exact comparison; case matters, matching [`parse_tags`].
pub fn draft_contains(draft: &str, tag: &str) -> bool {
    draft
        .split_whitespace()
        .map(|token| token.strip_prefix('#').unwrap_or(token))
        .any(|token| token == tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parse_mixed_prefixes() {
        assert_eq!(parse_tags("#a  #b b"), vec!["a", "b", "b"]);
    }

    #[test]
    fn parse_empty() {
        assert_eq!(parse_tags(""), Vec::<String>::new());
        assert_eq!(parse_tags("   "), Vec::<String>::new());
    }

    #[test]
    fn parse_bare_hash_dropped() {
        assert_eq!(parse_tags("# #nature"), vec!["nature"]);
    }

    #[test]
    fn parse_strips_only_one_hash() {
        // A double prefix keeps the inner one; user intent is preserved.
        assert_eq!(parse_tags("##loud"), vec!["#loud"]);
    }

    #[test]
    fn parse_preserves_case_and_duplicates() {
        assert_eq!(parse_tags("Nature nature Nature"), vec!["Nature", "nature", "Nature"]);
    }

    #[rstest]
    #[case("#nature #portrait", "nature", true)]
    #[case("#nature #portrait", "port", false)]
    #[case("#nature", "Nature", false)]
    #[case("", "nature", false)]
    fn draft_containment(#[case] draft: &str, #[case] tag: &str, #[case] expected: bool) {
        assert_eq!(draft_contains(draft, tag), expected);
    }
}
