//! Suggestion filtering for the tag input dropdown.

use crate::parse::parse_tags;

/// Filter server-provided tag suggestions against the current draft.
///
/// - Tags already committed to the draft are excluded (exact token
///   match after `#` stripping).
/// - The remaining suggestions are matched case-insensitively against
///   the trailing draft token, as a substring. An empty draft matches
///   everything.
///
/// Order of `suggestions` is preserved; the server decides ranking.
pub fn filter_suggestions(draft: &str, suggestions: &[String]) -> Vec<String> {
    let chosen = parse_tags(draft);
    let needle = draft
        .split_whitespace()
        .next_back()
        .map(|token| token.trim_start_matches('#').to_lowercase())
        .unwrap_or_default();

    suggestions
        .iter()
        .filter(|tag| !chosen.iter().any(|c| c == *tag))
        .filter(|tag| needle.is_empty() || tag.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
