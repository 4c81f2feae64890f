//! Tag draft input handling.
//!
//! The draft is a single free-text field. Typing a trailing space
//! commits the token just typed: it is normalized and re-appended to
//! the draft with a `#` marker, so the field always displays committed
//! tags in `#tag` form.

use crate::parse::draft_contains;

/// Fold a raw input-field value into the current draft.
///
/// If `input` ends in whitespace and is non-empty, the trailing
/// whitespace-delimited token is committed: a single leading `#` is
/// stripped and `#token` is appended to `current`, unless the token is
/// already present in the draft (exact token comparison, see
/// [`draft_contains`]). When the token is a duplicate the draft is
/// returned unchanged, swallowing the trailing space.
///
/// Any other input replaces the draft verbatim.
///
/// # Examples
/// ```
/// use photobooth_tags::apply_draft_input;
/// assert_eq!(apply_draft_input("", "nature "), "#nature");
/// assert_eq!(apply_draft_input("#nature", "#nature port "), "#nature #port");
/// assert_eq!(apply_draft_input("#nature", "#nature nature "), "#nature");
/// assert_eq!(apply_draft_input("#nature", "#natur"), "#natur");
/// ```
pub fn apply_draft_input(current: &str, input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() || !input.ends_with(char::is_whitespace) {
        return input.to_string();
    }

    let last = match trimmed.split_whitespace().next_back() {
        Some(token) => token,
        None => return input.to_string(),
    };
    let tag = last.strip_prefix('#').unwrap_or(last);

    if tag.is_empty() || draft_contains(current, tag) {
        return current.to_string();
    }

    if current.is_empty() {
        format!("#{tag}")
    } else {
        format!("{current} #{tag}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_typing_replaces_draft() {
        assert_eq!(apply_draft_input("", "#nat"), "#nat");
        assert_eq!(apply_draft_input("#nature", "#natu"), "#natu");
    }

    #[test]
    fn trailing_space_commits_token() {
        assert_eq!(apply_draft_input("", "nature "), "#nature");
        assert_eq!(apply_draft_input("", "#nature "), "#nature");
    }

    #[test]
    fn committed_tokens_accumulate() {
        assert_eq!(apply_draft_input("#nature", "#nature portrait "), "#nature #portrait");
    }

    #[test]
    fn duplicate_token_leaves_draft_unchanged() {
        assert_eq!(apply_draft_input("#nature #sea", "#nature #sea nature "), "#nature #sea");
    }

    #[test]
    fn prefix_of_existing_tag_still_commits() {
        // Containment is per-token, so `nat` is not shadowed by `nature`.
        assert_eq!(apply_draft_input("#nature", "#nature nat "), "#nature #nat");
    }

    #[test]
    fn whitespace_only_input_passes_through() {
        assert_eq!(apply_draft_input("#nature", "  "), "  ");
    }

    #[test]
    fn bare_hash_is_not_committed() {
        assert_eq!(apply_draft_input("#nature", "#nature # "), "#nature");
    }
}
