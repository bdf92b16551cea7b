use scraper::Html;

/// Strip markup from a free-text field, keeping only visible text.
///
/// Text nodes are joined with single spaces and the result is trimmed. The
/// fragment parser is forgiving: plain text passes through as its own text
/// content, so input is never lost to a malformed document.
pub fn strip_markup(input: &str) -> String {
    let fragment = Html::parse_fragment(input);
    let joined = fragment
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}
