/// Helpers for the Markdown flavour used when sending the link summary.
///
/// Every ASCII punctuation character may be backslash-escaped, so quiz names
/// containing `*`, `_` or brackets render literally instead of as formatting.
const SPECIAL: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes markdown special characters so they are displayed as literal text
///
/// # Example
/// ```
/// use autoquiz::utils::markdown::escape_markdown;
///
/// let escaped = escape_markdown("Capitals (Europe) 1.0");
/// assert_eq!(escaped, "Capitals \\(Europe\\) 1\\.0");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Wraps already-escaped text in bold markers.
pub fn bold(text: &str) -> String {
    format!("**{text}**")
}
