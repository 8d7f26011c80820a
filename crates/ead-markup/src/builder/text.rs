//! Whitespace normalization for character data.

/// Collapse whitespace runs and trim.
///
/// Every maximal run of carriage returns, newlines, tabs, and spaces becomes a
/// single space, even when the run mixes those characters; the result is then
/// trimmed of leading and trailing whitespace. Normalizing an already
/// normalized string returns it unchanged.
///
/// ```
/// use ead_markup::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("a\n\n\t  b"), "a b");
/// assert_eq!(normalize_whitespace("   "), "");
/// ```
#[must_use]
pub fn normalize_whitespace(raw: &str) -> String {
    let mut collapsed = String::with_capacity(raw.len());
    let mut in_run = false;
    for c in raw.chars() {
        if matches!(c, '\r' | '\n' | '\t' | ' ') {
            if !in_run {
                collapsed.push(' ');
                in_run = true;
            }
        } else {
            collapsed.push(c);
            in_run = false;
        }
    }
    collapsed.trim().to_string()
}
