//! HTML escaping shared by directive handlers.

/// Escape text for safe use in HTML content and double-quoted attributes.
///
/// # Examples
///
/// ```
/// use inject_markdown::escape_html;
///
/// assert_eq!(escape_html(r#"a < b & "c""#), "a &lt; b &amp; &quot;c&quot;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
