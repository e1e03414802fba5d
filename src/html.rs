//! HTML to plain text reduction

use regex::Regex;

static TAG_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static WHITESPACE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"[\t\n\f\r ]+").unwrap());

/// Named entities we decode. Anything else is left verbatim.
const ENTITIES: [(&str, &str); 5] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
];

/// Reduce an HTML fragment to normalized plain text
///
/// Every tag becomes a single space so words on either side of it never
/// run together, a handful of named entities are decoded, and all
/// whitespace runs collapse to one space.
///
/// ```rust
/// use inbox_extract::strip_html;
///
/// assert_eq!(strip_html("<p>A&amp;B</p>"), "A&B");
/// ```
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut plain = TAG_REGEX.replace_all(html, " ").into_owned();

    for (entity, replacement) in ENTITIES {
        plain = plain.replace(entity, replacement);
    }

    WHITESPACE_REGEX.replace_all(&plain, " ").trim().to_string()
}
