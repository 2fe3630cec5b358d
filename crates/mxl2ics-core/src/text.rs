//! RFC 5545 text handling: escaping and line folding.

use std::sync::LazyLock;

use regex::Regex;

/// Regex for HTML-like tags embedded in feed text.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid tag regex"));

/// Maximum content line length before folding, in characters.
pub const MAX_LINE_LENGTH: usize = 75;

/// Escapes feed text for use as an iCalendar TEXT value.
///
/// Tags are dropped wholesale (entities are left alone), then backslash,
/// semicolon and comma are escaped in that order, and CRLF / LF become the
/// literal `\n`.
pub fn escape_text(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    let stripped = TAG_REGEX.replace_all(s, "");
    stripped
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

/// Folds a content line at 75 characters.
///
/// Continuation segments start with a single space, which counts toward the
/// segment's length.
pub fn fold_line(line: &str) -> String {
    if line.chars().count() <= MAX_LINE_LENGTH {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_LENGTH * 3);
    let mut segment_len = 0;
    for ch in line.chars() {
        if segment_len == MAX_LINE_LENGTH {
            folded.push_str("\r\n ");
            segment_len = 1;
        }
        folded.push(ch);
        segment_len += 1;
    }
    folded
}
