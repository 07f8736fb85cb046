// src/chatbot/sanitizer.rs
use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"))
}

/// Strip angle-bracket tags and the characters `;`, `\` and `/`, then trim.
///
/// This is a denylist, not an escaper: output must still be escaped before it
/// reaches an HTML sink.
pub fn sanitize(text: &str) -> String {
    let without_tags = tag_pattern().replace_all(text, "");
    without_tags
        .chars()
        .filter(|c| !matches!(c, ';' | '\\' | '/'))
        .collect::<String>()
        .trim()
        .to_string()
}
