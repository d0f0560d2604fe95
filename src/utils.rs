//! Text normalization and key helpers shared by the extractor and encoders.

/// Normalize free text for keyword matching.
///
/// Lowercases, turns literal `\n`/`\t`/`\r` escape sequences into spaces,
/// replaces every character outside `[a-z0-9#]` with a space, collapses
/// whitespace runs, and trims. The literal string `"null"` normalizes to
/// empty (upstream scrapers emit it for deleted bodies).
pub fn normalize_text<T: AsRef<str>>(text: T) -> String {
    let text = text.as_ref();
    if text.is_empty() || text == "null" {
        return String::new();
    }
    let lowered = text
        .to_lowercase()
        .replace("\\n", " ")
        .replace("\\t", " ")
        .replace("\\r", " ");

    let mut normalized = String::with_capacity(lowered.len());
    let mut seen_space = true;
    for ch in lowered.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '#' {
            normalized.push(ch);
            seen_space = false;
        } else if !seen_space {
            normalized.push(' ');
            seen_space = true;
        }
    }
    normalized.trim_end().to_string()
}

/// Return the category tag of a key: the text before the first `:`, or the
/// whole key when it carries no separator.
pub fn category_tag(key: &str) -> &str {
    key.split(':').next().unwrap_or(key)
}

/// Return the discriminator of a key: the text after the last `:`, or the
/// whole key when it carries no separator.
pub fn last_segment(key: &str) -> &str {
    key.rsplit(':').next().unwrap_or(key)
}
