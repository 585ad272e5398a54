const SENTENCE_SEPARATOR: &str = ". ";

/// Cut `text` to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Shorten `text` to at most `max_length` characters.
///
/// Text that already fits is returned unchanged. Longer text keeps its first
/// two `". "`-separated sentences, closed with a period, then hard-truncated.
pub fn summarize(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let sentences: Vec<&str> = text.split(SENTENCE_SEPARATOR).take(2).collect();
    let summary = format!("{}.", sentences.join(SENTENCE_SEPARATOR));

    truncate_chars(&summary, max_length).to_string()
}
