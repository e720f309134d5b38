// WHY: reference transcripts carry speaker tags, casing and punctuation that the
// automatic side never produces; normalizing only the reference makes the
// comparison tolerant without touching the evaluated text

use std::borrow::Cow;

/// Characters stripped from reference lines before comparison
pub const REMOVED_CHARS: [char; 7] = ['.', ',', ';', '"', ':', '!', '?'];

/// Elided articles split from the word they attach to ("l'enfant" -> "l' enfant")
const ELIDED_PREFIXES: [char; 3] = ['l', 'd', 's'];

/// Normalize a raw reference line into its comparable form
///
/// Drops the leading speaker/turn token, then applies [`clean_reference_text`].
/// Lines without a speaker token followed by text normalize to an empty string.
pub fn normalize_reference_line(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    normalize_reference_line_into(raw, &mut result);
    result
}

/// Normalize a raw reference line into supplied buffer to avoid allocation
pub fn normalize_reference_line_into(raw: &str, buffer: &mut String) {
    buffer.clear();

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }

    // WHY: a line with a single token has no text after its speaker tag
    let Some((_speaker, text)) = trimmed.split_once(char::is_whitespace) else {
        return;
    };

    clean_reference_text_into(text, buffer);
}

/// Lowercase, strip [`REMOVED_CHARS`], split elided articles and trim
///
/// Idempotent: cleaning already cleaned text returns it unchanged.
pub fn clean_reference_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    clean_reference_text_into(text, &mut result);
    result
}

/// Buffer-reusing variant of [`clean_reference_text`]
pub fn clean_reference_text_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let lowered: Vec<char> = text
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|ch| !REMOVED_CHARS.contains(ch))
        .collect();

    for (i, &ch) in lowered.iter().enumerate() {
        buffer.push(ch);

        if ch == '\'' && i > 0 && ELIDED_PREFIXES.contains(&lowered[i - 1]) {
            // Only split when a word follows directly
            if let Some(next) = lowered.get(i + 1) {
                if !next.is_whitespace() {
                    buffer.push(' ');
                }
            }
        }
    }

    let trimmed = buffer.trim();
    if trimmed.len() != buffer.len() {
        let trimmed_content = trimmed.to_string();
        buffer.clear();
        buffer.push_str(&trimmed_content);
    }
}

/// Remove the detached final period (" .") automatic transcripts emit
pub fn clean_evaluated_line(line: &str) -> Cow<'_, str> {
    if line.contains(" .") {
        Cow::Owned(line.replace(" .", ""))
    } else {
        Cow::Borrowed(line)
    }
}

/// Last whitespace-separated token, `None` when the text has no tokens
pub fn last_word(text: &str) -> Option<&str> {
    text.split_whitespace().next_back()
}

/// Whether a cleaned evaluated line and a normalized reference line end on the same word
///
/// Lines without tokens never match.
pub fn cut_endings_match(evaluated: &str, reference: &str) -> bool {
    match (last_word(evaluated), last_word(reference)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
