use super::classify::{extension_of, is_text_like};

/// Default preview length, in characters.
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

/// Build a text preview for an archive entry.
/// Returns None for entries whose extension is not text-like, or whose
/// decoded text is blank.
pub fn extract_preview(data: &[u8], filename: &str, max_chars: usize) -> Option<String> {
    if !is_text_like(&extension_of(filename)) {
        return None;
    }
    let text = String::from_utf8_lossy(data);
    truncate_chars(&text, max_chars)
}

fn truncate_chars(text: &str, max_chars: usize) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }
    // Slice on a char boundary so multi-byte text never splits.
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => Some(text[..idx].to_string()),
        None => Some(text.to_string()),
    }
}
