/// Default summary length, in characters
pub const SUMMARY_MAX_CHARS: usize = 500;

/// The first `max_chars` characters of the text, unchanged
pub fn summarize(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_text_kept_verbatim() {
        let text = "AGREEMENT\n\n1.  Parties.   This is between A and B.";
        assert_eq!(summarize(text, 500), text);
    }

    #[test]
    fn test_long_text_cut_to_prefix() {
        let text = format!("Intro. {}", "word ".repeat(200));
        let summary = summarize(&text, 500);
        assert_eq!(summary.chars().count(), 500);
        assert!(text.starts_with(&summary));
    }

    #[test]
    fn test_exact_length_not_cut() {
        let text = "a".repeat(500);
        assert_eq!(summarize(&text, 500), text);
    }

    #[test]
    fn test_multibyte_text_is_cut_on_char_boundary() {
        let text = "é".repeat(600);
        let summary = summarize(&text, 500);
        assert_eq!(summary, "é".repeat(500));
    }
}
