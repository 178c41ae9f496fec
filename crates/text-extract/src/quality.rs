//! Extracted-text quality check
//!
//! A document whose fonts cannot be decoded still "extracts" to something:
//! NUL-interleaved glyph codes, replacement characters or Private Use Area
//! glyphs. Output like that must not be scored as if it were the contract.

/// More than this share of garbage characters fails the check
const GARBAGE_THRESHOLD: f64 = 0.15;

/// More than this share of Private Use Area characters fails the check
const PUA_THRESHOLD: f64 = 0.10;

/// Result of [`analyze_text_quality`]
#[derive(Debug, Clone, PartialEq)]
pub struct TextQuality {
    pub is_valid: bool,
    pub garbage_ratio: f64,
    pub private_use_area_ratio: f64,
    pub details: String,
}

/// Analyze text for encoding failures
pub fn analyze_text_quality(text: &str) -> TextQuality {
    let total_chars = text.chars().count();
    if total_chars == 0 {
        return TextQuality {
            is_valid: true,
            garbage_ratio: 0.0,
            private_use_area_ratio: 0.0,
            details: "Empty text".to_string(),
        };
    }

    let mut replacement_chars = 0usize;
    let mut private_use_chars = 0usize;
    let mut control_chars = 0usize;

    for c in text.chars() {
        match c {
            '\u{FFFD}' => replacement_chars += 1,
            '\u{E000}'..='\u{F8FF}' => private_use_chars += 1,
            '\u{0000}'..='\u{001F}' if !matches!(c, '\n' | '\r' | '\t') => control_chars += 1,
            _ => {}
        }
    }

    let garbage_ratio =
        (replacement_chars + private_use_chars + control_chars) as f64 / total_chars as f64;
    let private_use_area_ratio = private_use_chars as f64 / total_chars as f64;

    let failure = if garbage_ratio > GARBAGE_THRESHOLD {
        Some(format!(
            "High garbage ratio: {:.1}% (replacement: {}, PUA: {}, control: {})",
            garbage_ratio * 100.0,
            replacement_chars,
            private_use_chars,
            control_chars
        ))
    } else if private_use_area_ratio > PUA_THRESHOLD {
        Some(format!(
            "High Private Use Area ratio: {:.1}%",
            private_use_area_ratio * 100.0
        ))
    } else {
        None
    };

    match failure {
        Some(details) => TextQuality {
            is_valid: false,
            garbage_ratio,
            private_use_area_ratio,
            details,
        },
        None => TextQuality {
            is_valid: true,
            garbage_ratio,
            private_use_area_ratio,
            details: format!("Valid output: {:.2}% garbage", garbage_ratio * 100.0),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_contract_text() {
        let result = analyze_text_quality("The Contractor shall deliver the services.\n\tNet 30.");
        assert!(result.is_valid);
        assert_eq!(result.garbage_ratio, 0.0);
    }

    #[test]
    fn test_nul_interleaved_glyph_codes() {
        let text: String = "The Contractor accepts unlimited liability"
            .chars()
            .flat_map(|c| ['\0', c])
            .collect();
        let result = analyze_text_quality(&text);
        assert!(!result.is_valid);
        assert!(result.details.contains("control: 42"));
    }

    #[test]
    fn test_replacement_chars() {
        let result = analyze_text_quality("\u{FFFD}\u{FFFD}\u{FFFD} ok");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_private_use_area() {
        let text = format!("{}{}", "\u{E001}".repeat(2), "a".repeat(15));
        let result = analyze_text_quality(&text);
        assert!(!result.is_valid);
        assert!(result.details.starts_with("High Private Use Area ratio"));
    }

    #[test]
    fn test_sparse_noise_is_tolerated() {
        let text = format!("{}\u{FFFD}", "a".repeat(99));
        assert!(analyze_text_quality(&text).is_valid);
    }
}
