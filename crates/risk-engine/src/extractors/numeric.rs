// Numeric extraction for payment-term checks
use lazy_static::lazy_static;
use regex::Regex;

use crate::patterns::{compile, COMPLETION_PAYMENT_PATTERN, MILESTONE_PATTERN, NET_TERMS_PATTERN};

lazy_static! {
    static ref NET_TERMS: Regex = compile(NET_TERMS_PATTERN);
    static ref COMPLETION_PAYMENT: Regex = compile(COMPLETION_PAYMENT_PATTERN);
    static ref MILESTONE: Regex = compile(MILESTONE_PATTERN);
}

/// Every "Net N" day count in the text, in order of appearance
///
/// Counts too large for `u32` saturate to `u32::MAX`.
pub fn extract_net_terms(text: &str) -> Vec<u32> {
    NET_TERMS
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        // The pattern only admits digits, so a parse failure is an overflow
        .map(|days| days.as_str().parse::<u32>().unwrap_or(u32::MAX))
        .collect()
}

/// Longest "Net N" term of at least `min_days`
pub fn longest_net_term_at_least(text: &str, min_days: u32) -> Option<u32> {
    extract_net_terms(text)
        .into_iter()
        .filter(|&days| days >= min_days)
        .max()
}

/// True when payment is tied to completion and no milestone schedule is mentioned
pub fn pays_only_on_completion(text: &str) -> bool {
    COMPLETION_PAYMENT.is_match(text) && !MILESTONE.is_match(text)
}
