//! Regex patterns for risky contract clauses
//!
//! All patterns are compiled case-insensitively. `.` does not cross line
//! breaks, so `a.*b` only matches when both ends sit on the same line.

use regex::{Regex, RegexBuilder};

/// Uncapped exposure to damages
pub const LIABILITY_PATTERNS: &[&str] = &[
    r"unlimited liability",
    r"without limitation",
    r"shall be liable for all",
    r"indemnify.*without limit",
    r"liability shall not be capped",
];

/// One-sided duty to indemnify and hold harmless
pub const INDEMNITY_PATTERNS: &[&str] = &[
    r"indemnify.*harmless",
    r"hold harmless",
    r"indemnify.*against all claims",
    r"indemnification.*any and all",
    r"defend.*indemnify.*hold harmless",
];

pub const NON_COMPETE_PATTERNS: &[&str] = &[
    r"non-compete",
    r"non compete",
    r"shall not compete",
    r"agree not to.*compete",
    r"competitive.*business",
    r"restrictive covenant",
];

pub const IP_ASSIGNMENT_PATTERNS: &[&str] = &[
    r"intellectual property.*assigned",
    r"all rights.*assigned",
    r"work for hire",
    r"work-for-hire",
    r"transfer.*all rights",
];

pub const TERMINATION_PATTERNS: &[&str] = &[
    r"terminate.*at will",
    r"terminate.*without cause",
    r"terminate.*any time.*without",
];

pub const RENEWAL_PATTERNS: &[&str] = &[
    r"automatic renewal",
    r"automatically renew",
    r"auto-renew",
    r"unless.*notice.*terminate",
];

/// "Net 60", "net  90" - captures the day count
pub const NET_TERMS_PATTERN: &str = r"\bnet\s+([0-9]{2,})";

/// Payment held back until the whole job is done
pub const COMPLETION_PAYMENT_PATTERN: &str = r"\b(?:up)?on completion\b";

/// Milestone schedules soften pay-on-completion
pub const MILESTONE_PATTERN: &str = r"milestone";

/// Compile a constant pattern, case-insensitive
pub fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|e| panic!("invalid built-in pattern {:?}: {}", pattern, e))
}

pub fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| compile(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        let payment: &[&str] = &[NET_TERMS_PATTERN, COMPLETION_PAYMENT_PATTERN, MILESTONE_PATTERN];
        for group in [
            LIABILITY_PATTERNS,
            INDEMNITY_PATTERNS,
            NON_COMPETE_PATTERNS,
            IP_ASSIGNMENT_PATTERNS,
            TERMINATION_PATTERNS,
            RENEWAL_PATTERNS,
            payment,
        ] {
            assert_eq!(compile_all(group).len(), group.len());
        }
    }

    #[test]
    fn test_matching_ignores_case() {
        let re = compile(LIABILITY_PATTERNS[0]);
        assert!(re.is_match("The Vendor accepts UNLIMITED LIABILITY for data loss."));
    }

    #[test]
    fn test_wildcards_stay_on_one_line() {
        let re = compile(r"indemnify.*harmless");
        assert!(re.is_match("shall indemnify and hold the Client harmless"));
        assert!(!re.is_match("shall indemnify the Client.\nThe Client is harmless."));
    }

    #[test]
    fn test_net_terms_needs_word_boundary() {
        let re = compile(NET_TERMS_PATTERN);
        assert!(re.is_match("Payment due Net 60"));
        assert!(!re.is_match("cabinet 120 units"));
        assert!(!re.is_match("Net 7"));
    }
}
