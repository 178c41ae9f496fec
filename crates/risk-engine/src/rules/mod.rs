//! The fixed risk-rule table
//!
//! Rules are compiled once, on first use, and shared read-only for the life
//! of the process. Table order is the order findings are reported in.

pub mod payment;

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{Finding, Severity};

use crate::patterns::{
    compile_all, IP_ASSIGNMENT_PATTERNS, INDEMNITY_PATTERNS, LIABILITY_PATTERNS,
    NON_COMPETE_PATTERNS, RENEWAL_PATTERNS, TERMINATION_PATTERNS,
};
use payment::PaymentTermsCheck;

/// Placeholder in an explanation replaced by the concrete concerns found
pub const CONCERNS_PLACEHOLDER: &str = "{concerns}";

/// How a rule decides whether it matches
pub enum RuleMatcher {
    /// Any one pattern found anywhere in the text
    AnyPattern(Vec<Regex>),
    /// Long net terms or pay-on-completion; reports what it found
    PaymentTerms(PaymentTermsCheck),
}

impl RuleMatcher {
    /// `None` when the rule does not match, otherwise the concerns to report
    fn evaluate(&self, text: &str) -> Option<Vec<String>> {
        match self {
            RuleMatcher::AnyPattern(patterns) => patterns
                .iter()
                .any(|re| re.is_match(text))
                .then(Vec::new),
            RuleMatcher::PaymentTerms(check) => {
                let concerns = check.concerns(text);
                (!concerns.is_empty()).then_some(concerns)
            }
        }
    }
}

pub struct RiskRule {
    pub id: &'static str,
    pub title: &'static str,
    pub severity: Severity,
    pub points: u32,
    pub explanation: &'static str,
    pub negotiation_tip: &'static str,
    pub matcher: RuleMatcher,
}

impl RiskRule {
    pub fn matches(&self, text: &str) -> bool {
        self.matcher.evaluate(text).is_some()
    }

    /// Evaluate once against the full text; at most one finding per rule
    pub fn evaluate(&self, text: &str) -> Option<Finding> {
        let concerns = self.matcher.evaluate(text)?;
        Some(Finding {
            title: self.title.to_string(),
            severity: self.severity,
            explanation: self
                .explanation
                .replace(CONCERNS_PLACEHOLDER, &concerns.join(", ")),
            negotiation_tip: self.negotiation_tip.to_string(),
        })
    }
}

lazy_static! {
    static ref RULE_TABLE: Vec<RiskRule> = vec![
        RiskRule {
            id: "unlimited-liability",
            title: "Unlimited Liability",
            severity: Severity::High,
            points: 25,
            explanation: "This contract contains clauses that expose you to unlimited financial liability. This means there's no cap on the amount you could be required to pay in case of disputes or damages.",
            negotiation_tip: "Request a liability cap that's reasonable for the project scope, typically 1-2x the contract value.",
            matcher: RuleMatcher::AnyPattern(compile_all(LIABILITY_PATTERNS)),
        },
        RiskRule {
            id: "broad-indemnity",
            title: "Broad Indemnity Clause",
            severity: Severity::High,
            points: 25,
            explanation: "You're required to protect the client from all claims, damages, and losses - even those not caused by you. This could make you responsible for the client's own mistakes.",
            negotiation_tip: "Limit indemnification to claims directly arising from your negligence or breach of contract. Request mutual indemnification.",
            matcher: RuleMatcher::AnyPattern(compile_all(INDEMNITY_PATTERNS)),
        },
        RiskRule {
            id: "non-compete",
            title: "Non-Compete Clause",
            severity: Severity::Medium,
            points: 20,
            explanation: "This contract restricts your ability to work with competitors or in similar industries, potentially limiting your future income opportunities.",
            negotiation_tip: "Narrow the scope to specific direct competitors, limit the duration (e.g., 6 months), and restrict geographical area.",
            matcher: RuleMatcher::AnyPattern(compile_all(NON_COMPETE_PATTERNS)),
        },
        RiskRule {
            id: "broad-ip-assignment",
            title: "Broad IP Assignment",
            severity: Severity::Medium,
            points: 15,
            explanation: "You may be assigning all intellectual property rights, including pre-existing work and general knowledge gained during the project.",
            negotiation_tip: "Clarify that only work specifically created for this project is assigned. Retain rights to pre-existing IP and general skills.",
            matcher: RuleMatcher::AnyPattern(compile_all(IP_ASSIGNMENT_PATTERNS)),
        },
        RiskRule {
            id: "at-will-termination",
            title: "At-Will Termination",
            severity: Severity::Medium,
            points: 15,
            explanation: "The client can terminate the contract at any time without cause, leaving you without guaranteed income.",
            negotiation_tip: "Request a notice period (e.g., 30 days) and payment for work completed plus a kill fee.",
            matcher: RuleMatcher::AnyPattern(compile_all(TERMINATION_PATTERNS)),
        },
        RiskRule {
            id: "automatic-renewal",
            title: "Automatic Renewal",
            severity: Severity::Low,
            points: 10,
            explanation: "The contract automatically renews unless you actively cancel it, which could lock you into unwanted terms.",
            negotiation_tip: "Request explicit approval for renewals or shorten the notice period for termination.",
            matcher: RuleMatcher::AnyPattern(compile_all(RENEWAL_PATTERNS)),
        },
        RiskRule {
            id: "unfavorable-payment-terms",
            title: "Unfavorable Payment Terms",
            severity: Severity::Low,
            points: 10,
            explanation: "Payment terms may impact your cash flow: {concerns}.",
            negotiation_tip: "Request milestone-based payments (e.g., 30% upfront, 40% midway, 30% on completion) and Net 15 or Net 30 terms.",
            matcher: RuleMatcher::PaymentTerms(PaymentTermsCheck::default()),
        },
    ];
}

/// The process-wide rule table, in reporting order
pub fn rule_table() -> &'static [RiskRule] {
    RULE_TABLE.as_slice()
}

/// Look a rule up by its stable id
pub fn find_rule(id: &str) -> Option<&'static RiskRule> {
    rule_table().iter().find(|rule| rule.id == id)
}
