//! Contract risk scoring
//!
//! Applies a fixed table of clause rules to extracted contract text and
//! produces a capped score, the findings in table order, and a composed
//! [`AnalysisResult`] with negotiation tips, a draft email and a summary.

pub mod composer;
pub mod extractors;
pub mod patterns;
pub mod rules;

pub use rules::{find_rule, rule_table, RiskRule};
pub use shared_types::{AnalysisResult, ExtractedText, Finding, RiskTier, Severity};

/// Scores are clamped to this ceiling
pub const MAX_RISK_SCORE: u32 = 100;

/// Raw scorer output, before composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub score: u32,
    pub findings: Vec<Finding>,
}

impl RiskAssessment {
    pub fn tier(&self) -> RiskTier {
        RiskTier::from_score(self.score)
    }
}

/// RiskEngine entry point
#[derive(Clone, Copy)]
pub struct RiskEngine {
    rules: &'static [RiskRule],
}

impl RiskEngine {
    pub fn new() -> Self {
        Self {
            rules: rule_table(),
        }
    }

    pub fn rules(&self) -> &'static [RiskRule] {
        self.rules
    }

    /// Evaluate every rule once, in table order
    pub fn score(&self, text: &str) -> RiskAssessment {
        let mut points = 0;
        let mut findings = Vec::new();

        for rule in self.rules {
            if let Some(finding) = rule.evaluate(text) {
                points += rule.points;
                findings.push(finding);
            }
        }

        RiskAssessment {
            score: points.min(MAX_RISK_SCORE),
            findings,
        }
    }

    /// Score and compose the full result
    pub fn analyze(&self, text: &ExtractedText) -> AnalysisResult {
        composer::compose(text, self.score(text.as_str()))
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}
