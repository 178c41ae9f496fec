#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// A red flag raised by one matched rule
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    pub title: String,
    pub severity: Severity,
    pub explanation: String,
    pub negotiation_tip: String,
}

/// Score band that selects the tone of the draft email
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const HIGH_THRESHOLD: u32 = 70;
    pub const MEDIUM_THRESHOLD: u32 = 40;

    pub fn from_score(score: u32) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            RiskTier::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResult {
    pub risk_score: u32, // 0..=100
    pub red_flags: Vec<Finding>,
    pub negotiation_tips: Vec<String>, // red_flags[i].negotiation_tip
    pub draft_email: String,
    pub summary: String,
    pub text_length: usize,
}

impl AnalysisResult {
    pub fn tier(&self) -> RiskTier {
        RiskTier::from_score(self.risk_score)
    }
}
