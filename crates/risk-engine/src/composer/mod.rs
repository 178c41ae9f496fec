//! Turns a risk assessment into the client-facing result

pub mod email;
pub mod summary;

pub use email::draft_email;
pub use summary::{summarize, SUMMARY_MAX_CHARS};

use shared_types::{AnalysisResult, ExtractedText};

use crate::RiskAssessment;

pub fn compose(text: &ExtractedText, assessment: RiskAssessment) -> AnalysisResult {
    let RiskAssessment { score, findings } = assessment;

    let negotiation_tips = findings
        .iter()
        .map(|f| f.negotiation_tip.clone())
        .collect();
    let draft_email = draft_email(&findings, score);

    AnalysisResult {
        risk_score: score,
        red_flags: findings,
        negotiation_tips,
        draft_email,
        summary: summarize(text.as_str(), SUMMARY_MAX_CHARS),
        text_length: text.len(),
    }
}
