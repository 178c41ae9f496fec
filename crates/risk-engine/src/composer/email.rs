//! Draft reply email, toned by risk tier

use shared_types::{Finding, RiskTier};

const GREETING: &str = "Hi [Client Name],";
const SIGN_OFF: &str = "Best regards,\n[Your Name]";

const READY_TO_PROCEED: &str = "Subject: Contract Review - Ready to Proceed

Hi [Client Name],

I've reviewed the contract and I'm excited to move forward with this project. The terms look fair and I'm ready to sign.

Please let me know if you need any additional information.

Best regards,
[Your Name]";

struct Template {
    subject: &'static str,
    opening: &'static str,
    list_intro: &'static str,
    closing: &'static str,
}

const HIGH: Template = Template {
    subject: "Contract Review - Important Concerns to Discuss",
    opening: "I've reviewed the contract and I'm interested in working together, but I have some concerns about certain terms that I'd like to resolve before signing.",
    list_intro: "I'd like to request the following revisions:",
    closing: "I believe these modifications will make the agreement more balanced while still protecting both our interests. Once we've agreed on revised language, I'll be glad to sign.",
};

const MEDIUM: Template = Template {
    subject: "Contract Review - A Few Clauses to Discuss",
    opening: "I've reviewed the contract and I'm looking forward to working together. There are a few specific clauses I'd like to discuss.",
    list_intro: "Here are the items I'd like to discuss:",
    closing: "I'm happy to discuss these points at your convenience.",
};

const LOW: Template = Template {
    subject: "Contract Review - Ready to Proceed",
    opening: "I've reviewed the contract and I'm ready to move forward with this project. The terms look fair overall.",
    list_intro: "There are a couple of minor points we could clarify:",
    closing: "None of these need to hold up signing, so feel free to let me know how you'd like to handle them.",
};

/// Compose the email for a scored contract
///
/// Only the findings passed in are mentioned, in the order given.
pub fn draft_email(findings: &[Finding], score: u32) -> String {
    let template = match RiskTier::from_score(score) {
        RiskTier::High => &HIGH,
        RiskTier::Medium => &MEDIUM,
        RiskTier::Low if findings.is_empty() => return READY_TO_PROCEED.to_string(),
        RiskTier::Low => &LOW,
    };

    let items = findings
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{}. {}: {}", i + 1, f.title, f.negotiation_tip))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Subject: {subject}\n\n{greeting}\n\n{opening}\n\n{intro}\n\n{items}\n\n{closing}\n\nLooking forward to hearing from you.\n\n{sign_off}",
        greeting = GREETING,
        subject = template.subject,
        opening = template.opening,
        intro = template.list_intro,
        closing = template.closing,
        sign_off = SIGN_OFF,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Severity;

    fn finding(title: &str, tip: &str) -> Finding {
        Finding {
            title: title.to_string(),
            severity: Severity::High,
            explanation: String::new(),
            negotiation_tip: tip.to_string(),
        }
    }

    #[test]
    fn test_no_findings_ready_to_proceed() {
        let email = draft_email(&[], 0);
        assert!(email.starts_with("Subject: Contract Review - Ready to Proceed"));
        assert!(email.contains("I'm ready to sign"));
    }

    #[test]
    fn test_high_tier_requests_revisions() {
        let findings = vec![
            finding("Unlimited Liability", "Ask for a cap."),
            finding("Broad Indemnity Clause", "Make it mutual."),
        ];
        let email = draft_email(&findings, 75);
        assert!(email.contains("Important Concerns"));
        assert!(email.contains("before signing"));
        assert!(email.contains("1. Unlimited Liability: Ask for a cap.\n2. Broad Indemnity Clause: Make it mutual."));
    }

    #[test]
    fn test_medium_tier_discusses_clauses() {
        let findings = vec![finding("Non-Compete Clause", "Narrow it.")];
        let email = draft_email(&findings, 45);
        assert!(email.contains("A Few Clauses to Discuss"));
        assert!(email.contains("1. Non-Compete Clause: Narrow it."));
    }

    #[test]
    fn test_low_tier_notes_minor_points() {
        let findings = vec![finding("Automatic Renewal", "Opt in to renewals.")];
        let email = draft_email(&findings, 10);
        assert!(email.contains("Ready to Proceed"));
        assert!(email.contains("minor points"));
        assert!(email.contains("1. Automatic Renewal: Opt in to renewals."));
    }

    #[test]
    fn test_only_given_findings_are_mentioned() {
        let findings = vec![finding("Automatic Renewal", "Opt in.")];
        let email = draft_email(&findings, 10);
        assert!(!email.contains("2."));
        assert!(!email.contains("Liability"));
    }
}
