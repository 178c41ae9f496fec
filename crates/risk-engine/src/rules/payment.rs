// Payment-term checks: the one rule with a numeric threshold
use crate::extractors::numeric::{longest_net_term_at_least, pays_only_on_completion};

/// Net terms at or beyond this many days are flagged
pub const DEFAULT_MIN_NET_DAYS: u32 = 60;

#[derive(Debug, Clone, Copy)]
pub struct PaymentTermsCheck {
    pub min_net_days: u32,
}

impl PaymentTermsCheck {
    pub fn new(min_net_days: u32) -> Self {
        Self { min_net_days }
    }

    /// Human-readable concerns, empty when the terms look fine
    pub fn concerns(&self, text: &str) -> Vec<String> {
        let mut concerns = Vec::new();

        if let Some(days) = longest_net_term_at_least(text, self.min_net_days) {
            concerns.push(format!("Payment terms of Net {} days", days));
        }

        if pays_only_on_completion(text) {
            concerns.push("Full payment only upon completion".to_string());
        }

        concerns
    }
}

impl Default for PaymentTermsCheck {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_NET_DAYS)
    }
}
