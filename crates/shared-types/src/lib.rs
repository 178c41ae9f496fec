pub mod document;
pub mod types;

pub use document::{DocumentKind, ExtractedText};
pub use types::{AnalysisResult, Finding, RiskTier, Severity};
