use shared_types::DocumentKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}'. Please upload PDF or DOCX files only.")]
    UnsupportedFormat(String),

    #[error("Could not parse file as {kind}: {reason}")]
    CorruptDocument { kind: DocumentKind, reason: String },

    #[error("Could not extract sufficient text (found {found} characters, need at least {minimum})")]
    InsufficientText { found: usize, minimum: usize },
}

impl ExtractionError {
    pub(crate) fn corrupt(kind: DocumentKind, reason: impl ToString) -> Self {
        ExtractionError::CorruptDocument {
            kind,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
