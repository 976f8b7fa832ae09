use std::fmt;

use thiserror::Error;

use crate::thesis::ThesisId;

/// Which precondition of draft generation is not met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmet {
    NoAnalysis,
    /// The analysis carries no summary to send.
    NoSummary,
    NoThesesSelected,
}

impl fmt::Display for Unmet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unmet::NoAnalysis => f.write_str("no petition has been analysed yet"),
            Unmet::NoSummary => f.write_str("the analysis has no technical summary"),
            Unmet::NoThesesSelected => f.write_str("no thesis has been selected"),
        }
    }
}

/// Remote collaborators the session exchanges payloads with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    DocumentProcessing,
    DraftGeneration,
    PreviewConversion,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::DocumentProcessing => f.write_str("document processing"),
            Service::DraftGeneration => f.write_str("draft generation"),
            Service::PreviewConversion => f.write_str("preview conversion"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown thesis id: {0}")]
    NotFound(ThesisId),

    #[error("cannot generate draft: {0}")]
    Precondition(Unmet),

    #[error("no analysis to reopen")]
    NoHistory,

    #[error("petition summary is empty")]
    EmptySummary,

    #[error("format {0} is not available; process a petition first")]
    FormatUnavailable(String),

    #[error("{service} failed: {message}")]
    Collaborator { service: Service, message: String },
}
