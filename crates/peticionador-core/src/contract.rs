//! Request/response shapes exchanged with the remote collaborators.
//!
//! Transport is the caller's business; these types only pin the JSON.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::error::{Service, SessionError};

/// Best-effort case metadata sent along with a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseData {
    pub recorrente: String,
    pub numero_processo: String,
}

/// Body of a draft generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateDraftPayload {
    /// The summary exactly as the processing service returned it.
    pub resumo_tecnico: String,
    /// Applied thesis bodies, in the order they were applied.
    pub teses_selecionadas: Vec<String>,
    pub tipo_recurso: String,
    pub dados_processo: CaseData,
}

/// Response of the document processing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Failed { erro: String },
    Completed(AnalysisResult),
}

impl AnalysisResponse {
    pub fn into_result(self) -> Result<AnalysisResult, SessionError> {
        match self {
            AnalysisResponse::Completed(result) => Ok(result),
            AnalysisResponse::Failed { erro } => Err(SessionError::Collaborator {
                service: Service::DocumentProcessing,
                message: erro,
            }),
        }
    }
}

/// Response of the draft generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationResponse {
    Generated { minuta_gerada: String },
    Failed { erro: String },
}

/// Response of the docx → HTML preview converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreviewResponse {
    Rendered { html: String },
    Failed { erro: String },
}

impl PreviewResponse {
    /// The HTML fragment, or the converter's message as an error. Neither
    /// outcome touches session state.
    pub fn into_html(self) -> Result<String, SessionError> {
        match self {
            PreviewResponse::Rendered { html } => Ok(html),
            PreviewResponse::Failed { erro } => Err(SessionError::Collaborator {
                service: Service::PreviewConversion,
                message: erro,
            }),
        }
    }
}
