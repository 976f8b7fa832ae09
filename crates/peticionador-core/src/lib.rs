//! Draft assembly for petition responses: the thesis catalog, the draft
//! buffer, and the session state that keeps them in step.

pub mod analysis;
pub mod catalog;
pub mod contract;
pub mod draft;
mod error;
pub mod sequence;
pub mod synchronizer;
pub mod thesis;

pub use analysis::{AnalysisResult, AnalysisView, CaseStructure};
pub use catalog::{CatalogEntry, LoadReport, ThesisCatalog, ThesisView};
pub use contract::{
    AnalysisResponse, CaseData, GenerateDraftPayload, GenerationResponse, PreviewResponse,
};
pub use draft::DraftBuffer;
pub use error::{Service, SessionError, Unmet};
pub use sequence::{RequestKind, RequestSequence, Ticket};
pub use synchronizer::{ThesisDraftSynchronizer, ToggleOutcome};
pub use thesis::{Thesis, ThesisId};
