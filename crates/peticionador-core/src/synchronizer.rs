//! Draft-assembly session state.
//!
//! [`ThesisDraftSynchronizer`] owns the thesis catalog, the draft buffer and
//! the current analysis, and keeps them consistent: each applied thesis has
//! one block in the draft, and the button views are always computed from
//! thesis state, never read back from the page.

use tracing::{debug, info, warn};

use crate::analysis::{AnalysisResult, AnalysisView};
use crate::catalog::{LoadReport, ThesisCatalog, ThesisView};
use crate::contract::{CaseData, GenerateDraftPayload, GenerationResponse};
use crate::draft::DraftBuffer;
use crate::error::{Service, SessionError, Unmet};
use crate::thesis::{Thesis, ThesisId};

/// Result of a toggle: enough to repaint one button and the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub id: ThesisId,
    pub applied: bool,
    pub draft: String,
}

/// One per session; construct at session start and drop at session end.
#[derive(Debug, Default)]
pub struct ThesisDraftSynchronizer {
    catalog: ThesisCatalog,
    draft: DraftBuffer,
    current_analysis: Option<AnalysisResult>,
}

impl ThesisDraftSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the theses available on the page. Does not touch the draft.
    pub fn load_catalog(&mut self, theses: impl IntoIterator<Item = Thesis>) -> LoadReport {
        let report = self.catalog.load(theses);
        info!(
            added = report.added,
            skipped = report.skipped,
            rejected = report.rejected.len(),
            total = self.catalog.len(),
            "thesis catalog loaded"
        );
        report
    }

    /// Adopt a fresh analysis: it replaces any previous one, empties the
    /// draft and returns every thesis to the available view.
    pub fn on_analysis_complete(&mut self, result: AnalysisResult) -> AnalysisView {
        if result.is_malformed() {
            warn!("analysis has neither summary nor arguments");
        }
        let view = result.view();
        self.draft.clear();
        self.catalog.reset();
        info!(
            tipo_recurso = %view.tipo_recurso,
            argumentos = result.arguments().count(),
            "analysis complete; draft cleared"
        );
        self.current_analysis = Some(result);
        view
    }

    /// Apply an unapplied thesis or withdraw an applied one.
    pub fn toggle_thesis(&mut self, id: &ThesisId) -> Result<ToggleOutcome, SessionError> {
        let thesis = self
            .catalog
            .get(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;
        let block = thesis.block();
        let applied = !thesis.applied;

        if applied {
            if !self.draft.append_block(&block) {
                debug!(id = %id, "block already in draft; leaving text unchanged");
            }
        } else if !self.draft.remove_block(&block) {
            warn!(id = %id, "applied thesis has no block in draft; leaving text unchanged");
        }
        self.draft.normalize();
        self.catalog.set_applied(id, applied);

        info!(id = %id, applied, "thesis toggled");
        Ok(ToggleOutcome {
            id: id.clone(),
            applied,
            draft: self.draft.as_str().to_string(),
        })
    }

    /// Assemble the generation request from the pristine analysis and the
    /// applied theses.
    pub fn generate_draft_request(&self) -> Result<GenerateDraftPayload, SessionError> {
        let analysis = self
            .current_analysis
            .as_ref()
            .ok_or(SessionError::Precondition(Unmet::NoAnalysis))?;
        if analysis.resumo.trim().is_empty() {
            return Err(SessionError::Precondition(Unmet::NoSummary));
        }
        if !self.catalog.has_applied() {
            return Err(SessionError::Precondition(Unmet::NoThesesSelected));
        }

        let teses_selecionadas: Vec<String> = self
            .catalog
            .applied()
            .into_iter()
            .map(|t| t.body.clone())
            .collect();

        Ok(GenerateDraftPayload {
            resumo_tecnico: analysis.resumo.clone(),
            teses_selecionadas,
            tipo_recurso: analysis.appeal_type().to_string(),
            dados_processo: CaseData {
                recorrente: analysis.party().to_string(),
                numero_processo: analysis.case_number().to_string(),
            },
        })
    }

    /// Take the generation service's answer. A generated draft replaces the
    /// buffer wholesale; a failure leaves it untouched.
    pub fn on_draft_generated(
        &mut self,
        response: GenerationResponse,
    ) -> Result<&str, SessionError> {
        let minuta = match response {
            GenerationResponse::Generated { minuta_gerada } if !minuta_gerada.trim().is_empty() => {
                minuta_gerada
            }
            GenerationResponse::Generated { .. } => {
                return Err(SessionError::Collaborator {
                    service: Service::DraftGeneration,
                    message: "empty draft returned".to_string(),
                });
            }
            GenerationResponse::Failed { erro } => {
                warn!(erro = %erro, "draft generation failed");
                return Err(SessionError::Collaborator {
                    service: Service::DraftGeneration,
                    message: erro,
                });
            }
        };

        info!(len = minuta.len(), "generated draft received");
        self.draft.replace(minuta);
        Ok(self.draft.as_str())
    }

    /// The last analysis, for redisplay without calling the service again.
    pub fn reopen_last_analysis(&self) -> Result<&AnalysisResult, SessionError> {
        self.current_analysis.as_ref().ok_or(SessionError::NoHistory)
    }

    /// Overwrite the draft with the (possibly user-edited) notes text.
    ///
    /// Thesis blocks are gone after an overwrite, so every thesis returns to
    /// the available view.
    pub fn use_summary(&mut self, notes: &str) -> Result<&str, SessionError> {
        if notes.trim().is_empty() {
            return Err(SessionError::EmptySummary);
        }
        self.draft.replace(notes);
        self.catalog.reset();
        info!("draft overwritten with summary");
        Ok(self.draft.as_str())
    }

    /// Check that the current analysis produced a file in `format`.
    pub fn ensure_format_available(&self, format: &str) -> Result<(), SessionError> {
        match &self.current_analysis {
            Some(analysis) if analysis.has_format(format) => Ok(()),
            _ => Err(SessionError::FormatUnavailable(format.to_string())),
        }
    }

    pub fn draft(&self) -> &str {
        self.draft.as_str()
    }

    pub fn thesis(&self, id: &ThesisId) -> Option<&Thesis> {
        self.catalog.get(id)
    }

    pub fn applied_ids(&self) -> &[ThesisId] {
        self.catalog.applied_ids()
    }

    pub fn catalog(&self) -> &ThesisCatalog {
        &self.catalog
    }

    pub fn view(&self) -> ThesisView<'_> {
        self.catalog.view()
    }

    pub fn search(&self, query: &str) -> ThesisView<'_> {
        self.catalog.search(query)
    }
}
