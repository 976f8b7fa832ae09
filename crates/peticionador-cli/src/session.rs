//! Replay a drafting session from JSON files: catalog, canned collaborator
//! responses, and a list of toggles.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::NaiveDateTime;
use clap::Args;
use peticionador_core::{
    AnalysisResponse, AnalysisResult, AnalysisView, CatalogEntry, GenerationResponse,
    SessionError, Thesis, ThesisDraftSynchronizer, ThesisId,
};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Thesis catalog: JSON array of {"label", "body", "id"?}
    #[arg(long, env = "PETICIONADOR_CATALOG")]
    pub catalog: PathBuf,

    /// Response of the document processing service
    #[arg(long)]
    pub analysis: Option<PathBuf>,

    /// Thesis id to toggle; repeat to toggle several, in order
    #[arg(long = "toggle", value_name = "ID")]
    pub toggles: Vec<String>,
}

/// Session state after replay, plus the view of the analysis if one was given.
pub struct Replay {
    pub session: ThesisDraftSynchronizer,
    pub analysis: Option<AnalysisView>,
}

pub fn read_catalog(path: &Path) -> anyhow::Result<Vec<Thesis>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let entries: Vec<CatalogEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    Ok(entries.into_iter().map(CatalogEntry::into_thesis).collect())
}

pub fn read_analysis(path: &Path) -> anyhow::Result<AnalysisResult> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading analysis {}", path.display()))?;
    let response: AnalysisResponse = serde_json::from_str(&raw)
        .with_context(|| format!("parsing analysis {}", path.display()))?;
    Ok(response.into_result()?)
}

pub fn read_generation(path: &Path) -> anyhow::Result<GenerationResponse> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading generated draft {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing generated draft {}", path.display()))
}

/// Load the catalog, adopt the analysis (if any), then apply `use_summary`
/// and the toggles in order.
///
/// An unknown toggle id only skips that toggle.
pub fn replay(args: &SessionArgs, use_summary: bool) -> anyhow::Result<Replay> {
    let mut session = ThesisDraftSynchronizer::new();
    let report = session.load_catalog(read_catalog(&args.catalog)?);
    for rejection in &report.rejected {
        warn!(id = %rejection.id, reason = ?rejection.reason, "catalog entry rejected");
    }

    let analysis = match &args.analysis {
        Some(path) => Some(session.on_analysis_complete(read_analysis(path)?)),
        None => None,
    };

    if use_summary {
        let Some(view) = &analysis else {
            bail!("--use-summary needs --analysis");
        };
        session.use_summary(&view.notes)?;
    }

    for id in &args.toggles {
        match session.toggle_thesis(&ThesisId::new(id.as_str())) {
            Ok(outcome) => info!(id = %outcome.id, applied = outcome.applied, "replayed toggle"),
            Err(err @ SessionError::NotFound(_)) => warn!(error = %err, "toggle skipped"),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(Replay { session, analysis })
}

/// Write the draft to `minuta_<stamp>.txt` under `dir`.
pub fn save_draft(dir: &Path, draft: &str, stamp: NaiveDateTime) -> anyhow::Result<PathBuf> {
    if draft.trim().is_empty() {
        bail!("draft is empty; nothing to save");
    }
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("minuta_{}.txt", stamp.format("%Y%m%d_%H%M%S")));
    fs::write(&path, draft).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "draft saved");
    Ok(path)
}
