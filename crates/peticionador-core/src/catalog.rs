//! The thesis catalog and its two button views.
//!
//! Every thesis sits in exactly one view: "available" (sorted by lower-cased
//! label, ties kept in catalog order) or "applied" (in the order the theses
//! were applied).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::thesis::{Thesis, ThesisId};

/// One thesis as written in a catalog file. The id is derived from the text
/// when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub label: String,
    pub body: String,
}

impl CatalogEntry {
    pub fn into_thesis(self) -> Thesis {
        match self.id {
            Some(id) => Thesis::with_id(id, self.label, self.body),
            None => Thesis::new(self.label, self.body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The id is already taken by a thesis with a different body.
    ConflictingBody,
    /// The body renders the same draft block as one held under another id.
    DuplicateBody { existing: ThesisId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub id: ThesisId,
    pub reason: RejectReason,
}

/// Outcome of loading a batch of theses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub added: usize,
    /// Already present with the same body.
    pub skipped: usize,
    pub rejected: Vec<Rejection>,
}

/// Buttons to paint, computed from catalog state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThesisView<'a> {
    pub available: Vec<&'a Thesis>,
    pub applied: Vec<&'a Thesis>,
}

#[derive(Debug, Default)]
pub struct ThesisCatalog {
    theses: Vec<Thesis>,
    index: HashMap<ThesisId, usize>,
    /// Rendered draft block → owner. Bodies differing only in blank-line
    /// runs render the same block and must not coexist.
    by_block: HashMap<String, ThesisId>,
    applied_order: Vec<ThesisId>,
}

impl ThesisCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add theses, all unapplied. Re-loading an existing thesis is a no-op.
    pub fn load(&mut self, theses: impl IntoIterator<Item = Thesis>) -> LoadReport {
        let mut report = LoadReport::default();

        for mut thesis in theses {
            let block = thesis.block();
            if let Some(&i) = self.index.get(&thesis.id) {
                if self.theses[i].block() == block {
                    report.skipped += 1;
                } else {
                    warn!(id = %thesis.id, "thesis id already used by a different body");
                    report.rejected.push(Rejection {
                        id: thesis.id,
                        reason: RejectReason::ConflictingBody,
                    });
                }
                continue;
            }

            if let Some(existing) = self.by_block.get(&block) {
                warn!(id = %thesis.id, existing = %existing, "thesis block already in catalog");
                report.rejected.push(Rejection {
                    id: thesis.id,
                    reason: RejectReason::DuplicateBody {
                        existing: existing.clone(),
                    },
                });
                continue;
            }

            thesis.applied = false;
            self.index.insert(thesis.id.clone(), self.theses.len());
            self.by_block.insert(block, thesis.id.clone());
            self.theses.push(thesis);
            report.added += 1;
        }

        debug!(
            added = report.added,
            skipped = report.skipped,
            rejected = report.rejected.len(),
            "catalog loaded"
        );
        report
    }

    pub fn len(&self) -> usize {
        self.theses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theses.is_empty()
    }

    pub fn get(&self, id: &ThesisId) -> Option<&Thesis> {
        self.index.get(id).map(|&i| &self.theses[i])
    }

    pub fn contains(&self, id: &ThesisId) -> bool {
        self.index.contains_key(id)
    }

    /// Ids of applied theses, in application order.
    pub fn applied_ids(&self) -> &[ThesisId] {
        &self.applied_order
    }

    pub fn has_applied(&self) -> bool {
        !self.applied_order.is_empty()
    }

    /// Flip a thesis into or out of the applied view. Returns `None` for an
    /// unknown id.
    pub(crate) fn set_applied(&mut self, id: &ThesisId, applied: bool) -> Option<&Thesis> {
        let &i = self.index.get(id)?;
        let thesis = &mut self.theses[i];
        if thesis.applied != applied {
            thesis.applied = applied;
            if applied {
                self.applied_order.push(id.clone());
            } else {
                self.applied_order.retain(|a| a != id);
            }
        }
        Some(&self.theses[i])
    }

    /// Return every thesis to the available view.
    pub(crate) fn reset(&mut self) {
        for thesis in &mut self.theses {
            thesis.applied = false;
        }
        self.applied_order.clear();
    }

    pub fn available(&self) -> Vec<&Thesis> {
        let mut available: Vec<&Thesis> = self.theses.iter().filter(|t| !t.applied).collect();
        // sort_by_cached_key is stable: equal labels keep catalog order.
        available.sort_by_cached_key(|t| t.label.to_lowercase());
        available
    }

    pub fn applied(&self) -> Vec<&Thesis> {
        self.applied_order
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    pub fn view(&self) -> ThesisView<'_> {
        ThesisView {
            available: self.available(),
            applied: self.applied(),
        }
    }

    /// Both views, keeping only theses whose label contains `query`
    /// (case-insensitive). A blank query keeps everything.
    pub fn search(&self, query: &str) -> ThesisView<'_> {
        let query = query.trim().to_lowercase();
        let keep = |t: &&Thesis| query.is_empty() || t.label.to_lowercase().contains(&query);
        ThesisView {
            available: self.available().into_iter().filter(keep).collect(),
            applied: self.applied().into_iter().filter(keep).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(theses: &[&Thesis]) -> Vec<String> {
        theses.iter().map(|t| t.label.clone()).collect()
    }

    fn sample() -> ThesisCatalog {
        let mut catalog = ThesisCatalog::new();
        catalog.load(vec![
            Thesis::with_id("c", "beta", "Texto C"),
            Thesis::with_id("a", "Alpha", "Texto A"),
            Thesis::with_id("b", "Beta", "Texto B"),
            Thesis::with_id("d", "Gama", "Texto D"),
        ]);
        catalog
    }

    #[test]
    fn available_sorted_case_insensitively_and_stably() {
        let catalog = sample();
        assert_eq!(
            labels(&catalog.available()),
            vec!["Alpha", "beta", "Beta", "Gama"]
        );
    }

    #[test]
    fn applied_view_keeps_application_order() {
        let mut catalog = sample();
        catalog.set_applied(&"d".into(), true);
        catalog.set_applied(&"a".into(), true);
        assert_eq!(labels(&catalog.applied()), vec!["Gama", "Alpha"]);
        assert_eq!(labels(&catalog.available()), vec!["beta", "Beta"]);
    }

    #[test]
    fn every_thesis_in_exactly_one_view() {
        let mut catalog = sample();
        catalog.set_applied(&"b".into(), true);
        let view = catalog.view();
        assert_eq!(view.available.len() + view.applied.len(), catalog.len());
        assert!(view.applied.iter().all(|t| t.applied));
        assert!(view.available.iter().all(|t| !t.applied));
    }

    #[test]
    fn reload_is_idempotent() {
        let mut catalog = sample();
        let report = catalog.load(vec![Thesis::with_id("a", "Alpha", "Texto A")]);
        assert_eq!(report.added, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn conflicting_body_is_rejected() {
        let mut catalog = sample();
        let report = catalog.load(vec![Thesis::with_id("a", "Alpha", "Outro texto")]);
        assert_eq!(
            report.rejected,
            vec![Rejection {
                id: "a".into(),
                reason: RejectReason::ConflictingBody
            }]
        );
        assert_eq!(catalog.get(&"a".into()).unwrap().body, "Texto A");
    }

    #[test]
    fn duplicate_body_under_new_id_is_rejected() {
        let mut catalog = sample();
        let report = catalog.load(vec![Thesis::with_id("z", "Zeta", "Texto A")]);
        assert_eq!(report.added, 0);
        assert_eq!(
            report.rejected[0].reason,
            RejectReason::DuplicateBody {
                existing: "a".into()
            }
        );
        assert!(!catalog.contains(&"z".into()));
    }

    #[test]
    fn bodies_rendering_the_same_block_are_rejected() {
        let mut catalog = ThesisCatalog::new();
        let report = catalog.load(vec![
            Thesis::with_id("x", "X", "a\n\n\nb"),
            Thesis::with_id("y", "Y", "a\n\nb"),
        ]);
        assert_eq!(report.added, 1);
        assert_eq!(
            report.rejected,
            vec![Rejection {
                id: "y".into(),
                reason: RejectReason::DuplicateBody {
                    existing: "x".into()
                }
            }]
        );
        assert!(!catalog.contains(&"y".into()));
    }

    #[test]
    fn loaded_theses_start_unapplied() {
        let mut catalog = ThesisCatalog::new();
        let mut thesis = Thesis::new("Alpha", "Texto A");
        thesis.applied = true;
        catalog.load(vec![thesis]);
        assert!(!catalog.has_applied());
        assert_eq!(catalog.available().len(), 1);
    }

    #[test]
    fn reset_returns_all_to_available() {
        let mut catalog = sample();
        catalog.set_applied(&"a".into(), true);
        catalog.set_applied(&"b".into(), true);
        catalog.reset();
        assert!(catalog.applied().is_empty());
        assert_eq!(catalog.available().len(), 4);
    }

    #[test]
    fn search_filters_both_views() {
        let mut catalog = sample();
        catalog.set_applied(&"b".into(), true);
        let view = catalog.search("BET");
        assert_eq!(labels(&view.available), vec!["beta"]);
        assert_eq!(labels(&view.applied), vec!["Beta"]);
        assert_eq!(catalog.search("  ").available.len(), 3);
    }

    #[test]
    fn entry_without_id_derives_one() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"label": "Súmula 7", "body": "Reexame de provas."}"#)
                .unwrap();
        let thesis = entry.into_thesis();
        assert_eq!(thesis.id, ThesisId::derive("Súmula 7", "Reexame de provas."));
    }
}
