//! Thesis identity.
//!
//! A thesis id is derived from its text so the same template loaded from two
//! places lands on the same key, and two different bodies never share one:
//!
//! ("Ausência de prequestionamento", body) → "ausencia-de-prequestionamento-<12 hex digits>"
//!
//! # Derivation
//!
//! 1. Slugify the label: lower-case, fold Portuguese diacritics, collapse
//!    every run of non-alphanumerics into a single `-`
//! 2. Hash the trimmed body with SHA-256 and keep the first 12 hex digits
//! 3. Join with `-` (an empty slug falls back to the `tese` prefix)

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::draft::render_block;

const DIGEST_HEX_LEN: usize = 12;
const FALLBACK_PREFIX: &str = "tese";

/// Stable identifier of a thesis in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThesisId(String);

impl ThesisId {
    /// Wrap an explicit id as-is.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the id of a thesis from its label and body.
    pub fn derive(label: &str, body: &str) -> Self {
        let slug = slugify(label);
        let digest = body_digest(body);
        if slug.is_empty() {
            Self(format!("{FALLBACK_PREFIX}-{digest}"))
        } else {
            Self(format!("{slug}-{digest}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThesisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThesisId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A reusable legal argument template that can be inserted into the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thesis {
    pub id: ThesisId,
    /// Short button caption.
    pub label: String,
    /// Full text inserted into the draft.
    pub body: String,
    #[serde(default)]
    pub applied: bool,
}

impl Thesis {
    /// Build an unapplied thesis whose id is derived from its text.
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        let label = label.into().trim().to_string();
        let body = body.into().trim().to_string();
        let id = ThesisId::derive(&label, &body);
        Self {
            id,
            label,
            body,
            applied: false,
        }
    }

    /// Build an unapplied thesis under an explicit id.
    pub fn with_id(
        id: impl Into<String>,
        label: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: ThesisId::new(id),
            label: label.into().trim().to_string(),
            body: body.into().trim().to_string(),
            applied: false,
        }
    }

    /// The exact text this thesis occupies in the draft while applied.
    pub fn block(&self) -> String {
        render_block(&self.body)
    }
}

/// Lower-case ASCII slug of a label, with Portuguese diacritics folded.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;

    for c in s.chars().flat_map(char::to_lowercase) {
        let c = fold_diacritic(c);
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

fn body_digest(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.trim().as_bytes());
    let hex = format!("{:064x}", hasher.finalize());
    hex[..DIGEST_HEX_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_folds_accents_and_punctuation() {
        assert_eq!(
            slugify("Ausência de prequestionamento"),
            "ausencia-de-prequestionamento"
        );
        assert_eq!(slugify("RE: Súmula 284 STF"), "re-sumula-284-stf");
        assert_eq!(slugify("  --Tema 339!! "), "tema-339");
    }

    #[test]
    fn slug_of_symbols_is_empty() {
        assert_eq!(slugify("§ — ¶"), "");
    }

    #[test]
    fn derived_id_is_deterministic() {
        let a = ThesisId::derive("RE: Tema 339 do STF", "Fundamentação suficiente.");
        let b = ThesisId::derive("RE: Tema 339 do STF", "Fundamentação suficiente.");
        assert_eq!(a, b);
        assert!(a.as_str().starts_with("re-tema-339-do-stf-"));
        assert_eq!(a.as_str().len(), "re-tema-339-do-stf-".len() + DIGEST_HEX_LEN);
    }

    #[test]
    fn distinct_bodies_get_distinct_ids() {
        let a = ThesisId::derive("Súmula 7", "Reexame de provas.");
        let b = ThesisId::derive("Súmula 7", "Reexame de fatos.");
        assert_ne!(a, b);
    }

    #[test]
    fn body_whitespace_does_not_change_id() {
        let a = ThesisId::derive("Súmula 7", "Reexame de provas.");
        let b = ThesisId::derive("Súmula 7", "  Reexame de provas.\n");
        assert_eq!(a, b);
    }

    #[test]
    fn empty_label_uses_fallback_prefix() {
        let id = ThesisId::derive("", "Texto");
        assert!(id.as_str().starts_with("tese-"));
    }

    #[test]
    fn new_trims_and_starts_unapplied() {
        let t = Thesis::new("  Alpha ", "\nText A\n");
        assert_eq!(t.label, "Alpha");
        assert_eq!(t.body, "Text A");
        assert!(!t.applied);
        assert_eq!(t.id, ThesisId::derive("Alpha", "Text A"));
    }

    #[test]
    fn explicit_id_is_kept() {
        let t = Thesis::with_id("a", "Alpha", "Text A");
        assert_eq!(t.id.as_str(), "a");
        assert_eq!(t.block(), "- Text A");
    }
}
