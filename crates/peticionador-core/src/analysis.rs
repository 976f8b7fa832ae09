//! Petition analysis results and how they render.
//!
//! The processing service may omit any field. Blank fields never reach the
//! page as empty text; each renders as its placeholder instead.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const NOT_IDENTIFIED: &str = "Não identificado";
pub const UNDETERMINED_TYPE: &str = "Indeterminado";
/// Appeal type used when the analysis could not determine one.
pub const DEFAULT_APPEAL_TYPE: &str = "REsp";
pub const NO_SUMMARY: &str = "Nenhum resumo gerado.";
pub const NO_THESIS: &str = "Nenhuma tese/argumento aplicável identificado pela IA.";

const ARGUMENTS_HEADING: &str = "Argumentos sugeridos:";

/// Summary and classification of an uploaded petition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    /// Party name.
    pub recorrente: String,
    /// Detected appeal type (RE, REsp, Agravo, ...).
    pub tipo_recurso: String,
    pub resumo: String,
    pub argumentos: Vec<String>,
    /// Output formats the service generated (`docx`, `odt`).
    pub arquivos: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_processo: Option<String>,
    /// Extracted case structure, when the service sends it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estrutura_base: Option<CaseStructure>,
}

/// Fields extracted from the petition's first page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseStructure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_processo: Option<String>,
}

impl AnalysisResult {
    /// Non-blank suggested arguments, trimmed, in service order.
    pub fn arguments(&self) -> impl Iterator<Item = &str> {
        self.argumentos
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
    }

    /// No summary and no usable argument.
    pub fn is_malformed(&self) -> bool {
        self.resumo.trim().is_empty() && self.arguments().next().is_none()
    }

    /// Appeal type to draft against, with the default token substituted for
    /// an undetermined one.
    pub fn appeal_type(&self) -> &str {
        let t = self.tipo_recurso.trim();
        if t.is_empty() || t.eq_ignore_ascii_case(UNDETERMINED_TYPE) {
            DEFAULT_APPEAL_TYPE
        } else {
            t
        }
    }

    pub fn party(&self) -> &str {
        non_blank_or(&self.recorrente, NOT_IDENTIFIED)
    }

    /// Case number, preferring the extracted structure over the top-level field.
    pub fn case_number(&self) -> &str {
        let nested = self
            .estrutura_base
            .as_ref()
            .and_then(|e| e.numero_processo.as_deref())
            .filter(|n| !n.trim().is_empty());
        non_blank_or(
            nested.or(self.numero_processo.as_deref()).unwrap_or(""),
            NOT_IDENTIFIED,
        )
    }

    pub fn has_format(&self, format: &str) -> bool {
        self.arquivos.contains(format)
    }

    /// Render instructions for the results modal and the notes field.
    pub fn view(&self) -> AnalysisView {
        let resumo = non_blank_or(&self.resumo, NO_SUMMARY).to_string();
        let argumentos: Vec<String> = self.arguments().map(str::to_string).collect();
        let notes = notes_text(&resumo, &argumentos);
        let argumentos = if argumentos.is_empty() {
            vec![NO_THESIS.to_string()]
        } else {
            argumentos
        };

        AnalysisView {
            recorrente: self.party().to_string(),
            tipo_recurso: non_blank_or(&self.tipo_recurso, UNDETERMINED_TYPE).to_string(),
            resumo,
            argumentos,
            notes,
            formats: self.arquivos.iter().cloned().collect(),
        }
    }
}

/// What the page paints after an analysis completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisView {
    pub recorrente: String,
    pub tipo_recurso: String,
    pub resumo: String,
    pub argumentos: Vec<String>,
    /// Summary plus bulleted arguments, for the user-editable notes field.
    pub notes: String,
    pub formats: Vec<String>,
}

fn notes_text(resumo: &str, argumentos: &[String]) -> String {
    if argumentos.is_empty() {
        return resumo.to_string();
    }
    let mut notes = format!("{resumo}\n\n{ARGUMENTS_HEADING}");
    for arg in argumentos {
        notes.push_str("\n- ");
        notes.push_str(arg);
    }
    notes
}

fn non_blank_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let v = value.trim();
    if v.is_empty() { placeholder } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            recorrente: "Maria da Silva".into(),
            tipo_recurso: "RE".into(),
            resumo: "Recurso contra acórdão do TJ.".into(),
            argumentos: vec!["Violação ao art. 5º".into(), "  ".into(), "Tema 339".into()],
            arquivos: ["docx".to_string(), "odt".to_string()].into(),
            numero_processo: None,
            estrutura_base: None,
        }
    }

    #[test]
    fn empty_result_renders_placeholders() {
        let view = AnalysisResult::default().view();
        assert_eq!(view.resumo, NO_SUMMARY);
        assert_eq!(view.argumentos, vec![NO_THESIS.to_string()]);
        assert_eq!(view.recorrente, NOT_IDENTIFIED);
        assert_eq!(view.tipo_recurso, UNDETERMINED_TYPE);
        assert_eq!(view.notes, NO_SUMMARY);
        assert!(view.formats.is_empty());
    }

    #[test]
    fn blank_arguments_are_dropped() {
        let result = sample();
        let args: Vec<&str> = result.arguments().collect();
        assert_eq!(args, vec!["Violação ao art. 5º", "Tema 339"]);
        assert!(!result.is_malformed());
    }

    #[test]
    fn malformed_when_no_summary_and_no_arguments() {
        let result = AnalysisResult {
            argumentos: vec!["".into(), " ".into()],
            ..Default::default()
        };
        assert!(result.is_malformed());
    }

    #[test]
    fn notes_combine_summary_and_arguments() {
        let view = sample().view();
        assert_eq!(
            view.notes,
            "Recurso contra acórdão do TJ.\n\nArgumentos sugeridos:\n- Violação ao art. 5º\n- Tema 339"
        );
        assert_eq!(view.formats, vec!["docx".to_string(), "odt".to_string()]);
    }

    #[test]
    fn undetermined_type_falls_back_to_default() {
        let mut result = sample();
        assert_eq!(result.appeal_type(), "RE");
        result.tipo_recurso = "indeterminado".into();
        assert_eq!(result.appeal_type(), DEFAULT_APPEAL_TYPE);
        result.tipo_recurso = String::new();
        assert_eq!(result.appeal_type(), DEFAULT_APPEAL_TYPE);
    }

    #[test]
    fn case_number_prefers_extracted_structure() {
        let json = r#"{
            "numero_processo": "1111111-11.2020.8.26.0001",
            "estrutura_base": {"numero_processo": "2222222-22.2021.8.26.0002"}
        }"#;
        let parsed: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.case_number(), "2222222-22.2021.8.26.0002");

        let json = r#"{
            "numero_processo": "1111111-11.2020.8.26.0001",
            "estrutura_base": {"numero_processo": " "}
        }"#;
        let parsed: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.case_number(), "1111111-11.2020.8.26.0001");
    }

    #[test]
    fn deserializes_partial_response() {
        let json = r#"{"resumo": "Resumo técnico", "arquivos": ["docx"]}"#;
        let parsed: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.resumo, "Resumo técnico");
        assert!(parsed.argumentos.is_empty());
        assert!(parsed.has_format("docx"));
        assert!(!parsed.has_format("odt"));
        assert_eq!(parsed.case_number(), NOT_IDENTIFIED);
    }
}
