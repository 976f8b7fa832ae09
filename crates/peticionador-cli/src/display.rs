//! Card-style rendering for analysis results, thesis lists and drafts.
//!
//! Renders into a `String` so the output can be checked without a terminal.

use std::fmt::Write;

use peticionador_core::{AnalysisView, Thesis, ThesisView};

const LABEL_WIDTH: usize = 16;
const PREVIEW_CHARS: usize = 60;

// ── Public API ──

/// The results card shown after a petition is processed.
pub fn render_analysis_card(view: &AnalysisView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Resultado da análise ===");
    field(&mut out, "recorrente", &view.recorrente);
    field(&mut out, "tipo_recurso", &view.tipo_recurso);
    let _ = writeln!(out);

    let _ = writeln!(out, "Resumo");
    for line in view.resumo.lines() {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Argumentos");
    for arg in &view.argumentos {
        let _ = writeln!(out, "  - {arg}");
    }

    if !view.formats.is_empty() {
        let _ = writeln!(out);
        field(&mut out, "downloads", &view.formats.join(", "));
    }
    out
}

/// Both button lists, available first.
pub fn render_thesis_view(view: &ThesisView<'_>) -> String {
    let mut out = String::new();
    section(&mut out, "Teses disponíveis", &view.available);
    section(&mut out, "Teses aplicadas", &view.applied);
    out
}

pub fn render_draft(draft: &str) -> String {
    if draft.is_empty() {
        "=== Minuta ===\n  (vazia)\n".to_string()
    } else {
        format!("=== Minuta ===\n{draft}\n")
    }
}

// ── Section rendering ──

fn section(out: &mut String, header: &str, theses: &[&Thesis]) {
    let _ = writeln!(out, "{header} ({})", theses.len());
    for thesis in theses {
        let _ = writeln!(out, "  {}", thesis.id);
        field(out, "  label", &thesis.label);
        field(out, "  texto", &preview(&thesis.body));
    }
}

fn field(out: &mut String, name: &str, value: &str) {
    let _ = writeln!(out, "  {:<width$} {}", name, value, width = LABEL_WIDTH);
}

/// First line of `text`, cut at `PREVIEW_CHARS` characters.
fn preview(text: &str) -> String {
    let first = text.lines().next().unwrap_or("");
    if first.chars().count() > PREVIEW_CHARS {
        let cut: String = first.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}…")
    } else if text.lines().nth(1).is_some() {
        format!("{first}…")
    } else {
        first.to_string()
    }
}
