//! The draft buffer ("minuta") and the block surgery behind thesis toggles.
//!
//! A thesis occupies the draft as a single block, `"- " + body`, separated
//! from its neighbours by one blank line. Removal looks up that exact text,
//! so no delimiter pattern ever has to be escaped.

use std::sync::LazyLock;

use regex::Regex;

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("invalid BLANK_RUNS regex"));

const BLOCK_SEPARATOR: &str = "\n\n";

/// Collapse runs of 3+ newlines to exactly 2 and trim outer whitespace.
pub fn normalize(text: &str) -> String {
    BLANK_RUNS.replace_all(text, BLOCK_SEPARATOR).trim().to_string()
}

/// Render a thesis body as the block it occupies in the draft.
pub fn render_block(body: &str) -> String {
    normalize(&format!("- {}", body.trim()))
}

/// The in-progress document text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftBuffer {
    text: String,
}

impl DraftBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Replace the whole buffer.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn normalize(&mut self) {
        self.text = normalize(&self.text);
    }

    /// Whether `block` appears as a whole, line-bounded block.
    pub fn contains_block(&self, block: &str) -> bool {
        find_block(&self.text, block).is_some()
    }

    /// Append `block` at the end of the buffer.
    ///
    /// Returns `false` and leaves the buffer untouched if the block is
    /// already present.
    pub fn append_block(&mut self, block: &str) -> bool {
        if self.contains_block(block) {
            return false;
        }
        if !self.text.trim().is_empty() {
            self.text.push_str(BLOCK_SEPARATOR);
        }
        self.text.push_str(block);
        true
    }

    /// Remove the first occurrence of `block`.
    ///
    /// Returns `false` and leaves the buffer untouched if it is not found.
    pub fn remove_block(&mut self, block: &str) -> bool {
        match find_block(&self.text, block) {
            Some(start) => {
                self.text.replace_range(start..start + block.len(), "");
                true
            }
            None => false,
        }
    }
}

/// Byte offset of the first occurrence of `block` that starts a line and
/// ends one.
fn find_block(haystack: &str, block: &str) -> Option<usize> {
    if block.is_empty() {
        return None;
    }
    haystack.match_indices(block).map(|(i, _)| i).find(|&start| {
        let end = start + block.len();
        let starts_line = start == 0 || haystack[..start].ends_with('\n');
        let ends_line = end == haystack.len() || haystack[end..].starts_with('\n');
        starts_line && ends_line
    })
}
