// ABOUTME: Ordered fallback-selector resolution over a parsed product page.
// ABOUTME: First selector yielding non-whitespace text wins; later selectors are never consulted.

//! Selector chain resolution.
//!
//! Every extracted field is driven by an ordered list of [`SelectorSpec`]s.
//! Order encodes priority, not redundancy: each entry corresponds to a
//! different known page layout, from the current markup down to legacy
//! variants.
//!
//! Key behaviors:
//! - Selectors are tried in order; the first selector yielding a
//!   non-whitespace match wins and later selectors are skipped.
//! - Text is whitespace-normalized (runs collapsed to single spaces, trimmed).
//! - Invalid CSS selector strings are treated as non-matching.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// Specifies how to select a value from the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectorSpec {
    /// A CSS selector whose inner text is the value, e.g. "#productTitle"
    Css(String),
    /// A CSS selector with attribute extraction, e.g. ["img#landingImage", "src"]
    CssAttr(Vec<String>),
}

impl Default for SelectorSpec {
    fn default() -> Self {
        SelectorSpec::Css(String::new())
    }
}

/// Collapses runs of whitespace into single spaces and trims.
pub(crate) fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves a selector chain to the first non-empty text value.
///
/// Iterates `specs` in order. For each spec, queries the document and
/// returns the first element whose normalized text (or trimmed attribute
/// value) is non-empty. Returns `None` when every spec is exhausted,
/// which callers map to the `"N/A"` sentinel.
pub fn resolve_first_text(doc: &Html, specs: &[SelectorSpec]) -> Option<String> {
    for spec in specs {
        if let Some(value) = resolve_spec_first(doc, spec) {
            return Some(value);
        }
    }
    tracing::debug!(selectors = specs.len(), "selector chain exhausted");
    None
}

/// Resolves a selector chain to all matches of the first spec that yields any.
///
/// Used for list-shaped fields (bullet points). Matches with empty
/// normalized text are dropped; if a spec yields only empty matches the
/// next spec is tried. Returns an empty vec when nothing matches.
pub fn resolve_all_texts(doc: &Html, specs: &[SelectorSpec]) -> Vec<String> {
    for spec in specs {
        let values = resolve_spec_all(doc, spec);
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}

fn resolve_spec_first(doc: &Html, spec: &SelectorSpec) -> Option<String> {
    resolve_spec_all(doc, spec).into_iter().next()
}

fn resolve_spec_all(doc: &Html, spec: &SelectorSpec) -> Vec<String> {
    match spec {
        SelectorSpec::Css(css) => select_texts(doc, css),
        SelectorSpec::CssAttr(parts) => match parts.as_slice() {
            [css, attr, ..] => select_attrs(doc, css, attr),
            [css] => select_texts(doc, css),
            [] => Vec::new(),
        },
    }
}

fn select_texts(doc: &Html, css: &str) -> Vec<String> {
    let sel = match Selector::parse(css) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    doc.select(&sel)
        .filter_map(|el| {
            let text: String = el.text().collect::<Vec<_>>().join(" ");
            let normalized = normalize_whitespace(&text);
            if normalized.is_empty() {
                None
            } else {
                Some(normalized)
            }
        })
        .collect()
}

fn select_attrs(doc: &Html, css: &str, attr: &str) -> Vec<String> {
    let sel = match Selector::parse(css) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    doc.select(&sel)
        .filter_map(|el| {
            el.value().attr(attr).and_then(|v| {
                let trimmed = v.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        })
        .collect()
}
