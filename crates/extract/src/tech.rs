// ABOUTME: Technical-detail collection that unifies incompatible key/value table shapes.
// ABOUTME: Merges list-item pairs, two-column tables, and sectioned lists into one namespaced map.

//! Technical detail collection.
//!
//! Specifications appear in at least three structurally distinct shapes
//! depending on the page variant, and more than one shape can be present
//! on a single page:
//!
//! - (a) list items of the form `"Key : Value"`, split on the first colon;
//! - (b) two-column table rows, with the key/value cells located by
//!   alternate roles (`th`/`td`, two `td`s, or styled spans);
//! - (c) sectioned lists, where the section heading becomes a namespace
//!   segment for every key beneath it.
//!
//! Every key is sanitized and prefixed with `Tech_` (plus `<Section>_`
//! for shape c). Collisions across shapes are resolved by an explicit
//! [`MergePolicy`]; distinct keys collected earlier are never erased.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::selectors::normalize_whitespace;

/// Namespace prefix applied to every technical-detail key.
pub const TECH_PREFIX: &str = "Tech_";

/// Selector configuration for the three technical-detail shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechShapes {
    /// Shape (a): alternate selectors for "Key : Value" list items.
    #[serde(default)]
    pub list_items: Vec<String>,
    /// Shape (b): alternate selectors for two-column table rows.
    #[serde(default)]
    pub table_rows: Vec<String>,
    /// Shape (c): sectioned lists with a heading namespace.
    #[serde(default)]
    pub sections: Vec<SectionShape>,
}

/// One sectioned-list shape: a container holding a heading and rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionShape {
    pub container: String,
    pub heading: String,
    pub rows: String,
}

/// Collision policy for identical sanitized keys seen more than once.
///
/// `LastWins` reproduces the observed behavior of the source pages, where
/// overlapping shapes carry identical values for identical keys.
/// `FirstWins` is the conservative alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    #[default]
    LastWins,
    FirstWins,
}

/// Sanitizes a raw key: keeps letters, digits, spaces and underscores,
/// then joins the remaining words with underscores. Idempotent.
pub fn sanitize_key(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Collects technical details from every shape present in the document.
///
/// Shapes are processed in order (a, b, c); within a shape the first
/// selector yielding any matches wins, like any other selector chain.
/// Only pairs with a non-empty sanitized key and non-empty value are kept.
pub fn collect_tech_details(
    doc: &Html,
    shapes: &TechShapes,
    policy: MergePolicy,
) -> BTreeMap<String, String> {
    let mut details = BTreeMap::new();

    for item in first_matching(doc, &shapes.list_items) {
        let text = element_text(&item);
        if let Some((key, value)) = split_colon_pair(&text) {
            insert_pair(&mut details, policy, &key, &value, None);
        }
    }

    for row in first_matching(doc, &shapes.table_rows) {
        if let Some((key, value)) = row_key_value(&row) {
            insert_pair(&mut details, policy, &key, &value, None);
        }
    }

    for shape in &shapes.sections {
        collect_section(doc, shape, policy, &mut details);
    }

    details
}

fn collect_section(
    doc: &Html,
    shape: &SectionShape,
    policy: MergePolicy,
    details: &mut BTreeMap<String, String>,
) {
    let container_sel = match Selector::parse(&shape.container) {
        Ok(s) => s,
        Err(_) => return,
    };
    let heading_sel = match Selector::parse(&shape.heading) {
        Ok(s) => s,
        Err(_) => return,
    };
    let rows_sel = match Selector::parse(&shape.rows) {
        Ok(s) => s,
        Err(_) => return,
    };

    for container in doc.select(&container_sel) {
        let section = container
            .select(&heading_sel)
            .next()
            .map(|h| sanitize_key(&element_text(&h)))
            .unwrap_or_default();
        if section.is_empty() {
            continue;
        }

        for row in container.select(&rows_sel) {
            if let Some((key, value)) = row_key_value(&row) {
                insert_pair(details, policy, &key, &value, Some(&section));
            }
        }
    }
}

/// Returns all matches of the first selector in `alternates` that yields any.
fn first_matching<'a>(doc: &'a Html, alternates: &[String]) -> Vec<ElementRef<'a>> {
    for css in alternates {
        let sel = match Selector::parse(css) {
            Ok(s) => s,
            Err(_) => continue,
        };
        let matches: Vec<ElementRef<'a>> = doc.select(&sel).collect();
        if !matches.is_empty() {
            return matches;
        }
    }
    Vec::new()
}

/// Normalized element text with directional marks stripped.
///
/// Detail rows carry U+200E/U+200F marks around the colon on some layouts.
fn element_text(el: &ElementRef) -> String {
    let text: String = el
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| *c != '\u{200e}' && *c != '\u{200f}')
        .collect();
    normalize_whitespace(&text)
}

/// Splits a `"Key : Value"` line on the first colon, trimming both sides.
fn split_colon_pair(text: &str) -> Option<(String, String)> {
    let (key, value) = text.split_once(':')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// Locates the key/value cells of a table row by alternate roles.
///
/// Tried in order: `th` + `td`, two `td`s, two styled spans. Falls back
/// to first-colon splitting of the row text.
fn row_key_value(row: &ElementRef) -> Option<(String, String)> {
    let cell_roles: [(&str, &str); 3] = [("th", "td"), ("td", "td"), ("span", "span")];

    for (key_role, value_role) in cell_roles {
        let key_sel = Selector::parse(key_role).ok()?;
        let value_sel = Selector::parse(value_role).ok()?;

        let mut keys = row.select(&key_sel);
        let mut values = row.select(&value_sel);

        if key_role == value_role {
            // Same role for both cells: take the first two in document order.
            if let (Some(k), Some(v)) = (values.next(), values.next()) {
                return Some((element_text(&k), element_text(&v)));
            }
        } else if let Some(k) = keys.next() {
            if let Some(v) = values.next() {
                return Some((element_text(&k), element_text(&v)));
            }
        }
    }

    split_colon_pair(&element_text(row))
}

fn insert_pair(
    details: &mut BTreeMap<String, String>,
    policy: MergePolicy,
    raw_key: &str,
    value: &str,
    section: Option<&str>,
) {
    let key = sanitize_key(raw_key);
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return;
    }

    let full_key = match section {
        Some(section) => format!("{}{}_{}", TECH_PREFIX, section, key),
        None => format!("{}{}", TECH_PREFIX, key),
    };

    match policy {
        MergePolicy::LastWins => {
            details.insert(full_key, value.to_string());
        }
        MergePolicy::FirstWins => {
            details.entry(full_key).or_insert_with(|| value.to_string());
        }
    }
}
