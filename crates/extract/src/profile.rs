// ABOUTME: SelectorProfile, the injected per-field selector configuration for one site family.
// ABOUTME: Ships a builtin Amazon profile embedded as JSON covering current and legacy layouts.

//! Selector profiles.
//!
//! A profile bundles every field's ordered selector chain plus the price
//! and technical-detail shape configuration. Profiles are plain data and
//! deserializable, so test fixtures can substitute synthetic documents
//! with their own selectors instead of relying on the builtin markup
//! knowledge.

use serde::{Deserialize, Serialize};

use crate::price::PriceSelectors;
use crate::selectors::SelectorSpec;
use crate::tech::TechShapes;

/// Embedded JSON holding the builtin Amazon selector profile.
const AMAZON_PROFILE_JSON: &str = include_str!("../data/amazon_profile.json");

/// Per-field selector configuration for a product page family.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorProfile {
    #[serde(default)]
    pub title: Vec<SelectorSpec>,
    #[serde(default)]
    pub current_price: PriceSelectors,
    #[serde(default)]
    pub original_price: PriceSelectors,
    #[serde(default)]
    pub bullet_points: Vec<SelectorSpec>,
    #[serde(default)]
    pub delivery: Vec<SelectorSpec>,
    #[serde(default)]
    pub description: Vec<SelectorSpec>,
    #[serde(default)]
    pub tech: TechShapes,
}

impl SelectorProfile {
    /// Loads the builtin Amazon profile from embedded JSON.
    ///
    /// # Panics
    ///
    /// Panics if the embedded JSON is malformed; the data ships with the
    /// crate and is covered by tests.
    pub fn builtin() -> Self {
        serde_json::from_str(AMAZON_PROFILE_JSON).expect("failed to parse builtin profile")
    }
}
