// ABOUTME: Library entry point for the prodex extraction & normalization engine.
// ABOUTME: Re-exports the public API: SelectorProfile, extract_product, ProductRecord, export helpers.

//! prodex-extract — turns one rendered product page into a normalized
//! record of commerce attributes.
//!
//! The engine is a pure, synchronous function of one parsed document:
//! no I/O, no shared mutable state, trivially safe to call concurrently
//! for distinct documents. Page acquisition and export serialization are
//! collaborator concerns and live in the CLI crate.
//!
//! # Example
//!
//! ```
//! use prodex_extract::{extract_product, RecordIdentity, SelectorProfile};
//! use scraper::Html;
//!
//! let doc = Html::parse_document("<span id='productTitle'>Widget</span>");
//! let profile = SelectorProfile::builtin();
//! let identity = RecordIdentity::now("B0TEST", "https://www.amazon.in/dp/B0TEST");
//! let record = extract_product(&doc, &profile, &identity);
//! assert_eq!(record.title, "Widget");
//! assert_eq!(record.current_price, "N/A");
//! ```

pub mod delivery;
pub mod export;
pub mod extract;
pub mod fields;
pub mod price;
pub mod profile;
pub mod record;
pub mod selectors;
pub mod tech;

pub use crate::delivery::{parse_delivery, UNPARSED_DATE};
pub use crate::export::{ordered_header, record_row};
pub use crate::extract::{extract_product, extract_product_with_policy};
pub use crate::price::{discount_percentage, numeric_value, Price, PriceSelectors, NOT_AVAILABLE};
pub use crate::profile::SelectorProfile;
pub use crate::record::{ProductRecord, RecordIdentity};
pub use crate::selectors::{resolve_all_texts, resolve_first_text, SelectorSpec};
pub use crate::tech::{collect_tech_details, sanitize_key, MergePolicy, SectionShape, TechShapes};

// The document model is the caller's: re-export scraper so downstream
// crates parse with the same version the engine queries with.
pub use scraper;
