// ABOUTME: Batch orchestration: ordered identifiers in, ordered record-or-absent out.
// ABOUTME: Per-item failures are isolated; a politeness delay separates consecutive fetches.

//! Batch orchestration.
//!
//! Consumes an ordered sequence of identifiers and produces a sequence of
//! `Option<ProductRecord>` of the same length, in the same order. A
//! failed or CAPTCHA'd fetch yields `None` at that position and never
//! aborts the remaining items. Acquisition is serialized with a
//! politeness delay; the extraction step itself is the pure engine call
//! and holds no shared state.

use std::time::Duration;

use prodex_extract::scraper::Html;
use prodex_extract::{extract_product, ProductRecord, RecordIdentity, SelectorProfile};

use crate::fetch::Fetcher;

/// Scrapes a sequence of identifiers, preserving input order.
///
/// `delay` separates consecutive fetches (not applied before the first
/// or after the last).
pub async fn scrape_batch(
    fetcher: &Fetcher,
    profile: &SelectorProfile,
    asins: &[String],
    delay: Duration,
) -> Vec<Option<ProductRecord>> {
    let mut results = Vec::with_capacity(asins.len());

    for (i, asin) in asins.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match fetcher.get_product_page(asin).await {
            Ok(body) => {
                let record = {
                    let doc = Html::parse_document(&body);
                    let identity = RecordIdentity::now(asin, fetcher.product_url(asin));
                    extract_product(&doc, profile, &identity)
                };
                tracing::info!(asin = %asin, title = %record.title, "extracted product");
                results.push(Some(record));
            }
            Err(err) => {
                tracing::warn!(asin = %asin, error = %err, "skipping product");
                results.push(None);
            }
        }
    }

    results
}
