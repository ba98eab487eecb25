// ABOUTME: The record assembler: runs every field extractor over one document and merges the outputs.
// ABOUTME: Pure composition; no extractor failure affects another, every miss defaults to a sentinel.

use scraper::Html;

use crate::delivery::parse_delivery;
use crate::fields::{extract_bullet_points, extract_description, extract_title};
use crate::price::{discount_percentage, extract_price};
use crate::profile::SelectorProfile;
use crate::record::{ProductRecord, RecordIdentity};
use crate::selectors::resolve_first_text;
use crate::tech::{collect_tech_details, MergePolicy};

/// Extracts one [`ProductRecord`] from a parsed document.
///
/// Each extractor runs independently against the same document; a field
/// whose selectors all miss keeps its sentinel and never disturbs the
/// others. Pure and synchronous — safe to invoke concurrently for
/// distinct documents. Uses the default tech-detail merge policy.
pub fn extract_product(
    doc: &Html,
    profile: &SelectorProfile,
    identity: &RecordIdentity,
) -> ProductRecord {
    extract_product_with_policy(doc, profile, identity, MergePolicy::default())
}

/// [`extract_product`] with an explicit tech-detail collision policy.
pub fn extract_product_with_policy(
    doc: &Html,
    profile: &SelectorProfile,
    identity: &RecordIdentity,
    policy: MergePolicy,
) -> ProductRecord {
    let mut record = ProductRecord::empty(identity);

    if let Some(title) = extract_title(doc, &profile.title) {
        record.title = title;
    }

    let current = extract_price(doc, &profile.current_price);
    let original = extract_price(doc, &profile.original_price);
    if let Some(discount) = discount_percentage(current.value, original.value) {
        record.discount_percentage = discount;
    }
    record.current_price = current.display;
    record.current_price_value = current.value;
    record.original_price = original.display;
    record.original_price_value = original.value;

    record.bullet_points = extract_bullet_points(doc, &profile.bullet_points);

    // DeliveryParsed stays "N/A" only when there is no delivery text at
    // all; present-but-unparsable text yields the parser's own sentinel.
    if let Some(raw) = resolve_first_text(doc, &profile.delivery) {
        record.delivery_parsed = parse_delivery(&raw);
        record.delivery_raw = raw;
    }

    if let Some(description) = extract_description(doc, &profile.description) {
        record.description = description;
    }

    record.tech_details = collect_tech_details(doc, &profile.tech, policy);

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PRODUCT_HTML: &str = r#"
        <!DOCTYPE html>
        <html><body>
            <span id="productTitle"> Acme Widget Deluxe (Black) </span>
            <div id="corePrice_feature_div">
                <span class="a-price"><span class="a-offscreen">₹1,499.00</span></span>
            </div>
            <span class="a-price a-text-price"><span class="a-offscreen">₹1,999.00</span></span>
            <div id="feature-bullets"><ul>
                <li><span class="a-list-item">Fast charging</span></li>
                <li><span class="a-list-item">Two year warranty</span></li>
            </ul></div>
            <div id="mir-layout-DELIVERY_BLOCK-slot-PRIMARY_DELIVERY_MESSAGE_LARGE">
                <span>FREE delivery by Monday, Mar 4</span>
            </div>
            <div id="productDescription"><p>The deluxe widget.</p></div>
            <div id="detailBullets_feature_div"><ul>
                <li>Item Weight (kg) : 1.2</li>
            </ul></div>
        </body></html>
    "#;

    #[test]
    fn full_page_populates_every_field() {
        let doc = Html::parse_document(PRODUCT_HTML);
        let profile = SelectorProfile::builtin();
        let identity = RecordIdentity::now("B0TEST", "https://www.amazon.in/dp/B0TEST");

        let record = extract_product(&doc, &profile, &identity);

        assert_eq!(record.title, "Acme Widget Deluxe (Black)");
        assert_eq!(record.current_price, "₹1,499.00");
        assert_eq!(record.current_price_value, 1499.0);
        assert_eq!(record.original_price, "₹1,999.00");
        assert_eq!(record.original_price_value, 1999.0);
        assert_eq!(record.discount_percentage, "25.0%");
        assert_eq!(
            record.bullet_points,
            vec!["Fast charging".to_string(), "Two year warranty".to_string()]
        );
        assert_eq!(record.delivery_raw, "FREE delivery by Monday, Mar 4");
        assert_eq!(record.delivery_parsed, "Monday, Mar 4");
        assert_eq!(record.description, "The deluxe widget.");
        assert_eq!(
            record.tech_details.get("Tech_Item_Weight_kg"),
            Some(&"1.2".to_string())
        );
    }

    #[test]
    fn near_empty_page_yields_full_sentinel_record() {
        let doc = Html::parse_document("<html><body><p>503</p></body></html>");
        let profile = SelectorProfile::builtin();
        let identity = RecordIdentity::now("B0NOPE", "https://www.amazon.in/dp/B0NOPE");

        let record = extract_product(&doc, &profile, &identity);

        assert_eq!(record.title, "N/A");
        assert_eq!(record.current_price, "N/A");
        assert_eq!(record.current_price_value, 0.0);
        assert_eq!(record.discount_percentage, "N/A");
        assert_eq!(record.delivery_raw, "N/A");
        assert_eq!(record.delivery_parsed, "N/A");
        assert_eq!(record.description, "N/A");
        assert!(record.bullet_points.is_empty());
        assert!(record.tech_details.is_empty());
    }

    #[test]
    fn inverted_prices_keep_displays_but_no_discount() {
        let html = r#"
            <div id="corePrice_feature_div">
                <span class="a-price"><span class="a-offscreen">₹1,999.00</span></span>
            </div>
            <span class="a-price a-text-price"><span class="a-offscreen">₹1,499.00</span></span>
        "#;
        let doc = Html::parse_document(html);
        let profile = SelectorProfile::builtin();
        let identity = RecordIdentity::now("B0INV", "https://www.amazon.in/dp/B0INV");

        let record = extract_product(&doc, &profile, &identity);

        assert_eq!(record.current_price, "₹1,999.00");
        assert_eq!(record.original_price, "₹1,499.00");
        assert_eq!(record.discount_percentage, "N/A");
    }

    #[test]
    fn unparsable_delivery_text_is_distinct_from_absent() {
        let html = r#"
            <div id="deliveryBlockMessage"><span>Arrives sometime</span></div>
        "#;
        let doc = Html::parse_document(html);
        let profile = SelectorProfile::builtin();
        let identity = RecordIdentity::now("B0DEL", "https://www.amazon.in/dp/B0DEL");

        let record = extract_product(&doc, &profile, &identity);

        assert_eq!(record.delivery_raw, "Arrives sometime");
        assert_eq!(record.delivery_parsed, "Unable to parse date");
    }
}
